//! Unit of Work: one place to reach every repository.
//!
//! Services depend on [`UnitOfWork`] rather than on concrete stores, so
//! tests can swap in mocked repositories.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::repositories::{
    FavoriteRepository, FavoriteStore, GenreRepository, GenreStore, MovieRepository, MovieStore,
    RatingRepository, RatingStore, UserRepository, UserStore,
};

/// Centralized repository access for services.
pub trait UnitOfWork: Send + Sync {
    fn users(&self) -> Arc<dyn UserRepository>;

    fn genres(&self) -> Arc<dyn GenreRepository>;

    fn movies(&self) -> Arc<dyn MovieRepository>;

    fn favorites(&self) -> Arc<dyn FavoriteRepository>;

    fn ratings(&self) -> Arc<dyn RatingRepository>;
}

/// SeaORM-backed UnitOfWork
pub struct Persistence {
    users: Arc<dyn UserRepository>,
    genres: Arc<dyn GenreRepository>,
    movies: Arc<dyn MovieRepository>,
    favorites: Arc<dyn FavoriteRepository>,
    ratings: Arc<dyn RatingRepository>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            users: Arc::new(UserStore::new(db.clone())),
            genres: Arc::new(GenreStore::new(db.clone())),
            movies: Arc::new(MovieStore::new(db.clone())),
            favorites: Arc::new(FavoriteStore::new(db.clone())),
            ratings: Arc::new(RatingStore::new(db)),
        }
    }

    /// Assemble from individual repositories (mocks in tests).
    pub fn from_parts(
        users: Arc<dyn UserRepository>,
        genres: Arc<dyn GenreRepository>,
        movies: Arc<dyn MovieRepository>,
        favorites: Arc<dyn FavoriteRepository>,
        ratings: Arc<dyn RatingRepository>,
    ) -> Self {
        Self {
            users,
            genres,
            movies,
            favorites,
            ratings,
        }
    }
}

impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn genres(&self) -> Arc<dyn GenreRepository> {
        self.genres.clone()
    }

    fn movies(&self) -> Arc<dyn MovieRepository> {
        self.movies.clone()
    }

    fn favorites(&self) -> Arc<dyn FavoriteRepository> {
        self.favorites.clone()
    }

    fn ratings(&self) -> Arc<dyn RatingRepository> {
        self.ratings.clone()
    }
}
