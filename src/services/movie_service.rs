//! Movie service: catalog CRUD, genre search, the featured listing and
//! favoriting from a movie.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::{MSG_ALREADY_FAVORITED, MSG_GENRE_REQUIRED};
use crate::domain::{Favorite, FeaturedMovies, Movie, MovieChanges, MovieInput, NewMovie};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::types::PaginationParams;

#[async_trait]
pub trait MovieService: Send + Sync {
    async fn get_movie(&self, id: i32) -> AppResult<Movie>;

    async fn list_movies(&self, params: PaginationParams) -> AppResult<(Vec<Movie>, u64)>;

    /// Create a movie owned by `creator`
    async fn create_movie(&self, creator: i32, input: MovieInput) -> AppResult<Movie>;

    async fn update_movie(&self, id: i32, changes: MovieChanges) -> AppResult<Movie>;

    async fn delete_movie(&self, id: i32) -> AppResult<()>;

    /// Movies with a genre name containing `genre`, case-insensitive.
    /// A missing or empty `genre` is a bad request.
    async fn filter_by_genre(&self, genre: Option<String>) -> AppResult<Vec<Movie>>;

    /// Featured movies: Action or Adventure, released after 2020-01-01,
    /// not created by an admin
    async fn filtered_movies(&self, params: PaginationParams) -> AppResult<(Vec<Movie>, u64)>;

    /// Add `movie_id` to the favorites of `user_id`
    async fn add_to_favorites(&self, user_id: i32, movie_id: i32) -> AppResult<Favorite>;
}

pub struct MovieManager<U: UnitOfWork> {
    uow: Arc<U>,
    featured: FeaturedMovies,
}

impl<U: UnitOfWork> MovieManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self {
            uow,
            featured: FeaturedMovies::default(),
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> MovieService for MovieManager<U> {
    async fn get_movie(&self, id: i32) -> AppResult<Movie> {
        self.uow.movies().find_by_id(id).await?.ok_or_not_found()
    }

    async fn list_movies(&self, params: PaginationParams) -> AppResult<(Vec<Movie>, u64)> {
        self.uow.movies().list(params).await
    }

    async fn create_movie(&self, creator: i32, input: MovieInput) -> AppResult<Movie> {
        let movie = self
            .uow
            .movies()
            .create(NewMovie {
                title: input.title,
                description: input.description,
                release_date: input.release_date,
                created_by: creator,
                genre_ids: input.genres,
            })
            .await?;

        tracing::info!(movie_id = movie.id, created_by = creator, "movie created");
        Ok(movie)
    }

    async fn update_movie(&self, id: i32, changes: MovieChanges) -> AppResult<Movie> {
        self.uow.movies().update(id, changes).await
    }

    async fn delete_movie(&self, id: i32) -> AppResult<()> {
        self.uow.movies().delete(id).await
    }

    async fn filter_by_genre(&self, genre: Option<String>) -> AppResult<Vec<Movie>> {
        let genre = genre
            .filter(|g| !g.is_empty())
            .ok_or_else(|| AppError::bad_request(MSG_GENRE_REQUIRED))?;

        self.uow.movies().filter_by_genre_name(&genre).await
    }

    async fn filtered_movies(&self, params: PaginationParams) -> AppResult<(Vec<Movie>, u64)> {
        self.uow.movies().filtered(self.featured.clone(), params).await
    }

    async fn add_to_favorites(&self, user_id: i32, movie_id: i32) -> AppResult<Favorite> {
        self.uow
            .movies()
            .find_by_id(movie_id)
            .await?
            .ok_or_not_found()?;

        let favorites = self.uow.favorites();
        if favorites.exists(user_id, movie_id).await? {
            return Err(AppError::conflict(MSG_ALREADY_FAVORITED));
        }

        favorites.create(user_id, movie_id).await
    }
}
