//! Infrastructure layer - External systems integration
//!
//! Database connection, migrations, repositories and the Unit of Work
//! that hands repositories to services.

pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use repositories::{
    FavoriteRepository, FavoriteStore, GenreRepository, GenreStore, MovieRepository, MovieStore,
    RatingRepository, RatingStore, UserRepository, UserStore,
};
pub use unit_of_work::{Persistence, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{
    MockFavoriteRepository, MockGenreRepository, MockMovieRepository, MockRatingRepository,
    MockUserRepository,
};
