//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

mod base;
pub(crate) mod entities;
mod favorite_repository;
mod genre_repository;
mod movie_repository;
mod rating_repository;
mod user_repository;

pub use favorite_repository::{FavoriteRepository, FavoriteStore};
pub use genre_repository::{GenreRepository, GenreStore};
pub use movie_repository::{MovieRepository, MovieStore};
pub use rating_repository::{RatingRepository, RatingStore};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use favorite_repository::MockFavoriteRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use genre_repository::MockGenreRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use movie_repository::MockMovieRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use rating_repository::MockRatingRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
