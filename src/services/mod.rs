//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They reach repositories through the Unit of
//! Work and are exposed to handlers as traits.

mod admin_service;
mod auth_service;
pub mod container;
mod favorite_service;
mod genre_service;
mod movie_service;
mod rating_service;
mod user_service;

pub use container::{ServiceContainer, Services};

pub use admin_service::{AdminConsole, AdminService};
pub use auth_service::{AuthService, Authenticator, Claims, TokenResponse};
pub use favorite_service::{FavoriteManager, FavoriteService};
pub use genre_service::{GenreManager, GenreService};
pub use movie_service::{MovieManager, MovieService};
pub use rating_service::{RatingManager, RatingService};
pub use user_service::{UserManager, UserService};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use crate::infra::{
        MockFavoriteRepository, MockGenreRepository, MockMovieRepository, MockRatingRepository,
        MockUserRepository, Persistence,
    };

    /// Repository mocks; anything left at default panics if called.
    #[derive(Default)]
    pub(crate) struct Mocks {
        pub users: MockUserRepository,
        pub genres: MockGenreRepository,
        pub movies: MockMovieRepository,
        pub favorites: MockFavoriteRepository,
        pub ratings: MockRatingRepository,
    }

    impl Mocks {
        pub(crate) fn into_uow(self) -> Arc<Persistence> {
            Arc::new(Persistence::from_parts(
                Arc::new(self.users),
                Arc::new(self.genres),
                Arc::new(self.movies),
                Arc::new(self.favorites),
                Arc::new(self.ratings),
            ))
        }
    }
}
