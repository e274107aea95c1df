//! Service Container - Centralized service access.
//!
//! Handlers reach every use case through one cloneable container that
//! depends on service traits, not implementations.

use std::sync::Arc;

use super::{
    AdminService, AuthService, FavoriteService, GenreService, MovieService, RatingService,
    UserService,
};
use crate::config::Config;
use crate::infra::{Persistence, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;

    fn users(&self) -> Arc<dyn UserService>;

    fn genres(&self) -> Arc<dyn GenreService>;

    fn movies(&self) -> Arc<dyn MovieService>;

    fn favorites(&self) -> Arc<dyn FavoriteService>;

    fn ratings(&self) -> Arc<dyn RatingService>;

    fn admin(&self) -> Arc<dyn AdminService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
    genre_service: Arc<dyn GenreService>,
    movie_service: Arc<dyn MovieService>,
    favorite_service: Arc<dyn FavoriteService>,
    rating_service: Arc<dyn RatingService>,
    admin_service: Arc<dyn AdminService>,
}

impl Services {
    /// Wire every service to one Unit of Work.
    pub fn from_uow<U: UnitOfWork + 'static>(uow: Arc<U>, config: Config) -> Self {
        use super::{
            AdminConsole, Authenticator, FavoriteManager, GenreManager, MovieManager,
            RatingManager, UserManager,
        };

        Self {
            auth_service: Arc::new(Authenticator::new(uow.clone(), config)),
            user_service: Arc::new(UserManager::new(uow.clone())),
            genre_service: Arc::new(GenreManager::new(uow.clone())),
            movie_service: Arc::new(MovieManager::new(uow.clone())),
            favorite_service: Arc::new(FavoriteManager::new(uow.clone())),
            rating_service: Arc::new(RatingManager::new(uow.clone())),
            admin_service: Arc::new(AdminConsole::new(uow)),
        }
    }

    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        Self::from_uow(Arc::new(Persistence::new(db)), config)
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn genres(&self) -> Arc<dyn GenreService> {
        self.genre_service.clone()
    }

    fn movies(&self) -> Arc<dyn MovieService> {
        self.movie_service.clone()
    }

    fn favorites(&self) -> Arc<dyn FavoriteService> {
        self.favorite_service.clone()
    }

    fn ratings(&self) -> Arc<dyn RatingService> {
        self.rating_service.clone()
    }

    fn admin(&self) -> Arc<dyn AdminService> {
        self.admin_service.clone()
    }
}
