//! Favorite service.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::MSG_ALREADY_FAVORITED;
use crate::domain::{Favorite, FeaturedFavorites};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::types::PaginationParams;

#[async_trait]
pub trait FavoriteService: Send + Sync {
    async fn get_favorite(&self, id: i32) -> AppResult<Favorite>;

    async fn list_favorites(&self, params: PaginationParams) -> AppResult<(Vec<Favorite>, u64)>;

    /// Favorite `movie_id` for `user_id`
    async fn create_favorite(&self, user_id: i32, movie_id: i32) -> AppResult<Favorite>;

    /// Point an existing favorite at another movie
    async fn update_favorite(&self, id: i32, movie_id: Option<i32>) -> AppResult<Favorite>;

    async fn delete_favorite(&self, id: i32) -> AppResult<()>;

    /// Featured favorites: owned by user 2 or of a movie rated above 4,
    /// of a Drama, and without "Horror" in the title
    async fn filtered_favorites(
        &self,
        params: PaginationParams,
    ) -> AppResult<(Vec<Favorite>, u64)>;
}

pub struct FavoriteManager<U: UnitOfWork> {
    uow: Arc<U>,
    featured: FeaturedFavorites,
}

impl<U: UnitOfWork> FavoriteManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self {
            uow,
            featured: FeaturedFavorites::default(),
        }
    }
}

/// Reject references to movies that do not exist.
pub(super) async fn ensure_movie_exists<U: UnitOfWork>(uow: &U, movie_id: i32) -> AppResult<()> {
    if uow.movies().find_by_id(movie_id).await?.is_none() {
        return Err(AppError::bad_request(format!(
            "Invalid pk \"{}\" - object does not exist.",
            movie_id
        )));
    }
    Ok(())
}

#[async_trait]
impl<U: UnitOfWork> FavoriteService for FavoriteManager<U> {
    async fn get_favorite(&self, id: i32) -> AppResult<Favorite> {
        self.uow.favorites().find_by_id(id).await?.ok_or_not_found()
    }

    async fn list_favorites(&self, params: PaginationParams) -> AppResult<(Vec<Favorite>, u64)> {
        self.uow.favorites().list(params).await
    }

    async fn create_favorite(&self, user_id: i32, movie_id: i32) -> AppResult<Favorite> {
        ensure_movie_exists(self.uow.as_ref(), movie_id).await?;

        let favorites = self.uow.favorites();
        if favorites.exists(user_id, movie_id).await? {
            return Err(AppError::conflict(MSG_ALREADY_FAVORITED));
        }

        favorites.create(user_id, movie_id).await
    }

    async fn update_favorite(&self, id: i32, movie_id: Option<i32>) -> AppResult<Favorite> {
        let favorites = self.uow.favorites();
        let existing = favorites.find_by_id(id).await?.ok_or_not_found()?;

        let Some(movie_id) = movie_id.filter(|m| *m != existing.movie_id) else {
            return Ok(existing);
        };

        ensure_movie_exists(self.uow.as_ref(), movie_id).await?;
        if favorites.exists(existing.user_id, movie_id).await? {
            return Err(AppError::conflict(MSG_ALREADY_FAVORITED));
        }

        favorites.update(id, movie_id).await
    }

    async fn delete_favorite(&self, id: i32) -> AppResult<()> {
        self.uow.favorites().delete(id).await
    }

    async fn filtered_favorites(
        &self,
        params: PaginationParams,
    ) -> AppResult<(Vec<Favorite>, u64)> {
        self.uow
            .favorites()
            .filtered(self.featured.clone(), params)
            .await
    }
}
