//! Genre service.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{Genre, GenreInput, GenrePatch};
use crate::errors::{AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::types::PaginationParams;

#[async_trait]
pub trait GenreService: Send + Sync {
    async fn get_genre(&self, id: i32) -> AppResult<Genre>;

    async fn list_genres(&self, params: PaginationParams) -> AppResult<(Vec<Genre>, u64)>;

    async fn create_genre(&self, input: GenreInput) -> AppResult<Genre>;

    async fn update_genre(&self, id: i32, patch: GenrePatch) -> AppResult<Genre>;

    async fn delete_genre(&self, id: i32) -> AppResult<()>;
}

pub struct GenreManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> GenreManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> GenreService for GenreManager<U> {
    async fn get_genre(&self, id: i32) -> AppResult<Genre> {
        self.uow.genres().find_by_id(id).await?.ok_or_not_found()
    }

    async fn list_genres(&self, params: PaginationParams) -> AppResult<(Vec<Genre>, u64)> {
        self.uow.genres().list(params).await
    }

    async fn create_genre(&self, input: GenreInput) -> AppResult<Genre> {
        self.uow.genres().create(input.name).await
    }

    async fn update_genre(&self, id: i32, patch: GenrePatch) -> AppResult<Genre> {
        self.uow.genres().update(id, patch.name).await
    }

    async fn delete_genre(&self, id: i32) -> AppResult<()> {
        self.uow.genres().delete(id).await
    }
}
