//! Genre repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};

use super::base::{fetch_page, icontains};
use super::entities::genre::{self, ActiveModel, Entity as GenreEntity};
use crate::domain::Genre;
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait GenreRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Genre>>;

    /// One page of genres ordered by id
    async fn list(&self, params: PaginationParams) -> AppResult<(Vec<Genre>, u64)>;

    /// One page of genres ordered by name, optionally narrowed by a
    /// case-insensitive name search
    async fn search(
        &self,
        query: Option<String>,
        params: PaginationParams,
    ) -> AppResult<(Vec<Genre>, u64)>;

    async fn create(&self, name: String) -> AppResult<Genre>;

    async fn update(&self, id: i32, name: Option<String>) -> AppResult<Genre>;

    /// Delete a genre; movies lose the link but survive
    async fn delete(&self, id: i32) -> AppResult<()>;
}

pub struct GenreStore {
    db: DatabaseConnection,
}

impl GenreStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl GenreRepository for GenreStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Genre>> {
        let result = GenreEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Genre::from))
    }

    async fn list(&self, params: PaginationParams) -> AppResult<(Vec<Genre>, u64)> {
        let query = GenreEntity::find().order_by_asc(genre::Column::Id);
        let (models, total) = fetch_page(query, &self.db, params).await?;
        Ok((models.into_iter().map(Genre::from).collect(), total))
    }

    async fn search(
        &self,
        query: Option<String>,
        params: PaginationParams,
    ) -> AppResult<(Vec<Genre>, u64)> {
        let mut select = GenreEntity::find()
            .order_by_asc(genre::Column::Name)
            .order_by_asc(genre::Column::Id);
        if let Some(q) = query.as_deref().filter(|q| !q.is_empty()) {
            select = select.filter(icontains(genre::Column::Name, q));
        }

        let (models, total) = fetch_page(select, &self.db, params).await?;
        Ok((models.into_iter().map(Genre::from).collect(), total))
    }

    async fn create(&self, name: String) -> AppResult<Genre> {
        let model = ActiveModel {
            id: NotSet,
            name: Set(name),
        }
        .insert(&self.db)
        .await?;

        Ok(Genre::from(model))
    }

    async fn update(&self, id: i32, name: Option<String>) -> AppResult<Genre> {
        let genre = GenreEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let Some(name) = name else {
            return Ok(Genre::from(genre));
        };

        let mut active: ActiveModel = genre.into();
        active.name = Set(name);
        let model = active.update(&self.db).await?;
        Ok(Genre::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = GenreEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
