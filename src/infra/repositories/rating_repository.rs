//! Rating repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use super::base::fetch_page;
use super::entities::rating;
use crate::config::MSG_ALREADY_RATED;
use crate::domain::Rating;
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait RatingRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Rating>>;

    /// One page of ratings ordered by id
    async fn list(&self, params: PaginationParams) -> AppResult<(Vec<Rating>, u64)>;

    /// One page of ratings, most recent first
    async fn list_newest(&self, params: PaginationParams) -> AppResult<(Vec<Rating>, u64)>;

    /// Whether `user_id` already rated `movie_id`
    async fn exists(&self, user_id: i32, movie_id: i32) -> AppResult<bool>;

    /// Insert a rating; a repeated (user, movie) pair is a conflict
    async fn create(&self, user_id: i32, movie_id: i32, score: i16) -> AppResult<Rating>;

    async fn update(&self, id: i32, movie_id: Option<i32>, score: Option<i16>) -> AppResult<Rating>;

    async fn delete(&self, id: i32) -> AppResult<()>;
}

pub struct RatingStore {
    db: DatabaseConnection,
}

impl RatingStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RatingRepository for RatingStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Rating>> {
        let result = rating::Entity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Rating::from))
    }

    async fn list(&self, params: PaginationParams) -> AppResult<(Vec<Rating>, u64)> {
        let query = rating::Entity::find().order_by_asc(rating::Column::Id);
        let (models, total) = fetch_page(query, &self.db, params).await?;
        Ok((models.into_iter().map(Rating::from).collect(), total))
    }

    async fn list_newest(&self, params: PaginationParams) -> AppResult<(Vec<Rating>, u64)> {
        let query = rating::Entity::find().order_by_desc(rating::Column::Id);
        let (models, total) = fetch_page(query, &self.db, params).await?;
        Ok((models.into_iter().map(Rating::from).collect(), total))
    }

    async fn exists(&self, user_id: i32, movie_id: i32) -> AppResult<bool> {
        let count = rating::Entity::find()
            .filter(rating::Column::UserId.eq(user_id))
            .filter(rating::Column::MovieId.eq(movie_id))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    async fn create(&self, user_id: i32, movie_id: i32, score: i16) -> AppResult<Rating> {
        let model = rating::ActiveModel {
            id: NotSet,
            user_id: Set(user_id),
            movie_id: Set(movie_id),
            score: Set(score),
            rated_at: Set(chrono::Utc::now()),
        }
        .insert(&self.db)
        .await
        .map_err(|e| AppError::from_write(e, MSG_ALREADY_RATED))?;

        Ok(Rating::from(model))
    }

    async fn update(&self, id: i32, movie_id: Option<i32>, score: Option<i16>) -> AppResult<Rating> {
        let existing = rating::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: rating::ActiveModel = existing.clone().into();
        if let Some(movie_id) = movie_id {
            active.movie_id = Set(movie_id);
        }
        if let Some(score) = score {
            active.score = Set(score);
        }

        if !active.is_changed() {
            return Ok(Rating::from(existing));
        }

        let model = active
            .update(&self.db)
            .await
            .map_err(|e| AppError::from_write(e, MSG_ALREADY_RATED))?;

        Ok(Rating::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = rating::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
