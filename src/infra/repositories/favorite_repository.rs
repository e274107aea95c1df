//! Favorite repository.

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{
    sea_query::Query, ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    JoinType, NotSet, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
};

use super::base::{fetch_page, icontains};
use super::entities::{favorite, movie, rating, user};
use super::movie_repository::movies_with_genre_named;
use crate::config::MSG_ALREADY_FAVORITED;
use crate::domain::{Favorite, FavoriteDetail, FeaturedFavorites};
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Favorite>>;

    /// One page of favorites ordered by id
    async fn list(&self, params: PaginationParams) -> AppResult<(Vec<Favorite>, u64)>;

    /// Whether `user_id` already favorited `movie_id`
    async fn exists(&self, user_id: i32, movie_id: i32) -> AppResult<bool>;

    /// Insert a favorite; a repeated (user, movie) pair is a conflict
    async fn create(&self, user_id: i32, movie_id: i32) -> AppResult<Favorite>;

    /// Point a favorite at another movie
    async fn update(&self, id: i32, movie_id: i32) -> AppResult<Favorite>;

    async fn delete(&self, id: i32) -> AppResult<()>;

    /// One page of favorites matching the featured rule, each favorite once
    async fn filtered(
        &self,
        rule: FeaturedFavorites,
        params: PaginationParams,
    ) -> AppResult<(Vec<Favorite>, u64)>;

    /// Admin search over username and movie title
    async fn search(
        &self,
        query: Option<String>,
        params: PaginationParams,
    ) -> AppResult<(Vec<FavoriteDetail>, u64)>;

    /// Every favorite of a movie with the owner's username, ordered by id
    async fn for_movie(&self, movie_id: i32) -> AppResult<Vec<FavoriteDetail>>;
}

pub struct FavoriteStore {
    db: DatabaseConnection,
}

impl FavoriteStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Resolve usernames and movie titles for a batch of favorites.
    async fn with_details(&self, favorites: Vec<favorite::Model>) -> AppResult<Vec<FavoriteDetail>> {
        if favorites.is_empty() {
            return Ok(Vec::new());
        }

        let user_ids: Vec<i32> = favorites.iter().map(|f| f.user_id).collect();
        let movie_ids: Vec<i32> = favorites.iter().map(|f| f.movie_id).collect();

        let usernames: HashMap<i32, String> = user::Entity::find()
            .filter(user::Column::Id.is_in(user_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|u| (u.id, u.username))
            .collect();
        let titles: HashMap<i32, String> = movie::Entity::find()
            .filter(movie::Column::Id.is_in(movie_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|m| (m.id, m.title))
            .collect();

        Ok(favorites
            .into_iter()
            .map(|f| FavoriteDetail {
                username: usernames.get(&f.user_id).cloned().unwrap_or_default(),
                movie_title: titles.get(&f.movie_id).cloned().unwrap_or_default(),
                favorite: Favorite::from(f),
            })
            .collect())
    }
}

#[async_trait]
impl FavoriteRepository for FavoriteStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Favorite>> {
        let result = favorite::Entity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Favorite::from))
    }

    async fn list(&self, params: PaginationParams) -> AppResult<(Vec<Favorite>, u64)> {
        let query = favorite::Entity::find().order_by_asc(favorite::Column::Id);
        let (models, total) = fetch_page(query, &self.db, params).await?;
        Ok((models.into_iter().map(Favorite::from).collect(), total))
    }

    async fn exists(&self, user_id: i32, movie_id: i32) -> AppResult<bool> {
        let count = favorite::Entity::find()
            .filter(favorite::Column::UserId.eq(user_id))
            .filter(favorite::Column::MovieId.eq(movie_id))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    async fn create(&self, user_id: i32, movie_id: i32) -> AppResult<Favorite> {
        let model = favorite::ActiveModel {
            id: NotSet,
            user_id: Set(user_id),
            movie_id: Set(movie_id),
            added_at: Set(chrono::Utc::now()),
        }
        .insert(&self.db)
        .await
        .map_err(|e| AppError::from_write(e, MSG_ALREADY_FAVORITED))?;

        Ok(Favorite::from(model))
    }

    async fn update(&self, id: i32, movie_id: i32) -> AppResult<Favorite> {
        let existing = favorite::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        if existing.movie_id == movie_id {
            return Ok(Favorite::from(existing));
        }

        let mut active: favorite::ActiveModel = existing.into();
        active.movie_id = Set(movie_id);
        let model = active
            .update(&self.db)
            .await
            .map_err(|e| AppError::from_write(e, MSG_ALREADY_FAVORITED))?;

        Ok(Favorite::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = favorite::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    async fn filtered(
        &self,
        rule: FeaturedFavorites,
        params: PaginationParams,
    ) -> AppResult<(Vec<Favorite>, u64)> {
        let highly_rated = Query::select()
            .column(rating::Column::MovieId)
            .from(rating::Entity)
            .and_where(rating::Column::Score.gt(rule.min_score))
            .to_owned();
        let excluded_titles = Query::select()
            .column(movie::Column::Id)
            .from(movie::Entity)
            .and_where(icontains(movie::Column::Title, &rule.excluded_title))
            .to_owned();

        let query = favorite::Entity::find()
            .filter(
                Condition::any()
                    .add(favorite::Column::UserId.eq(rule.user_id))
                    .add(favorite::Column::MovieId.in_subquery(highly_rated)),
            )
            .filter(favorite::Column::MovieId.in_subquery(movies_with_genre_named(&rule.genre)))
            .filter(favorite::Column::MovieId.not_in_subquery(excluded_titles))
            .order_by_asc(favorite::Column::Id);

        let (models, total) = fetch_page(query, &self.db, params).await?;
        Ok((models.into_iter().map(Favorite::from).collect(), total))
    }

    async fn search(
        &self,
        query: Option<String>,
        params: PaginationParams,
    ) -> AppResult<(Vec<FavoriteDetail>, u64)> {
        let mut select = favorite::Entity::find()
            .join(JoinType::InnerJoin, favorite::Relation::User.def())
            .join(JoinType::InnerJoin, favorite::Relation::Movie.def())
            .order_by_asc(favorite::Column::Id);

        if let Some(q) = query.as_deref().filter(|q| !q.is_empty()) {
            select = select.filter(
                Condition::any()
                    .add(icontains(user::Column::Username, q))
                    .add(icontains(movie::Column::Title, q)),
            );
        }

        let (models, total) = fetch_page(select, &self.db, params).await?;
        Ok((self.with_details(models).await?, total))
    }

    async fn for_movie(&self, movie_id: i32) -> AppResult<Vec<FavoriteDetail>> {
        let models = favorite::Entity::find()
            .filter(favorite::Column::MovieId.eq(movie_id))
            .order_by_asc(favorite::Column::Id)
            .all(&self.db)
            .await?;
        self.with_details(models).await
    }
}
