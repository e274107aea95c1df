//! User repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};

use super::base::fetch_page;
use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::config::MSG_USERNAME_TAKEN;
use crate::domain::{NewUser, User, UserChanges};
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>>;

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Users with the given ids, in no particular order
    async fn find_by_ids(&self, ids: Vec<i32>) -> AppResult<Vec<User>>;

    /// One page of users ordered by id, plus the total count
    async fn list(&self, params: PaginationParams) -> AppResult<(Vec<User>, u64)>;

    /// One page of users, most recently created first
    async fn list_newest(&self, params: PaginationParams) -> AppResult<(Vec<User>, u64)>;

    /// Insert a user; a taken username is a conflict
    async fn create(&self, user: NewUser) -> AppResult<User>;

    async fn update(&self, id: i32, changes: UserChanges) -> AppResult<User>;

    /// Delete a user together with everything they own
    async fn delete(&self, id: i32) -> AppResult<()>;
}

/// SeaORM implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(User::from))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await?;

        Ok(result.map(User::from))
    }

    async fn find_by_ids(&self, ids: Vec<i32>) -> AppResult<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = UserEntity::find()
            .filter(user::Column::Id.is_in(ids))
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn list(&self, params: PaginationParams) -> AppResult<(Vec<User>, u64)> {
        let query = UserEntity::find().order_by_asc(user::Column::Id);
        let (models, total) = fetch_page(query, &self.db, params).await?;
        Ok((models.into_iter().map(User::from).collect(), total))
    }

    async fn list_newest(&self, params: PaginationParams) -> AppResult<(Vec<User>, u64)> {
        let query = UserEntity::find().order_by_desc(user::Column::Id);
        let (models, total) = fetch_page(query, &self.db, params).await?;
        Ok((models.into_iter().map(User::from).collect(), total))
    }

    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let active_model = ActiveModel {
            id: NotSet,
            username: Set(new_user.username),
            email: Set(new_user.email),
            first_name: Set(new_user.first_name),
            last_name: Set(new_user.last_name),
            password_hash: Set(new_user.password_hash),
            role: Set(new_user.role.to_string()),
            is_active: Set(true),
            date_joined: Set(chrono::Utc::now()),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| AppError::from_write(e, MSG_USERNAME_TAKEN))?;

        Ok(User::from(model))
    }

    async fn update(&self, id: i32, changes: UserChanges) -> AppResult<User> {
        let user = UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = user.clone().into();

        if let Some(username) = changes.username {
            active.username = Set(username);
        }
        if let Some(email) = changes.email {
            active.email = Set(email);
        }
        if let Some(first_name) = changes.first_name {
            active.first_name = Set(first_name);
        }
        if let Some(last_name) = changes.last_name {
            active.last_name = Set(last_name);
        }
        if let Some(password_hash) = changes.password_hash {
            active.password_hash = Set(password_hash);
        }
        if let Some(role) = changes.role {
            active.role = Set(role.to_string());
        }
        if let Some(is_active) = changes.is_active {
            active.is_active = Set(is_active);
        }

        if !active.is_changed() {
            return Ok(User::from(user));
        }

        let model = active
            .update(&self.db)
            .await
            .map_err(|e| AppError::from_write(e, MSG_USERNAME_TAKEN))?;

        Ok(User::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = UserEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
