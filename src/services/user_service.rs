//! User service - account management for administrators.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::MSG_USERNAME_TAKEN;
use crate::domain::{NewUser, Password, User, UserChanges, UserInput, UserPatch};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::types::PaginationParams;

#[async_trait]
pub trait UserService: Send + Sync {
    async fn get_user(&self, id: i32) -> AppResult<User>;

    async fn list_users(&self, params: PaginationParams) -> AppResult<(Vec<User>, u64)>;

    /// Create an account with the requested role
    async fn create_user(&self, input: UserInput) -> AppResult<User>;

    async fn update_user(&self, id: i32, patch: UserPatch) -> AppResult<User>;

    /// Delete an account and, by cascade, its movies, favorites and ratings
    async fn delete_user(&self, id: i32) -> AppResult<()>;
}

pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn ensure_username_free(&self, username: &str, owner: Option<i32>) -> AppResult<()> {
        match self.uow.users().find_by_username(username).await? {
            Some(existing) if Some(existing.id) != owner => {
                Err(AppError::conflict(MSG_USERNAME_TAKEN))
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn get_user(&self, id: i32) -> AppResult<User> {
        self.uow.users().find_by_id(id).await?.ok_or_not_found()
    }

    async fn list_users(&self, params: PaginationParams) -> AppResult<(Vec<User>, u64)> {
        self.uow.users().list(params).await
    }

    async fn create_user(&self, input: UserInput) -> AppResult<User> {
        self.ensure_username_free(&input.username, None).await?;

        let password_hash = Password::new_optional(input.password.as_deref())?.into_string();
        let user = self
            .uow
            .users()
            .create(NewUser {
                username: input.username,
                email: input.email.unwrap_or_default(),
                first_name: input.first_name.unwrap_or_default(),
                last_name: input.last_name.unwrap_or_default(),
                password_hash,
                role: input.role,
            })
            .await?;

        tracing::info!(user_id = user.id, role = %user.role, "user created");
        Ok(user)
    }

    async fn update_user(&self, id: i32, patch: UserPatch) -> AppResult<User> {
        if let Some(username) = patch.username.as_deref() {
            self.ensure_username_free(username, Some(id)).await?;
        }

        let password_hash = match patch.password.as_deref() {
            Some(plain) => Some(Password::new(plain)?.into_string()),
            None => None,
        };

        let changes = UserChanges {
            username: patch.username,
            email: patch.email,
            first_name: patch.first_name,
            last_name: patch.last_name,
            password_hash,
            role: patch.role,
            is_active: patch.is_active,
        };
        self.uow.users().update(id, changes).await
    }

    async fn delete_user(&self, id: i32) -> AppResult<()> {
        self.uow.users().delete(id).await?;
        tracing::info!(user_id = id, "user deleted");
        Ok(())
    }
}
