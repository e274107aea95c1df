//! Authentication service: registration, login and bearer-token checks.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::config::{Config, MSG_USERNAME_TAKEN, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};
use crate::domain::{NewUser, Password, User, UserRole};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Verified against when the username is unknown, so a missing account
/// costs the same as a wrong password.
const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$y8Uo2eK1yBqjQ0cXZ0m0w3JQ1mY4Gz4p3m2V7QmGx5c";

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i32,
    pub username: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// Token response returned after successful authentication
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token expiration time in seconds
    #[schema(example = 86400)]
    pub expires_in: i64,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a `user`-role account
    async fn register(
        &self,
        username: String,
        password: String,
        email: Option<String>,
    ) -> AppResult<User>;

    /// Login and return JWT token
    async fn login(&self, username: String, password: String) -> AppResult<TokenResponse>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;

    /// Resolve a bearer token to an active account
    async fn authenticate(&self, token: &str) -> AppResult<User>;
}

fn generate_token(user: &User, config: &Config) -> AppResult<TokenResponse> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.jwt_expiration_hours);

    let claims = Claims {
        sub: user.id,
        username: user.username.clone(),
        role: user.role.to_string(),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok(TokenResponse {
        access_token: token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in: config.jwt_expiration_hours * SECONDS_PER_HOUR,
    })
}

fn verify_token_internal(token: &str, config: &Config) -> AppResult<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    config: Config,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(uow: Arc<U>, config: Config) -> Self {
        Self { uow, config }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn register(
        &self,
        username: String,
        password: String,
        email: Option<String>,
    ) -> AppResult<User> {
        if self.uow.users().find_by_username(&username).await?.is_some() {
            return Err(AppError::conflict(MSG_USERNAME_TAKEN));
        }

        let password_hash = Password::new(&password)?.into_string();
        let user = self
            .uow
            .users()
            .create(NewUser {
                username,
                email: email.unwrap_or_default(),
                first_name: String::new(),
                last_name: String::new(),
                password_hash,
                role: UserRole::User,
            })
            .await?;

        tracing::info!(user_id = user.id, "user registered");
        Ok(user)
    }

    async fn login(&self, username: String, password: String) -> AppResult<TokenResponse> {
        let user = self
            .uow
            .users()
            .find_by_username(&username)
            .await?
            .filter(|u| u.is_active);

        let stored = Password::from_hash(
            user.as_ref()
                .map(|u| u.password_hash.clone())
                .unwrap_or_else(|| DUMMY_HASH.to_string()),
        );
        let password_valid = stored.verify(&password);

        match user {
            Some(user) if password_valid => generate_token(&user, &self.config),
            _ => Err(AppError::InvalidCredentials),
        }
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        verify_token_internal(token, &self.config)
    }

    async fn authenticate(&self, token: &str) -> AppResult<User> {
        let claims = self.verify_token(token)?;

        match self.uow.users().find_by_id(claims.sub).await? {
            Some(user) if user.is_active => Ok(user),
            _ => Err(AppError::Unauthorized),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{MockUserRepository, Persistence};
    use crate::services::test_support::Mocks;

    fn config() -> Config {
        Config::new("sqlite::memory:", "a-very-long-secret-used-only-in-tests!").unwrap()
    }

    fn with_users(users: MockUserRepository) -> Authenticator<Persistence> {
        Authenticator::new(Mocks { users, ..Default::default() }.into_uow(), config())
    }

    fn stored_user(password: &str, is_active: bool) -> User {
        User {
            id: 2,
            username: "ripley".into(),
            email: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            password_hash: Password::new(password).unwrap().into_string(),
            role: UserRole::User,
            is_active,
            date_joined: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_register_rejects_taken_username() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_username()
            .returning(|_| Ok(Some(stored_user("nostromo-1979", true))));
        users.expect_create().never();

        let result = with_users(users)
            .register("ripley".into(), "nostromo-1979".into(), None)
            .await;

        match result {
            Err(AppError::Conflict(msg)) => assert_eq!(msg, MSG_USERNAME_TAKEN),
            other => panic!("expected conflict, got {:?}", other.map(|u| u.id)),
        }
    }

    #[tokio::test]
    async fn test_login_issues_verifiable_token() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_username()
            .returning(|_| Ok(Some(stored_user("nostromo-1979", true))));
        let auth = with_users(users);

        let token = auth
            .login("ripley".into(), "nostromo-1979".into())
            .await
            .unwrap();
        let claims = auth.verify_token(&token.access_token).unwrap();

        assert_eq!(claims.sub, 2);
        assert_eq!(claims.role, "user");
        assert_eq!(token.token_type, "Bearer");
    }

    #[tokio::test]
    async fn test_login_rejects_wrong_password_and_inactive() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(Some(stored_user("nostromo-1979", true))));
        let auth = with_users(users);
        let result = auth.login("ripley".into(), "wrong-password".into()).await;
        assert!(matches!(result, Err(AppError::InvalidCredentials)));

        let mut users = MockUserRepository::new();
        users
            .expect_find_by_username()
            .returning(|_| Ok(Some(stored_user("nostromo-1979", false))));
        let auth = with_users(users);
        let result = auth.login("ripley".into(), "nostromo-1979".into()).await;
        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_unknown_user() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_username().returning(|_| Ok(None));

        let result = with_users(users)
            .login("nobody".into(), "whatever-password".into())
            .await;
        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let auth = with_users(MockUserRepository::new());
        assert!(matches!(auth.verify_token("not.a.jwt"), Err(AppError::Jwt(_))));
    }
}
