//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::config::{ROLE_ADMIN, ROLE_USER};

/// User roles enumeration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    User,
    Admin,
}

impl UserRole {
    /// Check if this role has admin privileges
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    /// Stored representation of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => ROLE_ADMIN,
            UserRole::User => ROLE_USER,
        }
    }
}

impl From<&str> for UserRole {
    fn from(s: &str) -> Self {
        match s {
            ROLE_ADMIN => UserRole::Admin,
            _ => UserRole::User,
        }
    }
}

impl From<UserRole> for String {
    fn from(role: UserRole) -> Self {
        role.as_str().to_string()
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: UserRole,
    pub is_active: bool,
    pub date_joined: DateTime<Utc>,
}

impl User {
    /// Check if user has admin role
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Fields for inserting a user row
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub role: UserRole,
}

/// Partial update of a user row; `None` leaves the column untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserChanges {
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password_hash: Option<String>,
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
}

/// User creation and full update payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UserInput {
    #[validate(length(min = 1, max = 150, message = "Username must be 1-150 characters"))]
    #[schema(example = "cinephile")]
    pub username: String,
    /// Role, defaults to `user`
    #[serde(default)]
    pub role: UserRole,
    /// Plain-text password; omitted means the account cannot log in
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "SecurePass123!", min_length = 8)]
    pub password: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "user@example.com")]
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// User partial update payload
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UserPatch {
    #[validate(length(min = 1, max = 150, message = "Username must be 1-150 characters"))]
    pub username: Option<String>,
    pub role: Option<UserRole>,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_active: Option<bool>,
}

impl From<UserInput> for UserPatch {
    fn from(input: UserInput) -> Self {
        Self {
            username: Some(input.username),
            role: Some(input.role),
            password: input.password,
            email: Some(input.email.unwrap_or_default()),
            first_name: Some(input.first_name.unwrap_or_default()),
            last_name: Some(input.last_name.unwrap_or_default()),
            is_active: None,
        }
    }
}

/// User response (safe to return to client)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    /// Unique user identifier
    #[schema(example = 7)]
    pub id: i32,
    #[schema(example = "cinephile")]
    pub username: String,
    #[schema(example = "user")]
    pub role: UserRole,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            role: user.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip_through_storage_string() {
        assert_eq!(UserRole::from(String::from(UserRole::Admin).as_str()), UserRole::Admin);
        assert_eq!(UserRole::from("user"), UserRole::User);
        assert_eq!(UserRole::from("superhero"), UserRole::User);
    }

    #[test]
    fn test_role_defaults_to_user() {
        let input: UserInput = serde_json::from_str(r#"{"username": "neo"}"#).unwrap();
        assert_eq!(input.role, UserRole::User);
    }

    #[test]
    fn test_response_hides_account_fields() {
        let user = User {
            id: 3,
            username: "trinity".into(),
            email: "t@example.com".into(),
            first_name: String::new(),
            last_name: String::new(),
            password_hash: "secret-hash".into(),
            role: UserRole::Admin,
            is_active: true,
            date_joined: Utc::now(),
        };

        let json = serde_json::to_value(UserResponse::from(user)).unwrap();
        assert_eq!(json, serde_json::json!({"id": 3, "username": "trinity", "role": "admin"}));
    }

    #[test]
    fn test_short_password_fails_validation() {
        let input = UserInput {
            username: "morpheus".into(),
            role: UserRole::User,
            password: Some("short".into()),
            email: None,
            first_name: None,
            last_name: None,
        };
        assert!(input.validate().is_err());
    }
}
