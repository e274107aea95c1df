//! JWT authentication middleware.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
    Extension,
};

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::domain::{authorize, Action, Resource, User, UserRole};
use crate::errors::{AppError, AppResult};

/// Authenticated caller, resolved from the bearer token
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: i32,
    pub username: String,
    pub role: UserRole,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Check the access policy for an action that targets no particular row.
    pub fn can(&self, resource: Resource, action: Action) -> AppResult<()> {
        authorize(self.role, false, resource, action)
    }

    /// Check the access policy for an action on a row owned by `owner_id`.
    pub fn can_on(&self, resource: Resource, action: Action, owner_id: i32) -> AppResult<()> {
        authorize(self.role, owner_id == self.id, resource, action)
    }
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            role: user.role,
        }
    }
}

/// JWT authentication middleware.
///
/// Resolves the bearer token to an active account and injects
/// [`CurrentUser`] into the request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix(BEARER_TOKEN_PREFIX))
        .ok_or(AppError::Unauthorized)?;

    let user = state.services.auth().authenticate(token).await?;
    tracing::debug!(user_id = user.id, "request authenticated");

    request.extensions_mut().insert(CurrentUser::from(user));

    Ok(next.run(request).await)
}

/// Admin console guard; runs after [`auth_middleware`].
pub async fn require_admin(
    Extension(current_user): Extension<CurrentUser>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    current_user.can(Resource::AdminConsole, Action::Read)?;
    Ok(next.run(request).await)
}
