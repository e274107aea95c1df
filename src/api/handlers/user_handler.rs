//! User account handlers. Only admins manage accounts.

use axum::{
    extract::{Extension, State},
    response::Json,
    routing::get,
    Router,
};

use crate::api::extractors::{PageRequest, Path, ValidatedJson};
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{Action, Resource, UserInput, UserPatch, UserResponse};
use crate::errors::AppResult;
use crate::types::{Created, NoContent, Page, UserPage};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route(
            "/:id",
            get(get_user)
                .put(update_user)
                .patch(partial_update_user)
                .delete(delete_user),
        )
}

/// List users (admin only)
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("page" = Option<u64>, Query, description = "Page number, starting at 1"), ("page_size" = Option<u64>, Query, description = "Results per page")),
    responses(
        (status = 200, description = "One page of users", body = UserPage),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin only")
    )
)]
pub async fn list_users(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    page: PageRequest,
) -> AppResult<Json<Page<UserResponse>>> {
    current_user.can(Resource::Users, Action::Read)?;
    let (users, total) = state.services.users().list_users(page.params).await?;
    Ok(Json(page.page(users, total).map(UserResponse::from)))
}

/// Get a user (admin only)
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 403, description = "Admin only"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<UserResponse>> {
    current_user.can(Resource::Users, Action::Read)?;
    let user = state.services.users().get_user(id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Create a user (admin only)
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = UserInput,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Validation error or username taken"),
        (status = 403, description = "Admin only")
    )
)]
pub async fn create_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UserInput>,
) -> AppResult<Created<UserResponse>> {
    current_user.can(Resource::Users, Action::Create)?;
    let user = state.services.users().create_user(payload).await?;
    Ok(Created(UserResponse::from(user)))
}

/// Replace a user (admin only)
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    request_body = UserInput,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 403, description = "Admin only"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UserInput>,
) -> AppResult<Json<UserResponse>> {
    current_user.can(Resource::Users, Action::Update)?;
    let user = state.services.users().update_user(id, payload.into()).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Partially update a user (admin only)
#[utoipa::path(
    patch,
    path = "/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    request_body = UserPatch,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 403, description = "Admin only"),
        (status = 404, description = "User not found")
    )
)]
pub async fn partial_update_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UserPatch>,
) -> AppResult<Json<UserResponse>> {
    current_user.can(Resource::Users, Action::Update)?;
    let user = state.services.users().update_user(id, payload).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Delete a user (admin only); their movies, favorites and ratings go too
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<NoContent> {
    current_user.can(Resource::Users, Action::Delete)?;
    state.services.users().delete_user(id).await?;
    Ok(NoContent)
}
