//! Genre handlers.

use axum::{
    extract::{Extension, State},
    response::Json,
    routing::get,
    Router,
};

use crate::api::extractors::{PageRequest, Path, ValidatedJson};
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{Action, Genre, GenreInput, GenrePatch, Resource};
use crate::errors::AppResult;
use crate::types::{Created, GenrePage, NoContent, Page};

pub fn genre_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_genres).post(create_genre))
        .route(
            "/:id",
            get(get_genre)
                .put(update_genre)
                .patch(partial_update_genre)
                .delete(delete_genre),
        )
}

/// List genres
#[utoipa::path(
    get,
    path = "/genres",
    tag = "Genres",
    security(("bearer_auth" = [])),
    params(("page" = Option<u64>, Query, description = "Page number, starting at 1"), ("page_size" = Option<u64>, Query, description = "Results per page")),
    responses(
        (status = 200, description = "One page of genres", body = GenrePage),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_genres(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    page: PageRequest,
) -> AppResult<Json<Page<Genre>>> {
    current_user.can(Resource::Genres, Action::Read)?;
    let (genres, total) = state.services.genres().list_genres(page.params).await?;
    Ok(Json(page.page(genres, total)))
}

/// Get a genre
#[utoipa::path(
    get,
    path = "/genres/{id}",
    tag = "Genres",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Genre ID")),
    responses(
        (status = 200, description = "Genre", body = Genre),
        (status = 404, description = "Genre not found")
    )
)]
pub async fn get_genre(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Genre>> {
    current_user.can(Resource::Genres, Action::Read)?;
    Ok(Json(state.services.genres().get_genre(id).await?))
}

/// Create a genre
#[utoipa::path(
    post,
    path = "/genres",
    tag = "Genres",
    security(("bearer_auth" = [])),
    request_body = GenreInput,
    responses(
        (status = 201, description = "Genre created", body = Genre),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_genre(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<GenreInput>,
) -> AppResult<Created<Genre>> {
    current_user.can(Resource::Genres, Action::Create)?;
    Ok(Created(state.services.genres().create_genre(payload).await?))
}

/// Rename a genre (admin only)
#[utoipa::path(
    put,
    path = "/genres/{id}",
    tag = "Genres",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Genre ID")),
    request_body = GenreInput,
    responses(
        (status = 200, description = "Genre updated", body = Genre),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Genre not found")
    )
)]
pub async fn update_genre(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<GenreInput>,
) -> AppResult<Json<Genre>> {
    current_user.can(Resource::Genres, Action::Update)?;
    Ok(Json(state.services.genres().update_genre(id, payload.into()).await?))
}

/// Partially update a genre (admin only)
#[utoipa::path(
    patch,
    path = "/genres/{id}",
    tag = "Genres",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Genre ID")),
    request_body = GenrePatch,
    responses(
        (status = 200, description = "Genre updated", body = Genre),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Genre not found")
    )
)]
pub async fn partial_update_genre(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<GenrePatch>,
) -> AppResult<Json<Genre>> {
    current_user.can(Resource::Genres, Action::Update)?;
    Ok(Json(state.services.genres().update_genre(id, payload).await?))
}

/// Delete a genre (admin only); movies keep existing without it
#[utoipa::path(
    delete,
    path = "/genres/{id}",
    tag = "Genres",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Genre ID")),
    responses(
        (status = 204, description = "Genre deleted"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Genre not found")
    )
)]
pub async fn delete_genre(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<NoContent> {
    current_user.can(Resource::Genres, Action::Delete)?;
    state.services.genres().delete_genre(id).await?;
    Ok(NoContent)
}
