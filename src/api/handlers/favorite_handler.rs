//! Favorite handlers. The owner of a new favorite is always the caller.

use axum::{
    extract::{Extension, State},
    response::Json,
    routing::get,
    Router,
};

use crate::api::extractors::{PageRequest, Path, ValidatedJson};
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{Action, FavoriteInput, FavoritePatch, FavoriteResponse, Resource};
use crate::errors::AppResult;
use crate::types::{Created, FavoritePage, NoContent, Page};

pub fn favorite_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_favorites).post(create_favorite))
        .route(
            "/:id",
            get(get_favorite)
                .put(update_favorite)
                .patch(partial_update_favorite)
                .delete(delete_favorite),
        )
}

/// List favorites
#[utoipa::path(
    get,
    path = "/favorites",
    tag = "Favorites",
    security(("bearer_auth" = [])),
    params(("page" = Option<u64>, Query, description = "Page number, starting at 1"), ("page_size" = Option<u64>, Query, description = "Results per page")),
    responses(
        (status = 200, description = "One page of favorites", body = FavoritePage),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_favorites(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    page: PageRequest,
) -> AppResult<Json<Page<FavoriteResponse>>> {
    current_user.can(Resource::Favorites, Action::Read)?;
    let (favorites, total) = state.services.favorites().list_favorites(page.params).await?;
    Ok(Json(page.page(favorites, total).map(FavoriteResponse::from)))
}

/// Get a favorite
#[utoipa::path(
    get,
    path = "/favorites/{id}",
    tag = "Favorites",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Favorite ID")),
    responses(
        (status = 200, description = "Favorite", body = FavoriteResponse),
        (status = 404, description = "Favorite not found")
    )
)]
pub async fn get_favorite(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<FavoriteResponse>> {
    current_user.can(Resource::Favorites, Action::Read)?;
    let favorite = state.services.favorites().get_favorite(id).await?;
    Ok(Json(FavoriteResponse::from(favorite)))
}

/// Favorite a movie as the caller
#[utoipa::path(
    post,
    path = "/favorites",
    tag = "Favorites",
    security(("bearer_auth" = [])),
    request_body = FavoriteInput,
    responses(
        (status = 201, description = "Favorite created", body = FavoriteResponse),
        (status = 400, description = "Movie is already in favorites.")
    )
)]
pub async fn create_favorite(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<FavoriteInput>,
) -> AppResult<Created<FavoriteResponse>> {
    current_user.can(Resource::Favorites, Action::Create)?;
    let favorite = state
        .services
        .favorites()
        .create_favorite(current_user.id, payload.movie)
        .await?;
    Ok(Created(FavoriteResponse::from(favorite)))
}

async fn change_favorite(
    state: &AppState,
    current_user: &CurrentUser,
    id: i32,
    patch: FavoritePatch,
) -> AppResult<FavoriteResponse> {
    let favorites = state.services.favorites();
    let existing = favorites.get_favorite(id).await?;
    current_user.can_on(Resource::Favorites, Action::Update, existing.user_id)?;

    let favorite = favorites.update_favorite(id, patch.movie).await?;
    Ok(FavoriteResponse::from(favorite))
}

/// Replace a favorite (owner or admin)
#[utoipa::path(
    put,
    path = "/favorites/{id}",
    tag = "Favorites",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Favorite ID")),
    request_body = FavoriteInput,
    responses(
        (status = 200, description = "Favorite updated", body = FavoriteResponse),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Favorite not found")
    )
)]
pub async fn update_favorite(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<FavoriteInput>,
) -> AppResult<Json<FavoriteResponse>> {
    Ok(Json(change_favorite(&state, &current_user, id, payload.into()).await?))
}

/// Partially update a favorite (owner or admin)
#[utoipa::path(
    patch,
    path = "/favorites/{id}",
    tag = "Favorites",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Favorite ID")),
    request_body = FavoritePatch,
    responses(
        (status = 200, description = "Favorite updated", body = FavoriteResponse),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Favorite not found")
    )
)]
pub async fn partial_update_favorite(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<FavoritePatch>,
) -> AppResult<Json<FavoriteResponse>> {
    Ok(Json(change_favorite(&state, &current_user, id, payload).await?))
}

/// Delete a favorite (owner or admin)
#[utoipa::path(
    delete,
    path = "/favorites/{id}",
    tag = "Favorites",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Favorite ID")),
    responses(
        (status = 204, description = "Favorite deleted"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Favorite not found")
    )
)]
pub async fn delete_favorite(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<NoContent> {
    let favorites = state.services.favorites();
    let existing = favorites.get_favorite(id).await?;
    current_user.can_on(Resource::Favorites, Action::Delete, existing.user_id)?;

    favorites.delete_favorite(id).await?;
    Ok(NoContent)
}
