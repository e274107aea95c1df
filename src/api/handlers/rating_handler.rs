//! Rating handlers. The owner of a new rating is always the caller.

use axum::{
    extract::{Extension, State},
    response::Json,
    routing::get,
    Router,
};

use crate::api::extractors::{PageRequest, Path, ValidatedJson};
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{Action, RatingInput, RatingPatch, RatingResponse, Resource};
use crate::errors::AppResult;
use crate::types::{Created, NoContent, Page, RatingPage};

pub fn rating_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_ratings).post(create_rating))
        .route(
            "/:id",
            get(get_rating)
                .put(update_rating)
                .patch(partial_update_rating)
                .delete(delete_rating),
        )
}

/// List ratings
#[utoipa::path(
    get,
    path = "/ratings",
    tag = "Ratings",
    security(("bearer_auth" = [])),
    params(("page" = Option<u64>, Query, description = "Page number, starting at 1"), ("page_size" = Option<u64>, Query, description = "Results per page")),
    responses(
        (status = 200, description = "One page of ratings", body = RatingPage),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_ratings(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    page: PageRequest,
) -> AppResult<Json<Page<RatingResponse>>> {
    current_user.can(Resource::Ratings, Action::Read)?;
    let (ratings, total) = state.services.ratings().list_ratings(page.params).await?;
    Ok(Json(page.page(ratings, total).map(RatingResponse::from)))
}

/// Get a rating
#[utoipa::path(
    get,
    path = "/ratings/{id}",
    tag = "Ratings",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Rating ID")),
    responses(
        (status = 200, description = "Rating", body = RatingResponse),
        (status = 404, description = "Rating not found")
    )
)]
pub async fn get_rating(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<RatingResponse>> {
    current_user.can(Resource::Ratings, Action::Read)?;
    let rating = state.services.ratings().get_rating(id).await?;
    Ok(Json(RatingResponse::from(rating)))
}

/// Rate a movie as the caller
#[utoipa::path(
    post,
    path = "/ratings",
    tag = "Ratings",
    security(("bearer_auth" = [])),
    request_body = RatingInput,
    responses(
        (status = 201, description = "Rating created", body = RatingResponse),
        (status = 400, description = "Score out of range or movie already rated")
    )
)]
pub async fn create_rating(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RatingInput>,
) -> AppResult<Created<RatingResponse>> {
    current_user.can(Resource::Ratings, Action::Create)?;
    let rating = state
        .services
        .ratings()
        .create_rating(current_user.id, payload.movie, payload.score)
        .await?;
    Ok(Created(RatingResponse::from(rating)))
}

async fn change_rating(
    state: &AppState,
    current_user: &CurrentUser,
    id: i32,
    patch: RatingPatch,
) -> AppResult<RatingResponse> {
    let ratings = state.services.ratings();
    let existing = ratings.get_rating(id).await?;
    current_user.can_on(Resource::Ratings, Action::Update, existing.user_id)?;

    let rating = ratings.update_rating(id, patch).await?;
    Ok(RatingResponse::from(rating))
}

/// Replace a rating (owner or admin)
#[utoipa::path(
    put,
    path = "/ratings/{id}",
    tag = "Ratings",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Rating ID")),
    request_body = RatingInput,
    responses(
        (status = 200, description = "Rating updated", body = RatingResponse),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Rating not found")
    )
)]
pub async fn update_rating(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<RatingInput>,
) -> AppResult<Json<RatingResponse>> {
    Ok(Json(change_rating(&state, &current_user, id, payload.into()).await?))
}

/// Partially update a rating (owner or admin)
#[utoipa::path(
    patch,
    path = "/ratings/{id}",
    tag = "Ratings",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Rating ID")),
    request_body = RatingPatch,
    responses(
        (status = 200, description = "Rating updated", body = RatingResponse),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Rating not found")
    )
)]
pub async fn partial_update_rating(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<RatingPatch>,
) -> AppResult<Json<RatingResponse>> {
    Ok(Json(change_rating(&state, &current_user, id, payload).await?))
}

/// Delete a rating (owner or admin)
#[utoipa::path(
    delete,
    path = "/ratings/{id}",
    tag = "Ratings",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Rating ID")),
    responses(
        (status = 204, description = "Rating deleted"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Rating not found")
    )
)]
pub async fn delete_rating(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<NoContent> {
    let ratings = state.services.ratings();
    let existing = ratings.get_rating(id).await?;
    current_user.can_on(Resource::Ratings, Action::Delete, existing.user_id)?;

    ratings.delete_rating(id).await?;
    Ok(NoContent)
}
