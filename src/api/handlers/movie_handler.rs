//! Movie handlers, including genre search and favoriting from a movie.

use axum::{
    extract::{Extension, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::extractors::{PageRequest, Path, Query, ValidatedJson};
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{Action, FavoriteResponse, MovieInput, MoviePatch, MovieResponse, Resource};
use crate::errors::AppResult;
use crate::types::{Created, MoviePage, NoContent, Page};

/// Query for the genre search
#[derive(Debug, Deserialize, IntoParams)]
pub struct GenreFilter {
    /// Case-insensitive fragment of a genre name
    pub genre: Option<String>,
}

pub fn movie_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_movies).post(create_movie))
        .route("/filter_by_genre", get(filter_by_genre))
        .route(
            "/:id",
            get(get_movie)
                .put(update_movie)
                .patch(partial_update_movie)
                .delete(delete_movie),
        )
        .route("/:id/add_to_favorites", post(add_to_favorites))
}

/// List movies
#[utoipa::path(
    get,
    path = "/movies",
    tag = "Movies",
    security(("bearer_auth" = [])),
    params(("page" = Option<u64>, Query, description = "Page number, starting at 1"), ("page_size" = Option<u64>, Query, description = "Results per page")),
    responses(
        (status = 200, description = "One page of movies", body = MoviePage),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Invalid page")
    )
)]
pub async fn list_movies(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    page: PageRequest,
) -> AppResult<Json<Page<MovieResponse>>> {
    current_user.can(Resource::Movies, Action::Read)?;
    let (movies, total) = state.services.movies().list_movies(page.params).await?;
    Ok(Json(page.page(movies, total).map(MovieResponse::from)))
}

/// Get a movie
#[utoipa::path(
    get,
    path = "/movies/{id}",
    tag = "Movies",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Movie ID")),
    responses(
        (status = 200, description = "Movie", body = MovieResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Movie not found")
    )
)]
pub async fn get_movie(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<MovieResponse>> {
    current_user.can(Resource::Movies, Action::Read)?;
    let movie = state.services.movies().get_movie(id).await?;
    Ok(Json(MovieResponse::from(movie)))
}

/// Create a movie owned by the caller
#[utoipa::path(
    post,
    path = "/movies",
    tag = "Movies",
    security(("bearer_auth" = [])),
    request_body = MovieInput,
    responses(
        (status = 201, description = "Movie created", body = MovieResponse),
        (status = 400, description = "Validation error or unknown genre"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn create_movie(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<MovieInput>,
) -> AppResult<Created<MovieResponse>> {
    current_user.can(Resource::Movies, Action::Create)?;
    let movie = state
        .services
        .movies()
        .create_movie(current_user.id, payload)
        .await?;
    Ok(Created(MovieResponse::from(movie)))
}

/// Replace a movie (creator or admin)
#[utoipa::path(
    put,
    path = "/movies/{id}",
    tag = "Movies",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Movie ID")),
    request_body = MovieInput,
    responses(
        (status = 200, description = "Movie updated", body = MovieResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the creator"),
        (status = 404, description = "Movie not found")
    )
)]
pub async fn update_movie(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<MovieInput>,
) -> AppResult<Json<MovieResponse>> {
    let movies = state.services.movies();
    let existing = movies.get_movie(id).await?;
    current_user.can_on(Resource::Movies, Action::Update, existing.created_by)?;

    let movie = movies.update_movie(id, payload.into()).await?;
    Ok(Json(MovieResponse::from(movie)))
}

/// Partially update a movie (creator or admin)
#[utoipa::path(
    patch,
    path = "/movies/{id}",
    tag = "Movies",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Movie ID")),
    request_body = MoviePatch,
    responses(
        (status = 200, description = "Movie updated", body = MovieResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the creator"),
        (status = 404, description = "Movie not found")
    )
)]
pub async fn partial_update_movie(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<MoviePatch>,
) -> AppResult<Json<MovieResponse>> {
    let movies = state.services.movies();
    let existing = movies.get_movie(id).await?;
    current_user.can_on(Resource::Movies, Action::Update, existing.created_by)?;

    let movie = movies.update_movie(id, payload.into()).await?;
    Ok(Json(MovieResponse::from(movie)))
}

/// Delete a movie with its favorites and ratings (creator or admin)
#[utoipa::path(
    delete,
    path = "/movies/{id}",
    tag = "Movies",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Movie ID")),
    responses(
        (status = 204, description = "Movie deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the creator"),
        (status = 404, description = "Movie not found")
    )
)]
pub async fn delete_movie(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<NoContent> {
    let movies = state.services.movies();
    let existing = movies.get_movie(id).await?;
    current_user.can_on(Resource::Movies, Action::Delete, existing.created_by)?;

    movies.delete_movie(id).await?;
    Ok(NoContent)
}

/// Movies whose genre name contains `genre` (case-insensitive), unpaginated
#[utoipa::path(
    get,
    path = "/movies/filter_by_genre",
    tag = "Movies",
    security(("bearer_auth" = [])),
    params(GenreFilter),
    responses(
        (status = 200, description = "Matching movies", body = Vec<MovieResponse>),
        (status = 400, description = "Genre parameter is required."),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn filter_by_genre(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(filter): Query<GenreFilter>,
) -> AppResult<Json<Vec<MovieResponse>>> {
    current_user.can(Resource::Movies, Action::Read)?;
    let movies = state.services.movies().filter_by_genre(filter.genre).await?;
    Ok(Json(movies.into_iter().map(MovieResponse::from).collect()))
}

/// Add a movie to the caller's favorites
#[utoipa::path(
    post,
    path = "/movies/{id}/add_to_favorites",
    tag = "Movies",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Movie ID")),
    responses(
        (status = 201, description = "Favorite created", body = FavoriteResponse),
        (status = 400, description = "Movie is already in favorites."),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Movie not found")
    )
)]
pub async fn add_to_favorites(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Created<FavoriteResponse>> {
    current_user.can(Resource::Favorites, Action::Create)?;
    let favorite = state
        .services
        .movies()
        .add_to_favorites(current_user.id, id)
        .await?;
    Ok(Created(FavoriteResponse::from(favorite)))
}
