//! Fixed-rule featured listings.

use axum::{
    extract::{Extension, State},
    response::Json,
    routing::get,
    Router,
};

use crate::api::extractors::PageRequest;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{Action, FavoriteResponse, MovieResponse, Resource};
use crate::errors::AppResult;
use crate::types::{FavoritePage, MoviePage, Page};

pub fn filtered_routes() -> Router<AppState> {
    Router::new()
        .route("/filtered-movies", get(filtered_movies))
        .route("/filtered-favorites", get(filtered_favorites))
}

/// Action or Adventure movies released after 2020-01-01 by non-admin creators
#[utoipa::path(
    get,
    path = "/filtered-movies",
    tag = "Movies",
    security(("bearer_auth" = [])),
    params(("page" = Option<u64>, Query, description = "Page number, starting at 1"), ("page_size" = Option<u64>, Query, description = "Results per page")),
    responses(
        (status = 200, description = "One page of featured movies", body = MoviePage),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn filtered_movies(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    page: PageRequest,
) -> AppResult<Json<Page<MovieResponse>>> {
    current_user.can(Resource::Movies, Action::Read)?;
    let (movies, total) = state.services.movies().filtered_movies(page.params).await?;
    Ok(Json(page.page(movies, total).map(MovieResponse::from)))
}

/// Drama favorites of user 2 or of well-rated movies, excluding horror titles
#[utoipa::path(
    get,
    path = "/filtered-favorites",
    tag = "Favorites",
    security(("bearer_auth" = [])),
    params(("page" = Option<u64>, Query, description = "Page number, starting at 1"), ("page_size" = Option<u64>, Query, description = "Results per page")),
    responses(
        (status = 200, description = "One page of featured favorites", body = FavoritePage),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn filtered_favorites(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    page: PageRequest,
) -> AppResult<Json<Page<FavoriteResponse>>> {
    current_user.can(Resource::Favorites, Action::Read)?;
    let (favorites, total) = state
        .services
        .favorites()
        .filtered_favorites(page.params)
        .await?;
    Ok(Json(page.page(favorites, total).map(FavoriteResponse::from)))
}
