//! Admin console handlers. Mounted behind `require_admin`.

use axum::{
    extract::State,
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::admin::{AdminFavoriteRow, AdminMovieRow, ExportFormat, MovieForm};
use crate::api::extractors::{PageRequest, Path, Query, ValidatedJson};
use crate::api::AppState;
use crate::domain::{Genre, MovieInput, MovieSearch, RatingResponse, UserResponse};
use crate::errors::{AppError, AppResult};
use crate::types::{AdminFavoritePage, AdminMoviePage, GenrePage, Page, RatingPage, UserPage};

/// Admin movie list filters
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct AdminMovieQuery {
    /// Case-insensitive search over title and description
    pub q: Option<String>,
    /// Exact release date, `YYYY-MM-DD`
    pub release_date: Option<String>,
    /// Genre id
    pub genre: Option<String>,
}

impl AdminMovieQuery {
    fn into_search(self) -> AppResult<MovieSearch> {
        let release_date = non_empty(self.release_date)
            .map(|raw| {
                NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                    .map_err(|_| AppError::bad_request("Enter a valid date."))
            })
            .transpose()?;
        let genre = non_empty(self.genre)
            .map(|raw| {
                raw.parse::<i32>()
                    .map_err(|_| AppError::bad_request("Select a valid choice."))
            })
            .transpose()?;

        Ok(MovieSearch {
            q: non_empty(self.q),
            release_date,
            genre,
        })
    }
}

/// Free-text search for admin lists
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct AdminSearchQuery {
    pub q: Option<String>,
}

/// Export format selector
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ExportQuery {
    /// `csv` (default) or `json`
    pub format: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn export_format(raw: Option<&str>) -> AppResult<ExportFormat> {
    match raw.map(str::to_ascii_lowercase).as_deref() {
        None | Some("") | Some("csv") => Ok(ExportFormat::Csv),
        Some("json") => Ok(ExportFormat::Json),
        Some(other) => Err(AppError::bad_request(format!(
            "Unsupported export format \"{}\".",
            other
        ))),
    }
}

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/movies", get(list_movies))
        .route("/movies/export", get(export_movies))
        .route("/movies/:id", get(movie_form).put(save_movie_form))
        .route("/genres", get(list_genres))
        .route("/favorites", get(list_favorites))
        .route("/users", get(list_users))
        .route("/ratings", get(list_ratings))
}

/// Admin movie list, newest release first
#[utoipa::path(
    get,
    path = "/admin/movies",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(
        AdminMovieQuery,
        ("page" = Option<u64>, Query, description = "Page number, starting at 1"),
        ("page_size" = Option<u64>, Query, description = "Results per page")
    ),
    responses(
        (status = 200, description = "One page of movie rows", body = AdminMoviePage),
        (status = 400, description = "Malformed filter"),
        (status = 403, description = "Admin only")
    )
)]
pub async fn list_movies(
    State(state): State<AppState>,
    Query(query): Query<AdminMovieQuery>,
    page: PageRequest,
) -> AppResult<Json<Page<AdminMovieRow>>> {
    let search = query.into_search()?;
    let (rows, total) = state.services.admin().movie_rows(search, page.params).await?;
    Ok(Json(page.page(rows, total)))
}

/// Download every movie as an attachment
#[utoipa::path(
    get,
    path = "/admin/movies/export",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(ExportQuery),
    responses(
        (status = 200, description = "Movie export file", content_type = "text/csv"),
        (status = 400, description = "Unsupported format"),
        (status = 403, description = "Admin only")
    )
)]
pub async fn export_movies(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> AppResult<Response> {
    let format = export_format(query.format.as_deref())?;
    let file = state.services.admin().export_movies(format).await?;
    tracing::info!(format = file.format.extension(), bytes = file.body.len(), "movies exported");

    let headers = [
        (CONTENT_TYPE, file.format.content_type().to_string()),
        (
            CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file.filename()),
        ),
    ];
    Ok((headers, file.body).into_response())
}

/// Movie form with inline genres and favorites
#[utoipa::path(
    get,
    path = "/admin/movies/{id}",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Movie ID")),
    responses(
        (status = 200, description = "Movie form", body = MovieForm),
        (status = 404, description = "Movie not found")
    )
)]
pub async fn movie_form(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<MovieForm>> {
    Ok(Json(state.services.admin().movie_form(id).await?))
}

/// Save the movie form; `created_by` is read-only
#[utoipa::path(
    put,
    path = "/admin/movies/{id}",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Movie ID")),
    request_body = MovieInput,
    responses(
        (status = 200, description = "Movie form after saving", body = MovieForm),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Movie not found")
    )
)]
pub async fn save_movie_form(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<MovieInput>,
) -> AppResult<Json<MovieForm>> {
    Ok(Json(state.services.admin().save_movie_form(id, payload).await?))
}

/// Admin genre list ordered by name
#[utoipa::path(
    get,
    path = "/admin/genres",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(
        AdminSearchQuery,
        ("page" = Option<u64>, Query, description = "Page number, starting at 1"),
        ("page_size" = Option<u64>, Query, description = "Results per page")
    ),
    responses(
        (status = 200, description = "One page of genres", body = GenrePage),
        (status = 403, description = "Admin only")
    )
)]
pub async fn list_genres(
    State(state): State<AppState>,
    Query(query): Query<AdminSearchQuery>,
    page: PageRequest,
) -> AppResult<Json<Page<Genre>>> {
    let (genres, total) = state
        .services
        .admin()
        .genre_rows(non_empty(query.q), page.params)
        .await?;
    Ok(Json(page.page(genres, total)))
}

/// Admin favorite list with user and movie links
#[utoipa::path(
    get,
    path = "/admin/favorites",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(
        AdminSearchQuery,
        ("page" = Option<u64>, Query, description = "Page number, starting at 1"),
        ("page_size" = Option<u64>, Query, description = "Results per page")
    ),
    responses(
        (status = 200, description = "One page of favorite rows", body = AdminFavoritePage),
        (status = 403, description = "Admin only")
    )
)]
pub async fn list_favorites(
    State(state): State<AppState>,
    Query(query): Query<AdminSearchQuery>,
    page: PageRequest,
) -> AppResult<Json<Page<AdminFavoriteRow>>> {
    let (rows, total) = state
        .services
        .admin()
        .favorite_rows(non_empty(query.q), page.params)
        .await?;
    Ok(Json(page.page(rows, total)))
}

/// Admin user list, newest account first
#[utoipa::path(
    get,
    path = "/admin/users",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(
        ("page" = Option<u64>, Query, description = "Page number, starting at 1"),
        ("page_size" = Option<u64>, Query, description = "Results per page")
    ),
    responses(
        (status = 200, description = "One page of users", body = UserPage),
        (status = 403, description = "Admin only")
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    page: PageRequest,
) -> AppResult<Json<Page<UserResponse>>> {
    let (users, total) = state.services.admin().user_rows(page.params).await?;
    Ok(Json(page.page(users, total).map(UserResponse::from)))
}

/// Admin rating list, newest first
#[utoipa::path(
    get,
    path = "/admin/ratings",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(
        ("page" = Option<u64>, Query, description = "Page number, starting at 1"),
        ("page_size" = Option<u64>, Query, description = "Results per page")
    ),
    responses(
        (status = 200, description = "One page of ratings", body = RatingPage),
        (status = 403, description = "Admin only")
    )
)]
pub async fn list_ratings(
    State(state): State<AppState>,
    page: PageRequest,
) -> AppResult<Json<Page<RatingResponse>>> {
    let (ratings, total) = state.services.admin().rating_rows(page.params).await?;
    Ok(Json(page.page(ratings, total).map(RatingResponse::from)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_format_defaults_to_csv() {
        assert_eq!(export_format(None).unwrap(), ExportFormat::Csv);
        assert_eq!(export_format(Some("")).unwrap(), ExportFormat::Csv);
        assert_eq!(export_format(Some("JSON")).unwrap(), ExportFormat::Json);
        assert!(matches!(export_format(Some("xml")), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_movie_query_parses_filters() {
        let query = AdminMovieQuery {
            q: Some("  ".into()),
            release_date: Some("2021-06-01".into()),
            genre: Some("3".into()),
        };
        let search = query.into_search().unwrap();

        assert_eq!(search.q, None);
        assert_eq!(search.release_date, NaiveDate::from_ymd_opt(2021, 6, 1));
        assert_eq!(search.genre, Some(3));
    }

    #[test]
    fn test_movie_query_rejects_bad_date() {
        let query = AdminMovieQuery {
            release_date: Some("01/06/2021".into()),
            ..Default::default()
        };
        assert!(matches!(query.into_search(), Err(AppError::BadRequest(_))));
    }
}
