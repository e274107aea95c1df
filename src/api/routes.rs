//! Application route configuration.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware,
    response::Json,
    routing::get,
    Router,
};
use serde::Serialize;
use tower::Layer;
use tower_http::{
    cors::CorsLayer,
    normalize_path::{NormalizePath, NormalizePathLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{
    admin_routes, auth_routes, favorite_routes, filtered_routes, genre_routes, me_routes,
    movie_routes, rating_routes, user_routes,
};
use super::middleware::{auth_middleware, require_admin};
use super::openapi::ApiDoc;
use crate::errors::AppError;
use super::AppState;

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    let authenticated = middleware::from_fn_with_state(state.clone(), auth_middleware);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        // OpenAPI Swagger UI documentation
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Register and login are public, /auth/me is not
        .nest(
            "/auth",
            auth_routes().merge(me_routes().route_layer(authenticated.clone())),
        )
        .nest("/users", user_routes().route_layer(authenticated.clone()))
        .nest("/genres", genre_routes().route_layer(authenticated.clone()))
        .nest("/movies", movie_routes().route_layer(authenticated.clone()))
        .nest("/favorites", favorite_routes().route_layer(authenticated.clone()))
        .nest("/ratings", rating_routes().route_layer(authenticated.clone()))
        .merge(filtered_routes().route_layer(authenticated.clone()))
        // Staff console: authenticate first, then require the admin role
        .nest(
            "/admin",
            admin_routes()
                .route_layer(middleware::from_fn(require_admin))
                .route_layer(authenticated),
        )
        .fallback(not_found)
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Router wrapped so `/movies/` and `/movies` reach the same handler.
///
/// Path normalization has to run before routing, so it wraps the router
/// instead of being added with `Router::layer`.
pub fn create_app(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(create_router(state))
}

/// Serve the application on `listener` until the process is stopped.
pub async fn serve(listener: tokio::net::TcpListener, state: AppState) -> std::io::Result<()> {
    let app = create_app(state);
    axum::serve(
        listener,
        axum::ServiceExt::<Request>::into_make_service(app),
    )
    .await
}

/// Root endpoint
async fn root() -> &'static str {
    "Welcome to MovieHub"
}

/// Unknown routes answer with the JSON error body too
async fn not_found() -> AppError {
    AppError::NotFound
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    database: ServiceStatus,
}

#[derive(Serialize)]
struct ServiceStatus {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Health check endpoint with database connectivity check
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let (status_code, database) = match state.database.ping().await {
        Ok(_) => (
            StatusCode::OK,
            ServiceStatus {
                status: "healthy",
                error: None,
            },
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            ServiceStatus {
                status: "unhealthy",
                error: Some(e.to_string()),
            },
        ),
    };

    let response = HealthResponse {
        status: if status_code.is_success() { "healthy" } else { "degraded" },
        database,
    };

    (status_code, Json(response))
}
