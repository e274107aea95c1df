//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::admin::{AdminFavoriteRow, AdminMovieRow, ExportFormat, InlineFavorite, MovieForm};
use crate::api::handlers::{
    admin_handler, auth_handler, favorite_handler, filtered_handler, genre_handler,
    movie_handler, rating_handler, user_handler,
};
use crate::domain::{
    FavoriteInput, FavoritePatch, FavoriteResponse, Genre, GenreInput, GenrePatch, MovieInput,
    MoviePatch, MovieResponse, RatingInput, RatingPatch, RatingResponse, UserInput, UserPatch,
    UserResponse, UserRole,
};
use crate::services::TokenResponse;
use crate::types::{
    AdminFavoritePage, AdminMoviePage, FavoritePage, GenrePage, MoviePage, RatingPage, UserPage,
};

/// OpenAPI documentation for MovieHub
#[derive(OpenApi)]
#[openapi(
    info(
        title = "MovieHub",
        version = "0.1.0",
        description = "Movie catalog with genres, favorites and ratings",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8000", description = "Local development server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::register,
        auth_handler::login,
        auth_handler::me,
        // User endpoints
        user_handler::list_users,
        user_handler::get_user,
        user_handler::create_user,
        user_handler::update_user,
        user_handler::partial_update_user,
        user_handler::delete_user,
        // Genre endpoints
        genre_handler::list_genres,
        genre_handler::get_genre,
        genre_handler::create_genre,
        genre_handler::update_genre,
        genre_handler::partial_update_genre,
        genre_handler::delete_genre,
        // Movie endpoints
        movie_handler::list_movies,
        movie_handler::get_movie,
        movie_handler::create_movie,
        movie_handler::update_movie,
        movie_handler::partial_update_movie,
        movie_handler::delete_movie,
        movie_handler::filter_by_genre,
        movie_handler::add_to_favorites,
        // Favorite endpoints
        favorite_handler::list_favorites,
        favorite_handler::get_favorite,
        favorite_handler::create_favorite,
        favorite_handler::update_favorite,
        favorite_handler::partial_update_favorite,
        favorite_handler::delete_favorite,
        // Rating endpoints
        rating_handler::list_ratings,
        rating_handler::get_rating,
        rating_handler::create_rating,
        rating_handler::update_rating,
        rating_handler::partial_update_rating,
        rating_handler::delete_rating,
        // Featured listings
        filtered_handler::filtered_movies,
        filtered_handler::filtered_favorites,
        // Admin console
        admin_handler::list_movies,
        admin_handler::export_movies,
        admin_handler::movie_form,
        admin_handler::save_movie_form,
        admin_handler::list_genres,
        admin_handler::list_favorites,
        admin_handler::list_users,
        admin_handler::list_ratings,
    ),
    components(
        schemas(
            // Domain types
            UserRole,
            UserResponse,
            UserInput,
            UserPatch,
            Genre,
            GenreInput,
            GenrePatch,
            MovieResponse,
            MovieInput,
            MoviePatch,
            FavoriteResponse,
            FavoriteInput,
            FavoritePatch,
            RatingResponse,
            RatingInput,
            RatingPatch,
            // Pages
            UserPage,
            GenrePage,
            MoviePage,
            FavoritePage,
            RatingPage,
            AdminMoviePage,
            AdminFavoritePage,
            // Admin console
            AdminMovieRow,
            AdminFavoriteRow,
            InlineFavorite,
            MovieForm,
            ExportFormat,
            // Auth types
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            TokenResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login and the current account"),
        (name = "Users", description = "Account management (admin only)"),
        (name = "Genres", description = "Movie genres"),
        (name = "Movies", description = "Movies, genre search and featured movies"),
        (name = "Favorites", description = "User favorites"),
        (name = "Ratings", description = "User ratings"),
        (name = "Admin", description = "Staff console")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /auth/login"))
                        .build(),
                ),
            );
        }
    }
}
