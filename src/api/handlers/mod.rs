//! HTTP request handlers.

pub mod admin_handler;
pub mod auth_handler;
pub mod favorite_handler;
pub mod filtered_handler;
pub mod genre_handler;
pub mod movie_handler;
pub mod rating_handler;
pub mod user_handler;

pub use admin_handler::admin_routes;
pub use auth_handler::{auth_routes, me_routes};
pub use favorite_handler::favorite_routes;
pub use filtered_handler::filtered_routes;
pub use genre_handler::genre_routes;
pub use movie_handler::movie_routes;
pub use rating_handler::rating_routes;
pub use user_handler::user_routes;
