//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod favorite;
pub mod genre;
pub mod movie;
pub mod movie_genre;
pub mod rating;
pub mod user;
