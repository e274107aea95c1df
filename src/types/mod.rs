//! Shared types used across layers.

mod pagination;
mod response;

pub use pagination::{
    AdminFavoritePage, AdminMoviePage, FavoritePage, GenrePage, MoviePage, Page, PaginationParams,
    RatingPage, UserPage,
};
pub use response::{Created, NoContent};
