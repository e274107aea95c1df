//! Admin console presentation: list rows with computed display columns,
//! the movie edit form and bulk export.

mod display;
mod export;
mod rows;

pub use display::{escape_html, movie_link, user_link};
pub use export::{export_movies, ExportFile, ExportFormat, MovieExportRecord};
pub use rows::{AdminFavoriteRow, AdminMovieRow, InlineFavorite, MovieForm};
