//! Row shapes for the admin list pages and the movie form.

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use super::display::{movie_link, user_link};
use crate::domain::{FavoriteDetail, Genre, Movie};

/// One line of the admin movie list
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AdminMovieRow {
    pub id: i32,
    pub title: String,
    #[schema(value_type = String, format = Date)]
    pub release_date: NaiveDate,
    /// Anchor to the creator
    #[schema(example = "<a href=\"/users/7/\">ripley</a>")]
    pub created_by_link: String,
    /// Genre names joined with ", "
    #[schema(example = "Horror, Sci-Fi")]
    pub genre_list: String,
}

impl AdminMovieRow {
    pub fn new(movie: &Movie, creator_username: &str) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            release_date: movie.release_date,
            created_by_link: user_link(movie.created_by, creator_username),
            genre_list: movie.genre_list(),
        }
    }
}

/// One line of the admin favorites list
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AdminFavoriteRow {
    pub id: i32,
    #[schema(example = "<a href=\"/users/7/\">ripley</a>")]
    pub user_link: String,
    #[schema(example = "<a href=\"/admin/movies/5/\">Alien</a>")]
    pub movie_link: String,
}

impl From<&FavoriteDetail> for AdminFavoriteRow {
    fn from(detail: &FavoriteDetail) -> Self {
        Self {
            id: detail.favorite.id,
            user_link: user_link(detail.favorite.user_id, &detail.username),
            movie_link: movie_link(detail.favorite.movie_id, &detail.movie_title),
        }
    }
}

/// Read-only favorite shown inline on the movie form
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct InlineFavorite {
    pub id: i32,
    /// Username of the owner
    pub user: String,
}

/// Admin edit form for a movie, with its genres and favorites inline
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MovieForm {
    pub id: i32,
    pub title: String,
    pub description: String,
    #[schema(value_type = String, format = Date)]
    pub release_date: NaiveDate,
    /// Creator id; read-only on this form
    pub created_by: i32,
    pub genres: Vec<Genre>,
    pub favorites: Vec<InlineFavorite>,
}

impl MovieForm {
    pub fn new(movie: Movie, favorites: &[FavoriteDetail]) -> Self {
        Self {
            id: movie.id,
            title: movie.title,
            description: movie.description,
            release_date: movie.release_date,
            created_by: movie.created_by,
            genres: movie.genres,
            favorites: favorites
                .iter()
                .map(|f| InlineFavorite {
                    id: f.favorite.id,
                    user: f.username.clone(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::domain::Favorite;

    #[test]
    fn test_movie_row_columns() {
        let movie = Movie {
            id: 5,
            title: "Alien".into(),
            description: "In space no one can hear you scream.".into(),
            release_date: NaiveDate::from_ymd_opt(1979, 5, 25).unwrap(),
            created_by: 7,
            genres: vec![
                Genre { id: 1, name: "Horror".into() },
                Genre { id: 2, name: "Sci-Fi".into() },
            ],
        };

        let row = AdminMovieRow::new(&movie, "ripley");
        assert_eq!(row.created_by_link, "<a href=\"/users/7/\">ripley</a>");
        assert_eq!(row.genre_list, "Horror, Sci-Fi");
    }

    #[test]
    fn test_favorite_row_links() {
        let detail = FavoriteDetail {
            favorite: Favorite {
                id: 3,
                user_id: 7,
                movie_id: 5,
                added_at: Utc::now(),
            },
            username: "ripley".into(),
            movie_title: "Alien".into(),
        };

        let row = AdminFavoriteRow::from(&detail);
        assert_eq!(row.user_link, "<a href=\"/users/7/\">ripley</a>");
        assert_eq!(row.movie_link, "<a href=\"/admin/movies/5/\">Alien</a>");
    }
}
