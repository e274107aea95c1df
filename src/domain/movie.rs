//! Movie domain entity, payloads and the featured-movies rule.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::{Genre, UserRole};
use crate::config::{FEATURED_MOVIE_GENRES, FEATURED_RELEASED_AFTER};

/// Movie domain entity with its genres attached
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub release_date: NaiveDate,
    pub created_by: i32,
    pub genres: Vec<Genre>,
}

impl Movie {
    /// Genre names joined for display
    pub fn genre_list(&self) -> String {
        self.genres
            .iter()
            .map(|g| g.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Fields for inserting a movie row and its genre links
#[derive(Debug, Clone, PartialEq)]
pub struct NewMovie {
    pub title: String,
    pub description: String,
    pub release_date: NaiveDate,
    pub created_by: i32,
    pub genre_ids: Vec<i32>,
}

/// Partial update of a movie; `created_by` is deliberately absent
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub genre_ids: Option<Vec<i32>>,
}

/// Movie creation and full update payload.
///
/// `created_by` is assigned from the caller; a client-supplied value is ignored.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct MovieInput {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    #[schema(example = "Dune: Part Two")]
    pub title: String,
    #[schema(example = "Paul Atreides unites with the Fremen.")]
    pub description: String,
    #[schema(value_type = String, format = Date, example = "2024-03-01")]
    pub release_date: NaiveDate,
    /// Genre ids to attach
    #[serde(default)]
    #[schema(example = json!([1, 2]))]
    pub genres: Vec<i32>,
}

/// Movie partial update payload
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct MoviePatch {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Option<String>, format = Date)]
    pub release_date: Option<NaiveDate>,
    pub genres: Option<Vec<i32>>,
}

impl From<MovieInput> for MovieChanges {
    fn from(input: MovieInput) -> Self {
        Self {
            title: Some(input.title),
            description: Some(input.description),
            release_date: Some(input.release_date),
            genre_ids: Some(input.genres),
        }
    }
}

impl From<MoviePatch> for MovieChanges {
    fn from(patch: MoviePatch) -> Self {
        Self {
            title: patch.title,
            description: patch.description,
            release_date: patch.release_date,
            genre_ids: patch.genres,
        }
    }
}

/// Movie wire representation: genres nested, creator as a raw id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MovieResponse {
    #[schema(example = 5)]
    pub id: i32,
    pub title: String,
    pub description: String,
    #[schema(value_type = String, format = Date, example = "2024-03-01")]
    pub release_date: NaiveDate,
    pub genres: Vec<Genre>,
    #[schema(example = 7)]
    pub created_by: i32,
}

impl From<Movie> for MovieResponse {
    fn from(movie: Movie) -> Self {
        Self {
            id: movie.id,
            title: movie.title,
            description: movie.description,
            release_date: movie.release_date,
            genres: movie.genres,
            created_by: movie.created_by,
        }
    }
}

/// Admin console movie filters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieSearch {
    /// Case-insensitive match on title or description
    pub q: Option<String>,
    pub release_date: Option<NaiveDate>,
    /// Genre id the movie must carry
    pub genre: Option<i32>,
}

/// Rule behind the filtered movies listing: any of `genres` AND released
/// strictly after `released_after` AND creator role other than
/// `excluded_creator_role`.
#[derive(Debug, Clone, PartialEq)]
pub struct FeaturedMovies {
    pub genres: Vec<String>,
    pub released_after: NaiveDate,
    pub excluded_creator_role: UserRole,
}

impl Default for FeaturedMovies {
    fn default() -> Self {
        Self {
            genres: FEATURED_MOVIE_GENRES.iter().map(|g| g.to_string()).collect(),
            released_after: NaiveDate::parse_from_str(FEATURED_RELEASED_AFTER, "%Y-%m-%d")
                .unwrap_or(NaiveDate::MIN),
            excluded_creator_role: UserRole::Admin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_featured_rule() {
        let rule = FeaturedMovies::default();
        assert_eq!(rule.genres, vec!["Action", "Adventure"]);
        assert_eq!(rule.released_after, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        assert_eq!(rule.excluded_creator_role, UserRole::Admin);
    }

    #[test]
    fn test_client_created_by_is_ignored() {
        let input: MovieInput = serde_json::from_str(
            r#"{"title": "Heat", "description": "", "release_date": "1995-12-15", "created_by": 99}"#,
        )
        .unwrap();
        let changes = MovieChanges::from(input);

        assert_eq!(changes.title.as_deref(), Some("Heat"));
        assert_eq!(changes.genre_ids, Some(vec![]));
    }

    #[test]
    fn test_genre_list_joins_names() {
        let movie = Movie {
            id: 1,
            title: "Alien".into(),
            description: String::new(),
            release_date: NaiveDate::from_ymd_opt(1979, 5, 25).unwrap(),
            created_by: 1,
            genres: vec![
                Genre { id: 1, name: "Horror".into() },
                Genre { id: 2, name: "Sci-Fi".into() },
            ],
        };
        assert_eq!(movie.genre_list(), "Horror, Sci-Fi");
    }

    #[test]
    fn test_response_shape() {
        let response = MovieResponse {
            id: 5,
            title: "Arrival".into(),
            description: "Linguist meets heptapods".into(),
            release_date: NaiveDate::from_ymd_opt(2016, 11, 11).unwrap(),
            genres: vec![Genre { id: 2, name: "Drama".into() }],
            created_by: 7,
        };

        let json = serde_json::to_value(response).unwrap();
        assert_eq!(json["release_date"], "2016-11-11");
        assert_eq!(json["genres"][0]["name"], "Drama");
        assert_eq!(json["created_by"], 7);
    }
}
