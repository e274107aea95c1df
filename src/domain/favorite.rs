//! Favorite domain entity and the featured-favorites rule.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::config::{
    FEATURED_FAVORITES_EXCLUDED_TITLE, FEATURED_FAVORITES_GENRE, FEATURED_FAVORITES_MIN_SCORE,
    FEATURED_FAVORITES_USER_ID,
};

/// A user's bookmark of a movie, unique per (user, movie)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favorite {
    pub id: i32,
    pub user_id: i32,
    pub movie_id: i32,
    pub added_at: DateTime<Utc>,
}

/// Favorite creation and full update payload; the owner is the caller
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct FavoriteInput {
    #[schema(example = 5)]
    pub movie: i32,
}

/// Favorite partial update payload
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct FavoritePatch {
    pub movie: Option<i32>,
}

impl From<FavoriteInput> for FavoritePatch {
    fn from(input: FavoriteInput) -> Self {
        Self {
            movie: Some(input.movie),
        }
    }
}

/// Favorite wire representation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FavoriteResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = 7)]
    pub user: i32,
    #[schema(example = 5)]
    pub movie: i32,
    pub added_at: DateTime<Utc>,
}

impl From<Favorite> for FavoriteResponse {
    fn from(favorite: Favorite) -> Self {
        Self {
            id: favorite.id,
            user: favorite.user_id,
            movie: favorite.movie_id,
            added_at: favorite.added_at,
        }
    }
}

/// A favorite with the names the admin console displays
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteDetail {
    pub favorite: Favorite,
    pub username: String,
    pub movie_title: String,
}

/// Rule behind the filtered favorites listing:
/// (owned by `user_id` OR movie rated above `min_score`) AND movie has
/// `genre` AND movie title does not contain `excluded_title`
/// (case-insensitive).
#[derive(Debug, Clone, PartialEq)]
pub struct FeaturedFavorites {
    pub user_id: i32,
    pub min_score: i16,
    pub genre: String,
    pub excluded_title: String,
}

impl Default for FeaturedFavorites {
    fn default() -> Self {
        Self {
            user_id: FEATURED_FAVORITES_USER_ID,
            min_score: FEATURED_FAVORITES_MIN_SCORE,
            genre: FEATURED_FAVORITES_GENRE.to_string(),
            excluded_title: FEATURED_FAVORITES_EXCLUDED_TITLE.to_string(),
        }
    }
}
