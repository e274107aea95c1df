//! Rating domain entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A user's 1-5 score for a movie, unique per (user, movie)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    pub id: i32,
    pub user_id: i32,
    pub movie_id: i32,
    pub score: i16,
    pub rated_at: DateTime<Utc>,
}

/// Rating creation and full update payload; the owner is the caller
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RatingInput {
    #[schema(example = 5)]
    pub movie: i32,
    #[validate(range(min = 1, max = 5, message = "Score must be between 1 and 5"))]
    #[schema(example = 4, minimum = 1, maximum = 5)]
    pub score: i16,
}

/// Rating partial update payload
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct RatingPatch {
    pub movie: Option<i32>,
    #[validate(range(min = 1, max = 5, message = "Score must be between 1 and 5"))]
    pub score: Option<i16>,
}

impl From<RatingInput> for RatingPatch {
    fn from(input: RatingInput) -> Self {
        Self {
            movie: Some(input.movie),
            score: Some(input.score),
        }
    }
}

/// Rating wire representation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RatingResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = 7)]
    pub user: i32,
    #[schema(example = 5)]
    pub movie: i32,
    #[schema(example = 4)]
    pub score: i16,
    pub rated_at: DateTime<Utc>,
}

impl From<Rating> for RatingResponse {
    fn from(rating: Rating) -> Self {
        Self {
            id: rating.id,
            user: rating.user_id,
            movie: rating.movie_id,
            score: rating.score,
            rated_at: rating.rated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_range() {
        for score in 1..=5 {
            assert!(RatingInput { movie: 1, score }.validate().is_ok());
        }
        for score in [-1, 0, 6, 10] {
            assert!(RatingInput { movie: 1, score }.validate().is_err());
        }
    }

    #[test]
    fn test_patch_without_score_is_valid() {
        assert!(RatingPatch { movie: Some(2), score: None }.validate().is_ok());
        assert!(RatingPatch { movie: None, score: Some(9) }.validate().is_err());
    }
}
