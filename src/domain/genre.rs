//! Genre domain entity.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Genre domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Genre {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Action")]
    pub name: String,
}

/// Genre creation and full update payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct GenreInput {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    #[schema(example = "Drama")]
    pub name: String,
}

/// Genre partial update payload
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct GenrePatch {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,
}

impl From<GenreInput> for GenrePatch {
    fn from(input: GenreInput) -> Self {
        Self {
            name: Some(input.name),
        }
    }
}

