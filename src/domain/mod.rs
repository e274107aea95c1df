//! Domain layer - Core business entities and logic
//!
//! Entities, request/response shapes and the access policy. Nothing in
//! here talks to the database or HTTP directly.

pub mod favorite;
pub mod genre;
pub mod movie;
pub mod password;
pub mod policy;
pub mod rating;
pub mod user;

pub use favorite::{
    Favorite, FavoriteDetail, FeaturedFavorites, FavoriteInput, FavoritePatch, FavoriteResponse,
};
pub use genre::{Genre, GenreInput, GenrePatch};
pub use movie::{
    FeaturedMovies, Movie, MovieChanges, MovieInput, MoviePatch, MovieResponse, MovieSearch,
    NewMovie,
};
pub use password::Password;
pub use policy::{authorize, Action, Resource};
pub use rating::{Rating, RatingInput, RatingPatch, RatingResponse};
pub use user::{NewUser, User, UserChanges, UserInput, UserPatch, UserResponse, UserRole};
