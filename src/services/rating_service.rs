//! Rating service.

use async_trait::async_trait;
use std::sync::Arc;

use super::favorite_service::ensure_movie_exists;
use crate::config::{MAX_RATING_SCORE, MIN_RATING_SCORE, MSG_ALREADY_RATED};
use crate::domain::{Rating, RatingPatch};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::types::PaginationParams;

#[async_trait]
pub trait RatingService: Send + Sync {
    async fn get_rating(&self, id: i32) -> AppResult<Rating>;

    async fn list_ratings(&self, params: PaginationParams) -> AppResult<(Vec<Rating>, u64)>;

    /// Rate `movie_id` as `user_id`
    async fn create_rating(&self, user_id: i32, movie_id: i32, score: i16) -> AppResult<Rating>;

    async fn update_rating(&self, id: i32, patch: RatingPatch) -> AppResult<Rating>;

    async fn delete_rating(&self, id: i32) -> AppResult<()>;
}

pub struct RatingManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> RatingManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

fn check_score(score: i16) -> AppResult<()> {
    if !(MIN_RATING_SCORE..=MAX_RATING_SCORE).contains(&score) {
        return Err(AppError::validation(format!(
            "Score must be between {} and {}",
            MIN_RATING_SCORE, MAX_RATING_SCORE
        )));
    }
    Ok(())
}

#[async_trait]
impl<U: UnitOfWork> RatingService for RatingManager<U> {
    async fn get_rating(&self, id: i32) -> AppResult<Rating> {
        self.uow.ratings().find_by_id(id).await?.ok_or_not_found()
    }

    async fn list_ratings(&self, params: PaginationParams) -> AppResult<(Vec<Rating>, u64)> {
        self.uow.ratings().list(params).await
    }

    async fn create_rating(&self, user_id: i32, movie_id: i32, score: i16) -> AppResult<Rating> {
        check_score(score)?;
        ensure_movie_exists(self.uow.as_ref(), movie_id).await?;

        let ratings = self.uow.ratings();
        if ratings.exists(user_id, movie_id).await? {
            return Err(AppError::conflict(MSG_ALREADY_RATED));
        }

        ratings.create(user_id, movie_id, score).await
    }

    async fn update_rating(&self, id: i32, patch: RatingPatch) -> AppResult<Rating> {
        if let Some(score) = patch.score {
            check_score(score)?;
        }

        let ratings = self.uow.ratings();
        let existing = ratings.find_by_id(id).await?.ok_or_not_found()?;

        let movie_id = patch.movie.filter(|m| *m != existing.movie_id);
        if let Some(movie_id) = movie_id {
            ensure_movie_exists(self.uow.as_ref(), movie_id).await?;
            if ratings.exists(existing.user_id, movie_id).await? {
                return Err(AppError::conflict(MSG_ALREADY_RATED));
            }
        }

        ratings.update(id, movie_id, patch.score).await
    }

    async fn delete_rating(&self, id: i32) -> AppResult<()> {
        self.uow.ratings().delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::domain::Movie;
    use crate::infra::{MockMovieRepository, MockRatingRepository, Persistence};
    use crate::services::test_support::Mocks;

    fn manager(movies: MockMovieRepository, ratings: MockRatingRepository) -> RatingManager<Persistence> {
        RatingManager::new(
            Mocks {
                movies,
                ratings,
                ..Default::default()
            }
            .into_uow(),
        )
    }

    #[tokio::test]
    async fn test_out_of_range_score_rejected_before_storage() {
        let mut ratings = MockRatingRepository::new();
        ratings.expect_create().never();
        let service = manager(MockMovieRepository::new(), ratings);

        for score in [0, 6, -3] {
            let result = service.create_rating(1, 5, score).await;
            assert!(matches!(result, Err(AppError::Validation(_))));
        }
    }

    #[tokio::test]
    async fn test_second_rating_conflicts() {
        let mut movies = MockMovieRepository::new();
        movies.expect_find_by_id().returning(|id| {
            Ok(Some(Movie {
                id,
                title: "Parasite".into(),
                description: String::new(),
                release_date: NaiveDate::from_ymd_opt(2019, 5, 30).unwrap(),
                created_by: 1,
                genres: vec![],
            }))
        });
        let mut ratings = MockRatingRepository::new();
        ratings.expect_exists().returning(|_, _| Ok(true));
        ratings.expect_create().never();

        match manager(movies, ratings).create_rating(1, 5, 4).await {
            Err(AppError::Conflict(msg)) => assert_eq!(msg, MSG_ALREADY_RATED),
            other => panic!("expected conflict, got {:?}", other.map(|r| r.id)),
        }
    }

    #[test]
    fn test_score_bounds() {
        assert!(check_score(1).is_ok());
        assert!(check_score(5).is_ok());
        assert!(check_score(0).is_err());
        assert!(check_score(6).is_err());
    }
}
