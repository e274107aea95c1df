//! Admin console use cases.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use crate::admin::{export_movies, AdminFavoriteRow, AdminMovieRow, ExportFile, ExportFormat, MovieForm};
use crate::domain::{Genre, MovieInput, MovieSearch, Rating, User};
use crate::errors::{AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::types::PaginationParams;

#[async_trait]
pub trait AdminService: Send + Sync {
    /// Movie list page, newest release first
    async fn movie_rows(
        &self,
        search: MovieSearch,
        params: PaginationParams,
    ) -> AppResult<(Vec<AdminMovieRow>, u64)>;

    async fn export_movies(&self, format: ExportFormat) -> AppResult<ExportFile>;

    async fn movie_form(&self, id: i32) -> AppResult<MovieForm>;

    /// Save the movie form; the creator is never changed here
    async fn save_movie_form(&self, id: i32, input: MovieInput) -> AppResult<MovieForm>;

    /// Genre list page ordered by name
    async fn genre_rows(
        &self,
        query: Option<String>,
        params: PaginationParams,
    ) -> AppResult<(Vec<Genre>, u64)>;

    async fn favorite_rows(
        &self,
        query: Option<String>,
        params: PaginationParams,
    ) -> AppResult<(Vec<AdminFavoriteRow>, u64)>;

    /// User list page, newest account first
    async fn user_rows(&self, params: PaginationParams) -> AppResult<(Vec<User>, u64)>;

    /// Rating list page, newest first
    async fn rating_rows(&self, params: PaginationParams) -> AppResult<(Vec<Rating>, u64)>;
}

pub struct AdminConsole<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> AdminConsole<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> AdminService for AdminConsole<U> {
    async fn movie_rows(
        &self,
        search: MovieSearch,
        params: PaginationParams,
    ) -> AppResult<(Vec<AdminMovieRow>, u64)> {
        let (movies, total) = self.uow.movies().search(search, params).await?;

        let creator_ids: Vec<i32> = movies.iter().map(|m| m.created_by).collect();
        let usernames: HashMap<i32, String> = self
            .uow
            .users()
            .find_by_ids(creator_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u.username))
            .collect();

        let rows = movies
            .iter()
            .map(|movie| {
                let username = usernames
                    .get(&movie.created_by)
                    .map(String::as_str)
                    .unwrap_or_default();
                AdminMovieRow::new(movie, username)
            })
            .collect();

        Ok((rows, total))
    }

    async fn export_movies(&self, format: ExportFormat) -> AppResult<ExportFile> {
        let movies = self.uow.movies().all().await?;
        tracing::info!(count = movies.len(), ?format, "exporting movies");
        export_movies(&movies, format)
    }

    async fn movie_form(&self, id: i32) -> AppResult<MovieForm> {
        let movie = self.uow.movies().find_by_id(id).await?.ok_or_not_found()?;
        let favorites = self.uow.favorites().for_movie(id).await?;
        Ok(MovieForm::new(movie, &favorites))
    }

    async fn save_movie_form(&self, id: i32, input: MovieInput) -> AppResult<MovieForm> {
        let movie = self.uow.movies().update(id, input.into()).await?;
        let favorites = self.uow.favorites().for_movie(id).await?;
        Ok(MovieForm::new(movie, &favorites))
    }

    async fn genre_rows(
        &self,
        query: Option<String>,
        params: PaginationParams,
    ) -> AppResult<(Vec<Genre>, u64)> {
        self.uow.genres().search(query, params).await
    }

    async fn favorite_rows(
        &self,
        query: Option<String>,
        params: PaginationParams,
    ) -> AppResult<(Vec<AdminFavoriteRow>, u64)> {
        let (details, total) = self.uow.favorites().search(query, params).await?;
        Ok((details.iter().map(AdminFavoriteRow::from).collect(), total))
    }

    async fn user_rows(&self, params: PaginationParams) -> AppResult<(Vec<User>, u64)> {
        self.uow.users().list_newest(params).await
    }

    async fn rating_rows(&self, params: PaginationParams) -> AppResult<(Vec<Rating>, u64)> {
        self.uow.ratings().list_newest(params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    use crate::domain::{Movie, User, UserRole};
    use crate::infra::{MockMovieRepository, MockRatingRepository, MockUserRepository};
    use crate::services::test_support::Mocks;

    #[tokio::test]
    async fn test_movie_rows_link_creators() {
        let mut movies = MockMovieRepository::new();
        movies.expect_search().returning(|_, _| {
            Ok((
                vec![Movie {
                    id: 5,
                    title: "Aliens".into(),
                    description: String::new(),
                    release_date: NaiveDate::from_ymd_opt(1986, 7, 18).unwrap(),
                    created_by: 7,
                    genres: vec![Genre { id: 1, name: "Action".into() }],
                }],
                1,
            ))
        });
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_ids()
            .withf(|ids| ids == &vec![7])
            .returning(|_| {
                Ok(vec![User {
                    id: 7,
                    username: "hicks".into(),
                    email: String::new(),
                    first_name: String::new(),
                    last_name: String::new(),
                    password_hash: "!".into(),
                    role: UserRole::User,
                    is_active: true,
                    date_joined: Utc::now(),
                }])
            });

        let console = AdminConsole::new(
            Mocks {
                users,
                movies,
                ..Default::default()
            }
            .into_uow(),
        );
        let (rows, total) = console
            .movie_rows(MovieSearch::default(), PaginationParams::default())
            .await
            .unwrap();

        assert_eq!(total, 1);
        assert_eq!(rows[0].created_by_link, "<a href=\"/users/7/\">hicks</a>");
        assert_eq!(rows[0].genre_list, "Action");
    }

    #[tokio::test]
    async fn test_rating_rows_newest_first() {
        let mut ratings = MockRatingRepository::new();
        ratings.expect_list().never();
        ratings.expect_list_newest().times(1).returning(|_| {
            Ok((
                vec![Rating {
                    id: 9,
                    user_id: 7,
                    movie_id: 5,
                    score: 4,
                    rated_at: Utc::now(),
                }],
                1,
            ))
        });

        let console = AdminConsole::new(
            Mocks {
                ratings,
                ..Default::default()
            }
            .into_uow(),
        );
        let (rows, total) = console.rating_rows(PaginationParams::default()).await.unwrap();

        assert_eq!(total, 1);
        assert_eq!(rows[0].id, 9);
    }
}
