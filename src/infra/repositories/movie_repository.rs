//! Movie repository. Genre links are written in the same transaction as
//! the movie row.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use sea_orm::{
    sea_query::{Expr, Query, SelectStatement},
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, EntityTrait,
    NotSet, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use super::base::{fetch_page, icontains};
use super::entities::{genre, movie, movie_genre, user};
use crate::domain::{FeaturedMovies, Genre, Movie, MovieChanges, MovieSearch, NewMovie};
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait MovieRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Movie>>;

    /// One page of movies ordered by id
    async fn list(&self, params: PaginationParams) -> AppResult<(Vec<Movie>, u64)>;

    /// Every movie, ordered by id
    async fn all(&self) -> AppResult<Vec<Movie>>;

    /// Movies carrying a genre whose name contains `needle`
    /// (case-insensitive), each movie once
    async fn filter_by_genre_name(&self, needle: &str) -> AppResult<Vec<Movie>>;

    /// One page of movies matching the featured rule, each movie once
    async fn filtered(
        &self,
        rule: FeaturedMovies,
        params: PaginationParams,
    ) -> AppResult<(Vec<Movie>, u64)>;

    /// Admin search, newest release first
    async fn search(
        &self,
        search: MovieSearch,
        params: PaginationParams,
    ) -> AppResult<(Vec<Movie>, u64)>;

    /// Insert a movie and its genre links
    async fn create(&self, movie: NewMovie) -> AppResult<Movie>;

    /// Apply changes; supplied genre ids replace the existing links
    async fn update(&self, id: i32, changes: MovieChanges) -> AppResult<Movie>;

    /// Delete a movie with its favorites, ratings and genre links
    async fn delete(&self, id: i32) -> AppResult<()>;
}

pub struct MovieStore {
    db: DatabaseConnection,
}

impl MovieStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// `SELECT movie_id FROM movie_genres JOIN genres ... WHERE <condition>`
fn movies_with_genre(condition: Condition) -> SelectStatement {
    Query::select()
        .column((movie_genre::Entity, movie_genre::Column::MovieId))
        .from(movie_genre::Entity)
        .inner_join(
            genre::Entity,
            Expr::col((genre::Entity, genre::Column::Id))
                .equals((movie_genre::Entity, movie_genre::Column::GenreId)),
        )
        .cond_where(condition)
        .to_owned()
}

/// Movie ids carrying a genre named exactly `name`
pub(crate) fn movies_with_genre_named(name: &str) -> SelectStatement {
    movies_with_genre(Condition::all().add(genre::Column::Name.eq(name)))
}

/// Attach genres to movie rows, preserving row order.
async fn attach_genres<C: ConnectionTrait>(
    db: &C,
    models: Vec<movie::Model>,
) -> AppResult<Vec<Movie>> {
    let ids: Vec<i32> = models.iter().map(|m| m.id).collect();
    let mut by_movie: HashMap<i32, Vec<Genre>> = HashMap::new();

    if !ids.is_empty() {
        let links = movie_genre::Entity::find()
            .filter(movie_genre::Column::MovieId.is_in(ids))
            .order_by_asc(movie_genre::Column::GenreId)
            .find_also_related(genre::Entity)
            .all(db)
            .await?;

        for (link, genre) in links {
            if let Some(genre) = genre {
                by_movie
                    .entry(link.movie_id)
                    .or_default()
                    .push(Genre::from(genre));
            }
        }
    }

    Ok(models
        .into_iter()
        .map(|m| Movie {
            genres: by_movie.remove(&m.id).unwrap_or_default(),
            id: m.id,
            title: m.title,
            description: m.description,
            release_date: m.release_date,
            created_by: m.created_by,
        })
        .collect())
}

async fn attach_one<C: ConnectionTrait>(db: &C, model: movie::Model) -> AppResult<Movie> {
    attach_genres(db, vec![model])
        .await?
        .pop()
        .ok_or_else(|| AppError::internal("movie row vanished while loading genres"))
}

/// Deduplicate genre ids and make sure each one exists.
async fn checked_genre_ids<C: ConnectionTrait>(db: &C, ids: &[i32]) -> AppResult<Vec<i32>> {
    let wanted: BTreeSet<i32> = ids.iter().copied().collect();
    if wanted.is_empty() {
        return Ok(Vec::new());
    }

    let found: BTreeSet<i32> = genre::Entity::find()
        .filter(genre::Column::Id.is_in(wanted.iter().copied()))
        .all(db)
        .await?
        .into_iter()
        .map(|g| g.id)
        .collect();

    if let Some(missing) = wanted.difference(&found).next() {
        return Err(AppError::bad_request(format!(
            "Invalid pk \"{}\" - object does not exist.",
            missing
        )));
    }

    Ok(wanted.into_iter().collect())
}

async fn replace_genre_links<C: ConnectionTrait>(
    db: &C,
    movie_id: i32,
    genre_ids: Vec<i32>,
) -> AppResult<()> {
    movie_genre::Entity::delete_many()
        .filter(movie_genre::Column::MovieId.eq(movie_id))
        .exec(db)
        .await?;

    if genre_ids.is_empty() {
        return Ok(());
    }

    let links = genre_ids.into_iter().map(|genre_id| movie_genre::ActiveModel {
        movie_id: Set(movie_id),
        genre_id: Set(genre_id),
    });
    movie_genre::Entity::insert_many(links)
        .exec_without_returning(db)
        .await?;

    Ok(())
}

#[async_trait]
impl MovieRepository for MovieStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Movie>> {
        match movie::Entity::find_by_id(id).one(&self.db).await? {
            Some(model) => Ok(Some(attach_one(&self.db, model).await?)),
            None => Ok(None),
        }
    }

    async fn list(&self, params: PaginationParams) -> AppResult<(Vec<Movie>, u64)> {
        let query = movie::Entity::find().order_by_asc(movie::Column::Id);
        let (models, total) = fetch_page(query, &self.db, params).await?;
        Ok((attach_genres(&self.db, models).await?, total))
    }

    async fn all(&self) -> AppResult<Vec<Movie>> {
        let models = movie::Entity::find()
            .order_by_asc(movie::Column::Id)
            .all(&self.db)
            .await?;
        attach_genres(&self.db, models).await
    }

    async fn filter_by_genre_name(&self, needle: &str) -> AppResult<Vec<Movie>> {
        let matching = movies_with_genre(Condition::all().add(icontains(genre::Column::Name, needle)));

        let models = movie::Entity::find()
            .filter(movie::Column::Id.in_subquery(matching))
            .order_by_asc(movie::Column::Id)
            .all(&self.db)
            .await?;
        attach_genres(&self.db, models).await
    }

    async fn filtered(
        &self,
        rule: FeaturedMovies,
        params: PaginationParams,
    ) -> AppResult<(Vec<Movie>, u64)> {
        let in_genres = movies_with_genre(Condition::all().add(genre::Column::Name.is_in(rule.genres)));
        let eligible_creators = Query::select()
            .column(user::Column::Id)
            .from(user::Entity)
            .and_where(user::Column::Role.ne(rule.excluded_creator_role.as_str()))
            .to_owned();

        let query = movie::Entity::find()
            .filter(movie::Column::Id.in_subquery(in_genres))
            .filter(movie::Column::ReleaseDate.gt(rule.released_after))
            .filter(movie::Column::CreatedBy.in_subquery(eligible_creators))
            .order_by_asc(movie::Column::Id);

        let (models, total) = fetch_page(query, &self.db, params).await?;
        Ok((attach_genres(&self.db, models).await?, total))
    }

    async fn search(
        &self,
        search: MovieSearch,
        params: PaginationParams,
    ) -> AppResult<(Vec<Movie>, u64)> {
        let mut query = movie::Entity::find()
            .order_by_desc(movie::Column::ReleaseDate)
            .order_by_asc(movie::Column::Id);

        if let Some(q) = search.q.as_deref().filter(|q| !q.is_empty()) {
            query = query.filter(
                Condition::any()
                    .add(icontains(movie::Column::Title, q))
                    .add(icontains(movie::Column::Description, q)),
            );
        }
        if let Some(release_date) = search.release_date {
            query = query.filter(movie::Column::ReleaseDate.eq(release_date));
        }
        if let Some(genre_id) = search.genre {
            let with_genre = Query::select()
                .column(movie_genre::Column::MovieId)
                .from(movie_genre::Entity)
                .and_where(movie_genre::Column::GenreId.eq(genre_id))
                .to_owned();
            query = query.filter(movie::Column::Id.in_subquery(with_genre));
        }

        let (models, total) = fetch_page(query, &self.db, params).await?;
        Ok((attach_genres(&self.db, models).await?, total))
    }

    async fn create(&self, new_movie: NewMovie) -> AppResult<Movie> {
        let txn = self.db.begin().await?;

        let genre_ids = checked_genre_ids(&txn, &new_movie.genre_ids).await?;
        let model = movie::ActiveModel {
            id: NotSet,
            title: Set(new_movie.title),
            description: Set(new_movie.description),
            release_date: Set(new_movie.release_date),
            created_by: Set(new_movie.created_by),
        }
        .insert(&txn)
        .await
        .map_err(|e| AppError::from_write(e, "Movie already exists."))?;

        replace_genre_links(&txn, model.id, genre_ids).await?;
        let movie = attach_one(&txn, model).await?;

        txn.commit().await?;
        tracing::debug!(movie_id = movie.id, "movie created");
        Ok(movie)
    }

    async fn update(&self, id: i32, changes: MovieChanges) -> AppResult<Movie> {
        let txn = self.db.begin().await?;

        let existing = movie::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: movie::ActiveModel = existing.clone().into();
        if let Some(title) = changes.title {
            active.title = Set(title);
        }
        if let Some(description) = changes.description {
            active.description = Set(description);
        }
        if let Some(release_date) = changes.release_date {
            active.release_date = Set(release_date);
        }

        let model = if active.is_changed() {
            active.update(&txn).await?
        } else {
            existing
        };

        if let Some(genre_ids) = changes.genre_ids {
            let genre_ids = checked_genre_ids(&txn, &genre_ids).await?;
            replace_genre_links(&txn, model.id, genre_ids).await?;
        }

        let movie = attach_one(&txn, model).await?;
        txn.commit().await?;
        Ok(movie)
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = movie::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
