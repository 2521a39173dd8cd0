//! PostgreSQL repositories. Every mutation runs in its own explicit transaction.

use super::{Catalog, DirectorRepository, GenreRepository, MovieRepository};
use crate::error::AppError;
use crate::model::{
    DbId, DirectorChanges, GenreChanges, MovieChanges, MovieFilter, MovieView, NewDirector,
    NewGenre, NewMovie, Page,
};
use crate::sql::{select_movie_by_id, select_movies, QueryBuf};
use async_trait::async_trait;
use sqlx::PgPool;

const DIRECTOR_TABLE: &str = "director";
const GENRE_TABLE: &str = "genre";
const MOVIE_TABLE: &str = "movie";

#[derive(Clone)]
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    pub fn new(pool: PgPool) -> Self {
        PgCatalog { pool }
    }

    async fn query_projection(&self, q: &QueryBuf) -> Result<Vec<MovieView>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query_as::<_, MovieView>(&q.sql);
        for p in &q.params {
            query = query.bind(*p);
        }
        Ok(query.fetch_all(&self.pool).await?)
    }
}

#[async_trait]
impl MovieRepository for PgCatalog {
    async fn list_movies(&self, filter: &MovieFilter, page: Page) -> Result<Vec<MovieView>, AppError> {
        self.query_projection(&select_movies(filter, page)).await
    }

    async fn get_movie(&self, id: DbId) -> Result<Option<MovieView>, AppError> {
        let mut rows = self.query_projection(&select_movie_by_id(id)).await?;
        match rows.len() {
            0 => Ok(None),
            1 => Ok(rows.pop()),
            n => Err(AppError::Internal(format!("{} movies share id {}", n, id))),
        }
    }

    async fn create_movie(&self, input: &NewMovie) -> Result<DbId, AppError> {
        let sql = "INSERT INTO movie (title, description, trailer, year, rating, director_id, genre_id) \
                   VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING id";
        tracing::debug!(sql = %sql, "query (tx)");
        let mut tx = self.pool.begin().await?;
        let id: DbId = sqlx::query_scalar(sql)
            .bind(&input.title)
            .bind(input.description.as_deref())
            .bind(input.trailer.as_deref())
            .bind(input.year)
            .bind(input.rating)
            .bind(input.director_id)
            .bind(input.genre_id)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(id)
    }

    async fn update_movie(&self, id: DbId, changes: &MovieChanges) -> Result<bool, AppError> {
        let sql = "UPDATE movie SET \
                       title = COALESCE($2, title), \
                       description = COALESCE($3, description), \
                       trailer = COALESCE($4, trailer), \
                       year = COALESCE($5, year), \
                       rating = COALESCE($6, rating), \
                       director_id = COALESCE($7, director_id), \
                       genre_id = COALESCE($8, genre_id) \
                   WHERE id = $1 RETURNING id";
        tracing::debug!(sql = %sql, id, "query (tx)");
        let mut tx = self.pool.begin().await?;
        let updated: Option<DbId> = sqlx::query_scalar(sql)
            .bind(id)
            .bind(changes.title.as_deref())
            .bind(changes.description.as_deref())
            .bind(changes.trailer.as_deref())
            .bind(changes.year)
            .bind(changes.rating)
            .bind(changes.director_id)
            .bind(changes.genre_id)
            .fetch_optional(&mut *tx)
            .await?;
        finish(tx, updated.is_some()).await
    }

    async fn delete_movie(&self, id: DbId) -> Result<bool, AppError> {
        delete_by_id(&self.pool, MOVIE_TABLE, id).await
    }
}

#[async_trait]
impl DirectorRepository for PgCatalog {
    async fn create_director(&self, input: &NewDirector) -> Result<DbId, AppError> {
        insert_named(&self.pool, DIRECTOR_TABLE, &input.name).await
    }

    async fn update_director(&self, id: DbId, changes: &DirectorChanges) -> Result<bool, AppError> {
        update_named(&self.pool, DIRECTOR_TABLE, id, changes.name.as_deref()).await
    }

    async fn delete_director(&self, id: DbId) -> Result<bool, AppError> {
        delete_by_id(&self.pool, DIRECTOR_TABLE, id).await
    }
}

#[async_trait]
impl GenreRepository for PgCatalog {
    async fn create_genre(&self, input: &NewGenre) -> Result<DbId, AppError> {
        insert_named(&self.pool, GENRE_TABLE, &input.name).await
    }

    async fn update_genre(&self, id: DbId, changes: &GenreChanges) -> Result<bool, AppError> {
        update_named(&self.pool, GENRE_TABLE, id, changes.name.as_deref()).await
    }

    async fn delete_genre(&self, id: DbId) -> Result<bool, AppError> {
        delete_by_id(&self.pool, GENRE_TABLE, id).await
    }
}

#[async_trait]
impl Catalog for PgCatalog {
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Commit when the statement touched a row, roll back otherwise.
async fn finish(tx: sqlx::Transaction<'_, sqlx::Postgres>, touched: bool) -> Result<bool, AppError> {
    if touched {
        tx.commit().await?;
    } else {
        tx.rollback().await?;
    }
    Ok(touched)
}

/// INSERT into a single-column (`name`) table. `table` is one of the fixed table names.
async fn insert_named(pool: &PgPool, table: &'static str, name: &str) -> Result<DbId, AppError> {
    let sql = format!("INSERT INTO {} (name) VALUES ($1) RETURNING id", table);
    tracing::debug!(sql = %sql, "query (tx)");
    let mut tx = pool.begin().await?;
    let id: DbId = sqlx::query_scalar(&sql).bind(name).fetch_one(&mut *tx).await?;
    tx.commit().await?;
    Ok(id)
}

async fn update_named(
    pool: &PgPool,
    table: &'static str,
    id: DbId,
    name: Option<&str>,
) -> Result<bool, AppError> {
    let sql = format!(
        "UPDATE {} SET name = COALESCE($2, name) WHERE id = $1 RETURNING id",
        table
    );
    tracing::debug!(sql = %sql, id, "query (tx)");
    let mut tx = pool.begin().await?;
    let updated: Option<DbId> = sqlx::query_scalar(&sql)
        .bind(id)
        .bind(name)
        .fetch_optional(&mut *tx)
        .await?;
    finish(tx, updated.is_some()).await
}

async fn delete_by_id(pool: &PgPool, table: &'static str, id: DbId) -> Result<bool, AppError> {
    let sql = format!("DELETE FROM {} WHERE id = $1", table);
    tracing::debug!(sql = %sql, id, "query (tx)");
    let mut tx = pool.begin().await?;
    let result = sqlx::query(&sql).bind(id).execute(&mut *tx).await?;
    finish(tx, result.rows_affected() > 0).await
}
