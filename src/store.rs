//! Database bootstrap: create the database if missing and the three catalog tables.
//! Idempotent DDL run at startup; there is no versioned migration history.

use crate::error::{AppError, ConfigError};
use sqlx::ConnectOptions;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::str::FromStr;

/// Parents first so the movie foreign keys resolve.
const TABLES_DDL: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS director (
        id BIGSERIAL PRIMARY KEY,
        name VARCHAR(255) NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS genre (
        id BIGSERIAL PRIMARY KEY,
        name VARCHAR(255) NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS movie (
        id BIGSERIAL PRIMARY KEY,
        title VARCHAR(255) NOT NULL,
        description TEXT,
        trailer TEXT,
        year INTEGER,
        rating DOUBLE PRECISION,
        director_id BIGINT NOT NULL,
        genre_id BIGINT NOT NULL,
        CONSTRAINT movie_director_id_fkey FOREIGN KEY (director_id) REFERENCES director (id),
        CONSTRAINT movie_genre_id_fkey FOREIGN KEY (genre_id) REFERENCES genre (id)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS movie_director_id_idx ON movie (director_id)",
    "CREATE INDEX IF NOT EXISTS movie_genre_id_idx ON movie (genre_id)",
];

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool, AppError> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Create `director`, `genre` and `movie` if they do not exist.
pub async fn ensure_tables(pool: &PgPool) -> Result<(), AppError> {
    for ddl in TABLES_DDL {
        sqlx::query(ddl).execute(pool).await?;
    }
    tracing::info!("catalog tables ready");
    Ok(())
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url).map_err(|_| {
        ConfigError::Invalid {
            key: "DATABASE_URL",
            value: database_url.to_string(),
        }
    })?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
        tracing::info!(database = %db_name, "database created");
    }
    Ok(())
}

/// Split a connection URL into the admin (`postgres` database) URL and the target database name.
fn parse_db_name_from_url(url: &str) -> Result<(String, String), ConfigError> {
    let invalid = || ConfigError::Invalid {
        key: "DATABASE_URL",
        value: url.to_string(),
    };
    let scheme_end = url.find("://").ok_or_else(invalid)? + 3;
    let path_start = url[scheme_end..].find('/').ok_or_else(invalid)? + scheme_end + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    let admin_url = format!("{}postgres", base);
    Ok((admin_url, db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
