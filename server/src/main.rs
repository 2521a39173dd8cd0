//! Movie catalog server: loads configuration, prepares the store and serves the API.
//!
//! Run from repo root: `cargo run -p movie-server`
//! Without PostgreSQL: `STORE=memory cargo run -p movie-server`

use movie_catalog::{
    app, create_pool, ensure_database_exists, ensure_tables, AppConfig, AppState, MemoryCatalog,
    PgCatalog, StoreKind,
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(config.log_filter())
        .init();

    let state = match config.store {
        StoreKind::Postgres => {
            ensure_database_exists(&config.database_url).await?;
            let pool = create_pool(&config.database_url, config.max_connections).await?;
            ensure_tables(&pool).await?;
            AppState::new(PgCatalog::new(pool))
        }
        StoreKind::Memory => {
            tracing::warn!("using the in-memory store; data is lost on exit");
            AppState::new(MemoryCatalog::new())
        }
    };

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!(debug = config.debug, "listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app(state, config.body_limit)).await?;
    Ok(())
}
