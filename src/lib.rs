//! Movie catalog: REST backend for movies, directors and genres.

pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod openapi;
pub mod repository;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::{AppConfig, StoreKind};
pub use error::{AppError, ConfigError};
pub use repository::{Catalog, MemoryCatalog, PgCatalog};
pub use routes::{app, common_routes, entity_routes};
pub use state::AppState;
pub use store::{create_pool, ensure_database_exists, ensure_tables};
