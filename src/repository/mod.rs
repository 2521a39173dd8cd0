//! Per-entity repositories and the catalog that bundles them.
//!
//! `postgres::PgCatalog` is the production store; `memory::MemoryCatalog` keeps the
//! same contract (including foreign key checks) in process.

pub mod memory;
pub mod postgres;

use crate::error::AppError;
use crate::model::{
    DbId, DirectorChanges, GenreChanges, MovieChanges, MovieFilter, MovieView, NewDirector,
    NewGenre, NewMovie, Page,
};
use async_trait::async_trait;

pub use memory::MemoryCatalog;
pub use postgres::PgCatalog;

#[async_trait]
pub trait MovieRepository: Send + Sync {
    /// One page of the projection. An empty page is not an error here.
    async fn list_movies(&self, filter: &MovieFilter, page: Page) -> Result<Vec<MovieView>, AppError>;

    async fn get_movie(&self, id: DbId) -> Result<Option<MovieView>, AppError>;

    /// Insert a movie and return the store-assigned id.
    async fn create_movie(&self, input: &NewMovie) -> Result<DbId, AppError>;

    /// Apply the supplied fields. Returns `false` when no movie has `id`.
    async fn update_movie(&self, id: DbId, changes: &MovieChanges) -> Result<bool, AppError>;

    /// Returns `false` when no movie has `id`.
    async fn delete_movie(&self, id: DbId) -> Result<bool, AppError>;
}

#[async_trait]
pub trait DirectorRepository: Send + Sync {
    async fn create_director(&self, input: &NewDirector) -> Result<DbId, AppError>;

    async fn update_director(&self, id: DbId, changes: &DirectorChanges) -> Result<bool, AppError>;

    /// Fails with `AppError::Integrity` while movies still reference the director.
    async fn delete_director(&self, id: DbId) -> Result<bool, AppError>;
}

#[async_trait]
pub trait GenreRepository: Send + Sync {
    async fn create_genre(&self, input: &NewGenre) -> Result<DbId, AppError>;

    async fn update_genre(&self, id: DbId, changes: &GenreChanges) -> Result<bool, AppError>;

    /// Fails with `AppError::Integrity` while movies still reference the genre.
    async fn delete_genre(&self, id: DbId) -> Result<bool, AppError>;
}

/// Everything the HTTP layer needs from a store.
#[async_trait]
pub trait Catalog: MovieRepository + DirectorRepository + GenreRepository {
    /// Readiness probe.
    async fn ping(&self) -> Result<(), AppError>;
}
