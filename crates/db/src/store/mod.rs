//! The movie store interface and its implementations.
//!
//! A [`MovieStore`] validates before it persists: `create` and `update`
//! take raw [`MovieInput`] and either write a record that passed every rule
//! or return [`CoreError::Validation`] without touching storage.

mod memory;
mod postgres;

use async_trait::async_trait;
use watchmate_core::error::CoreError;
use watchmate_core::movie::{self, MovieInput};
use watchmate_core::types::DbId;

use crate::models::movie::Movie;

pub use memory::InMemoryMovieStore;
pub use postgres::PgMovieStore;

/// Errors surfaced by a [`MovieStore`].
///
/// Domain outcomes (not found, validation) stay distinct from storage
/// faults so the transport can map them separately.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Read/write access to movie records.
#[async_trait]
pub trait MovieStore: Send + Sync {
    /// All records ordered by ascending id.
    async fn list(&self) -> StoreResult<Vec<Movie>>;

    async fn get(&self, id: DbId) -> StoreResult<Movie>;

    /// Validate `input` as a complete record, assign an id and persist it.
    async fn create(&self, input: &MovieInput) -> StoreResult<Movie>;

    /// Validate and persist new values for an existing record.
    ///
    /// With `partial`, fields absent from `input` keep their stored values;
    /// the merged record is validated as a whole.
    async fn update(&self, id: DbId, input: &MovieInput, partial: bool) -> StoreResult<Movie>;

    async fn delete(&self, id: DbId) -> StoreResult<()>;

    /// Confirm the backing storage is reachable.
    async fn health_check(&self) -> StoreResult<()>;
}

pub(crate) fn not_found(id: DbId) -> StoreError {
    StoreError::Core(CoreError::NotFound {
        entity: movie::ENTITY,
        id,
    })
}
