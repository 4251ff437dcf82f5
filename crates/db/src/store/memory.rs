use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use watchmate_core::error::CoreError;
use watchmate_core::movie::{self, MovieInput};
use watchmate_core::types::DbId;

use super::{not_found, MovieStore, StoreResult};
use crate::models::movie::Movie;

/// Process-local [`MovieStore`].
///
/// Writers hold the write lock across validate-then-store, so concurrent
/// writes to one id apply one after another. Ids start at 1 and are never
/// reused, even after a delete.
#[derive(Debug, Default)]
pub struct InMemoryMovieStore {
    inner: RwLock<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    last_id: DbId,
    rows: BTreeMap<DbId, Movie>,
}

impl InMemoryMovieStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MovieStore for InMemoryMovieStore {
    async fn list(&self) -> StoreResult<Vec<Movie>> {
        let state = self.inner.read().await;
        Ok(state.rows.values().cloned().collect())
    }

    async fn get(&self, id: DbId) -> StoreResult<Movie> {
        let state = self.inner.read().await;
        state.rows.get(&id).cloned().ok_or_else(|| not_found(id))
    }

    async fn create(&self, input: &MovieInput) -> StoreResult<Movie> {
        let fields = movie::validate(input)?;

        let mut state = self.inner.write().await;
        let id = state
            .last_id
            .checked_add(1)
            .ok_or_else(|| CoreError::Internal("movie id space exhausted".into()))?;
        let created = Movie::from_fields(id, &fields);
        state.last_id = id;
        state.rows.insert(id, created.clone());
        Ok(created)
    }

    async fn update(&self, id: DbId, input: &MovieInput, partial: bool) -> StoreResult<Movie> {
        let mut state = self.inner.write().await;
        let row = state.rows.get_mut(&id).ok_or_else(|| not_found(id))?;

        let fields = movie::validate_update(row.to_input(), input, partial)?;
        *row = Movie::from_fields(id, &fields);
        Ok(row.clone())
    }

    async fn delete(&self, id: DbId) -> StoreResult<()> {
        let mut state = self.inner.write().await;
        state.rows.remove(&id).map(|_| ()).ok_or_else(|| not_found(id))
    }

    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }
}
