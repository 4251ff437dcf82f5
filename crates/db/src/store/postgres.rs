use async_trait::async_trait;
use watchmate_core::movie::{self, MovieInput};
use watchmate_core::types::DbId;

use super::{not_found, MovieStore, StoreResult};
use crate::models::movie::Movie;
use crate::repositories::MovieRepo;
use crate::DbPool;

/// [`MovieStore`] backed by the PostgreSQL `movies` table.
#[derive(Clone)]
pub struct PgMovieStore {
    pool: DbPool,
}

impl PgMovieStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MovieStore for PgMovieStore {
    async fn list(&self) -> StoreResult<Vec<Movie>> {
        Ok(MovieRepo::list(&self.pool).await?)
    }

    async fn get(&self, id: DbId) -> StoreResult<Movie> {
        MovieRepo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    async fn create(&self, input: &MovieInput) -> StoreResult<Movie> {
        let fields = movie::validate(input)?;
        let created = MovieRepo::create(&self.pool, &fields).await?;
        tracing::debug!(id = created.id, "Inserted movie row");
        Ok(created)
    }

    async fn update(&self, id: DbId, input: &MovieInput, partial: bool) -> StoreResult<Movie> {
        // The row lock serializes concurrent writers to the same id across
        // read, merge, validate and write. Returning early drops `tx`, which
        // rolls back and releases the lock.
        let mut tx = self.pool.begin().await?;

        let current = MovieRepo::find_for_update(&mut *tx, id)
            .await?
            .ok_or_else(|| not_found(id))?;
        let fields = movie::validate_update(current.to_input(), input, partial)?;
        let updated = MovieRepo::update(&mut *tx, id, &fields)
            .await?
            .ok_or_else(|| not_found(id))?;

        tx.commit().await?;
        Ok(updated)
    }

    async fn delete(&self, id: DbId) -> StoreResult<()> {
        if MovieRepo::delete(&self.pool, id).await? {
            Ok(())
        } else {
            Err(not_found(id))
        }
    }

    async fn health_check(&self) -> StoreResult<()> {
        Ok(crate::health_check(&self.pool).await?)
    }
}
