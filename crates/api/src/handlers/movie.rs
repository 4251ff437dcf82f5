//! Handlers for the `/movies` resource.
//!
//! Handlers only translate HTTP to store calls; validation and persistence
//! happen inside [`MovieStore`](watchmate_db::MovieStore).

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use watchmate_core::movie::MovieInput;
use watchmate_core::types::DbId;
use watchmate_db::models::movie::Movie;

use crate::error::AppResult;
use crate::state::AppState;

/// GET /api/v1/movies
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Movie>>> {
    let movies = state.store.list().await?;
    tracing::debug!(count = movies.len(), "Listed movies");
    Ok(Json(movies))
}

/// POST /api/v1/movies
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<MovieInput>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Movie>)> {
    let Json(input) = payload?;
    let movie = state.store.create(&input).await?;
    tracing::info!(id = movie.id, name = %movie.name, "Movie created");
    Ok((StatusCode::CREATED, Json(movie)))
}

/// GET /api/v1/movies/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
) -> AppResult<Json<Movie>> {
    let Path(id) = path?;
    let movie = state.store.get(id).await?;
    Ok(Json(movie))
}

/// PUT /api/v1/movies/{id}
///
/// Full update: every field must be supplied.
pub async fn update(
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
    payload: Result<Json<MovieInput>, JsonRejection>,
) -> AppResult<Json<Movie>> {
    let Path(id) = path?;
    let Json(input) = payload?;
    apply_update(&state, id, &input, false).await
}

/// PATCH /api/v1/movies/{id}
///
/// Partial update: omitted fields keep their stored values. A field sent as
/// `null` counts as omitted, so `{"name": null}` leaves the name unchanged.
pub async fn patch(
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
    payload: Result<Json<MovieInput>, JsonRejection>,
) -> AppResult<Json<Movie>> {
    let Path(id) = path?;
    let Json(input) = payload?;
    apply_update(&state, id, &input, true).await
}

/// DELETE /api/v1/movies/{id}
pub async fn delete(
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
) -> AppResult<StatusCode> {
    let Path(id) = path?;
    state.store.delete(id).await?;
    tracing::info!(id, "Movie deleted");
    Ok(StatusCode::NO_CONTENT)
}

async fn apply_update(
    state: &AppState,
    id: DbId,
    input: &MovieInput,
    partial: bool,
) -> AppResult<Json<Movie>> {
    let movie = state.store.update(id, input, partial).await?;
    tracing::info!(id, partial, "Movie updated");
    Ok(Json(movie))
}
