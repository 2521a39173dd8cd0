//! Genre handlers: create, update, delete. Genres have no list or get endpoint.

use super::parse_id;
use crate::error::AppError;
use crate::model::{GenreChanges, NewGenre};
use crate::response::{created, updated, MessageBody};
use crate::service::RequestValidator;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;

pub const NOT_FOUND: &str = "genre not found";
const INVALID_CREATE: &str = "invalid data for creating a genre";
const INVALID_UPDATE: &str = "invalid data for updating a genre";

#[utoipa::path(
    post,
    path = "/genres/",
    operation_id = "create_genre",
    tag = "genres",
    request_body = NewGenre,
    responses(
        (status = 201, description = "Genre added", body = MessageBody),
        (status = 404, description = "Invalid data"),
    )
)]
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let input: NewGenre = RequestValidator::parse(body, INVALID_CREATE)?;
    let id = state.catalog.create_genre(&input).await?;
    tracing::info!(genre_id = id, "genre created");
    Ok(created("new genre added"))
}

#[utoipa::path(
    put,
    path = "/genres/{id}",
    operation_id = "update_genre",
    tag = "genres",
    params(("id" = i64, Path, description = "Genre id")),
    request_body = GenreChanges,
    responses(
        (status = 200, description = "Genre updated", body = MessageBody),
        (status = 404, description = "Invalid data or no such genre"),
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let changes: GenreChanges = RequestValidator::parse(body, INVALID_UPDATE)?;
    let id = parse_id(&id_str, NOT_FOUND)?;
    if !state.catalog.update_genre(id, &changes).await? {
        return Err(AppError::NotFound(NOT_FOUND.into()));
    }
    tracing::info!(genre_id = id, "genre updated");
    Ok(updated(format!("genre with id-{} updated", id)))
}

#[utoipa::path(
    delete,
    path = "/genres/{id}",
    operation_id = "delete_genre",
    tag = "genres",
    params(("id" = i64, Path, description = "Genre id")),
    responses(
        (status = 200, description = "Genre deleted, empty body"),
        (status = 404, description = "No such genre"),
        (status = 409, description = "Movies still reference the genre"),
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str, NOT_FOUND)?;
    if !state.catalog.delete_genre(id).await? {
        return Err(AppError::NotFound(NOT_FOUND.into()));
    }
    tracing::info!(genre_id = id, "genre deleted");
    Ok(StatusCode::OK)
}
