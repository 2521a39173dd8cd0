//! Director handlers: create, update, delete. Directors have no list or get endpoint.

use super::parse_id;
use crate::error::AppError;
use crate::model::{DirectorChanges, NewDirector};
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

pub const NOT_FOUND: &str = "director not found";
const INVALID_CREATE: &str = "invalid data for creating a director";
const INVALID_UPDATE: &str = "invalid data for updating a director";

#[utoipa::path(
    post,
    path = "/directors/",
    operation_id = "create_director",
    tag = "directors",
    request_body = NewDirector,
    responses(
        (status = 201, description = "Director added", body = MessageBody),
        (status = 404, description = "Invalid data"),
    )
)]
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let input: NewDirector = RequestValidator::parse(body, INVALID_CREATE)?;
    let id = state.catalog.create_director(&input).await?;
    tracing::info!(director_id = id, "director created");
    Ok(created("new director added"))
}

#[utoipa::path(
    put,
    path = "/directors/{id}",
    operation_id = "update_director",
    tag = "directors",
    params(("id" = i64, Path, description = "Director id")),
    request_body = DirectorChanges,
    responses(
        (status = 200, description = "Director updated", body = MessageBody),
        (status = 404, description = "Invalid data or no such director"),
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let changes: DirectorChanges = RequestValidator::parse(body, INVALID_UPDATE)?;
    let id = parse_id(&id_str, NOT_FOUND)?;
    if !state.catalog.update_director(id, &changes).await? {
        return Err(AppError::NotFound(NOT_FOUND.into()));
    }
    tracing::info!(director_id = id, "director updated");
    Ok(updated(format!("director with id-{} updated", id)))
}

#[utoipa::path(
    delete,
    path = "/directors/{id}",
    operation_id = "delete_director",
    tag = "directors",
    params(("id" = i64, Path, description = "Director id")),
    responses(
        (status = 200, description = "Director deleted, empty body"),
        (status = 404, description = "No such director"),
        (status = 409, description = "Movies still reference the director"),
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str, NOT_FOUND)?;
    if !state.catalog.delete_director(id).await? {
        return Err(AppError::NotFound(NOT_FOUND.into()));
    }
    tracing::info!(director_id = id, "director deleted");
    Ok(StatusCode::OK)
}
