//! Movie handlers: list with filters, get, create, update, delete.

use super::parse_id;
use crate::error::AppError;
use crate::model::{MovieChanges, MovieQuery, MovieView, NewMovie};
use crate::response::{created, success_one_ok, success_page, updated, MessageBody};
use crate::service::RequestValidator;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;
use std::collections::HashMap;

pub const NOT_FOUND: &str = "movie not found";
const INVALID_CREATE: &str = "invalid data for creating a movie";
const INVALID_UPDATE: &str = "invalid data for updating a movie";

#[utoipa::path(
    get,
    path = "/movies/",
    operation_id = "list_movies",
    tag = "movies",
    params(
        ("page" = Option<i64>, Query, description = "1-based page of 10 movies"),
        ("director_id" = Option<i64>, Query, description = "Only movies by this director"),
        ("genre_id" = Option<i64>, Query, description = "Only movies of this genre"),
    ),
    responses(
        (status = 200, description = "One page of movies", body = [MovieView]),
        (status = 404, description = "A filtered search matched nothing"),
    )
)]
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let query = MovieQuery::from_params(&params)?;
    let rows = state.catalog.list_movies(&query.filter, query.page).await?;
    if rows.is_empty() {
        if let Some(message) = query.filter.empty_result_message() {
            return Err(AppError::NotFound(message.to_string()));
        }
    }
    Ok(success_page(rows, query.page.number()))
}

#[utoipa::path(
    get,
    path = "/movies/{id}",
    operation_id = "get_movie",
    tag = "movies",
    params(("id" = i64, Path, description = "Movie id")),
    responses(
        (status = 200, description = "The movie with director and genre names", body = MovieView),
        (status = 404, description = "No such movie"),
    )
)]
pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str, NOT_FOUND)?;
    let movie = state
        .catalog
        .get_movie(id)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.into()))?;
    Ok(success_one_ok(movie))
}

#[utoipa::path(
    post,
    path = "/movies/",
    operation_id = "create_movie",
    tag = "movies",
    request_body = NewMovie,
    responses(
        (status = 201, description = "Movie added", body = MessageBody),
        (status = 404, description = "Invalid data"),
        (status = 409, description = "Unknown director or genre"),
    )
)]
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let input: NewMovie = RequestValidator::parse(body, INVALID_CREATE)?;
    let id = state.catalog.create_movie(&input).await?;
    tracing::info!(movie_id = id, "movie created");
    Ok(created("new movie added"))
}

#[utoipa::path(
    put,
    path = "/movies/{id}",
    operation_id = "update_movie",
    tag = "movies",
    params(("id" = i64, Path, description = "Movie id")),
    request_body = MovieChanges,
    responses(
        (status = 200, description = "Movie updated", body = MessageBody),
        (status = 404, description = "Invalid data or no such movie"),
        (status = 409, description = "Unknown director or genre"),
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let changes: MovieChanges = RequestValidator::parse(body, INVALID_UPDATE)?;
    let id = parse_id(&id_str, NOT_FOUND)?;
    if !state.catalog.update_movie(id, &changes).await? {
        return Err(AppError::NotFound(NOT_FOUND.into()));
    }
    tracing::info!(movie_id = id, "movie updated");
    Ok(updated(format!("movie with id-{} updated", id)))
}

#[utoipa::path(
    delete,
    path = "/movies/{id}",
    operation_id = "delete_movie",
    tag = "movies",
    params(("id" = i64, Path, description = "Movie id")),
    responses(
        (status = 200, description = "Movie deleted, empty body"),
        (status = 404, description = "No such movie"),
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str, NOT_FOUND)?;
    if !state.catalog.delete_movie(id).await? {
        return Err(AppError::NotFound(NOT_FOUND.into()));
    }
    tracing::info!(movie_id = id, "movie deleted");
    Ok(StatusCode::OK)
}
