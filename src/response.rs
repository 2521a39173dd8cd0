//! Standard response envelope helpers.

use axum::{http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize)]
pub struct SuccessOne<T> {
    pub data: T,
}

#[derive(Serialize)]
pub struct SuccessMany<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

#[derive(Serialize, ToSchema)]
pub struct PageMeta {
    pub count: u64,
    pub page: i64,
}

/// Confirmation returned by mutating endpoints instead of the entity.
#[derive(Serialize, ToSchema)]
pub struct MessageBody {
    pub message: String,
}

pub fn success_one_ok<T: Serialize>(data: T) -> (StatusCode, Json<SuccessOne<T>>) {
    (StatusCode::OK, Json(SuccessOne { data }))
}

pub fn success_page<T: Serialize>(data: Vec<T>, page: i64) -> (StatusCode, Json<SuccessMany<T>>) {
    let count = data.len() as u64;
    (
        StatusCode::OK,
        Json(SuccessMany {
            data,
            meta: PageMeta { count, page },
        }),
    )
}

pub fn created(message: impl Into<String>) -> (StatusCode, Json<MessageBody>) {
    (
        StatusCode::CREATED,
        Json(MessageBody {
            message: message.into(),
        }),
    )
}

pub fn updated(message: impl Into<String>) -> (StatusCode, Json<MessageBody>) {
    (
        StatusCode::OK,
        Json(MessageBody {
            message: message.into(),
        }),
    )
}
