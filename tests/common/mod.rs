//! Shared helpers for HTTP-level tests: an app over the in-memory catalog and
//! one-shot request helpers that return the status and the decoded JSON body.

#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{
    header::{CONTENT_LENGTH, CONTENT_TYPE},
    Method, Request, StatusCode,
};
use axum::Router;
use movie_catalog::{app, AppState, MemoryCatalog};
use serde_json::{json, Value};
use tower::ServiceExt;

pub const BODY_LIMIT: usize = 64 * 1024;

pub fn build_test_app() -> Router {
    app(AppState::new(MemoryCatalog::new()), BODY_LIMIT)
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(v) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

pub async fn send_raw(app: &Router, method: Method, uri: &str, body: &'static str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

/// POST `body` with an explicit `Content-Length`; returns only the status.
pub async fn post_with_length(app: &Router, uri: &str, body: String) -> StatusCode {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .header(CONTENT_LENGTH, body.len())
        .body(Body::from(body))
        .unwrap();
    app.clone().oneshot(request).await.unwrap().status()
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::DELETE, uri, None).await
}

pub fn error_message(body: &Value) -> &str {
    body["error"]["message"].as_str().unwrap_or_default()
}

/// Directors 1..=`directors` and genres 1..=`genres`, named `Director N` / `Genre N`.
pub async fn seed_people(app: &Router, directors: usize, genres: usize) {
    for n in 1..=directors {
        let (status, _) = post_json(app, "/directors/", json!({"name": format!("Director {n}")})).await;
        assert_eq!(status, StatusCode::CREATED);
    }
    for n in 1..=genres {
        let (status, _) = post_json(app, "/genres/", json!({"name": format!("Genre {n}")})).await;
        assert_eq!(status, StatusCode::CREATED);
    }
}

pub async fn create_movie(app: &Router, title: &str, director_id: i64, genre_id: i64) {
    let (status, body) = post_json(
        app,
        "/movies/",
        json!({"title": title, "year": 2000, "rating": 5.0, "director_id": director_id, "genre_id": genre_id}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
}
