//! Resource routes for movies, directors and genres.
//! Collections answer with and without the trailing slash; `{id}` is parsed by the handlers.

use crate::handlers::{director, genre, movie};
use crate::state::AppState;
use axum::{
    routing::{get, post, put},
    Router,
};

pub fn entity_routes(state: AppState) -> Router {
    Router::new()
        .route("/movies", get(movie::list).post(movie::create))
        .route("/movies/", get(movie::list).post(movie::create))
        .route(
            "/movies/:id",
            get(movie::read).put(movie::update).delete(movie::delete),
        )
        .route("/directors", post(director::create))
        .route("/directors/", post(director::create))
        .route("/directors/:id", put(director::update).delete(director::delete))
        .route("/genres", post(genre::create))
        .route("/genres/", post(genre::create))
        .route("/genres/:id", put(genre::update).delete(genre::delete))
        .with_state(state)
}
