use std::{fmt::Display, sync::Arc};

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use shared::search::SearchQuery;
use songsearch::SearchService;
use tracing::error;

pub fn router(service: Arc<SearchService>) -> Router {
    Router::new()
        .route("/search", get(search))
        .with_state(service)
}

/// `GET /search?name=&artist=&album=`
pub async fn search(
    State(service): State<Arc<SearchService>>,
    Query(query): Query<SearchQuery>,
) -> Response {
    match service.handle(&query).await {
        Ok(result) => json_response(&result),
        Err(e) => server_error("Failed to store search results", e),
    }
}

fn json_response<T: Serialize>(body: &T) -> Response {
    match serde_json::to_vec(body) {
        Ok(bytes) => ([(header::CONTENT_TYPE, "application/json")], bytes).into_response(),
        Err(e) => server_error("Failed to encode search results", e),
    }
}

/// Logs `e` and answers with a generic plain-text 500.
pub fn server_error<E: Display>(message: &'static str, e: E) -> Response {
    error!("{}: {}", message, e);
    (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
}
