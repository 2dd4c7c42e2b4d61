use axum::response::{Html, IntoResponse};

/// Single-page frontend: login form plus the todo list.
const INDEX_HTML: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/web/index.html"));

// axum handler for the frontend
pub async fn root() -> impl IntoResponse {
    Html(INDEX_HTML)
}
