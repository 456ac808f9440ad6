//! Default fallback for unmatched paths.
//!
//! `GET /` answers with a greeting; every other request is a 404.

use axum::{http::StatusCode, response::IntoResponse, routing::get, Router};

/// Router used at the end of the redirect chain.
pub fn default_fallback() -> Router {
    Router::new().route("/", get(hello)).fallback(not_found)
}

async fn hello() -> &'static str {
    "Hello, world!"
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "404 page not found\n")
}
