//! Redirect response construction.
//!
//! # Responsibilities
//! - Build `302 Found` responses pointing at a target URL
//! - Attach the short HTML body browsers show for GET/HEAD
//!
//! # Design Decisions
//! - `Location` is the target verbatim; relative targets are resolved by the client
//! - Targets that are not valid header values produce no response

use axum::{
    body::Body,
    http::{header, HeaderValue, Method, StatusCode},
    response::Response,
};

/// Build a `302 Found` redirect to `target`.
///
/// Returns `None` when `target` cannot be carried in a `Location` header.
pub fn found(method: &Method, target: &str) -> Option<Response> {
    let location = HeaderValue::from_str(target).ok()?;

    let mut builder = Response::builder()
        .status(StatusCode::FOUND)
        .header(header::LOCATION, location);

    let body = if method == Method::GET || method == Method::HEAD {
        builder = builder.header(header::CONTENT_TYPE, "text/html; charset=utf-8");
        Body::from(format!("<a href=\"{}\">Found</a>.\n", html_escape(target)))
    } else {
        Body::empty()
    };

    builder.body(body).ok()
}

fn html_escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&#34;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
