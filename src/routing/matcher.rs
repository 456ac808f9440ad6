//! Request path extraction.
//!
//! # Responsibilities
//! - Produce the lookup key for a request
//!
//! # Design Decisions
//! - Query string is never part of the key
//! - Percent-encoded paths are decoded before lookup
//! - Undecodable (non UTF-8) paths are matched raw

use std::borrow::Cow;

use axum::http::Request;
use percent_encoding::percent_decode_str;

/// Lookup key for a request: its decoded path.
pub fn request_path<B>(req: &Request<B>) -> Cow<'_, str> {
    let raw = req.uri().path();
    match percent_decode_str(raw).decode_utf8() {
        Ok(decoded) => decoded,
        Err(_) => Cow::Borrowed(raw),
    }
}
