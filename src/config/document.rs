//! Redirect document parsing.
//!
//! # Responsibilities
//! - Decode a YAML or JSON list of `{path, url}` records
//! - Collapse the records into a `RedirectMap` in document order
//!
//! # Design Decisions
//! - Later records overwrite earlier ones with the same path
//! - Target URLs are taken verbatim (no well-formedness checks)
//! - An empty or null document is an empty mapping, not an error
//! - Unknown record fields are ignored

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::schema::PathUrlPair;
use crate::routing::RedirectMap;

/// Error raised when a redirect document cannot be decoded.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("invalid YAML redirect document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON redirect document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Structured format of a redirect document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    #[default]
    Yaml,
    Json,
}

impl DocumentFormat {
    /// Pick a format from a file extension. Anything but `.json` is YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => DocumentFormat::Json,
            _ => DocumentFormat::Yaml,
        }
    }
}

/// Parse a YAML redirect document.
///
/// ```text
/// - path: /some-path
///   url: https://www.example.com/demo
/// ```
pub fn parse_yaml(bytes: &[u8]) -> Result<RedirectMap, ParseError> {
    if is_blank(bytes) {
        return Ok(RedirectMap::default());
    }
    let pairs: Option<Vec<PathUrlPair>> = serde_yaml::from_slice(bytes)?;
    Ok(collapse(pairs))
}

/// Parse a JSON redirect document: `[{"path": "...", "url": "..."}]`.
pub fn parse_json(bytes: &[u8]) -> Result<RedirectMap, ParseError> {
    if is_blank(bytes) {
        return Ok(RedirectMap::default());
    }
    let pairs: Option<Vec<PathUrlPair>> = serde_json::from_slice(bytes)?;
    Ok(collapse(pairs))
}

/// Parse a redirect document in the given format.
pub fn parse_document(bytes: &[u8], format: DocumentFormat) -> Result<RedirectMap, ParseError> {
    match format {
        DocumentFormat::Yaml => parse_yaml(bytes),
        DocumentFormat::Json => parse_json(bytes),
    }
}

fn is_blank(bytes: &[u8]) -> bool {
    bytes.iter().all(u8::is_ascii_whitespace)
}

fn collapse(pairs: Option<Vec<PathUrlPair>>) -> RedirectMap {
    RedirectMap::from_pairs(
        pairs
            .unwrap_or_default()
            .into_iter()
            .map(|pair| (pair.path, pair.url)),
    )
}
