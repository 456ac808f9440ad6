//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::document::{parse_document, DocumentFormat, ParseError};
use crate::config::schema::RedirectorConfig;
use crate::config::validation::{validate_config, ValidationError};
use crate::routing::RedirectMap;

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    #[error("Redirect document error: {0}")]
    Redirects(#[from] ParseError),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate settings from a TOML file.
pub fn load_config(path: &Path) -> Result<RedirectorConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: RedirectorConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Read a redirect document and parse it.
///
/// The format is inferred from the extension when `format` is `None`.
pub fn load_redirects(
    path: &Path,
    format: Option<DocumentFormat>,
) -> Result<RedirectMap, ConfigError> {
    let bytes = fs::read(path)?;
    let format = format.unwrap_or_else(|| DocumentFormat::from_path(path));
    Ok(parse_document(&bytes, format)?)
}
