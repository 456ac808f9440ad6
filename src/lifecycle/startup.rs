//! Startup orchestration.
//!
//! # Responsibilities
//! - Load the redirect document named in the settings
//! - Apply the fail-open policy when it cannot be loaded
//!
//! # Design Decisions
//! - Fail fast by default: a bad document aborts startup
//! - Fail-open serves an empty document table; inline entries still apply

use crate::config::{load_redirects, ConfigError, RedirectsConfig};
use crate::routing::RedirectMap;

/// Build the document redirect table described by `config`.
///
/// No file configured means an empty table.
pub fn load_document_redirects(config: &RedirectsConfig) -> Result<RedirectMap, ConfigError> {
    let Some(path) = config.file.as_deref() else {
        return Ok(RedirectMap::default());
    };

    match load_redirects(path, config.format) {
        Ok(map) => {
            tracing::info!(path = %path.display(), redirects = map.len(), "Redirect document loaded");
            Ok(map)
        }
        Err(e) if config.fail_open => {
            tracing::error!(
                path = %path.display(),
                error = %e,
                "Failed to load redirect document, continuing without it"
            );
            Ok(RedirectMap::default())
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_no_file_is_empty() {
        let map = load_document_redirects(&RedirectsConfig::default()).unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn test_fail_closed_and_fail_open() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(b"- path: /a\n  url: [oops]\n").unwrap();

        let mut config = RedirectsConfig {
            file: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        assert!(matches!(
            load_document_redirects(&config),
            Err(ConfigError::Redirects(_))
        ));

        config.fail_open = true;
        assert!(load_document_redirects(&config).unwrap().is_empty());
    }

    #[test]
    fn test_loads_document() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(b"- path: /a\n  url: u1\n").unwrap();
        let config = RedirectsConfig {
            file: Some(file.path().to_path_buf()),
            ..Default::default()
        };

        let map = load_document_redirects(&config).unwrap();
        assert_eq!(map.lookup("/a"), Some("u1"));
    }
}
