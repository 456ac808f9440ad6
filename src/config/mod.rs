//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! settings file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RedirectorConfig (validated, immutable)
//!
//! redirect document (YAML/JSON)
//!     → document.rs (decode records, collapse in order)
//!     → RedirectMap (immutable, shared via Arc)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All settings have defaults to allow minimal files
//! - Validation separates syntactic (serde) from semantic checks
//! - A bad redirect document is a `ParseError`; the caller picks abort or empty

pub mod document;
pub mod loader;
pub mod schema;
pub mod validation;

pub use document::{parse_document, parse_json, parse_yaml, DocumentFormat, ParseError};
pub use loader::{load_config, load_redirects, ConfigError};
pub use schema::{ListenerConfig, ObservabilityConfig, PathUrlPair, RedirectorConfig, RedirectsConfig};
