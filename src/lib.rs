//! Path-based HTTP redirector.
//!
//! Maps request paths to redirect targets, read from a YAML/JSON document or
//! given inline, and delegates every unmapped path to a fallback service.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::{ParseError, RedirectorConfig};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{json_handler, map_handler, yaml_handler, RedirectLayer, RedirectMap, RedirectService};
