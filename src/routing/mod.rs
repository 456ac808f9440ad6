//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path)
//!     → matcher.rs (decoded path, query stripped)
//!     → router.rs (exact lookup in RedirectMap)
//!     → dispatcher.rs: hit → 302 Found, miss → fallback service
//!
//! Table construction (at startup):
//!     [(path, url)] in document order
//!     → collapse, last write wins
//!     → freeze as immutable RedirectMap
//! ```
//!
//! # Design Decisions
//! - Table built at startup, immutable at runtime
//! - Exact match only: no prefixes, no wildcards
//! - Dispatchers nest: each one's fallback may be another dispatcher

pub mod dispatcher;
pub mod matcher;
pub mod router;

pub use dispatcher::{json_handler, map_handler, yaml_handler, RedirectLayer, RedirectService};
pub use router::RedirectMap;
