//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID)
//!     → routing dispatcher chain (redirect or fall through)
//!     → response.rs (302 Found) | fallback.rs (greeting / 404)
//!     → Send to client
//! ```

pub mod fallback;
pub mod request;
pub mod response;
pub mod server;

pub use request::X_REQUEST_ID;
pub use server::HttpServer;
