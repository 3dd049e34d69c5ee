//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, wildcard dispatch)
//!     → request.rs (request ID stamping)
//!     → [routing::resolver decides the verdict]
//!     → response.rs (artifact bytes, content type, 404 body)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestIdLayer, X_REQUEST_ID};
pub use server::HttpServer;
