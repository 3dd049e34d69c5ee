//! Observability subsystem.
//!
//! Structured logging only: the preview server's observability surface is
//! its log stream. Request IDs flow through all log lines via `http::request`.

pub mod logging;

pub use logging::init_logging;
