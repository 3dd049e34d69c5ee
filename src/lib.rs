//! Static-site preview server library.
//!
//! Serves the finished build output of a static-site generator. The core is
//! [`routing::resolve`]: a pure function deciding, for one request path,
//! which build artifact (if any) answers it under the configured base path,
//! trailing-slash policy, and output format. Everything else is plumbing
//! around that decision.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::PreviewConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{resolve, Resolution, RouteManifest};
