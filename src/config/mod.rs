//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → PreviewConfig (validated, immutable)
//!     → shared with the server at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the routing axes (base path, trailing
//!   slash, output format) never change for the lifetime of the process
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    BuildOutputConfig, ObservabilityConfig, OutputFormat, PreviewConfig, ServerConfig, SiteConfig,
    TrailingSlash,
};
pub use validation::{validate_config, ValidationError};
