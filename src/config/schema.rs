//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the preview
//! server. All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration for the preview server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct PreviewConfig {
    /// Listener configuration (bind address, timeout).
    pub server: ServerConfig,

    /// Site routing configuration (base path, slashes, output format).
    pub site: SiteConfig,

    /// Build output location.
    pub build: BuildOutputConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:4321").
    pub bind_address: String,

    /// Request timeout (total time for request/response) in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:4321".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Site routing configuration.
///
/// These three axes, together with the route manifest, fully determine how a
/// request path resolves to a build artifact. Immutable for the lifetime of
/// the server process.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteConfig {
    /// URL prefix under which the whole site is served (e.g., "/blog").
    /// Empty means the site is mounted at the domain root. When non-empty it
    /// must start with '/' and must not end with '/'.
    pub base_path: String,

    /// Trailing-slash policy for incoming request paths.
    pub trailing_slash: TrailingSlash,

    /// Shape of the build output on disk.
    pub output_format: OutputFormat,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_path: String::new(),
            trailing_slash: TrailingSlash::Ignore,
            output_format: OutputFormat::Directory,
        }
    }
}

/// Trailing-slash enforcement mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrailingSlash {
    /// Request paths must end with '/'.
    Always,
    /// Request paths must not end with '/' (the subpath root is exempt).
    Never,
    /// Both forms are accepted and serve the same artifact.
    Ignore,
}

/// Build output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Each route is a directory: `route/index.html`.
    Directory,
    /// Each route is a flat file: `route.html`.
    File,
}

/// Location of the build output consumed by the server.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BuildOutputConfig {
    /// Directory holding the built artifacts.
    pub root: PathBuf,

    /// Route manifest file name, relative to `root`.
    pub manifest: String,
}

impl BuildOutputConfig {
    /// Full path to the route manifest file.
    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(&self.manifest)
    }
}

impl Default for BuildOutputConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("dist"),
            manifest: "manifest.json".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
