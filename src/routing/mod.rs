//! Routing subsystem: from request path to build artifact.
//!
//! # Data Flow
//! ```text
//! Incoming request path
//!     → resolver.rs (base strip, slash policy, decision)
//!     → pattern.rs (positional segment matching)
//!     → manifest.rs (route table + artifact index lookup)
//!     → Return: Serve artifact, Redirect, or NotFound
//!
//! Manifest publication (at startup and per rebuild):
//!     manifest.json
//!     → parse + validate patterns and artifacts
//!     → warn ambiguous dynamic overlaps once
//!     → freeze as immutable RouteManifest
//!     → publish via atomic swap (watcher.rs on rebuild)
//! ```
//!
//! # Design Decisions
//! - Manifest compiled once, immutable at runtime; rebuilds swap wholesale
//! - No regex anywhere (structural segment comparison only)
//! - Deterministic: static beats dynamic, first registered wins among dynamic
//! - The resolver is pure; every concurrency concern lives at the edges

pub mod manifest;
pub mod pattern;
pub mod resolver;
pub mod watcher;

pub use manifest::{load_manifest, share, ManifestError, RouteEntry, RouteManifest, SharedManifest};
pub use pattern::{RoutePattern, Segment};
pub use resolver::{resolve, Resolution};
pub use watcher::ManifestWatcher;
