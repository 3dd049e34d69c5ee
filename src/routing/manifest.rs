//! The route manifest: every route a build produced, in registration order.
//!
//! # Responsibilities
//! - Hold the immutable route table handed over by the build pipeline
//! - Hold the artifact index (every file the build wrote)
//! - Validate the table at construction (distinct patterns, sane artifacts)
//! - Warn once about ambiguous dynamic overlaps; per-request resolution is
//!   then silent and settled by manifest order
//! - Publish manifests atomically so a rebuild swaps the whole table at once
//!
//! # Design Decisions
//! - Insertion-ordered `Vec`, not a keyed map: "first registered wins" for
//!   ambiguous dynamic routes must be reproducible
//! - Immutable after construction (thread-safe without locks)
//! - O(n) scan per lookup (acceptable for typical route counts)

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use arc_swap::ArcSwap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::routing::pattern::{PatternError, RoutePattern};

/// Errors that can occur while building a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// Manifest file could not be read.
    #[error("failed to read manifest: {0}")]
    Io(#[from] std::io::Error),

    /// Manifest file is not valid JSON.
    #[error("failed to parse manifest: {0}")]
    Parse(#[from] serde_json::Error),

    /// A route pattern string is malformed.
    #[error(transparent)]
    Pattern(#[from] PatternError),

    /// The same pattern was registered twice.
    #[error("duplicate route pattern {0:?}")]
    DuplicatePattern(String),

    /// An artifact path would escape the output root.
    #[error("artifact path {0:?} is not relative to the output root")]
    InvalidArtifact(String),
}

/// One route in the manifest.
#[derive(Debug, Clone)]
pub struct RouteEntry {
    /// The URL pattern this route answers.
    pub pattern: RoutePattern,

    /// Artifact path relative to the output root. For dynamic routes this is
    /// a template whose param segments are substituted from matched values
    /// (`:id/index.html` → `1/index.html`).
    pub artifact_path: String,

    /// Whether the pattern contains parameter segments.
    pub is_dynamic: bool,
}

/// On-disk interchange format produced by the build pipeline.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ManifestDoc {
    /// Routes in build registration order.
    pub routes: Vec<RouteDoc>,

    /// Every artifact the build wrote, relative to the output root.
    pub artifacts: Vec<String>,

    /// Optional artifact to render for 404 responses.
    #[serde(default)]
    pub not_found: Option<String>,
}

/// One route in the interchange format.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteDoc {
    pub pattern: String,
    pub artifact: String,
}

/// The validated, immutable route table for one build.
#[derive(Debug)]
pub struct RouteManifest {
    entries: Vec<RouteEntry>,
    artifacts: HashSet<String>,
    not_found: Option<String>,
}

impl RouteManifest {
    /// Build a manifest from the interchange document, validating it and
    /// warning about ambiguous dynamic overlaps.
    pub fn from_doc(doc: ManifestDoc) -> Result<Self, ManifestError> {
        let mut entries: Vec<RouteEntry> = Vec::with_capacity(doc.routes.len());
        let mut seen = HashSet::new();

        for route in &doc.routes {
            let pattern = RoutePattern::parse(&route.pattern)?;
            if !seen.insert(pattern.as_str().to_string()) {
                return Err(ManifestError::DuplicatePattern(route.pattern.clone()));
            }
            validate_artifact_path(&route.artifact)?;

            let is_dynamic = pattern.is_dynamic();
            entries.push(RouteEntry {
                pattern,
                artifact_path: route.artifact.clone(),
                is_dynamic,
            });
        }

        for artifact in &doc.artifacts {
            validate_artifact_path(artifact)?;
        }
        if let Some(not_found) = &doc.not_found {
            validate_artifact_path(not_found)?;
        }

        warn_ambiguous_routes(&entries);

        Ok(Self {
            entries,
            artifacts: doc.artifacts.into_iter().collect(),
            not_found: doc.not_found,
        })
    }

    /// Routes in registration order.
    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    /// Whether the build produced this exact artifact.
    pub fn contains_artifact(&self, artifact: &str) -> bool {
        self.artifacts.contains(artifact)
    }

    /// The custom 404 artifact, if the build declared one.
    pub fn not_found_artifact(&self) -> Option<&str> {
        self.not_found.as_deref()
    }
}

/// Load and validate a manifest file written by the build pipeline.
pub fn load_manifest(path: &Path) -> Result<RouteManifest, ManifestError> {
    let content = fs::read_to_string(path)?;
    let doc: ManifestDoc = serde_json::from_str(&content)?;
    RouteManifest::from_doc(doc)
}

/// A manifest handle readers can load lock-free and a rebuild can replace
/// atomically. Readers always observe a complete table, never a partial one.
pub type SharedManifest = Arc<ArcSwap<RouteManifest>>;

/// Wrap a manifest for shared, swappable access.
pub fn share(manifest: RouteManifest) -> SharedManifest {
    Arc::new(ArcSwap::from_pointee(manifest))
}

/// Artifact paths come from the build pipeline, but they are joined to the
/// output root before serving, so absolute paths and parent traversal are
/// rejected outright.
fn validate_artifact_path(artifact: &str) -> Result<(), ManifestError> {
    let invalid = artifact.is_empty()
        || artifact.starts_with('/')
        || artifact.split('/').any(|part| part == ".." || part == ".");
    if invalid {
        return Err(ManifestError::InvalidArtifact(artifact.to_string()));
    }
    Ok(())
}

fn warn_ambiguous_routes(entries: &[RouteEntry]) {
    for (i, first) in entries.iter().enumerate() {
        if !first.is_dynamic {
            continue;
        }
        for second in entries.iter().skip(i + 1) {
            if second.is_dynamic && first.pattern.overlaps(&second.pattern) {
                tracing::warn!(
                    first = %first.pattern,
                    second = %second.pattern,
                    "ambiguous dynamic routes; first registered wins"
                );
            }
        }
    }
}
