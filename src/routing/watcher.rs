//! Manifest file watcher for rebuild pickup.
//!
//! A rebuild rewrites the manifest file; the watcher reloads it and publishes
//! the new table through the shared handle. Readers mid-request keep the
//! snapshot they already loaded — the swap is atomic, never in place.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::routing::manifest::{load_manifest, SharedManifest};

/// A watcher that monitors the route manifest for rebuilds.
pub struct ManifestWatcher {
    path: PathBuf,
    shared: SharedManifest,
}

impl ManifestWatcher {
    /// Create a new ManifestWatcher publishing into `shared`.
    pub fn new(path: &Path, shared: SharedManifest) -> Self {
        Self {
            path: path.to_path_buf(),
            shared,
        }
    }

    /// Start watching the file in a background thread.
    ///
    /// The returned watcher must be kept alive for watching to continue.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let path = self.path.clone();
        let shared = self.shared.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() {
                        tracing::info!("Manifest change detected, reloading...");
                        match load_manifest(&path) {
                            Ok(manifest) => {
                                let routes = manifest.entries().len();
                                shared.store(Arc::new(manifest));
                                tracing::info!(routes, "Manifest swapped");
                            }
                            Err(e) => {
                                tracing::error!(
                                    "Failed to reload manifest: {}. Keeping current routes.",
                                    e
                                );
                            }
                        }
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Manifest watcher started");
        Ok(watcher)
    }
}
