//! HTTP server setup and request handling.
//!
//! # Responsibilities
//! - Create Axum Router with the preview handler
//! - Wire up middleware (tracing, timeout, request ID)
//! - Dispatch every request path through the resolver
//! - Translate resolver verdicts into responses
//!
//! # Design Decisions
//! - One wildcard handler: the resolver, not Axum's router, decides routing
//! - The handler reads a manifest snapshot per request; rebuild swaps never
//!   tear a request between two tables
//! - No resolution logic here — the handler only resolves, reads, translates

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::Response,
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::{PreviewConfig, SiteConfig};
use crate::http::request::{RequestIdLayer, X_REQUEST_ID};
use crate::http::response::{artifact_response, not_found_response, redirect_response};
use crate::routing::resolver::{resolve, Resolution};
use crate::routing::SharedManifest;

/// Application state injected into the handler.
#[derive(Clone)]
pub struct AppState {
    pub site: SiteConfig,
    pub manifest: SharedManifest,
    pub output_root: Arc<PathBuf>,
}

/// HTTP server for the preview.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and manifest.
    pub fn new(config: &PreviewConfig, manifest: SharedManifest) -> Self {
        let state = AppState {
            site: config.site.clone(),
            manifest,
            output_root: Arc::new(config.build.root.clone()),
        };

        let router = Self::build_router(config, state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &PreviewConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(preview_handler))
            .route("/", any(preview_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.server.request_timeout_secs,
            )))
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Main preview handler: resolve the path, read the artifact, respond.
async fn preview_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();
    let path = request.uri().path().to_string();

    // A consistent snapshot for the whole request.
    let manifest = state.manifest.load();

    match resolve(&state.site, &manifest, &path) {
        Resolution::Serve { artifact } => {
            match tokio::fs::read(state.output_root.join(&artifact)).await {
                Ok(bytes) => {
                    tracing::debug!(
                        request_id = %request_id,
                        path = %path,
                        artifact = %artifact,
                        "Serving artifact"
                    );
                    artifact_response(&artifact, bytes)
                }
                Err(e) => {
                    // Stale manifest: the route exists but the file is gone.
                    tracing::error!(
                        request_id = %request_id,
                        artifact = %artifact,
                        error = %e,
                        "Resolved artifact missing on disk"
                    );
                    not_found_response(&state.output_root, manifest.not_found_artifact()).await
                }
            }
        }
        Resolution::Redirect { location } => {
            tracing::debug!(request_id = %request_id, path = %path, location = %location, "Redirecting");
            redirect_response(&location)
        }
        Resolution::NotFound => {
            tracing::debug!(request_id = %request_id, path = %path, "No artifact resolved");
            not_found_response(&state.output_root, manifest.not_found_artifact()).await
        }
    }
}
