//! Static-site preview server.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────┐
//!                        │               PREVIEW SERVER                 │
//!                        │                                              │
//!   Client Request       │  ┌─────────┐      ┌────────────────────┐    │
//!   ─────────────────────┼─▶│  http   │─────▶│  routing::resolver │    │
//!                        │  │ server  │      │  (pure decision)   │    │
//!                        │  └────┬────┘      └─────────┬──────────┘    │
//!                        │       │                     │               │
//!                        │       │             ┌───────▼──────────┐    │
//!                        │       │             │  RouteManifest   │◀───┼── build pipeline
//!                        │       │             │  (atomic swap)   │    │   (manifest.json)
//!                        │       │             └──────────────────┘    │
//!                        │       ▼                                     │
//!   Client Response      │  ┌─────────┐                                │
//!   ◀────────────────────┼──│artifact │◀── output root on disk         │
//!                        │  │  bytes  │                                │
//!                        │  └─────────┘                                │
//!                        │                                             │
//!                        │  config · observability · lifecycle         │
//!                        └──────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use preview_server::config::{load_config, PreviewConfig};
use preview_server::http::HttpServer;
use preview_server::lifecycle::{wait_for_signal, Shutdown};
use preview_server::observability::init_logging;
use preview_server::routing::{load_manifest, share, ManifestWatcher};

/// Serve the build output of a static site.
#[derive(Debug, Parser)]
#[command(name = "preview-server", version)]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = "preview.toml")]
    config: PathBuf,

    /// Override the configured port.
    #[arg(long)]
    port: Option<u16>,

    /// Override the configured build output root.
    #[arg(long)]
    root: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = if args.config.exists() {
        load_config(&args.config)?
    } else {
        PreviewConfig::default()
    };

    if let Some(port) = args.port {
        let mut addr: SocketAddr = config.server.bind_address.parse()?;
        addr.set_port(port);
        config.server.bind_address = addr.to_string();
    }
    if let Some(root) = args.root {
        config.build.root = root;
    }

    init_logging(&config.observability);

    tracing::info!(
        bind_address = %config.server.bind_address,
        base_path = %config.site.base_path,
        trailing_slash = ?config.site.trailing_slash,
        output_format = ?config.site.output_format,
        output_root = %config.build.root.display(),
        "Configuration loaded"
    );

    // Load the manifest the build pipeline wrote, then keep watching it so a
    // rebuild swaps the route table without a restart.
    let manifest_path = config.build.manifest_path();
    let manifest = load_manifest(&manifest_path)?;
    tracing::info!(
        routes = manifest.entries().len(),
        manifest = %manifest_path.display(),
        "Route manifest loaded"
    );
    let shared = share(manifest);

    let _watcher = ManifestWatcher::new(&manifest_path, shared.clone()).run()?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        wait_for_signal().await;
        shutdown.trigger();
    });

    let listener = TcpListener::bind(&config.server.bind_address).await?;

    let server = HttpServer::new(&config, shared);
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
