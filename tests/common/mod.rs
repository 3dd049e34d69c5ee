//! Shared fixtures: a temporary build output plus a running preview server.

use std::fs;
use std::net::SocketAddr;
use std::path::Path;

use tokio::net::TcpListener;

use preview_server::config::{OutputFormat, PreviewConfig, SiteConfig, TrailingSlash};
use preview_server::http::HttpServer;
use preview_server::lifecycle::Shutdown;
use preview_server::routing::{load_manifest, share, SharedManifest};

/// Write a directory-format build: `route/index.html` artifacts and the
/// manifest the build pipeline would emit. Static routes `/` and `/another`,
/// dynamic `/:id` built only for id=1.
pub fn write_directory_dist(root: &Path) {
    fs::create_dir_all(root.join("another")).unwrap();
    fs::create_dir_all(root.join("1")).unwrap();
    fs::write(root.join("index.html"), "<h1>index</h1>").unwrap();
    fs::write(root.join("another/index.html"), "<h1>another</h1>").unwrap();
    fs::write(root.join("1/index.html"), "<h1>one</h1>").unwrap();
    fs::write(
        root.join("manifest.json"),
        r#"{
            "routes": [
                {"pattern": "/", "artifact": "index.html"},
                {"pattern": "/another", "artifact": "another/index.html"},
                {"pattern": "/:id", "artifact": ":id/index.html"}
            ],
            "artifacts": ["index.html", "another/index.html", "1/index.html"]
        }"#,
    )
    .unwrap();
}

/// Write a file-format build: flat `route.html` artifacts.
pub fn write_file_dist(root: &Path) {
    fs::write(root.join("index.html"), "<h1>index</h1>").unwrap();
    fs::write(root.join("another.html"), "<h1>another</h1>").unwrap();
    fs::write(root.join("1.html"), "<h1>one</h1>").unwrap();
    fs::write(
        root.join("manifest.json"),
        r#"{
            "routes": [
                {"pattern": "/", "artifact": "index.html"},
                {"pattern": "/another", "artifact": "another.html"},
                {"pattern": "/:id", "artifact": ":id.html"}
            ],
            "artifacts": ["index.html", "another.html", "1.html"]
        }"#,
    )
    .unwrap();
}

/// Boot a preview server on an ephemeral port over an existing dist.
///
/// Returns the bound address, the shutdown trigger, and the shared manifest
/// handle (for swap-visibility tests).
pub async fn start_preview(
    root: &Path,
    base_path: &str,
    trailing_slash: TrailingSlash,
    output_format: OutputFormat,
) -> (SocketAddr, Shutdown, SharedManifest) {
    let mut config = PreviewConfig::default();
    config.site = SiteConfig {
        base_path: base_path.to_string(),
        trailing_slash,
        output_format,
    };
    config.build.root = root.to_path_buf();

    let manifest = load_manifest(&config.build.manifest_path()).unwrap();
    let shared = share(manifest);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(&config, shared.clone());
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown, shared)
}

/// Client that never follows redirects, so a 3xx would surface as-is and the
/// reject-don't-redirect policy is directly observable.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}
