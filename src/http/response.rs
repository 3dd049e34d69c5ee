//! Translation of resolver verdicts into HTTP responses.
//!
//! # Responsibilities
//! - Serve artifact bytes with a content type guessed from the extension
//! - Render the build's custom 404 artifact when one is declared
//! - Translate the reserved Redirect verdict into a Location response
//!
//! # Design Decisions
//! - Content type comes from the artifact path, never from request headers
//!   (no content negotiation)
//! - A declared 404 artifact that cannot be read falls back to plain text

use std::path::Path;

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

/// Build a 200 response for artifact bytes.
pub fn artifact_response(artifact: &str, bytes: Vec<u8>) -> Response {
    let content_type = mime_guess::from_path(artifact)
        .first_or_octet_stream()
        .to_string();
    ([(header::CONTENT_TYPE, content_type)], bytes).into_response()
}

/// Build the redirect response for a `Resolution::Redirect` verdict.
///
/// 308 preserves the request method, which matters for the extension point
/// even though current slash policy never redirects.
pub fn redirect_response(location: &str) -> Response {
    (
        StatusCode::PERMANENT_REDIRECT,
        [(header::LOCATION, location.to_string())],
    )
        .into_response()
}

/// Build a 404 response, rendering the declared not-found artifact when it
/// exists and is readable.
pub async fn not_found_response(root: &Path, not_found_artifact: Option<&str>) -> Response {
    if let Some(artifact) = not_found_artifact {
        match tokio::fs::read(root.join(artifact)).await {
            Ok(bytes) => {
                let content_type = mime_guess::from_path(artifact)
                    .first_or_octet_stream()
                    .to_string();
                return (
                    StatusCode::NOT_FOUND,
                    [(header::CONTENT_TYPE, content_type)],
                    bytes,
                )
                    .into_response();
            }
            Err(e) => {
                tracing::warn!(artifact, error = %e, "Declared 404 artifact unreadable");
            }
        }
    }
    (StatusCode::NOT_FOUND, "404: Not Found").into_response()
}
