//! Route-to-artifact resolution.
//!
//! # Data Flow
//! ```text
//! request path
//!     → strip base path (reject if configured but absent)
//!     → extension bypass (explicit filenames skip slash policy)
//!     → segment match against the manifest (static before dynamic)
//!     → trailing-slash policy (always / never / ignore)
//!     → Resolution: Serve artifact, Redirect, or NotFound
//! ```
//!
//! # Design Decisions
//! - Pure function of (config, manifest, path); no I/O, no shared state, so
//!   any number of request tasks may call it concurrently without locks
//! - Total: every input, however malformed, yields a Resolution; nothing
//!   panics or escapes to the transport layer
//! - Slash-policy mismatches are rejected, never redirected; the Redirect
//!   variant exists for the transport contract but current policy never
//!   emits it
//! - Traversal sequences are harmless here: lookups are manifest-driven
//!   exact matches, never filesystem probes

use crate::config::{SiteConfig, TrailingSlash};
use crate::routing::manifest::{RouteEntry, RouteManifest};

/// The verdict for one request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Serve this artifact (path relative to the output root).
    Serve { artifact: String },
    /// Redirect the client. Reserved: current slash policy rejects instead.
    Redirect { location: String },
    /// Nothing satisfies the request.
    NotFound,
}

/// Resolve a request path against the site configuration and route manifest.
///
/// `raw_path` is the path component only; the transport strips query and
/// fragment beforehand.
pub fn resolve(site: &SiteConfig, manifest: &RouteManifest, raw_path: &str) -> Resolution {
    if !raw_path.starts_with('/') {
        return Resolution::NotFound;
    }

    // Base-path strip. A configured base that is absent from the request is
    // a mismatch, not an error: the bare root never serves a based site.
    let Some(rel) = strip_base_path(&site.base_path, raw_path) else {
        return Resolution::NotFound;
    };

    // Slash policy judges the request as sent, before canonicalization.
    let had_trailing_slash = raw_path.ends_with('/');

    // Explicit filenames resolve verbatim against the artifact index and
    // bypass slash policy entirely.
    if !rel.ends_with('/') && final_segment_has_extension(rel) {
        let artifact = &rel[1..];
        return if manifest.contains_artifact(artifact) {
            Resolution::Serve {
                artifact: artifact.to_string(),
            }
        } else {
            Resolution::NotFound
        };
    }

    // Canonical key: trailing slash stripped, except the root itself.
    let key = if rel.len() > 1 {
        rel.strip_suffix('/').unwrap_or(rel)
    } else {
        rel
    };
    let segments: Vec<&str> = if key == "/" {
        Vec::new()
    } else {
        key[1..].split('/').collect()
    };

    let Some((entry, params)) = match_entry(manifest, &segments) else {
        return Resolution::NotFound;
    };

    // Trailing-slash policy. The subpath root is exempt from `never` (both
    // forms serve), while `always` rejects even the slashless root.
    let is_root = key == "/";
    match site.trailing_slash {
        TrailingSlash::Always if !had_trailing_slash => return Resolution::NotFound,
        TrailingSlash::Never if had_trailing_slash && !is_root => return Resolution::NotFound,
        _ => {}
    }

    if entry.is_dynamic {
        // A dynamic shape is routable, but only built values exist. The
        // substituted artifact must be one the build actually produced.
        let artifact = substitute_template(&entry.artifact_path, &params);
        if manifest.contains_artifact(&artifact) {
            Resolution::Serve { artifact }
        } else {
            Resolution::NotFound
        }
    } else {
        Resolution::Serve {
            artifact: entry.artifact_path.clone(),
        }
    }
}

/// Strip the configured base path, yielding the site-relative path.
fn strip_base_path<'a>(base: &str, raw: &'a str) -> Option<&'a str> {
    if base.is_empty() {
        return Some(raw);
    }
    let rest = raw.strip_prefix(base)?;
    if rest.is_empty() {
        // Exactly the base: site root without a trailing slash.
        Some("/")
    } else if rest.starts_with('/') {
        Some(rest)
    } else {
        // "/blogpost" does not live under base "/blog".
        None
    }
}

fn final_segment_has_extension(rel: &str) -> bool {
    rel.rsplit('/')
        .next()
        .is_some_and(|segment| segment.contains('.'))
}

/// Find the matching manifest entry: an exact static match beats any dynamic
/// one; among dynamic matches the first registered wins.
fn match_entry<'m, 'p>(
    manifest: &'m RouteManifest,
    segments: &[&'p str],
) -> Option<(&'m RouteEntry, Vec<(&'m str, &'p str)>)> {
    for entry in manifest.entries().iter().filter(|e| !e.is_dynamic) {
        if let Some(params) = entry.pattern.matches(segments) {
            return Some((entry, params));
        }
    }
    for entry in manifest.entries().iter().filter(|e| e.is_dynamic) {
        if let Some(params) = entry.pattern.matches(segments) {
            return Some((entry, params));
        }
    }
    None
}

/// Substitute matched parameter values into an artifact template. A template
/// segment `:id` (optionally with a suffix, `:id.html`) is replaced by the
/// captured value for `id`.
fn substitute_template(template: &str, params: &[(&str, &str)]) -> String {
    template
        .split('/')
        .map(|segment| match segment.strip_prefix(':') {
            Some(rest) => {
                let name_end = rest
                    .find(|c: char| !c.is_alphanumeric() && c != '_')
                    .unwrap_or(rest.len());
                let (name, suffix) = rest.split_at(name_end);
                match params.iter().find(|(n, _)| *n == name) {
                    Some((_, value)) => format!("{value}{suffix}"),
                    None => segment.to_string(),
                }
            }
            None => segment.to_string(),
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use crate::routing::manifest::{ManifestDoc, RouteDoc};

    fn manifest(routes: &[(&str, &str)], artifacts: &[&str]) -> RouteManifest {
        RouteManifest::from_doc(ManifestDoc {
            routes: routes
                .iter()
                .map(|(pattern, artifact)| RouteDoc {
                    pattern: pattern.to_string(),
                    artifact: artifact.to_string(),
                })
                .collect(),
            artifacts: artifacts.iter().map(|a| a.to_string()).collect(),
            not_found: None,
        })
        .unwrap()
    }

    /// The fixture mirrored throughout: static routes `/` and `/another`, a
    /// dynamic `/:id` built only for id=1.
    fn directory_manifest() -> RouteManifest {
        manifest(
            &[
                ("/", "index.html"),
                ("/another", "another/index.html"),
                ("/:id", ":id/index.html"),
            ],
            &["index.html", "another/index.html", "1/index.html"],
        )
    }

    fn file_manifest() -> RouteManifest {
        manifest(
            &[
                ("/", "index.html"),
                ("/another", "another.html"),
                ("/:id", ":id.html"),
            ],
            &["index.html", "another.html", "1.html"],
        )
    }

    fn site(base: &str, slash: TrailingSlash, format: OutputFormat) -> SiteConfig {
        SiteConfig {
            base_path: base.to_string(),
            trailing_slash: slash,
            output_format: format,
        }
    }

    fn serve(artifact: &str) -> Resolution {
        Resolution::Serve {
            artifact: artifact.to_string(),
        }
    }

    #[test]
    fn test_directory_never_matrix() {
        let site = site("/blog", TrailingSlash::Never, OutputFormat::Directory);
        let m = directory_manifest();

        assert_eq!(resolve(&site, &m, "/"), Resolution::NotFound);
        assert_eq!(resolve(&site, &m, "/blog/"), serve("index.html"));
        assert_eq!(resolve(&site, &m, "/blog"), serve("index.html"));
        assert_eq!(resolve(&site, &m, "/blog/another/"), Resolution::NotFound);
        assert_eq!(resolve(&site, &m, "/blog/another"), serve("another/index.html"));
        assert_eq!(resolve(&site, &m, "/blog/1"), serve("1/index.html"));
        assert_eq!(resolve(&site, &m, "/blog/2"), Resolution::NotFound);
    }

    #[test]
    fn test_directory_always_matrix() {
        let site = site("/blog", TrailingSlash::Always, OutputFormat::Directory);
        let m = directory_manifest();

        assert_eq!(resolve(&site, &m, "/"), Resolution::NotFound);
        assert_eq!(resolve(&site, &m, "/blog/"), serve("index.html"));
        assert_eq!(resolve(&site, &m, "/blog"), Resolution::NotFound);
        assert_eq!(resolve(&site, &m, "/blog/another/"), serve("another/index.html"));
        assert_eq!(resolve(&site, &m, "/blog/another"), Resolution::NotFound);
        assert_eq!(resolve(&site, &m, "/blog/1/"), serve("1/index.html"));
        assert_eq!(resolve(&site, &m, "/blog/2/"), Resolution::NotFound);
    }

    #[test]
    fn test_directory_ignore_matrix() {
        let site = site("/blog", TrailingSlash::Ignore, OutputFormat::Directory);
        let m = directory_manifest();

        assert_eq!(resolve(&site, &m, "/"), Resolution::NotFound);
        assert_eq!(resolve(&site, &m, "/blog/"), serve("index.html"));
        assert_eq!(resolve(&site, &m, "/blog"), serve("index.html"));
        assert_eq!(resolve(&site, &m, "/blog/another/"), serve("another/index.html"));
        assert_eq!(resolve(&site, &m, "/blog/another"), serve("another/index.html"));
        assert_eq!(resolve(&site, &m, "/blog/1/"), serve("1/index.html"));
        assert_eq!(resolve(&site, &m, "/blog/1"), serve("1/index.html"));
        assert_eq!(resolve(&site, &m, "/blog/2/"), Resolution::NotFound);
    }

    #[test]
    fn test_file_format_matrix() {
        let m = file_manifest();

        let never = site("/blog", TrailingSlash::Never, OutputFormat::File);
        assert_eq!(resolve(&never, &m, "/"), Resolution::NotFound);
        assert_eq!(resolve(&never, &m, "/blog/"), serve("index.html"));
        assert_eq!(resolve(&never, &m, "/blog"), serve("index.html"));
        assert_eq!(resolve(&never, &m, "/blog/another/"), Resolution::NotFound);
        assert_eq!(resolve(&never, &m, "/blog/1"), serve("1.html"));
        assert_eq!(resolve(&never, &m, "/blog/2"), Resolution::NotFound);

        let always = site("/blog", TrailingSlash::Always, OutputFormat::File);
        assert_eq!(resolve(&always, &m, "/blog"), Resolution::NotFound);
        assert_eq!(resolve(&always, &m, "/blog/another/"), serve("another.html"));
        assert_eq!(resolve(&always, &m, "/blog/1/"), serve("1.html"));
        assert_eq!(resolve(&always, &m, "/blog/2/"), Resolution::NotFound);
    }

    #[test]
    fn test_explicit_filenames_bypass_slash_policy() {
        let m = file_manifest();

        // Identical outcomes in every mode: extensions skip the policy.
        for slash in [TrailingSlash::Always, TrailingSlash::Never, TrailingSlash::Ignore] {
            let site = site("/blog", slash, OutputFormat::File);
            assert_eq!(resolve(&site, &m, "/blog/index.html"), serve("index.html"));
            assert_eq!(resolve(&site, &m, "/blog/another.html"), serve("another.html"));
            assert_eq!(resolve(&site, &m, "/blog/1.html"), serve("1.html"));
            assert_eq!(resolve(&site, &m, "/blog/2.html"), Resolution::NotFound);
        }
    }

    #[test]
    fn test_empty_base_path_serves_root() {
        let site = site("", TrailingSlash::Never, OutputFormat::Directory);
        let m = directory_manifest();

        assert_eq!(resolve(&site, &m, "/"), serve("index.html"));
        assert_eq!(resolve(&site, &m, "/another"), serve("another/index.html"));
        assert_eq!(resolve(&site, &m, "/1"), serve("1/index.html"));
    }

    #[test]
    fn test_base_path_prefix_must_be_exact() {
        let site = site("/blog", TrailingSlash::Ignore, OutputFormat::Directory);
        let m = directory_manifest();

        // "/blogpost" shares a string prefix with the base but is not under it.
        assert_eq!(resolve(&site, &m, "/blogpost"), Resolution::NotFound);
        assert_eq!(resolve(&site, &m, "/other/blog"), Resolution::NotFound);
    }

    #[test]
    fn test_static_beats_dynamic() {
        let site = site("", TrailingSlash::Ignore, OutputFormat::Directory);
        // Dynamic registered first; the static entry must still win.
        let m = manifest(
            &[
                ("/:id", ":id/index.html"),
                ("/another", "another/index.html"),
            ],
            &["another/index.html", "1/index.html"],
        );
        assert_eq!(resolve(&site, &m, "/another"), serve("another/index.html"));
    }

    #[test]
    fn test_ambiguous_dynamic_first_registered_wins() {
        let site = site("", TrailingSlash::Ignore, OutputFormat::Directory);
        let m = manifest(
            &[("/:id", ":id/index.html"), ("/:slug", "s/:slug/index.html")],
            &["1/index.html", "s/1/index.html"],
        );
        assert_eq!(resolve(&site, &m, "/1"), serve("1/index.html"));
    }

    #[test]
    fn test_traversal_paths_fail_to_match() {
        let site = site("/blog", TrailingSlash::Ignore, OutputFormat::Directory);
        let m = directory_manifest();

        assert_eq!(resolve(&site, &m, "/blog/../etc/passwd"), Resolution::NotFound);
        assert_eq!(resolve(&site, &m, "/blog/.."), Resolution::NotFound);
        assert_eq!(resolve(&site, &m, "/blog//another"), Resolution::NotFound);
        assert_eq!(resolve(&site, &m, "no-leading-slash"), Resolution::NotFound);
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let site = site("/blog", TrailingSlash::Never, OutputFormat::Directory);
        let m = directory_manifest();

        let first = resolve(&site, &m, "/blog/1");
        for _ in 0..10 {
            assert_eq!(resolve(&site, &m, "/blog/1"), first);
        }
    }

    #[test]
    fn test_substitute_template_with_suffix() {
        assert_eq!(
            substitute_template(":id/index.html", &[("id", "1")]),
            "1/index.html"
        );
        assert_eq!(substitute_template(":id.html", &[("id", "7")]), "7.html");
        assert_eq!(
            substitute_template("a/:x/b/:y.html", &[("x", "1"), ("y", "2")]),
            "a/1/b/2.html"
        );
    }
}
