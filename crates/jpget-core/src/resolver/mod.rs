//! Turning a [`Coordinate`] into a local file.
//!
//! [`PrimaryResolver`] is the seam for the artifact-repository client that is
//! consulted first; [`maven::MavenRepoResolver`] is the default one. When it
//! cannot supply a file, [`ResolutionStrategy`] falls back to the plugin
//! distribution server ([`plugin_server::PluginServer`]).

pub mod maven;
pub mod plugin_server;
mod strategy;

pub use strategy::ResolutionStrategy;

use crate::coordinate::Coordinate;
use crate::fetch::FetchError;
use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// A configured server URL does not parse.
    #[error("invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("{coordinate} not found in {}", tried.join(", "))]
    NotFound {
        coordinate: String,
        tried: Vec<String>,
    },
    /// A resolver reported success but the file is absent or empty.
    #[error("resolved file {} is missing or empty", path.display())]
    MissingFile { path: PathBuf },
    #[error("could not download plugin from {url}: {source}")]
    Download { url: String, source: FetchError },
    #[error("failed to prepare {}: {source}", path.display())]
    Storage { path: PathBuf, source: io::Error },
    /// Both the primary resolver and the plugin server failed.
    #[error("could not resolve {coordinate}: primary repository: {primary}; plugin server: {fallback}")]
    ResolutionFailed {
        coordinate: String,
        primary: Box<ResolveError>,
        fallback: Box<ResolveError>,
    },
}

/// Where a resolved file came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Primary,
    PluginServer,
}

/// A coordinate together with the local file holding its bytes.
/// The file belongs to whichever resolver produced it.
#[derive(Debug, Clone)]
pub struct ResolvedFile {
    pub coordinate: Coordinate,
    pub path: PathBuf,
    pub source: Source,
}

/// Artifact-repository client consulted before the plugin server.
pub trait PrimaryResolver {
    fn resolve(&self, coordinate: &Coordinate) -> Result<PathBuf, ResolveError>;
}

impl<F> PrimaryResolver for F
where
    F: Fn(&Coordinate) -> Result<PathBuf, ResolveError>,
{
    fn resolve(&self, coordinate: &Coordinate) -> Result<PathBuf, ResolveError> {
        self(coordinate)
    }
}

/// Parses `raw` as an absolute URL and returns it without trailing slashes.
pub(crate) fn normalize_base_url(raw: &str) -> Result<String, ResolveError> {
    let trimmed = raw.trim();
    url::Url::parse(trimmed).map_err(|source| ResolveError::InvalidUrl {
        url: raw.to_string(),
        source,
    })?;
    Ok(trimmed.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_trailing_slash() {
        assert_eq!(
            normalize_base_url("http://127.0.0.1:8080/pluginServer/").unwrap(),
            "http://127.0.0.1:8080/pluginServer"
        );
        assert_eq!(
            normalize_base_url("https://updates.jenkins-ci.org/download/plugins").unwrap(),
            "https://updates.jenkins-ci.org/download/plugins"
        );
    }

    #[test]
    fn normalize_rejects_relative() {
        assert!(matches!(
            normalize_base_url("not a url"),
            Err(ResolveError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn resolution_failed_names_both_sources() {
        let e = ResolveError::ResolutionFailed {
            coordinate: "acme:widget:1.1:hpi".into(),
            primary: Box::new(ResolveError::NotFound {
                coordinate: "acme:widget:1.1:hpi".into(),
                tried: vec!["/repo/acme/widget/1.1/widget-1.1.hpi".into()],
            }),
            fallback: Box::new(ResolveError::Download {
                url: "http://x/widget/1.1/widget.hpi".into(),
                source: FetchError::Http(404),
            }),
        };
        let msg = e.to_string();
        assert!(msg.starts_with("could not resolve acme:widget:1.1:hpi"));
        assert!(msg.contains("/repo/acme/widget/1.1/widget-1.1.hpi"));
        assert!(msg.contains("http://x/widget/1.1/widget.hpi: HTTP 404"));
    }
}
