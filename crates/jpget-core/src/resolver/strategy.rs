//! Primary resolver first, plugin server second. No third source, no retry.

use super::plugin_server::PluginServer;
use super::{PrimaryResolver, ResolveError, ResolvedFile, Source};
use crate::coordinate::Coordinate;
use std::fs;
use std::path::PathBuf;

pub struct ResolutionStrategy<P> {
    primary: P,
    plugin_server: PluginServer,
}

impl<P: PrimaryResolver> ResolutionStrategy<P> {
    pub fn new(primary: P, plugin_server: PluginServer) -> Self {
        Self {
            primary,
            plugin_server,
        }
    }

    /// Returns a file for `coordinate` that exists and is non-empty.
    ///
    /// A primary result pointing at a missing or empty file counts as a
    /// primary failure. If the plugin server fails too, both causes are
    /// reported in [`ResolveError::ResolutionFailed`].
    pub fn resolve(&self, coordinate: &Coordinate) -> Result<ResolvedFile, ResolveError> {
        let primary_err = match self.primary.resolve(coordinate).and_then(require_file) {
            Ok(path) => {
                return Ok(ResolvedFile {
                    coordinate: coordinate.clone(),
                    path,
                    source: Source::Primary,
                })
            }
            Err(e) => e,
        };
        tracing::warn!(
            "could not download {} from the primary repository: {}",
            coordinate,
            primary_err
        );

        match self.plugin_server.fetch(coordinate).and_then(require_file) {
            Ok(path) => Ok(ResolvedFile {
                coordinate: coordinate.clone(),
                path,
                source: Source::PluginServer,
            }),
            Err(fallback) => Err(ResolveError::ResolutionFailed {
                coordinate: coordinate.to_string(),
                primary: Box::new(primary_err),
                fallback: Box::new(fallback),
            }),
        }
    }
}

fn require_file(path: PathBuf) -> Result<PathBuf, ResolveError> {
    match fs::metadata(&path) {
        Ok(m) if m.is_file() && m.len() > 0 => Ok(path),
        _ => Err(ResolveError::MissingFile { path }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::HttpOptions;
    use std::path::Path;
    use std::time::Duration;

    fn unreachable_server(cache: &Path) -> PluginServer {
        // Bind then drop so nothing listens on the port.
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let http = HttpOptions {
            connect_timeout: Duration::from_secs(2),
            timeout: Duration::from_secs(5),
        };
        PluginServer::new(&format!("http://127.0.0.1:{}/plugins", port), cache, http).unwrap()
    }

    #[test]
    fn primary_hit_is_returned_without_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("widget.hpi");
        fs::write(&file, b"zip bytes").unwrap();
        let expected = file.clone();
        let primary = move |_: &Coordinate| -> Result<PathBuf, ResolveError> { Ok(file.clone()) };
        let strategy = ResolutionStrategy::new(primary, unreachable_server(dir.path()));

        let c = Coordinate::parse("acme:widget:1.1").unwrap();
        let resolved = strategy.resolve(&c).unwrap();
        assert_eq!(resolved.path, expected);
        assert_eq!(resolved.source, Source::Primary);
        assert_eq!(resolved.coordinate, c);
    }

    #[test]
    fn primary_missing_file_falls_back_and_reports_both() {
        let dir = tempfile::tempdir().unwrap();
        let ghost = dir.path().join("ghost.hpi");
        let primary = move |_: &Coordinate| -> Result<PathBuf, ResolveError> { Ok(ghost.clone()) };
        let strategy = ResolutionStrategy::new(primary, unreachable_server(dir.path()));

        let c = Coordinate::parse("acme:widget:1.1").unwrap();
        match strategy.resolve(&c) {
            Err(ResolveError::ResolutionFailed {
                coordinate,
                primary,
                fallback,
            }) => {
                assert_eq!(coordinate, "acme:widget:1.1:hpi");
                assert!(matches!(*primary, ResolveError::MissingFile { .. }));
                assert!(matches!(*fallback, ResolveError::Download { .. }));
            }
            other => panic!("expected ResolutionFailed, got {:?}", other),
        }
        let cached = crate::layout::build_path(dir.path(), &c);
        assert!(!cached.exists(), "failed fallback must not leave a file");
    }

    #[test]
    fn primary_empty_file_counts_as_primary_failure() {
        let dir = tempfile::tempdir().unwrap();
        let empty = dir.path().join("empty.hpi");
        fs::write(&empty, b"").unwrap();
        let primary = move |_: &Coordinate| -> Result<PathBuf, ResolveError> { Ok(empty.clone()) };
        let strategy = ResolutionStrategy::new(primary, unreachable_server(dir.path()));

        let c = Coordinate::parse("acme:widget:1.1").unwrap();
        match strategy.resolve(&c) {
            Err(ResolveError::ResolutionFailed { primary, .. }) => match *primary {
                ResolveError::MissingFile { path } => assert!(path.ends_with("empty.hpi")),
                other => panic!("expected MissingFile, got {:?}", other),
            },
            other => panic!("expected ResolutionFailed, got {:?}", other),
        }
    }
}
