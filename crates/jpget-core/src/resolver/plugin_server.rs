//! Fallback source: the Jenkins plugin distribution server.
//!
//! The server names files `{name}/{version}/{name}.hpi` (no group, no version
//! in the file name). Downloads are saved into the local repository cache at
//! the regular versioned layout path so later lookups find them.

use super::{normalize_base_url, ResolveError};
use crate::coordinate::Coordinate;
use crate::fetch::{fetch_to_file, HttpOptions};
use crate::layout;
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_PLUGIN_SERVER_URL: &str = "https://updates.jenkins-ci.org/download/plugins";

/// Extension used in plugin server URLs regardless of the coordinate's packaging.
pub const FALLBACK_EXTENSION: &str = "hpi";

#[derive(Debug, Clone)]
pub struct PluginServer {
    base_url: String,
    cache_root: PathBuf,
    http: HttpOptions,
}

impl PluginServer {
    /// `base_url` is validated here; downloads land under `cache_root`.
    pub fn new(
        base_url: &str,
        cache_root: impl Into<PathBuf>,
        http: HttpOptions,
    ) -> Result<Self, ResolveError> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            cache_root: cache_root.into(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base}/{name}/{version}/{name}.hpi`
    pub fn download_url(&self, coordinate: &Coordinate) -> String {
        format!(
            "{}/{}/{}/{}.{}",
            self.base_url,
            coordinate.name(),
            coordinate.version(),
            coordinate.name(),
            FALLBACK_EXTENSION
        )
    }

    /// Downloads `coordinate` into the cache and returns the saved path.
    /// Any non-2xx status or transport error fails; there is no retry.
    /// Where a fallback download is kept: the same local repository path the
    /// primary resolver looks up, classifier included.
    pub fn cache_path(&self, coordinate: &Coordinate) -> PathBuf {
        layout::repository_path(&self.cache_root, coordinate)
    }

    pub fn fetch(&self, coordinate: &Coordinate) -> Result<PathBuf, ResolveError> {
        let dest = self.cache_path(coordinate);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(|source| ResolveError::Storage {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let url = self.download_url(coordinate);
        tracing::info!("about to download from {}", url);
        match fetch_to_file(&url, &dest, &self.http) {
            Ok(bytes) => {
                tracing::debug!("saved {} bytes to {}", bytes, dest.display());
                Ok(dest)
            }
            Err(source) => {
                if source.is_timeout() {
                    tracing::error!("timed out downloading plugin from {}", url);
                } else {
                    tracing::error!("could not download plugin from {}: {}", url, source);
                }
                Err(ResolveError::Download { url, source })
            }
        }
    }
}
