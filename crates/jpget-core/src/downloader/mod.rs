//! Recursive plugin downloader.
//!
//! For each coordinate: resolve it, copy the file into the download
//! directory, mark it visited, then schedule its declared dependencies.
//! The first resolution or persist failure aborts the whole traversal.

mod traversal;

pub use traversal::Traversal;

use crate::coordinate::Coordinate;
use crate::layout;
use crate::manifest;
use crate::resolver::{PrimaryResolver, ResolutionStrategy, ResolveError, ResolvedFile, Source};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error("failed to save {coordinate} to {}: {source}", path.display())]
    Persist {
        coordinate: String,
        path: PathBuf,
        source: io::Error,
    },
}

/// One persisted artifact.
#[derive(Debug, Clone)]
pub struct DownloadedArtifact {
    pub coordinate: Coordinate,
    /// Location inside the download directory.
    pub path: PathBuf,
    pub source: Source,
}

/// Everything persisted by a run, in processing order.
#[derive(Debug, Clone, Default)]
pub struct DownloadReport {
    pub artifacts: Vec<DownloadedArtifact>,
}

impl DownloadReport {
    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    /// Number of artifacts that had to come from the plugin server.
    pub fn fallback_count(&self) -> usize {
        self.artifacts
            .iter()
            .filter(|a| a.source == Source::PluginServer)
            .count()
    }
}

pub struct Downloader<P> {
    strategy: ResolutionStrategy<P>,
    download_dir: PathBuf,
}

impl<P: PrimaryResolver> Downloader<P> {
    pub fn new(strategy: ResolutionStrategy<P>, download_dir: impl Into<PathBuf>) -> Self {
        Self {
            strategy,
            download_dir: download_dir.into(),
        }
    }

    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    /// Downloads `root` and its dependency closure. Each canonical key is
    /// processed at most once, so cycles and diamonds terminate.
    pub fn run(&self, root: &Coordinate) -> Result<DownloadReport, DownloadError> {
        let mut traversal = Traversal::new(root.clone());
        let mut report = DownloadReport::default();

        while let Some(coordinate) = traversal.next_pending() {
            tracing::info!("Resolving {}", coordinate);
            let resolved = self.strategy.resolve(&coordinate)?;
            let path = self.persist(&resolved)?;
            traversal.mark_visited(&coordinate);

            let dependencies = manifest::extract_dependencies(&resolved.path);
            traversal.push_dependencies(dependencies);

            report.artifacts.push(DownloadedArtifact {
                coordinate,
                path,
                source: resolved.source,
            });
        }

        tracing::info!(
            "downloaded {} artifact(s) into {}",
            traversal.visited_count(),
            self.download_dir.display()
        );
        Ok(report)
    }

    /// Copies the resolved file to its layout path, replacing what is there.
    fn persist(&self, resolved: &ResolvedFile) -> Result<PathBuf, DownloadError> {
        let dest = layout::build_path(&self.download_dir, &resolved.coordinate);
        let fail = |source: io::Error| DownloadError::Persist {
            coordinate: resolved.coordinate.to_string(),
            path: dest.clone(),
            source,
        };

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(fail)?;
        }
        if same_file(&resolved.path, &dest) {
            // Download directory doubles as the local repository.
            return Ok(dest);
        }
        if dest.exists() {
            fs::remove_file(&dest).map_err(fail)?;
        }
        fs::copy(&resolved.path, &dest).map_err(fail)?;
        tracing::debug!("saved {} to {}", resolved.coordinate, dest.display());
        Ok(dest)
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
