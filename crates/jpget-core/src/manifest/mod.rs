//! Dependency discovery from a plugin archive's `META-INF/MANIFEST.MF`.
//!
//! [`read_dependencies`] reports every failure. [`extract_dependencies`] is
//! what the downloader uses: an unreadable archive or manifest is treated as
//! a plugin without recorded dependencies so it never aborts a traversal.

mod parse;

use crate::coordinate::Coordinate;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

pub use parse::{parse_dependency_list, Manifest};

/// Manifest entry inside a plugin archive.
pub const MANIFEST_ENTRY: &str = "META-INF/MANIFEST.MF";

/// Main-section attribute listing the plugin's dependencies.
pub const DEPENDENCIES_ATTRIBUTE: &str = "Plugin-Dependencies";

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("failed to open {}: {source}", path.display())]
    Open { path: PathBuf, source: io::Error },
    #[error("not a readable archive: {0}")]
    Archive(#[from] zip::result::ZipError),
    #[error("archive has no META-INF/MANIFEST.MF")]
    NoManifest,
    #[error("failed to read manifest: {0}")]
    Read(#[source] io::Error),
    #[error("manifest is not valid UTF-8")]
    Encoding,
}

/// Reads and parses the manifest of the archive at `path`.
pub fn read_manifest(path: &Path) -> Result<Manifest, ExtractError> {
    let file = File::open(path).map_err(|source| ExtractError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut archive = zip::ZipArchive::new(file)?;
    let mut entry = match archive.by_name(MANIFEST_ENTRY) {
        Ok(entry) => entry,
        Err(zip::result::ZipError::FileNotFound) => return Err(ExtractError::NoManifest),
        Err(e) => return Err(e.into()),
    };
    let mut raw = Vec::new();
    entry.read_to_end(&mut raw).map_err(ExtractError::Read)?;
    let text = String::from_utf8(raw).map_err(|_| ExtractError::Encoding)?;
    Ok(Manifest::parse(&text))
}

/// Dependencies declared by the plugin at `path`, in declaration order.
/// A missing `Plugin-Dependencies` attribute yields an empty list.
pub fn read_dependencies(path: &Path) -> Result<Vec<Coordinate>, ExtractError> {
    let manifest = read_manifest(path)?;
    match manifest.attribute(DEPENDENCIES_ATTRIBUTE) {
        Some(value) => {
            tracing::info!("found dependencies {}", value);
            Ok(parse_dependency_list(value))
        }
        None => Ok(Vec::new()),
    }
}

/// Like [`read_dependencies`], with every extraction error mapped to "no dependencies".
pub fn extract_dependencies(path: &Path) -> Vec<Coordinate> {
    read_dependencies(path).unwrap_or_else(|e| {
        tracing::debug!("no dependencies read from {}: {}", path.display(), e);
        Vec::new()
    })
}
