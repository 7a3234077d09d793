//! On-disk layout for plugin artifacts.
//!
//! `base/<group segments>/<name>/<version>/<name>-<version>.<packaging>` is
//! shared by the download directory and the local repository cache, so a file
//! written by one resolver is found by the other.

use crate::coordinate::Coordinate;
use std::path::{Path, PathBuf};

/// Staging suffix for in-flight downloads.
pub const TEMP_SUFFIX: &str = ".part";

/// Directory of `coordinate` relative to a layout root: one component per
/// dot-separated group segment, then name, then version.
pub fn relative_dir(coordinate: &Coordinate) -> PathBuf {
    let mut dir = PathBuf::new();
    for segment in group_segments(coordinate) {
        dir.push(segment);
    }
    dir.push(coordinate.name());
    dir.push(coordinate.version());
    dir
}

/// `<name>-<version>.<packaging>`.
pub fn file_name(coordinate: &Coordinate) -> String {
    format!(
        "{}-{}.{}",
        coordinate.name(),
        coordinate.version(),
        coordinate.packaging()
    )
}

/// Full destination path of `coordinate` under `base`.
pub fn build_path(base: &Path, coordinate: &Coordinate) -> PathBuf {
    base.join(relative_dir(coordinate)).join(file_name(coordinate))
}

/// File name inside a Maven repository, where a classifier becomes part of
/// the name (`<name>-<version>-<classifier>.<packaging>`).
pub fn repository_file_name(coordinate: &Coordinate) -> String {
    match coordinate.classifier() {
        Some(classifier) => format!(
            "{}-{}-{}.{}",
            coordinate.name(),
            coordinate.version(),
            classifier,
            coordinate.packaging()
        ),
        None => file_name(coordinate),
    }
}

/// Path of `coordinate` inside a local Maven repository rooted at `base`.
pub fn repository_path(base: &Path, coordinate: &Coordinate) -> PathBuf {
    base.join(relative_dir(coordinate))
        .join(repository_file_name(coordinate))
}

/// `/`-separated path of `coordinate` relative to a remote Maven repository URL.
pub fn repository_url_path(coordinate: &Coordinate) -> String {
    let mut parts: Vec<&str> = group_segments(coordinate).collect();
    parts.push(coordinate.name());
    parts.push(coordinate.version());
    format!("{}/{}", parts.join("/"), repository_file_name(coordinate))
}

/// Path for the staging file: appends `.part` to the final path.
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

fn group_segments(coordinate: &Coordinate) -> impl Iterator<Item = &str> {
    coordinate
        .group()
        .split('.')
        .map(str::trim)
        .filter(|s| !s.is_empty())
}
