//! Default primary resolver: a local Maven repository cache backed by an
//! ordered list of remote Maven repositories.

use super::{normalize_base_url, PrimaryResolver, ResolveError};
use crate::coordinate::Coordinate;
use crate::fetch::{fetch_to_file, HttpOptions};
use crate::layout;
use std::fs;
use std::path::{Path, PathBuf};

/// Public Jenkins artifact repository.
pub const DEFAULT_REMOTE_REPOSITORY: &str = "https://repo.jenkins-ci.org/public/";

#[derive(Debug, Clone)]
pub struct MavenRepoResolver {
    local_repository: PathBuf,
    remotes: Vec<String>,
    http: HttpOptions,
}

impl MavenRepoResolver {
    /// Fails if any remote repository URL does not parse.
    pub fn new<S: AsRef<str>>(
        local_repository: impl Into<PathBuf>,
        remotes: &[S],
        http: HttpOptions,
    ) -> Result<Self, ResolveError> {
        let remotes = remotes
            .iter()
            .map(|r| normalize_base_url(r.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            local_repository: local_repository.into(),
            remotes,
            http,
        })
    }

    pub fn local_repository(&self) -> &Path {
        &self.local_repository
    }

    /// Download URL of `coordinate` in the remote repository `base`.
    pub fn remote_url(base: &str, coordinate: &Coordinate) -> String {
        format!(
            "{}/{}",
            base.trim_end_matches('/'),
            layout::repository_url_path(coordinate)
        )
    }
}

impl PrimaryResolver for MavenRepoResolver {
    fn resolve(&self, coordinate: &Coordinate) -> Result<PathBuf, ResolveError> {
        let cached = layout::repository_path(&self.local_repository, coordinate);
        if is_non_empty_file(&cached) {
            tracing::debug!("{} found in local repository", coordinate);
            return Ok(cached);
        }

        let mut tried = vec![cached.display().to_string()];
        if self.remotes.is_empty() {
            return Err(ResolveError::NotFound {
                coordinate: coordinate.to_string(),
                tried,
            });
        }

        if let Some(parent) = cached.parent() {
            fs::create_dir_all(parent).map_err(|source| ResolveError::Storage {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        for base in &self.remotes {
            let url = Self::remote_url(base, coordinate);
            tracing::debug!("trying {}", url);
            match fetch_to_file(&url, &cached, &self.http) {
                Ok(bytes) => {
                    tracing::debug!("downloaded {} bytes from {}", bytes, url);
                    return Ok(cached);
                }
                Err(e) => {
                    tracing::debug!("{} unavailable: {}", url, e);
                    tried.push(url);
                }
            }
        }
        Err(ResolveError::NotFound {
            coordinate: coordinate.to_string(),
            tried,
        })
    }
}

fn is_non_empty_file(path: &Path) -> bool {
    fs::metadata(path)
        .map(|m| m.is_file() && m.len() > 0)
        .unwrap_or(false)
}
