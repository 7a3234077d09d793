//! Root artifact selection: separate group/name/version fields or a compact
//! `artifact` string, merged into a single [`Coordinate`] before any I/O.

use super::{Coordinate, CoordinateError, DEFAULT_PACKAGING};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RequestError {
    #[error(transparent)]
    Coordinate(#[from] CoordinateError),
    /// Neither a compact artifact string nor a complete set of fields was given.
    #[error(
        "you must specify an artifact, e.g. org.jenkins-ci.plugins:git:5.2.1 (missing {0})"
    )]
    Missing(&'static str),
}

/// What the user asked for. When `artifact` is set it takes precedence over
/// the individual fields.
#[derive(Debug, Clone, Default)]
pub struct ArtifactRequest {
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
    pub packaging: Option<String>,
    pub artifact: Option<String>,
}

impl ArtifactRequest {
    pub fn into_coordinate(self) -> Result<Coordinate, RequestError> {
        if let Some(artifact) = self.artifact.as_deref() {
            return Ok(Coordinate::parse(artifact)?);
        }

        let group = required(self.group_id.as_deref(), "group id")?;
        let name = required(self.artifact_id.as_deref(), "artifact id")?;
        let version = required(self.version.as_deref(), "version")?;
        let packaging = self
            .packaging
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .unwrap_or(DEFAULT_PACKAGING);
        Ok(Coordinate::new(group, name, version, packaging))
    }
}

fn required<'a>(value: Option<&'a str>, field: &'static str) -> Result<&'a str, RequestError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(RequestError::Missing(field))
}
