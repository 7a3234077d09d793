//! Artifact coordinates: the `(group, name, version, packaging, classifier)`
//! identity of a fetchable plugin.
//!
//! Two compact grammars are accepted: the full form
//! `group:name:version[:packaging[:classifier]]` and the short form
//! `name:version`, which places the artifact in the Jenkins plugin group.
//! Dependency declarations read from a plugin manifest use a lenient variant
//! (see [`Coordinate::parse_dependency`]).

mod parse;
pub mod request;

use std::fmt;

pub use request::{ArtifactRequest, RequestError};

/// Group used when a compact coordinate omits it.
pub const DEFAULT_GROUP: &str = "org.jenkins-ci.plugins";

/// Packaging used when a compact coordinate omits it.
pub const DEFAULT_PACKAGING: &str = "hpi";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CoordinateError {
    /// Wrong number of `:`-separated tokens.
    #[error(
        "invalid artifact, you must specify group:name:version[:packaging][:classifier] {0}"
    )]
    InvalidCoordinateFormat(String),
}

/// Identity of a single plugin artifact. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Coordinate {
    group: String,
    name: String,
    version: String,
    packaging: String,
    classifier: Option<String>,
}

impl Coordinate {
    /// Builds a coordinate from already-split parts. Whitespace around each part is trimmed.
    pub fn new(group: &str, name: &str, version: &str, packaging: &str) -> Self {
        Self {
            group: group.trim().to_string(),
            name: name.trim().to_string(),
            version: version.trim().to_string(),
            packaging: packaging.trim().to_string(),
            classifier: None,
        }
    }

    /// Returns a copy of this coordinate carrying `classifier`.
    pub fn with_classifier(mut self, classifier: &str) -> Self {
        self.classifier = Some(classifier.trim().to_string());
        self
    }

    /// Parses the full (3 to 5 tokens) or short (2 tokens) compact form.
    pub fn parse(input: &str) -> Result<Self, CoordinateError> {
        parse::parse_compact(input)
    }

    /// Parses one entry of a `Plugin-Dependencies` list.
    ///
    /// Text after the first `;` is ignored. Only 2 or 3 tokens are accepted;
    /// anything else yields `None` so the caller can skip the entry.
    pub fn parse_dependency(entry: &str) -> Option<Self> {
        parse::parse_dependency(entry)
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn packaging(&self) -> &str {
        &self.packaging
    }

    pub fn classifier(&self) -> Option<&str> {
        self.classifier.as_deref()
    }

    /// Dedup key: `group:name:version`. Packaging and classifier are not part of it.
    pub fn canonical_key(&self) -> String {
        format!("{}:{}:{}", self.group, self.name, self.version)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.group, self.name, self.version, self.packaging
        )?;
        if let Some(classifier) = &self.classifier {
            write!(f, ":{}", classifier)?;
        }
        Ok(())
    }
}
