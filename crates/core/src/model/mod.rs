//! Core data model for artifacts, discovered classes, methods, and couplings.
//!
//! - `Artifact`: coordinate of a binary archive in a repository.
//! - `DiscoveredClass`: one class name paired with its raw class-file bytes.
//! - `Method` / `MethodCoupling`: the nodes and directed edges of the
//!   coupling graph.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_PACKAGING: &str = "jar";

/// Coordinate of an archive (group / artifact / version).
///
/// Immutable once constructed; resolution to a file on disk is done by an
/// `ArtifactResolver`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Artifact {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packaging: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifier: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArtifactParseError {
    #[error("Invalid artifact coordinate '{0}'; expected group:artifact:version[:packaging[:classifier]]")]
    InvalidCoordinate(String),
}

impl Artifact {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
            packaging: None,
            classifier: None,
        }
    }

    /// Builder-style helper to attach a classifier (e.g. `sources`, `tests`).
    pub fn with_classifier(mut self, classifier: impl Into<String>) -> Self {
        self.classifier = Some(classifier.into());
        self
    }

    /// Parse `group:artifact:version[:packaging[:classifier]]`.
    pub fn parse(coordinate: &str) -> Result<Self, ArtifactParseError> {
        let parts: Vec<&str> = coordinate.split(':').collect();
        if !(3..=5).contains(&parts.len()) || parts.iter().any(|p| p.trim().is_empty()) {
            return Err(ArtifactParseError::InvalidCoordinate(coordinate.to_string()));
        }
        Ok(Self {
            group_id: parts[0].to_string(),
            artifact_id: parts[1].to_string(),
            version: parts[2].to_string(),
            packaging: parts.get(3).map(|s| s.to_string()),
            classifier: parts.get(4).map(|s| s.to_string()),
        })
    }

    pub fn packaging(&self) -> &str {
        self.packaging.as_deref().unwrap_or(DEFAULT_PACKAGING)
    }

    /// File name as laid out in a repository, e.g. `guava-31.1-jre.jar`.
    pub fn to_file_name(&self) -> String {
        match &self.classifier {
            Some(classifier) => format!(
                "{}-{}-{}.{}",
                self.artifact_id,
                self.version,
                classifier,
                self.packaging()
            ),
            None => format!("{}-{}.{}", self.artifact_id, self.version, self.packaging()),
        }
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)?;
        if self.packaging.is_some() || self.classifier.is_some() {
            write!(f, ":{}", self.packaging())?;
        }
        if let Some(classifier) = &self.classifier {
            write!(f, ":{classifier}")?;
        }
        Ok(())
    }
}

/// A class found inside an archive: its fully-qualified name (dot-delimited)
/// and the raw bytes stored for it.
///
/// Values from different artifacts are never merged, even when the names
/// collide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredClass {
    pub class_name: String,
    pub class_bytes: Vec<u8>,
}

impl DiscoveredClass {
    pub fn new(class_name: impl Into<String>, class_bytes: Vec<u8>) -> Self {
        Self { class_name: class_name.into(), class_bytes }
    }
}

/// A method identified by owner class, name, and descriptor.
///
/// Field order matters: the derived ordering compares class, then method
/// name, then signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Method {
    pub class_name: String,
    pub method_name: String,
    pub method_signature: String,
}

impl Method {
    pub fn new(
        class_name: impl Into<String>,
        method_name: impl Into<String>,
        method_signature: impl Into<String>,
    ) -> Self {
        Self {
            class_name: class_name.into(),
            method_name: method_name.into(),
            method_signature: method_signature.into(),
        }
    }

    /// Package of the owner class; empty for the default package.
    pub fn package_name(&self) -> &str {
        self.class_name.rsplit_once('.').map(|(pkg, _)| pkg).unwrap_or("")
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}{}", self.class_name, self.method_name, self.method_signature)
    }
}

/// Where in the calling method a coupling was observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallSite {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

/// Directed edge `source -> target`.
///
/// Equality, hashing, and ordering only look at `(source, target)`; the
/// call-site `location` is provenance and two calls from the same method to
/// the same target collapse into one edge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodCoupling {
    pub source: Method,
    pub target: Method,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<CallSite>,
}

impl MethodCoupling {
    pub fn new(source: Method, target: Method) -> Self {
        Self { source, target, location: None }
    }

    pub fn with_location(mut self, location: CallSite) -> Self {
        self.location = Some(location);
        self
    }
}

impl PartialEq for MethodCoupling {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.target == other.target
    }
}

impl Eq for MethodCoupling {}

impl Hash for MethodCoupling {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.source.hash(state);
        self.target.hash(state);
    }
}

impl PartialOrd for MethodCoupling {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MethodCoupling {
    fn cmp(&self, other: &Self) -> Ordering {
        self.source.cmp(&other.source).then_with(|| self.target.cmp(&other.target))
    }
}

impl fmt::Display for MethodCoupling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)
    }
}
