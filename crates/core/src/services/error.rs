use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;
use zip::result::ZipError;

use crate::model::Artifact;
use crate::services::classfile::ClassParseError;

/// Broad failure categories used for reporting and exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Artifact or path missing; a caller-input error.
    NotFound,
    /// The isolated scope could not be built; fatal for the artifact.
    ConstructionFailure,
    /// The archive or one of its entries could not be read; fatal for the artifact.
    ReadFailure,
    /// A single class could not be resolved; logged and skipped.
    PartialLoadFailure,
}

/// Raised by an `ArtifactResolver`.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Jar file does not exist for {artifact} (searched: {})", display_paths(searched))]
    ArtifactNotFound { artifact: Artifact, searched: Vec<PathBuf> },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", ")
}

/// Fatal errors for one artifact's enumeration.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Resolution failed; surfaced to the caller as an invalid argument.
    #[error("Illegal artifact argument: {0}")]
    ArtifactNotFound(#[from] ResolveError),

    #[error("Invalid archive location {}: {reason}", path.display())]
    InvalidLocation { path: PathBuf, reason: String },

    #[error("Unable to create class scope for jar {}: {source}", path.display())]
    LoaderConstructionFailed {
        path: PathBuf,
        #[source]
        source: ZipError,
    },

    #[error("Unable to load class {class_name} from {}: {source}", path.display())]
    ClassReadFailed {
        path: PathBuf,
        class_name: String,
        #[source]
        source: ZipError,
    },
}

impl ScanError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ScanError::ArtifactNotFound(_) | ScanError::InvalidLocation { .. } => {
                ErrorKind::NotFound
            }
            ScanError::LoaderConstructionFailed { .. } => ErrorKind::ConstructionFailure,
            ScanError::ClassReadFailed { .. } => ErrorKind::ReadFailure,
        }
    }
}

/// Why a single class was left out of a scan.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    /// The payload is not a readable class file.
    #[error("invalid class file: {0}")]
    InvalidClass(#[from] ClassParseError),
    /// The payload declares a different class than its entry path implies.
    #[error("class def not found: entry declares {declared}")]
    NameMismatch { declared: String },
}

/// A non-fatal, per-class failure recorded during enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassLoadFailure {
    pub class_name: String,
    pub location: String,
    pub reason: SkipReason,
}

impl ClassLoadFailure {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::PartialLoadFailure
    }
}
