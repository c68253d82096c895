use std::path::{Path, PathBuf};

use tracing::debug;

use crate::model::Artifact;
use crate::services::error::ResolveError;

/// Maps an artifact coordinate to exactly one archive on disk.
pub trait ArtifactResolver: Send + Sync {
    fn resolve(&self, artifact: &Artifact) -> Result<PathBuf, ResolveError>;
}

/// Resolves artifacts against a local directory.
///
/// Looks for `<root>/<file name>` first (a flat download directory), then the
/// Maven layout `<root>/<group path>/<artifact>/<version>/<file name>`.
#[derive(Debug, Clone)]
pub struct LocalRepository {
    root: PathBuf,
}

impl LocalRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn candidates(&self, artifact: &Artifact) -> Vec<PathBuf> {
        let file_name = artifact.to_file_name();
        let mut maven = self.root.clone();
        for segment in artifact.group_id.split('.') {
            maven.push(segment);
        }
        maven.push(&artifact.artifact_id);
        maven.push(&artifact.version);
        maven.push(&file_name);
        vec![self.root.join(&file_name), maven]
    }
}

impl ArtifactResolver for LocalRepository {
    fn resolve(&self, artifact: &Artifact) -> Result<PathBuf, ResolveError> {
        let searched = self.candidates(artifact);
        match searched.iter().find(|p| p.is_file()) {
            Some(found) => {
                debug!(artifact = %artifact, path = %found.display(), "resolved artifact");
                Ok(found.clone())
            }
            None => Err(ResolveError::ArtifactNotFound { artifact: artifact.clone(), searched }),
        }
    }
}
