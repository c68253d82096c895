use std::path::Path;

use rayon::prelude::*;
use tracing::{debug, error, warn};

use crate::model::{Artifact, DiscoveredClass};
use crate::services::classfile::read_class_header;
use crate::services::discovery::ArtifactResolver;
use crate::services::error::{ClassLoadFailure, ScanError, SkipReason};
use crate::services::loader::{ArtifactScope, BootstrapScope, ClassEntry};

/// Result of enumerating one artifact.
///
/// `classes` is sorted by name. `failures` lists the classes that were
/// skipped, in the order they were encountered; they never appear in
/// `classes`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassScan {
    pub classes: Vec<DiscoveredClass>,
    pub failures: Vec<ClassLoadFailure>,
}

impl ClassScan {
    pub fn class_names(&self) -> Vec<&str> {
        self.classes.iter().map(|c| c.class_name.as_str()).collect()
    }

    /// True when no class had to be skipped.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Enumerate every class stored in the archive at `path`.
///
/// Only classes backed by the archive itself are returned, never classes
/// that are merely visible through `bootstrap`. Names accepted by
/// `name_filter` are read in sorted order. An unreadable entry aborts the
/// scan with `ClassReadFailed`; a payload that is not a valid class, or that
/// declares a different class than its path, is logged and recorded in
/// `ClassScan::failures`.
pub fn enumerate<F>(
    path: &Path,
    bootstrap: &BootstrapScope,
    name_filter: F,
) -> Result<ClassScan, ScanError>
where
    F: Fn(&str) -> bool,
{
    let mut scope = ArtifactScope::open(path, bootstrap)?;

    let mut selected: Vec<ClassEntry> = scope
        .reachable_classes()
        .filter(|entry| scope.owns(entry))
        .filter(|entry| name_filter(&entry.class_name))
        .cloned()
        .collect();
    // Byte-wise ordering; independent of locale.
    selected.sort_by(|a, b| a.class_name.cmp(&b.class_name));
    selected.dedup_by(|a, b| a.class_name == b.class_name);

    let mut scan = ClassScan::default();
    for entry in &selected {
        let bytes = scope.read_bytes(entry).map_err(|source| {
            error!(
                class = %entry.class_name,
                archive = %scope.path().display(),
                "Unable to load class: {source}"
            );
            ScanError::ClassReadFailed {
                path: scope.path().to_path_buf(),
                class_name: entry.class_name.clone(),
                source,
            }
        })?;

        match verify_class(entry, &bytes) {
            Ok(()) => scan.classes.push(DiscoveredClass::new(entry.class_name.clone(), bytes)),
            Err(reason) => {
                warn!(
                    class = %entry.class_name,
                    location = %entry.location,
                    "Skipping class: {reason}"
                );
                scan.failures.push(ClassLoadFailure {
                    class_name: entry.class_name.clone(),
                    location: entry.location.clone(),
                    reason,
                });
            }
        }
    }

    debug!(
        archive = %scope.path().display(),
        classes = scan.classes.len(),
        skipped = scan.failures.len(),
        "enumerated artifact"
    );
    Ok(scan)
}

/// Enumerate several independent archives in parallel.
///
/// Each archive gets its own scope; results are returned in input order.
pub fn enumerate_all<P, F>(
    paths: &[P],
    bootstrap: &BootstrapScope,
    name_filter: F,
) -> Vec<Result<ClassScan, ScanError>>
where
    P: AsRef<Path> + Sync,
    F: Fn(&str) -> bool + Sync,
{
    paths.par_iter().map(|path| enumerate(path.as_ref(), bootstrap, &name_filter)).collect()
}

fn verify_class(entry: &ClassEntry, bytes: &[u8]) -> Result<(), SkipReason> {
    let header = read_class_header(bytes)?;
    if header.name != entry.class_name {
        return Err(SkipReason::NameMismatch { declared: header.name });
    }
    Ok(())
}

/// Lists the classes of an artifact given by coordinate.
pub trait ClassLoaderService: Send + Sync {
    fn all_classes(
        &self,
        artifact: &Artifact,
        class_name_filter: &(dyn Fn(&str) -> bool + Sync),
    ) -> Result<ClassScan, ScanError>;
}

/// `ClassLoaderService` backed by jar files found through a resolver.
pub struct JarClassLoaderService<R> {
    resolver: R,
    bootstrap: BootstrapScope,
}

impl<R: ArtifactResolver> JarClassLoaderService<R> {
    pub fn new(resolver: R, bootstrap: BootstrapScope) -> Self {
        Self { resolver, bootstrap }
    }

    pub fn bootstrap(&self) -> &BootstrapScope {
        &self.bootstrap
    }
}

impl<R: ArtifactResolver> ClassLoaderService for JarClassLoaderService<R> {
    fn all_classes(
        &self,
        artifact: &Artifact,
        class_name_filter: &(dyn Fn(&str) -> bool + Sync),
    ) -> Result<ClassScan, ScanError> {
        let jar = self.resolver.resolve(artifact).map_err(|e| {
            error!(artifact = %artifact, "Jar file does not exist: {}", artifact.to_file_name());
            ScanError::from(e)
        })?;
        enumerate(&jar, &self.bootstrap, class_name_filter)
    }
}
