//! Isolated archive scopes.
//!
//! An `ArtifactScope` lists the classes of exactly one archive on top of a
//! `BootstrapScope`, the minimal runtime class set. The host process's own
//! types never take part, so two archives that ship the same class name are
//! always read from their own bytes.
//!
//! A scope owns its open archive. Dropping it releases the file handle and the
//! listing; scopes are never shared between artifacts.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use tracing::{debug, trace};
use zip::result::ZipError;
use zip::ZipArchive;

use crate::services::error::ScanError;

const CLASS_SUFFIX: &str = ".class";

/// Upper bound on the buffer reserved up front for one entry.
const READ_CAPACITY_HINT: u64 = 1 << 20;

/// Canonical locator prefix for classes stored in the archive at `path`,
/// e.g. `jar:file:/repo/widget-1.0.jar!`.
pub fn archive_locator(path: &Path) -> String {
    format!("jar:file:{}!", path.display())
}

/// Class name for an archive entry, or `None` for entries that are not
/// loadable classes (directories, resources, `META-INF/`, module descriptors).
pub fn class_name_for_entry(entry_name: &str) -> Option<String> {
    if entry_name.starts_with("META-INF/") {
        return None;
    }
    let stem = entry_name.strip_suffix(CLASS_SUFFIX)?;
    let simple = stem.rsplit('/').next().unwrap_or(stem);
    if simple.is_empty() || simple == "module-info" {
        return None;
    }
    Some(stem.replace('/', "."))
}

/// A class visible from a scope, with the location it would be loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassEntry {
    pub class_name: String,
    /// `<archive locator>/<entry name>`.
    pub location: String,
    entry_name: String,
}

impl ClassEntry {
    fn new(locator: &str, entry_name: &str) -> Option<Self> {
        let class_name = class_name_for_entry(entry_name)?;
        Some(Self {
            class_name,
            location: format!("{locator}/{entry_name}"),
            entry_name: entry_name.to_string(),
        })
    }

    pub fn entry_name(&self) -> &str {
        &self.entry_name
    }
}

/// The parent of every artifact scope: the core runtime classes.
///
/// Built only from explicitly configured runtime archives, never from the
/// host application. The default is empty.
#[derive(Debug, Clone, Default)]
pub struct BootstrapScope {
    entries: Vec<ClassEntry>,
}

impl BootstrapScope {
    pub fn empty() -> Self {
        Self::default()
    }

    /// List the classes of each runtime archive. Bytes are never read from
    /// the bootstrap.
    pub fn from_archives<P: AsRef<Path>>(archives: &[P]) -> Result<Self, ScanError> {
        let mut entries = Vec::new();
        for archive in archives {
            let path = canonical_archive_path(archive.as_ref())?;
            let zip = open_archive(&path)?;
            let locator = archive_locator(&path);
            entries.extend(list_entries(&zip, &locator));
            debug!(archive = %path.display(), "added runtime archive to bootstrap scope");
        }
        Ok(Self { entries })
    }

    pub fn classes(&self) -> &[ClassEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A class-loading scope over exactly one archive.
pub struct ArtifactScope<'b> {
    path: PathBuf,
    locator: String,
    archive: ZipArchive<BufReader<File>>,
    entries: Vec<ClassEntry>,
    parent: &'b BootstrapScope,
}

impl<'b> ArtifactScope<'b> {
    /// Open a new scope over the archive at `path`.
    ///
    /// Fails with `InvalidLocation` if the path does not name an existing
    /// file, and with `LoaderConstructionFailed` if it is not a readable
    /// archive.
    pub fn open(path: &Path, parent: &'b BootstrapScope) -> Result<Self, ScanError> {
        let path = canonical_archive_path(path)?;
        let archive = open_archive(&path)?;
        let locator = archive_locator(&path);
        let entries = list_entries(&archive, &locator);
        debug!(
            archive = %path.display(),
            classes = entries.len(),
            bootstrap_classes = parent.len(),
            "opened artifact scope"
        );
        Ok(Self { path, locator, archive, entries, parent })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn locator(&self) -> &str {
        &self.locator
    }

    /// Every class reachable from this scope, bootstrap first (parent-first
    /// delegation order), then the archive's own classes.
    pub fn reachable_classes(&self) -> impl Iterator<Item = &ClassEntry> + '_ {
        self.parent.classes().iter().chain(self.entries.iter())
    }

    /// True when `entry` is backed by this scope's own archive.
    pub fn owns(&self, entry: &ClassEntry) -> bool {
        entry.location.starts_with(&self.locator)
    }

    /// Read the raw bytes stored for `entry` in this scope's archive.
    pub fn read_bytes(&mut self, entry: &ClassEntry) -> Result<Vec<u8>, ZipError> {
        if !self.owns(entry) {
            return Err(ZipError::FileNotFound);
        }
        let mut file = self.archive.by_name(&entry.entry_name)?;
        // The declared size is only a hint; corrupt headers can claim anything.
        let mut buffer = Vec::with_capacity(file.size().min(READ_CAPACITY_HINT) as usize);
        file.read_to_end(&mut buffer)?;
        Ok(buffer)
    }
}

impl Drop for ArtifactScope<'_> {
    fn drop(&mut self) {
        trace!(archive = %self.path.display(), "released artifact scope");
    }
}

fn canonical_archive_path(path: &Path) -> Result<PathBuf, ScanError> {
    let canonical = path.canonicalize().map_err(|e| ScanError::InvalidLocation {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    if !canonical.is_file() {
        return Err(ScanError::InvalidLocation {
            path: path.to_path_buf(),
            reason: "not a regular file".to_string(),
        });
    }
    Ok(canonical)
}

fn open_archive(path: &Path) -> Result<ZipArchive<BufReader<File>>, ScanError> {
    let file = File::open(path).map_err(|source| ScanError::LoaderConstructionFailed {
        path: path.to_path_buf(),
        source: ZipError::Io(source),
    })?;
    ZipArchive::new(BufReader::new(file)).map_err(|source| ScanError::LoaderConstructionFailed {
        path: path.to_path_buf(),
        source,
    })
}

fn list_entries(archive: &ZipArchive<BufReader<File>>, locator: &str) -> Vec<ClassEntry> {
    archive.file_names().filter_map(|name| ClassEntry::new(locator, name)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_names_map_to_class_names() {
        assert_eq!(class_name_for_entry("a/b/C.class").as_deref(), Some("a.b.C"));
        assert_eq!(class_name_for_entry("Top.class").as_deref(), Some("Top"));
        assert_eq!(class_name_for_entry("a/B$1.class").as_deref(), Some("a.B$1"));
        assert_eq!(class_name_for_entry("a/b/"), None);
        assert_eq!(class_name_for_entry("a/b/config.properties"), None);
        assert_eq!(class_name_for_entry("module-info.class"), None);
        assert_eq!(class_name_for_entry("META-INF/versions/11/module-info.class"), None);
        assert_eq!(class_name_for_entry("META-INF/versions/11/a/B.class"), None);
    }

    #[test]
    fn locator_wraps_the_path() {
        let locator = archive_locator(Path::new("/repo/widget-1.0.jar"));
        assert_eq!(locator, "jar:file:/repo/widget-1.0.jar!");
    }

    #[test]
    fn missing_archive_is_an_invalid_location() {
        let bootstrap = BootstrapScope::empty();
        let err = ArtifactScope::open(Path::new("/definitely/not/here.jar"), &bootstrap)
            .err()
            .expect("missing path should fail");
        assert!(matches!(err, ScanError::InvalidLocation { .. }));
    }

    #[test]
    fn non_archive_file_fails_construction() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("broken.jar");
        std::fs::write(&path, b"this is not a zip archive").unwrap();
        let bootstrap = BootstrapScope::empty();
        let err = ArtifactScope::open(&path, &bootstrap).err().expect("garbage should fail");
        assert!(matches!(err, ScanError::LoaderConstructionFailed { .. }));
    }

    fn write_archive(path: &Path, entries: &[(&str, &[u8])]) {
        use std::io::Write;
        use zip::write::SimpleFileOptions;

        let mut writer = zip::ZipWriter::new(File::create(path).unwrap());
        for (name, bytes) in entries {
            writer.start_file(*name, SimpleFileOptions::default()).unwrap();
            writer.write_all(bytes).unwrap();
        }
        writer.finish().unwrap();
    }

    #[test]
    fn scope_reads_only_its_own_entries() {
        let temp = tempfile::tempdir().unwrap();
        let runtime = temp.path().join("rt.jar");
        write_archive(&runtime, &[("java/lang/Object.class", b"object")]);
        let app = temp.path().join("app.jar");
        write_archive(&app, &[("a/B.class", b"payload"), ("a/notes.txt", b"text")]);

        let bootstrap = BootstrapScope::from_archives(&[&runtime]).unwrap();
        let mut scope = ArtifactScope::open(&app, &bootstrap).unwrap();
        assert_eq!(scope.locator(), archive_locator(&app.canonicalize().unwrap()));

        let entries: Vec<ClassEntry> = scope.reachable_classes().cloned().collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].entry_name(), "java/lang/Object.class");
        assert!(!scope.owns(&entries[0]));
        assert_eq!(entries[1].entry_name(), "a/B.class");
        assert!(entries[1].location.ends_with("app.jar!/a/B.class"));

        assert_eq!(scope.read_bytes(&entries[1]).unwrap(), b"payload");
        assert!(matches!(scope.read_bytes(&entries[0]), Err(ZipError::FileNotFound)));
    }
}
