//! Services that turn archives into classes and call sites into a coupling graph.
//!
//! - `loader`: isolated, per-archive class scopes.
//! - `classfile`: minimal class header reader used to validate payloads.
//! - `enumerator`: sorted, filtered class listing for one or many archives.
//! - `discovery`: artifact coordinate resolution.
//! - `collector`: filtered, deduplicated coupling accumulation.

pub mod classfile;
pub mod collector;
pub mod discovery;
pub mod enumerator;
pub mod error;
pub mod loader;

pub use collector::{Collector, UsageCollector};
pub use discovery::{ArtifactResolver, LocalRepository};
pub use enumerator::{
    enumerate, enumerate_all, ClassLoaderService, ClassScan, JarClassLoaderService,
};
pub use error::{ClassLoadFailure, ErrorKind, ResolveError, ScanError, SkipReason};
pub use loader::{ArtifactScope, BootstrapScope, ClassEntry};
