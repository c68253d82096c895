use anyhow::{anyhow, Context, Result};
use jarviz_core::config::ClassNameFilter;
use jarviz_core::model::Artifact;
use jarviz_core::services::classfile::read_class_header;
use jarviz_core::services::{
    enumerate, BootstrapScope, ClassLoaderService, ClassScan, ErrorKind, JarClassLoaderService,
    LocalRepository,
};
use serde::Serialize;
use tracing::info;

use crate::commands::load_settings;
use crate::{canonicalize_or_current, sha256_bytes};

/// Where to find the archive to enumerate.
#[derive(Debug, Clone)]
pub enum ClassSource {
    /// A jar on disk.
    Jar(String),
    /// Maven-style coordinates resolved against a local repository.
    Artifact(String),
}

/// Arguments for `list-classes`.
#[derive(Debug, Clone)]
pub struct ListClassesArgs {
    pub source: ClassSource,
    pub config: Option<String>,
    pub repo: Option<String>,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct ClassRecord<'a> {
    name: &'a str,
    size: usize,
    sha256: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    major_version: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    minor_version: Option<u16>,
}

#[derive(Debug, Serialize)]
struct FailureRecord<'a> {
    class_name: &'a str,
    location: &'a str,
    kind: ErrorKind,
    reason: String,
}

#[derive(Debug, Serialize)]
struct ScanReport<'a> {
    classes: Vec<ClassRecord<'a>>,
    failures: Vec<FailureRecord<'a>>,
}

/// List every class defined by one archive.
pub fn list_classes_command(args: ListClassesArgs) -> Result<()> {
    let settings = load_settings(args.config.as_deref())?;

    let mut filter: ClassNameFilter = settings.class_filter.clone();
    filter.include_prefixes.extend(args.include);
    filter.exclude_prefixes.extend(args.exclude);
    let accepts = |name: &str| filter.matches(name);

    let bootstrap = BootstrapScope::from_archives(&settings.bootstrap_classpath)
        .context("Failed to open bootstrap classpath")?;

    let scan = match &args.source {
        ClassSource::Jar(jar) => {
            let path = canonicalize_or_current(jar)?;
            enumerate(&path, &bootstrap, accepts)
                .with_context(|| format!("Failed to enumerate classes in {}", path.display()))?
        }
        ClassSource::Artifact(coordinate) => {
            let artifact = Artifact::parse(coordinate)?;
            let root = match (&args.repo, &settings.artifact_directory) {
                (Some(repo), _) => canonicalize_or_current(repo)?,
                (None, Some(dir)) => dir.clone(),
                (None, None) => {
                    return Err(anyhow!(
                        "No artifact directory: pass --repo or set artifact_directory in the config"
                    ))
                }
            };
            let service = JarClassLoaderService::new(LocalRepository::new(root), bootstrap);
            service
                .all_classes(&artifact, &accepts)
                .with_context(|| format!("Failed to enumerate classes of {artifact}"))?
        }
    };

    info!(classes = scan.classes.len(), skipped = scan.failures.len(), "enumeration finished");

    if args.json {
        let serialized = serde_json::to_string_pretty(&report(&scan))
            .context("Failed to serialize classes to JSON")?;
        println!("{}", serialized);
    } else {
        print_scan(&scan);
    }

    Ok(())
}

fn report(scan: &ClassScan) -> ScanReport<'_> {
    let classes = scan
        .classes
        .iter()
        .map(|class| {
            let header = read_class_header(&class.class_bytes).ok();
            ClassRecord {
                name: &class.class_name,
                size: class.class_bytes.len(),
                sha256: sha256_bytes(&class.class_bytes),
                major_version: header.as_ref().map(|h| h.major_version),
                minor_version: header.as_ref().map(|h| h.minor_version),
            }
        })
        .collect();
    let failures = scan
        .failures
        .iter()
        .map(|failure| FailureRecord {
            class_name: &failure.class_name,
            location: &failure.location,
            kind: failure.kind(),
            reason: failure.reason.to_string(),
        })
        .collect();
    ScanReport { classes, failures }
}

fn print_scan(scan: &ClassScan) {
    println!("Classes ({}):", scan.classes.len());
    if scan.classes.is_empty() {
        println!("  (none)");
    }
    for class in &scan.classes {
        println!("  - {}", class.class_name);
    }

    if !scan.failures.is_empty() {
        println!("Skipped ({}):", scan.failures.len());
        for failure in &scan.failures {
            println!("  - {} ({}): {}", failure.class_name, failure.location, failure.reason);
        }
    }
}
