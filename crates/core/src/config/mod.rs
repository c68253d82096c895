//! Scan configuration: where artifacts live, what forms the bootstrap scope,
//! and which classes and couplings are of interest.
//!
//! A config file is JSON (`.json`) or YAML (`.yaml` / `.yml`); every field is
//! optional.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

mod filter;

pub use filter::{
    ClassNameFilter, CouplingFilter, CouplingFilterConfig, CouplingPredicate, FilterError,
    MethodFilter,
};

/// Serializable configuration shared by the enumerator, resolver, and collector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JarvizConfig {
    /// Local repository root used to resolve artifact coordinates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact_directory: Option<PathBuf>,
    /// Runtime archives forming the bootstrap scope of every artifact scope.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bootstrap_classpath: Vec<PathBuf>,
    #[serde(default)]
    pub class_filter: ClassNameFilter,
    #[serde(default)]
    pub coupling_filter: CouplingFilterConfig,
}

impl JarvizConfig {
    /// Resolve relative paths against `base` (typically the config file's directory).
    pub fn resolve_paths(mut self, base: &Path) -> Self {
        if let Some(dir) = &self.artifact_directory {
            if dir.is_relative() {
                self.artifact_directory = Some(base.join(dir));
            }
        }
        self.bootstrap_classpath = self
            .bootstrap_classpath
            .into_iter()
            .map(|p| if p.is_relative() { base.join(p) } else { p })
            .collect();
        self
    }
}

/// Load a config file, choosing the format from its extension.
pub fn load_config(path: &Path) -> Result<JarvizConfig> {
    let body = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config at {}", path.display()))?;
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default().to_ascii_lowercase();
    let config: JarvizConfig = match ext.as_str() {
        "json" => serde_json::from_str(&body).context("Failed to parse config JSON")?,
        "yaml" | "yml" => serde_yaml::from_str(&body).context("Failed to parse config YAML")?,
        other => {
            return Err(anyhow!(
                "Unsupported config format '{}' for {} (expected json, yaml, or yml)",
                other,
                path.display()
            ))
        }
    };
    let base = path.parent().map(Path::to_path_buf).unwrap_or_default();
    Ok(config.resolve_paths(&base))
}
