use std::env;
use std::path::{Path, PathBuf};
use std::sync::Once;

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

pub mod commands;

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "JARVIZ_LOG";

const DEFAULT_LOG_FILTER: &str = "jarviz=info";

static INIT_LOGGING: Once = Once::new();

/// Canonicalize the path if possible, falling back to the given string
/// relative to the current working directory.
pub fn canonicalize_or_current(root: &str) -> Result<PathBuf> {
    let path = Path::new(root);
    if path == Path::new(".") {
        Ok(env::current_dir().context("Failed to get current directory")?)
    } else {
        // A path that does not exist yet is joined onto the cwd instead.
        match path.canonicalize() {
            Ok(p) => Ok(p),
            Err(_) => {
                let cwd = env::current_dir().context("Failed to get current directory")?;
                Ok(cwd.join(path))
            }
        }
    }
}

/// SHA-256 of `bytes` as a lowercase hex string.
pub fn sha256_bytes(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    format!("{:x}", digest)
}

/// Install the stderr log subscriber. Safe to call more than once.
///
/// Filter directives come from `JARVIZ_LOG`, defaulting to info for the
/// jarviz crates.
pub fn init_logging() {
    INIT_LOGGING.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
        // Another subscriber may already be installed by an embedding host.
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
            .try_init();
    });
}
