pub mod classes;
pub mod couplings;

pub use classes::*;
pub use couplings::*;

use anyhow::Result;
use jarviz_core::config::{load_config, JarvizConfig};

use crate::canonicalize_or_current;

/// Load the config file named on the command line, or defaults when absent.
pub fn load_settings(config: Option<&str>) -> Result<JarvizConfig> {
    match config {
        Some(path) => load_config(&canonicalize_or_current(path)?),
        None => Ok(JarvizConfig::default()),
    }
}
