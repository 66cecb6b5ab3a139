//! TOML job files.
//!
//! ```toml
//! [simulation]
//! engine = "spectrum"
//! lg_emin = 6.0
//! lg_b = 2.0
//!
//! [output]
//! path = "spectrum.json"
//! pretty = true
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use em_radiation::simulation::Simulation;
use serde::{Deserialize, Serialize};

/// Top-level job configuration.
#[derive(Debug, Serialize, Deserialize)]
pub struct JobConfig {
    pub simulation: Simulation,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Where and how to write the result.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output file; stdout when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Indent the JSON.
    #[serde(default)]
    pub pretty: bool,
}

/// Load and parse a TOML job configuration file.
pub fn load_config(path: &Path) -> anyhow::Result<JobConfig> {
    let content = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    parse_config(&content).with_context(|| format!("parsing {}", path.display()))
}

/// Parse a TOML job configuration from a string.
pub fn parse_config(content: &str) -> anyhow::Result<JobConfig> {
    Ok(toml::from_str(content)?)
}
