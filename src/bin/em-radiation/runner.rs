//! Job execution and result writing.

use std::path::Path;

use anyhow::{Context, Result};
use em_radiation::simulation::Simulation;
use log::info;

/// Runs the simulation and renders its JSON mapping.
pub fn run_simulation(simulation: &Simulation, pretty: bool) -> Result<String> {
    let value = simulation.run().with_context(|| format!("{} simulation failed", simulation.name()))?;
    let json = if pretty { serde_json::to_string_pretty(&value)? } else { serde_json::to_string(&value)? };
    Ok(json)
}

/// Writes `json` to `path`, or to stdout when no path is given.
pub fn write_output(json: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
            }
            std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
            info!("result written to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
