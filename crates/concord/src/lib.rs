//! concord - consensus over independent agent assessments
//!
//! Combines per-agent, per-instrument assessments into attributed tallies,
//! scale-normalized confidence statistics, and one graded verdict per
//! instrument.
//!
//! # Library Usage
//!
//! ```rust,no_run
//! use concord::engine::{analyze_json, parse_assessments, build_tallies, resolve};
//! use concord::models::{ConsensusReport, ConsensusVerdict, ValidationConfig};
//! ```

pub use concord_engine as engine;
pub use concord_models as models;

use std::path::Path;

use anyhow::Context;
use concord_models::{ConcordConfig, ConsensusReport, OutputConfig};

/// Read a TOML config. `None` when the file does not exist.
pub fn load_config(path: &Path) -> Result<Option<ConcordConfig>, anyhow::Error> {
    if !path.exists() {
        return Ok(None);
    }
    let config_str = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    let config = toml::from_str(&config_str)
        .with_context(|| format!("Failed to parse config: {}", path.display()))?;
    Ok(Some(config))
}

/// Analyze one raw assessment document into a report shaped by `config`.
pub fn evaluate(json: &str, config: &ConcordConfig) -> Result<ConsensusReport, anyhow::Error> {
    let mut report = concord_engine::analyze_json(json, &config.validation)
        .context("Failed to analyze assessments")?;
    apply_output(&mut report, &config.output);
    Ok(report)
}

pub fn apply_output(report: &mut ConsensusReport, output: &OutputConfig) {
    if !output.include_attribution {
        report.strip_attribution();
    }
    if !output.include_warnings {
        report.warnings.clear();
    }
}

pub fn render(report: &ConsensusReport, output: &OutputConfig) -> Result<String, serde_json::Error> {
    if output.pretty {
        serde_json::to_string_pretty(report)
    } else {
        serde_json::to_string(report)
    }
}
