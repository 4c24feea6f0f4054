use serde::{Deserialize, Serialize};

/// Top-level configuration for concord.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConcordConfig {
    pub validation: ValidationConfig,
    pub output: OutputConfig,
}

/// Controls which non-fatal input warnings are collected.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ValidationConfig {
    /// Collect warnings alongside output. When false, input still degrades
    /// the same way but nothing is reported.
    pub collect_warnings: bool,
    /// Warn when a raw confidence of exactly 1 is read as 100%.
    pub flag_ambiguous_scale: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            collect_warnings: true,
            flag_ambiguous_scale: true,
        }
    }
}

/// Controls how reports are written by the CLI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub pretty: bool,
    pub include_warnings: bool,
    /// When false, contributor lists are emptied; counts are kept.
    pub include_attribution: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: false,
            include_warnings: true,
            include_attribution: true,
        }
    }
}
