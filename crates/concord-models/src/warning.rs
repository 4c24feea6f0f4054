use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// What was wrong with an input entry. Every kind is non-fatal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WarningKind {
    /// The agent's value is not a per-instrument mapping; the agent was skipped.
    AgentNotMapping,
    /// The instrument's value is not a record mapping; the entry was skipped.
    RecordNotMapping,
    UnrecognizedSignal { value: String },
    NonStringSignal,
    NonNumericConfidence,
    /// Normalized value fell outside [0, 100] and was clamped.
    ConfidenceOutOfRange { raw: Decimal, normalized: Decimal },
    /// Exactly 1 reads as either 100% or 1%; it was treated as a fraction.
    AmbiguousConfidenceScale,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssessmentWarning {
    pub agent: String,
    pub instrument: Option<String>,
    pub kind: WarningKind,
}

impl AssessmentWarning {
    pub fn for_agent(agent: &str, kind: WarningKind) -> Self {
        Self {
            agent: agent.to_string(),
            instrument: None,
            kind,
        }
    }

    pub fn for_record(agent: &str, instrument: &str, kind: WarningKind) -> Self {
        Self {
            agent: agent.to_string(),
            instrument: Some(instrument.to_string()),
            kind,
        }
    }
}

impl fmt::Display for AssessmentWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.instrument {
            Some(instrument) => write!(f, "{}/{}: ", self.agent, instrument)?,
            None => write!(f, "{}: ", self.agent)?,
        }
        match &self.kind {
            WarningKind::AgentNotMapping => f.write_str("agent entry is not a mapping, skipped"),
            WarningKind::RecordNotMapping => f.write_str("record is not a mapping, skipped"),
            WarningKind::UnrecognizedSignal { value } => {
                write!(f, "unrecognized signal {value:?}, not counted")
            }
            WarningKind::NonStringSignal => f.write_str("signal is not a string, not counted"),
            WarningKind::NonNumericConfidence => {
                f.write_str("confidence is not numeric, not counted")
            }
            WarningKind::ConfidenceOutOfRange { raw, normalized } => {
                write!(f, "confidence {raw} normalizes to {normalized}, clamped to [0, 100]")
            }
            WarningKind::AmbiguousConfidenceScale => {
                f.write_str("confidence of exactly 1 treated as a fraction (100)")
            }
        }
    }
}
