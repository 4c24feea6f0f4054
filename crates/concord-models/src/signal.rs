use std::fmt;

use serde::{Deserialize, Serialize};

/// The categorical call an agent makes about an instrument.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    Bullish,
    Bearish,
    Neutral,
}

impl Signal {
    /// Fixed evaluation order. Every tie-break walks signals in this order.
    pub const ORDER: [Signal; 3] = [Signal::Bullish, Signal::Bearish, Signal::Neutral];

    /// Case-insensitive match against the three recognized labels.
    /// Anything else (including padded or abbreviated forms) is `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_lowercase().as_str() {
            "bullish" => Some(Signal::Bullish),
            "bearish" => Some(Signal::Bearish),
            "neutral" => Some(Signal::Neutral),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Signal::Bullish => "bullish",
            Signal::Bearish => "bearish",
            Signal::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attribution group derived from an agent's name.
///
/// Used for breakdown counts only, never for weighting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AgentClassification {
    Analyst,
    Portfolio,
    Risk,
}

impl AgentClassification {
    /// Case-insensitive substring match: "risk" wins over "portfolio",
    /// everything else is an analyst.
    pub fn classify(agent_name: &str) -> Self {
        let lowered = agent_name.to_lowercase();
        if lowered.contains("risk") {
            AgentClassification::Risk
        } else if lowered.contains("portfolio") {
            AgentClassification::Portfolio
        } else {
            AgentClassification::Analyst
        }
    }
}
