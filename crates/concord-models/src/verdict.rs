use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::signal::Signal;

/// The winning call of a consensus verdict.
///
/// `Mixed` belongs to the rendering vocabulary; the resolver itself always
/// names one of the three recognized signals.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ConsensusSignal {
    Bullish,
    Bearish,
    Neutral,
    Mixed,
}

impl From<Signal> for ConsensusSignal {
    fn from(signal: Signal) -> Self {
        match signal {
            Signal::Bullish => ConsensusSignal::Bullish,
            Signal::Bearish => ConsensusSignal::Bearish,
            Signal::Neutral => ConsensusSignal::Neutral,
        }
    }
}

impl fmt::Display for ConsensusSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConsensusSignal::Bullish => "bullish",
            ConsensusSignal::Bearish => "bearish",
            ConsensusSignal::Neutral => "neutral",
            ConsensusSignal::Mixed => "mixed",
        })
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ConsensusStrength {
    /// One signal holds at least 70%.
    Strong,
    /// One signal holds at least 50%.
    Moderate,
    /// Plurality winner, spread of 20 points or more.
    Weak,
    /// Plurality winner, spread under 20 points.
    Divided,
}

impl fmt::Display for ConsensusStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConsensusStrength::Strong => "strong",
            ConsensusStrength::Moderate => "moderate",
            ConsensusStrength::Weak => "weak",
            ConsensusStrength::Divided => "divided",
        })
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignalCounts {
    pub bullish: u32,
    pub bearish: u32,
    pub neutral: u32,
    pub total: u32,
}

impl SignalCounts {
    pub fn new(bullish: u32, bearish: u32, neutral: u32) -> Self {
        Self {
            bullish,
            bearish,
            neutral,
            total: bullish + bearish + neutral,
        }
    }

    pub fn get(&self, signal: Signal) -> u32 {
        match signal {
            Signal::Bullish => self.bullish,
            Signal::Bearish => self.bearish,
            Signal::Neutral => self.neutral,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignalPercentages {
    pub bullish: Decimal,
    pub bearish: Decimal,
    pub neutral: Decimal,
}

impl SignalPercentages {
    pub fn get(&self, signal: Signal) -> Decimal {
        match signal {
            Signal::Bullish => self.bullish,
            Signal::Bearish => self.bearish,
            Signal::Neutral => self.neutral,
        }
    }
}

/// Single deterministic verdict for one instrument, derived from signal counts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConsensusVerdict {
    pub signal: ConsensusSignal,
    pub strength: ConsensusStrength,
    pub percentages: SignalPercentages,
    pub counts: SignalCounts,
}
