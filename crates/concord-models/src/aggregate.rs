use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::assessment::Reasoning;
use crate::signal::{AgentClassification, Signal};
use crate::verdict::SignalCounts;

/// An agent's attributed contribution to a signal bucket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SignalContributor {
    pub agent_name: String,
    pub classification: AgentClassification,
    /// Confidence as the agent reported it (not normalized).
    pub confidence: Option<Decimal>,
    pub reasoning: Option<Reasoning>,
}

/// An agent's attributed contribution to a confidence bucket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConfidenceContributor {
    pub agent_name: String,
    pub classification: AgentClassification,
    pub confidence: Decimal,
    /// Confidence on the 0-100 scale used for bucketing.
    pub normalized_confidence: Decimal,
    /// Raw signal label, recognized or not.
    pub signal: Option<String>,
    pub reasoning: Option<Reasoning>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SignalBucket {
    pub count: u32,
    /// Append order follows input order.
    pub agents: Vec<SignalContributor>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ConfidenceBucket {
    pub count: u32,
    pub agents: Vec<ConfidenceContributor>,
}

/// Confidence band on the normalized 0-100 scale.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceTier {
    /// <= 40
    Low,
    /// > 40 and <= 70
    Medium,
    /// > 70
    High,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgentCounts {
    pub analyst: u32,
    pub portfolio: u32,
    pub risk: u32,
}

impl AgentCounts {
    pub fn increment(&mut self, classification: AgentClassification) {
        match classification {
            AgentClassification::Analyst => self.analyst += 1,
            AgentClassification::Portfolio => self.portfolio += 1,
            AgentClassification::Risk => self.risk += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.analyst + self.portfolio + self.risk
    }
}

/// Per-instrument tallies with full attribution.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InstrumentAggregate {
    pub bullish: SignalBucket,
    pub bearish: SignalBucket,
    pub neutral: SignalBucket,
    pub high_confidence: ConfidenceBucket,
    pub medium_confidence: ConfidenceBucket,
    pub low_confidence: ConfidenceBucket,
    pub agent_counts: AgentCounts,
}

impl InstrumentAggregate {
    pub fn signal_bucket(&self, signal: Signal) -> &SignalBucket {
        match signal {
            Signal::Bullish => &self.bullish,
            Signal::Bearish => &self.bearish,
            Signal::Neutral => &self.neutral,
        }
    }

    pub fn signal_bucket_mut(&mut self, signal: Signal) -> &mut SignalBucket {
        match signal {
            Signal::Bullish => &mut self.bullish,
            Signal::Bearish => &mut self.bearish,
            Signal::Neutral => &mut self.neutral,
        }
    }

    pub fn confidence_bucket(&self, tier: ConfidenceTier) -> &ConfidenceBucket {
        match tier {
            ConfidenceTier::Low => &self.low_confidence,
            ConfidenceTier::Medium => &self.medium_confidence,
            ConfidenceTier::High => &self.high_confidence,
        }
    }

    pub fn confidence_bucket_mut(&mut self, tier: ConfidenceTier) -> &mut ConfidenceBucket {
        match tier {
            ConfidenceTier::Low => &mut self.low_confidence,
            ConfidenceTier::Medium => &mut self.medium_confidence,
            ConfidenceTier::High => &mut self.high_confidence,
        }
    }

    /// The counts the consensus resolver works from.
    pub fn signal_counts(&self) -> SignalCounts {
        SignalCounts::new(self.bullish.count, self.bearish.count, self.neutral.count)
    }

    /// Drop contributor lists, keeping every count.
    pub fn strip_attribution(&mut self) {
        for signal in Signal::ORDER {
            self.signal_bucket_mut(signal).agents.clear();
        }
        for tier in [ConfidenceTier::High, ConfidenceTier::Medium, ConfidenceTier::Low] {
            self.confidence_bucket_mut(tier).agents.clear();
        }
    }
}
