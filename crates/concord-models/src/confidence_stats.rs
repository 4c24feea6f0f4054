use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::signal::Signal;

/// One of the four fixed percentage bands of the confidence histogram.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DistributionBucket {
    #[serde(rename = "0-25")]
    UpTo25,
    #[serde(rename = "26-50")]
    UpTo50,
    #[serde(rename = "51-75")]
    UpTo75,
    #[serde(rename = "76-100")]
    Above75,
}

impl DistributionBucket {
    pub const ALL: [DistributionBucket; 4] = [
        DistributionBucket::UpTo25,
        DistributionBucket::UpTo50,
        DistributionBucket::UpTo75,
        DistributionBucket::Above75,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DistributionBucket::UpTo25 => "0-25",
            DistributionBucket::UpTo50 => "26-50",
            DistributionBucket::UpTo75 => "51-75",
            DistributionBucket::Above75 => "76-100",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfidenceDistribution {
    #[serde(rename = "0-25")]
    pub up_to_25: u32,
    #[serde(rename = "26-50")]
    pub up_to_50: u32,
    #[serde(rename = "51-75")]
    pub up_to_75: u32,
    #[serde(rename = "76-100")]
    pub above_75: u32,
}

impl ConfidenceDistribution {
    pub fn get(&self, bucket: DistributionBucket) -> u32 {
        match bucket {
            DistributionBucket::UpTo25 => self.up_to_25,
            DistributionBucket::UpTo50 => self.up_to_50,
            DistributionBucket::UpTo75 => self.up_to_75,
            DistributionBucket::Above75 => self.above_75,
        }
    }

    pub fn increment(&mut self, bucket: DistributionBucket) {
        match bucket {
            DistributionBucket::UpTo25 => self.up_to_25 += 1,
            DistributionBucket::UpTo50 => self.up_to_50 += 1,
            DistributionBucket::UpTo75 => self.up_to_75 += 1,
            DistributionBucket::Above75 => self.above_75 += 1,
        }
    }
}

/// Running normalized-confidence figures for one signal.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignalConfidence {
    pub total: Decimal,
    pub count: u32,
    pub avg: Decimal,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignalConfidenceBreakdown {
    pub bullish: SignalConfidence,
    pub bearish: SignalConfidence,
    pub neutral: SignalConfidence,
}

impl SignalConfidenceBreakdown {
    pub fn get(&self, signal: Signal) -> &SignalConfidence {
        match signal {
            Signal::Bullish => &self.bullish,
            Signal::Bearish => &self.bearish,
            Signal::Neutral => &self.neutral,
        }
    }

    pub fn get_mut(&mut self, signal: Signal) -> &mut SignalConfidence {
        match signal {
            Signal::Bullish => &mut self.bullish,
            Signal::Bearish => &mut self.bearish,
            Signal::Neutral => &mut self.neutral,
        }
    }
}

/// Confidence statistics for one instrument, on the normalized 0-100 scale.
///
/// An instrument without confidence-bearing records keeps the initial values
/// (`count = 0`, `avg = 0`, `max = 0`, `min = 100`). That state means "no data",
/// not a low reading; check [`ConfidenceStats::has_data`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfidenceStats {
    pub total: Decimal,
    pub count: u32,
    pub max: Decimal,
    pub min: Decimal,
    pub avg: Decimal,
    pub distribution: ConfidenceDistribution,
    pub by_signal: SignalConfidenceBreakdown,
}

impl Default for ConfidenceStats {
    fn default() -> Self {
        Self {
            total: Decimal::ZERO,
            count: 0,
            max: Decimal::ZERO,
            min: Decimal::ONE_HUNDRED,
            avg: Decimal::ZERO,
            distribution: ConfidenceDistribution::default(),
            by_signal: SignalConfidenceBreakdown::default(),
        }
    }
}

impl ConfidenceStats {
    pub fn has_data(&self) -> bool {
        self.count > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn empty_stats_boundary_values() {
        let stats = ConfidenceStats::default();
        assert_eq!(stats.count, 0);
        assert_eq!(stats.avg, Decimal::ZERO);
        assert_eq!(stats.max, Decimal::ZERO);
        assert_eq!(stats.min, dec!(100));
        assert!(!stats.has_data());
    }

    #[test]
    fn distribution_keys_are_band_labels() {
        let mut distribution = ConfidenceDistribution::default();
        distribution.increment(DistributionBucket::Above75);
        distribution.increment(DistributionBucket::UpTo25);
        let json = serde_json::to_value(distribution).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"0-25": 1, "26-50": 0, "51-75": 0, "76-100": 1})
        );
        for bucket in DistributionBucket::ALL {
            assert_eq!(
                serde_json::to_string(&bucket).unwrap(),
                format!("\"{}\"", bucket.label())
            );
        }
    }

    #[test]
    fn by_signal_accessors() {
        let mut breakdown = SignalConfidenceBreakdown::default();
        breakdown.get_mut(Signal::Bearish).count = 2;
        assert_eq!(breakdown.get(Signal::Bearish).count, 2);
        assert_eq!(breakdown.get(Signal::Bullish).count, 0);
    }

    #[test]
    fn roundtrip_confidence_stats() {
        let mut stats = ConfidenceStats::default();
        stats.total = dec!(160.5);
        stats.count = 2;
        stats.max = dec!(85);
        stats.min = dec!(75.5);
        stats.avg = dec!(80.25);
        let json = serde_json::to_string(&stats).unwrap();
        let parsed: ConfidenceStats = serde_json::from_str(&json).unwrap();
        assert_eq!(stats, parsed);
    }
}
