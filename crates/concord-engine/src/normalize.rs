//! Confidence scale handling shared by the tally builder and the summarizer.

use concord_models::{ConfidenceTier, DistributionBucket};
use rust_decimal::Decimal;

const HIGH_TIER_FLOOR: Decimal = Decimal::from_parts(70, 0, 0, false, 0);
const MEDIUM_TIER_FLOOR: Decimal = Decimal::from_parts(40, 0, 0, false, 0);

/// Values at or below 1 are fractions and get scaled by 100; anything larger
/// is taken as a percentage already. Exactly 1 is ambiguous and reads as 100.
pub fn scale_to_percent(raw: Decimal) -> Decimal {
    if raw <= Decimal::ONE {
        raw * Decimal::ONE_HUNDRED
    } else {
        raw
    }
}

/// Scale and clamp into [0, 100].
pub fn normalize_confidence(raw: Decimal) -> Decimal {
    scale_to_percent(raw)
        .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
        .normalize()
}

pub fn is_out_of_range(raw: Decimal) -> bool {
    let scaled = scale_to_percent(raw);
    scaled < Decimal::ZERO || scaled > Decimal::ONE_HUNDRED
}

pub fn confidence_tier(normalized: Decimal) -> ConfidenceTier {
    if normalized > HIGH_TIER_FLOOR {
        ConfidenceTier::High
    } else if normalized > MEDIUM_TIER_FLOOR {
        ConfidenceTier::Medium
    } else {
        ConfidenceTier::Low
    }
}

pub fn distribution_bucket(normalized: Decimal) -> DistributionBucket {
    if normalized <= Decimal::from(25) {
        DistributionBucket::UpTo25
    } else if normalized <= Decimal::from(50) {
        DistributionBucket::UpTo50
    } else if normalized <= Decimal::from(75) {
        DistributionBucket::UpTo75
    } else {
        DistributionBucket::Above75
    }
}
