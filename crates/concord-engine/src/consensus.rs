//! Signal counts to a single verdict with a strength tier.
//!
//! Tiers are checked strongest first. Within a tier, and for the plurality
//! fallback, signals are visited in [`Signal::ORDER`]; that order decides the
//! winner whenever two percentages are equal.

use std::collections::BTreeMap;

use concord_models::{
    ConsensusStrength, ConsensusVerdict, InstrumentAggregate, Signal, SignalCounts,
    SignalPercentages,
};
use rust_decimal::Decimal;

const STRONG_FLOOR: Decimal = Decimal::from_parts(70, 0, 0, false, 0);
const MODERATE_FLOOR: Decimal = Decimal::from_parts(50, 0, 0, false, 0);
/// Plurality spreads (max% - min%) below this are `Divided`.
const DIVIDED_SPREAD: Decimal = Decimal::from_parts(20, 0, 0, false, 0);

/// Share of `total` per signal, 0-100. All zero when nothing was counted.
pub fn signal_percentages(counts: &SignalCounts) -> SignalPercentages {
    if counts.total == 0 {
        return SignalPercentages::default();
    }
    let total = Decimal::from(counts.total);
    let share = |count: u32| (Decimal::from(count) * Decimal::ONE_HUNDRED / total).normalize();
    SignalPercentages {
        bullish: share(counts.bullish),
        bearish: share(counts.bearish),
        neutral: share(counts.neutral),
    }
}

pub fn resolve(counts: SignalCounts) -> ConsensusVerdict {
    let percentages = signal_percentages(&counts);
    let (winner, strength) = pick(&percentages);
    ConsensusVerdict {
        signal: winner.into(),
        strength,
        percentages,
        counts,
    }
}

/// One verdict per aggregate, including aggregates with no counted signals.
pub fn resolve_all(
    aggregates: &BTreeMap<String, InstrumentAggregate>,
) -> BTreeMap<String, ConsensusVerdict> {
    aggregates
        .iter()
        .map(|(instrument, aggregate)| (instrument.clone(), resolve(aggregate.signal_counts())))
        .collect()
}

fn pick(percentages: &SignalPercentages) -> (Signal, ConsensusStrength) {
    let first_at_least = |floor: Decimal| {
        Signal::ORDER
            .into_iter()
            .find(|&signal| percentages.get(signal) >= floor)
    };

    if let Some(signal) = first_at_least(STRONG_FLOOR) {
        return (signal, ConsensusStrength::Strong);
    }
    if let Some(signal) = first_at_least(MODERATE_FLOOR) {
        return (signal, ConsensusStrength::Moderate);
    }

    let (max, min) = Signal::ORDER
        .into_iter()
        .map(|signal| percentages.get(signal))
        .fold((Decimal::MIN, Decimal::MAX), |(max, min), pct| {
            (max.max(pct), min.min(pct))
        });

    let winner = Signal::ORDER
        .into_iter()
        .find(|&signal| percentages.get(signal) == max)
        .unwrap_or(Signal::Bullish);

    let strength = if max - min < DIVIDED_SPREAD {
        ConsensusStrength::Divided
    } else {
        ConsensusStrength::Weak
    };
    (winner, strength)
}
