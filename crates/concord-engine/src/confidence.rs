//! Normalized confidence statistics per instrument.

use std::collections::BTreeMap;

use concord_models::{AssessmentBatch, ConfidenceStats, Signal};
use rust_decimal::Decimal;

use crate::normalize::{distribution_bucket, normalize_confidence};
use crate::tally::materialized_instruments;

/// Fold every numeric confidence into per-instrument statistics.
///
/// Key set matches [`build_tallies`](crate::build_tallies): an instrument seen
/// only with recognized signals gets the empty stats (`min = 100`).
pub fn summarize_confidence(batch: &AssessmentBatch) -> BTreeMap<String, ConfidenceStats> {
    let mut summaries: BTreeMap<String, ConfidenceStats> = materialized_instruments(batch)
        .into_iter()
        .map(|instrument| (instrument.to_string(), ConfidenceStats::default()))
        .collect();

    for (_, assessment) in batch.records() {
        let Some(raw) = assessment.record.confidence else {
            continue;
        };
        if let Some(stats) = summaries.get_mut(&assessment.instrument) {
            fold(
                stats,
                normalize_confidence(raw),
                assessment.record.recognized_signal(),
            );
        }
    }

    for stats in summaries.values_mut() {
        finish(stats);
    }

    summaries
}

fn fold(stats: &mut ConfidenceStats, value: Decimal, signal: Option<Signal>) {
    stats.total += value;
    stats.count += 1;
    stats.max = stats.max.max(value);
    stats.min = stats.min.min(value);
    stats.distribution.increment(distribution_bucket(value));

    if let Some(signal) = signal {
        let by_signal = stats.by_signal.get_mut(signal);
        by_signal.total += value;
        by_signal.count += 1;
    }
}

fn finish(stats: &mut ConfidenceStats) {
    stats.avg = average(stats.total, stats.count);
    for signal in Signal::ORDER {
        let by_signal = stats.by_signal.get_mut(signal);
        by_signal.avg = average(by_signal.total, by_signal.count);
    }
}

fn average(total: Decimal, count: u32) -> Decimal {
    if count == 0 {
        Decimal::ZERO
    } else {
        (total / Decimal::from(count)).normalize()
    }
}
