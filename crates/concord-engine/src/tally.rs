//! Per-instrument signal and confidence tallies with attribution.

use std::collections::{BTreeMap, BTreeSet};

use concord_models::{
    AgentAssessments, AssessmentBatch, AssessmentRecord, ConfidenceContributor,
    InstrumentAggregate, SignalContributor,
};
use tracing::debug;

use crate::normalize::{confidence_tier, normalize_confidence};

/// Instruments with at least one record carrying a recognized signal or a
/// numeric confidence. Nothing else is ever materialized in the output.
pub fn materialized_instruments(batch: &AssessmentBatch) -> BTreeSet<&str> {
    batch
        .records()
        .filter(|(_, assessment)| assessment.record.is_countable())
        .map(|(_, assessment)| assessment.instrument.as_str())
        .collect()
}

/// Build one [`InstrumentAggregate`] per materialized instrument.
///
/// Contributor lists follow input order. Every record naming a materialized
/// instrument counts toward its agent breakdown, recognized or not.
pub fn build_tallies(batch: &AssessmentBatch) -> BTreeMap<String, InstrumentAggregate> {
    let materialized = materialized_instruments(batch);
    let mut aggregates: BTreeMap<String, InstrumentAggregate> = BTreeMap::new();

    for agent in &batch.agents {
        for assessment in &agent.assessments {
            if !materialized.contains(assessment.instrument.as_str()) {
                debug!(
                    agent = %agent.agent_name,
                    instrument = %assessment.instrument,
                    "No countable records for instrument"
                );
                continue;
            }
            let aggregate = aggregates
                .entry(assessment.instrument.clone())
                .or_default();
            tally_record(aggregate, agent, &assessment.record);
        }
    }

    aggregates
}

fn tally_record(
    aggregate: &mut InstrumentAggregate,
    agent: &AgentAssessments,
    record: &AssessmentRecord,
) {
    if let Some(signal) = record.recognized_signal() {
        let bucket = aggregate.signal_bucket_mut(signal);
        bucket.count += 1;
        bucket.agents.push(SignalContributor {
            agent_name: agent.agent_name.clone(),
            classification: agent.classification,
            confidence: record.confidence,
            reasoning: record.reasoning.clone(),
        });
    }

    if let Some(raw) = record.confidence {
        let normalized = normalize_confidence(raw);
        let bucket = aggregate.confidence_bucket_mut(confidence_tier(normalized));
        bucket.count += 1;
        bucket.agents.push(ConfidenceContributor {
            agent_name: agent.agent_name.clone(),
            classification: agent.classification,
            confidence: raw,
            normalized_confidence: normalized,
            signal: record.signal.clone(),
            reasoning: record.reasoning.clone(),
        });
    }

    aggregate.agent_counts.increment(agent.classification);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{
        confidence_record, record, signal_record, with_reasoning, BatchBuilder,
    };
    use concord_models::{AgentClassification, Reasoning};
    use rust_decimal_macros::dec;

    #[test]
    fn counts_recognized_signals_per_instrument() {
        let batch = BatchBuilder::new()
            .assess("warren_buffett_agent", "AAPL", signal_record("bullish"))
            .assess("charlie_munger_agent", "AAPL", signal_record("BULLISH"))
            .assess("michael_burry_agent", "AAPL", signal_record("bearish"))
            .assess("michael_burry_agent", "TSLA", signal_record("neutral"))
            .build();

        let tallies = build_tallies(&batch);
        let aapl = &tallies["AAPL"];
        assert_eq!(aapl.bullish.count, 2);
        assert_eq!(aapl.bearish.count, 1);
        assert_eq!(aapl.neutral.count, 0);
        assert_eq!(tallies["TSLA"].neutral.count, 1);
    }

    #[test]
    fn contributors_keep_input_order_and_attribution() {
        let batch = BatchBuilder::new()
            .assess(
                "sentiment_agent",
                "NVDA",
                with_reasoning(record(Some("bullish"), Some(dec!(0.9))), "Insider buying"),
            )
            .assess("risk_management_agent", "NVDA", signal_record("bullish"))
            .assess("portfolio_manager", "NVDA", signal_record("bullish"))
            .build();

        let tallies = build_tallies(&batch);
        let names: Vec<&str> = tallies["NVDA"]
            .bullish
            .agents
            .iter()
            .map(|c| c.agent_name.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["sentiment_agent", "risk_management_agent", "portfolio_manager"]
        );

        let first = &tallies["NVDA"].bullish.agents[0];
        assert_eq!(first.classification, AgentClassification::Analyst);
        assert_eq!(first.confidence, Some(dec!(0.9)));
        assert_eq!(
            first.reasoning,
            Some(Reasoning::Text("Insider buying".to_string()))
        );
        assert_eq!(
            tallies["NVDA"].bullish.agents[1].classification,
            AgentClassification::Risk
        );
    }

    #[test]
    fn unrecognized_signals_are_not_counted() {
        let batch = BatchBuilder::new()
            .assess("technicals_agent", "AMD", signal_record("buy"))
            .assess("valuation_agent", "AMD", signal_record("bearish"))
            .build();

        let tallies = build_tallies(&batch);
        let amd = &tallies["AMD"];
        assert_eq!(amd.signal_counts().total, 1);
        assert_eq!(amd.bearish.count, 1);
        // Both records still count toward the agent breakdown.
        assert_eq!(amd.agent_counts.analyst, 2);
    }

    #[test]
    fn confidence_buckets_use_normalized_values() {
        let batch = BatchBuilder::new()
            .assess("a", "MSFT", confidence_record(dec!(0.85)))
            .assess("b", "MSFT", confidence_record(dec!(70)))
            .assess("c", "MSFT", confidence_record(dec!(0.41)))
            .assess("d", "MSFT", confidence_record(dec!(40)))
            .assess("e", "MSFT", record(Some("hold"), Some(dec!(0.1))))
            .build();

        let tallies = build_tallies(&batch);
        let msft = &tallies["MSFT"];
        assert_eq!(msft.high_confidence.count, 1);
        assert_eq!(msft.medium_confidence.count, 2);
        assert_eq!(msft.low_confidence.count, 2);

        let high = &msft.high_confidence.agents[0];
        assert_eq!(high.confidence, dec!(0.85));
        assert_eq!(high.normalized_confidence, dec!(85));

        let unrecognized = &msft.low_confidence.agents[1];
        assert_eq!(unrecognized.agent_name, "e");
        assert_eq!(unrecognized.signal.as_deref(), Some("hold"));
    }

    #[test]
    fn agent_counts_by_classification() {
        let batch = BatchBuilder::new()
            .assess("ben_graham_agent", "GOOG", signal_record("neutral"))
            .assess("risk_management_agent", "GOOG", signal_record("neutral"))
            .assess("portfolio_management_agent", "GOOG", record(None, None))
            .build();

        let counts = build_tallies(&batch)["GOOG"].agent_counts;
        assert_eq!(counts.analyst, 1);
        assert_eq!(counts.risk, 1);
        assert_eq!(counts.portfolio, 1);
    }

    #[test]
    fn instruments_without_countable_records_are_absent() {
        let batch = BatchBuilder::new()
            .assess("a", "AAPL", signal_record("bullish"))
            .assess("a", "META", signal_record("sideways"))
            .assess("b", "META", record(None, None))
            .build();

        let tallies = build_tallies(&batch);
        assert!(tallies.contains_key("AAPL"));
        assert!(!tallies.contains_key("META"));
        assert_eq!(
            materialized_instruments(&batch).into_iter().collect::<Vec<_>>(),
            vec!["AAPL"]
        );
    }

    #[test]
    fn confidence_only_instrument_is_materialized() {
        let batch = BatchBuilder::new()
            .assess("a", "IBM", confidence_record(dec!(55)))
            .build();
        let tallies = build_tallies(&batch);
        let ibm = &tallies["IBM"];
        assert_eq!(ibm.signal_counts().total, 0);
        assert_eq!(ibm.medium_confidence.count, 1);
    }

    #[test]
    fn empty_batch_yields_nothing() {
        assert!(build_tallies(&AssessmentBatch::default()).is_empty());
    }
}
