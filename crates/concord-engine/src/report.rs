use concord_models::{AssessmentBatch, ConsensusReport, ValidationConfig};
use tracing::info;

use crate::confidence::summarize_confidence;
use crate::consensus::resolve_all;
use crate::error::EngineError;
use crate::input::{parse_assessments, ParsedInput};
use crate::tally::build_tallies;

/// Run the tally builder and the confidence summarizer over the same batch
/// and resolve a verdict for every tallied instrument.
pub fn analyze(batch: &AssessmentBatch) -> ConsensusReport {
    let aggregates = build_tallies(batch);
    let confidence = summarize_confidence(batch);
    let consensus = resolve_all(&aggregates);

    info!(
        agents = batch.agents.len(),
        instruments = aggregates.len(),
        "Consensus analysis complete"
    );

    ConsensusReport {
        aggregates,
        confidence,
        consensus,
        warnings: Vec::new(),
    }
}

/// [`analyze`] a decoded batch and attach its decoding warnings.
pub fn analyze_input(input: ParsedInput) -> ConsensusReport {
    let mut report = analyze(&input.batch);
    if !input.warnings.is_empty() {
        info!(warnings = input.warnings.len(), "Input entries degraded");
    }
    report.warnings = input.warnings;
    report
}

pub fn analyze_json(json: &str, config: &ValidationConfig) -> Result<ConsensusReport, EngineError> {
    let input = parse_assessments(json, config)?;
    Ok(analyze_input(input))
}

#[cfg(test)]
mod tests {
    use super::*;
    use concord_models::{ConsensusSignal, ConsensusStrength, WarningKind};

    const SAMPLE: &str = r#"{
        "warren_buffett_agent": {
            "AAPL": {"signal": "bullish", "confidence": 0.85, "reasoning": "Brand moat"},
            "TSLA": {"signal": "bearish", "confidence": 70}
        },
        "cathie_wood_agent": {
            "AAPL": {"signal": "bullish", "confidence": 92},
            "TSLA": {"signal": "bullish", "confidence": 0.95}
        },
        "risk_management_agent": {
            "AAPL": {"signal": "neutral", "confidence": 0.5},
            "TSLA": {"signal": "bearish"}
        },
        "portfolio_manager": "timed out"
    }"#;

    #[test]
    fn report_shares_one_key_set() {
        let report = analyze_json(SAMPLE, &ValidationConfig::default()).unwrap();
        let tallied: Vec<&str> = report.instruments().collect();
        assert_eq!(tallied, vec!["AAPL", "TSLA"]);
        assert!(report.confidence.keys().eq(report.aggregates.keys()));
        assert!(report.consensus.keys().eq(report.aggregates.keys()));
    }

    #[test]
    fn report_verdicts() {
        let report = analyze_json(SAMPLE, &ValidationConfig::default()).unwrap();

        let aapl = &report.consensus["AAPL"];
        assert_eq!(aapl.signal, ConsensusSignal::Bullish);
        assert_eq!(aapl.strength, ConsensusStrength::Moderate);

        let tsla = &report.consensus["TSLA"];
        assert_eq!(tsla.signal, ConsensusSignal::Bearish);
        assert_eq!(tsla.strength, ConsensusStrength::Moderate);
        assert_eq!(report.confidence["TSLA"].count, 2);
    }

    #[test]
    fn report_carries_decoding_warnings() {
        let report = analyze_json(SAMPLE, &ValidationConfig::default()).unwrap();
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].agent, "portfolio_manager");
        assert_eq!(report.warnings[0].kind, WarningKind::AgentNotMapping);
    }

    #[test]
    fn analyze_batch_has_no_warnings() {
        let parsed = parse_assessments(SAMPLE, &ValidationConfig::default()).unwrap();
        let report = analyze(&parsed.batch);
        assert!(report.warnings.is_empty());
        assert_eq!(report.aggregates.len(), 2);
    }
}
