//! Builders for assessment fixtures used by unit and integration tests.

use concord_models::{AgentAssessments, AssessmentBatch, AssessmentRecord, Reasoning};
use rust_decimal::Decimal;

pub fn record(signal: Option<&str>, confidence: Option<Decimal>) -> AssessmentRecord {
    AssessmentRecord {
        signal: signal.map(str::to_string),
        confidence,
        reasoning: None,
    }
}

pub fn signal_record(signal: &str) -> AssessmentRecord {
    record(Some(signal), None)
}

pub fn confidence_record(confidence: Decimal) -> AssessmentRecord {
    record(None, Some(confidence))
}

pub fn with_reasoning(mut record: AssessmentRecord, text: &str) -> AssessmentRecord {
    record.reasoning = Some(Reasoning::Text(text.to_string()));
    record
}

/// Accumulates records agent by agent, keeping first-seen agent order.
#[derive(Debug, Default)]
pub struct BatchBuilder {
    batch: AssessmentBatch,
}

impl BatchBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assess(mut self, agent: &str, instrument: &str, record: AssessmentRecord) -> Self {
        match self.batch.agents.iter_mut().find(|a| a.agent_name == agent) {
            Some(existing) => existing.push(instrument, record),
            None => {
                let mut created = AgentAssessments::new(agent);
                created.push(instrument, record);
                self.batch.agents.push(created);
            }
        }
        self
    }

    pub fn build(self) -> AssessmentBatch {
        self.batch
    }
}

/// One instrument voted on by `bullish + bearish + neutral` distinct analysts.
pub fn vote_batch(instrument: &str, bullish: u32, bearish: u32, neutral: u32) -> AssessmentBatch {
    let votes = std::iter::repeat("bullish")
        .take(bullish as usize)
        .chain(std::iter::repeat("bearish").take(bearish as usize))
        .chain(std::iter::repeat("neutral").take(neutral as usize));

    votes
        .enumerate()
        .fold(BatchBuilder::new(), |builder, (i, signal)| {
            builder.assess(&format!("analyst_{i}"), instrument, signal_record(signal))
        })
        .build()
}
