use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::signal::{AgentClassification, Signal};

/// Free-form rationale attached to an assessment.
///
/// Producers send either prose or a mapping of named sub-factors. The payload
/// is carried through to callers unmodified.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Reasoning {
    Text(String),
    Factors(serde_json::Map<String, serde_json::Value>),
    /// Any other JSON shape (numbers, arrays, booleans).
    Other(serde_json::Value),
}

impl Reasoning {
    /// `None` for JSON null.
    pub fn from_value(value: serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Null => None,
            serde_json::Value::String(text) => Some(Reasoning::Text(text)),
            serde_json::Value::Object(factors) => Some(Reasoning::Factors(factors)),
            other => Some(Reasoning::Other(other)),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Reasoning::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Sub-factors that carry a recognized `signal`, in payload order.
    pub fn factor_signals(&self) -> Vec<(&str, Signal)> {
        let Reasoning::Factors(factors) = self else {
            return Vec::new();
        };
        factors
            .iter()
            .filter_map(|(name, factor)| {
                factor
                    .get("signal")
                    .and_then(|s| s.as_str())
                    .and_then(Signal::parse)
                    .map(|signal| (name.as_str(), signal))
            })
            .collect()
    }
}

/// One agent's opinion about one instrument.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AssessmentRecord {
    /// Raw label as supplied. Only the three recognized labels are tallied.
    pub signal: Option<String>,
    /// Raw score on an undeclared scale: a fraction in [0,1] or a percentage.
    pub confidence: Option<Decimal>,
    pub reasoning: Option<Reasoning>,
}

impl AssessmentRecord {
    pub fn recognized_signal(&self) -> Option<Signal> {
        self.signal.as_deref().and_then(Signal::parse)
    }

    /// Whether this record can contribute to any output structure.
    pub fn is_countable(&self) -> bool {
        self.recognized_signal().is_some() || self.confidence.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InstrumentAssessment {
    pub instrument: String,
    pub record: AssessmentRecord,
}

/// Every assessment produced by a single agent, in input order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentAssessments {
    pub agent_name: String,
    /// Derived once from `agent_name` and reused for every instrument.
    pub classification: AgentClassification,
    pub assessments: Vec<InstrumentAssessment>,
}

impl AgentAssessments {
    pub fn new(agent_name: impl Into<String>) -> Self {
        let agent_name = agent_name.into();
        Self {
            classification: AgentClassification::classify(&agent_name),
            agent_name,
            assessments: Vec::new(),
        }
    }

    pub fn push(&mut self, instrument: impl Into<String>, record: AssessmentRecord) {
        self.assessments.push(InstrumentAssessment {
            instrument: instrument.into(),
            record,
        });
    }
}

/// The full, immutable input to one analysis run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AssessmentBatch {
    pub agents: Vec<AgentAssessments>,
}

impl AssessmentBatch {
    /// All (agent, assessment) pairs, agent-major, in input order.
    pub fn records(&self) -> impl Iterator<Item = (&AgentAssessments, &InstrumentAssessment)> {
        self.agents
            .iter()
            .flat_map(|agent| agent.assessments.iter().map(move |a| (agent, a)))
    }

    pub fn is_empty(&self) -> bool {
        self.agents.iter().all(|a| a.assessments.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn reasoning_from_text_and_factors() {
        let text = Reasoning::from_value(serde_json::json!("Strong moat")).unwrap();
        assert_eq!(text.as_text(), Some("Strong moat"));

        let factors = Reasoning::from_value(serde_json::json!({
            "valuation": {"signal": "bearish", "details": "P/E 45"},
            "growth": {"signal": "BULLISH"},
            "notes": "no signal here",
            "momentum": {"signal": "sideways"}
        }))
        .unwrap();
        assert_eq!(factors.as_text(), None);
        assert_eq!(
            factors.factor_signals(),
            vec![("valuation", Signal::Bearish), ("growth", Signal::Bullish)]
        );
    }

    #[test]
    fn reasoning_null_is_absent() {
        assert!(Reasoning::from_value(serde_json::Value::Null).is_none());
        assert!(matches!(
            Reasoning::from_value(serde_json::json!([1, 2])),
            Some(Reasoning::Other(_))
        ));
    }

    #[test]
    fn reasoning_serializes_unmodified() {
        let payload = serde_json::json!({"valuation": {"signal": "bearish"}});
        let reasoning = Reasoning::from_value(payload.clone()).unwrap();
        assert_eq!(serde_json::to_value(&reasoning).unwrap(), payload);
    }

    #[test]
    fn record_countability() {
        let unrecognized = AssessmentRecord {
            signal: Some("buy".to_string()),
            confidence: None,
            reasoning: None,
        };
        assert!(!unrecognized.is_countable());

        let confidence_only = AssessmentRecord {
            signal: None,
            confidence: Some(dec!(0.4)),
            reasoning: None,
        };
        assert!(confidence_only.is_countable());
        assert_eq!(confidence_only.recognized_signal(), None);
    }

    #[test]
    fn agent_classified_once_on_construction() {
        let mut agent = AgentAssessments::new("risk_management_agent");
        agent.push("AAPL", AssessmentRecord::default());
        agent.push("MSFT", AssessmentRecord::default());
        assert_eq!(agent.classification, AgentClassification::Risk);

        let batch = AssessmentBatch {
            agents: vec![agent],
        };
        let instruments: Vec<&str> = batch
            .records()
            .map(|(_, a)| a.instrument.as_str())
            .collect();
        assert_eq!(instruments, vec!["AAPL", "MSFT"]);
    }
}
