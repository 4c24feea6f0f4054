//! Lenient decoding of the raw assessment document.
//!
//! The document is a JSON object keyed by agent name, each value an object
//! keyed by instrument symbol, each record an object with optional `signal`,
//! `confidence` and `reasoning`. Only a document that is not an object at the
//! top level is rejected; every malformed entry below it contributes nothing
//! and produces a warning.

use std::str::FromStr;

use concord_models::{
    AgentAssessments, AssessmentBatch, AssessmentRecord, AssessmentWarning, Reasoning, Signal,
    ValidationConfig, WarningKind,
};
use rust_decimal::Decimal;
use serde_json::{Map, Number, Value};
use tracing::debug;

use crate::error::EngineError;
use crate::normalize::{is_out_of_range, scale_to_percent};

/// A decoded batch and the warnings raised while decoding it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedInput {
    pub batch: AssessmentBatch,
    pub warnings: Vec<AssessmentWarning>,
}

pub fn parse_assessments(json: &str, config: &ValidationConfig) -> Result<ParsedInput, EngineError> {
    let value: Value = serde_json::from_str(json)?;
    from_value(value, config)
}

pub fn from_value(value: Value, config: &ValidationConfig) -> Result<ParsedInput, EngineError> {
    let agents = match value {
        Value::Object(agents) => agents,
        other => {
            return Err(EngineError::InvalidInput(format!(
                "expected an object keyed by agent name, found {}",
                json_type(&other)
            )))
        }
    };

    let mut decoder = Decoder::new(config);
    let mut batch = AssessmentBatch::default();

    for (agent_name, instruments) in agents {
        let Value::Object(instruments) = instruments else {
            decoder.warn(AssessmentWarning::for_agent(
                &agent_name,
                WarningKind::AgentNotMapping,
            ));
            continue;
        };

        let mut agent = AgentAssessments::new(agent_name);
        for (instrument, record) in instruments {
            match record {
                Value::Object(fields) => {
                    let record = decoder.decode_record(&agent.agent_name, &instrument, fields);
                    agent.push(instrument, record);
                }
                _ => decoder.warn(AssessmentWarning::for_record(
                    &agent.agent_name,
                    &instrument,
                    WarningKind::RecordNotMapping,
                )),
            }
        }
        batch.agents.push(agent);
    }

    Ok(ParsedInput {
        batch,
        warnings: decoder.warnings,
    })
}

struct Decoder<'a> {
    config: &'a ValidationConfig,
    warnings: Vec<AssessmentWarning>,
}

impl<'a> Decoder<'a> {
    fn new(config: &'a ValidationConfig) -> Self {
        Self {
            config,
            warnings: Vec::new(),
        }
    }

    fn warn(&mut self, warning: AssessmentWarning) {
        debug!(%warning, "Degraded input entry");
        if self.config.collect_warnings {
            self.warnings.push(warning);
        }
    }

    fn decode_record(
        &mut self,
        agent: &str,
        instrument: &str,
        mut fields: Map<String, Value>,
    ) -> AssessmentRecord {
        let signal = match fields.remove("signal") {
            None | Some(Value::Null) => None,
            Some(Value::String(label)) => {
                if Signal::parse(&label).is_none() {
                    self.warn(AssessmentWarning::for_record(
                        agent,
                        instrument,
                        WarningKind::UnrecognizedSignal {
                            value: label.clone(),
                        },
                    ));
                }
                Some(label)
            }
            Some(_) => {
                self.warn(AssessmentWarning::for_record(
                    agent,
                    instrument,
                    WarningKind::NonStringSignal,
                ));
                None
            }
        };

        let confidence = match fields.remove("confidence") {
            None | Some(Value::Null) => None,
            Some(Value::Number(number)) => match decimal_from_number(&number) {
                Some(raw) => {
                    self.check_confidence(agent, instrument, raw);
                    Some(raw)
                }
                None => {
                    self.warn(AssessmentWarning::for_record(
                        agent,
                        instrument,
                        WarningKind::NonNumericConfidence,
                    ));
                    None
                }
            },
            Some(_) => {
                self.warn(AssessmentWarning::for_record(
                    agent,
                    instrument,
                    WarningKind::NonNumericConfidence,
                ));
                None
            }
        };

        let reasoning = fields.remove("reasoning").and_then(Reasoning::from_value);

        AssessmentRecord {
            signal,
            confidence,
            reasoning,
        }
    }

    fn check_confidence(&mut self, agent: &str, instrument: &str, raw: Decimal) {
        if self.config.flag_ambiguous_scale && raw == Decimal::ONE {
            self.warn(AssessmentWarning::for_record(
                agent,
                instrument,
                WarningKind::AmbiguousConfidenceScale,
            ));
        }
        if is_out_of_range(raw) {
            self.warn(AssessmentWarning::for_record(
                agent,
                instrument,
                WarningKind::ConfidenceOutOfRange {
                    raw,
                    normalized: scale_to_percent(raw),
                },
            ));
        }
    }
}

/// Convert through the number's textual form so `0.85` stays exactly `0.85`.
/// `None` when the value does not fit a `Decimal`.
fn decimal_from_number(number: &Number) -> Option<Decimal> {
    let text = number.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
