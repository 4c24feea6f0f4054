use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::aggregate::InstrumentAggregate;
use crate::confidence_stats::ConfidenceStats;
use crate::verdict::ConsensusVerdict;
use crate::warning::AssessmentWarning;

/// The three per-instrument output structures of one analysis run, plus the
/// non-fatal warnings collected while reading the input.
///
/// All three maps share the same key set. A missing key means "no data".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ConsensusReport {
    pub aggregates: BTreeMap<String, InstrumentAggregate>,
    pub confidence: BTreeMap<String, ConfidenceStats>,
    pub consensus: BTreeMap<String, ConsensusVerdict>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<AssessmentWarning>,
}

impl ConsensusReport {
    pub fn instruments(&self) -> impl Iterator<Item = &str> {
        self.aggregates.keys().map(String::as_str)
    }

    pub fn strip_attribution(&mut self) {
        for aggregate in self.aggregates.values_mut() {
            aggregate.strip_attribution();
        }
    }
}
