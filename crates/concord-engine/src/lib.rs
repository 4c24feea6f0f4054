//! Aggregation and consensus over independent agent assessments.
//!
//! Three infallible components run over one immutable [`AssessmentBatch`]:
//! the tally builder ([`build_tallies`]), the confidence summarizer
//! ([`summarize_confidence`]) and the consensus resolver ([`resolve`]), which
//! works from the tally counts. [`analyze`] runs all three.
//!
//! [`AssessmentBatch`]: concord_models::AssessmentBatch

pub mod confidence;
pub mod consensus;
pub mod error;
pub mod input;
pub mod normalize;
pub mod report;
pub mod tally;

pub mod test_support;

pub use confidence::summarize_confidence;
pub use consensus::{resolve, resolve_all};
pub use error::EngineError;
pub use input::{from_value, parse_assessments, ParsedInput};
pub use report::{analyze, analyze_input, analyze_json};
pub use tally::{build_tallies, materialized_instruments};
