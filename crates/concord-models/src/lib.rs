pub mod aggregate;
pub mod assessment;
pub mod config;
pub mod confidence_stats;
pub mod report;
pub mod signal;
pub mod verdict;
pub mod warning;

pub use aggregate::{
    AgentCounts, ConfidenceBucket, ConfidenceContributor, ConfidenceTier, InstrumentAggregate,
    SignalBucket, SignalContributor,
};
pub use assessment::{
    AgentAssessments, AssessmentBatch, AssessmentRecord, InstrumentAssessment, Reasoning,
};
pub use config::{ConcordConfig, OutputConfig, ValidationConfig};
pub use confidence_stats::{
    ConfidenceDistribution, ConfidenceStats, DistributionBucket, SignalConfidence,
    SignalConfidenceBreakdown,
};
pub use report::ConsensusReport;
pub use signal::{AgentClassification, Signal};
pub use verdict::{ConsensusSignal, ConsensusStrength, ConsensusVerdict, SignalCounts, SignalPercentages};
pub use warning::{AssessmentWarning, WarningKind};
