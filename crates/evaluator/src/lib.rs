pub mod config;
pub mod counters;
pub mod errors;
pub mod iou;
pub mod logging;
pub mod matcher;
pub mod metrics;
pub mod report;
pub mod service;

// Re-export commonly used types for convenience
pub use config::{EvaluatorConfig, ReportFormat};
pub use counters::{ClassCounts, ConfusionCounters};
pub use errors::{EvaluationError, MatchError};
pub use matcher::{GroundTruthClaim, ImageMatch, MatchOutcome, MatchThresholds, match_image};
pub use metrics::{Metric, MetricsSummary, Scores};
pub use service::{EvaluationReport, EvaluationService, ImageFailure};
