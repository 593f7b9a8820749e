use crate::matcher::MatchThresholds;
use anyhow::ensure;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

pub use common::Environment;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
}

/// Score detector output against ground truth with IoU matching.
#[derive(Debug, Clone, Parser)]
#[command(name = "evaluator", version)]
pub struct EvaluatorConfig {
    /// Folder with ground-truth annotation files
    #[arg(long, env = "GROUND_TRUTH_FOLDER")]
    pub ground_truth_folder: PathBuf,

    /// Folder with inference annotation files (same file names as ground truth)
    #[arg(long, env = "INFERENCE_FOLDER")]
    pub inference_folder: PathBuf,

    /// Minimum confidence for an inference to be considered
    #[arg(long, env = "CONFIDENCE_THRESHOLD", default_value_t = 0.98)]
    pub confidence_threshold: f64,

    /// IoU an inference must exceed to match a ground truth
    #[arg(long, env = "IOU_THRESHOLD", default_value_t = 0.95)]
    pub iou_threshold: f64,

    /// Number of classes; class ids must lie in [0, num_classes)
    #[arg(long, env = "NUM_CLASSES", default_value_t = 4)]
    pub num_classes: u32,

    #[arg(long, env = "REPORT_FORMAT", value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    #[arg(skip = Environment::from_env())]
    pub environment: Environment,
}

impl EvaluatorConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            (0.0..=1.0).contains(&self.confidence_threshold),
            "confidence threshold must be in [0, 1], got {}",
            self.confidence_threshold
        );
        ensure!(
            (0.0..=1.0).contains(&self.iou_threshold),
            "IoU threshold must be in [0, 1], got {}",
            self.iou_threshold
        );
        ensure!(self.num_classes > 0, "number of classes must be positive");
        Ok(())
    }

    pub fn thresholds(&self) -> MatchThresholds {
        MatchThresholds {
            confidence: self.confidence_threshold,
            iou: self.iou_threshold,
        }
    }

    /// Create default configuration for testing
    #[cfg(test)]
    pub fn test_default() -> Self {
        Self {
            ground_truth_folder: PathBuf::from("/data/labels"),
            inference_folder: PathBuf::from("/data/predict"),
            confidence_threshold: 0.98,
            iou_threshold: 0.95,
            num_classes: 4,
            format: ReportFormat::Text,
            environment: Environment::Development,
        }
    }
}
