use crate::config::EvaluatorConfig;
use crate::counters::ConfusionCounters;
use crate::errors::EvaluationError;
use crate::matcher::{ImageMatch, MatchThresholds, match_image};
use crate::metrics::MetricsSummary;
use annotation::{AnnotationReader, RecordKind, list_annotation_files};
use anyhow::Context;
use serde::{Serialize, Serializer};
use std::collections::BTreeSet;

#[derive(Debug, Serialize)]
pub struct ImageFailure {
    pub image: String,
    #[serde(serialize_with = "serialize_display")]
    pub error: EvaluationError,
}

fn serialize_display<S: Serializer>(error: &EvaluationError, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(error)
}

#[derive(Debug, Serialize)]
pub struct EvaluationReport {
    pub thresholds: MatchThresholds,
    pub images_evaluated: usize,
    pub counters: ConfusionCounters,
    pub metrics: MetricsSummary,
    pub failures: Vec<ImageFailure>,
}

impl EvaluationReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

pub struct EvaluationService {
    config: EvaluatorConfig,
    ground_truth_reader: AnnotationReader,
    inference_reader: AnnotationReader,
}

impl EvaluationService {
    pub fn new(config: EvaluatorConfig) -> Self {
        Self {
            ground_truth_reader: AnnotationReader::new(RecordKind::GroundTruth)
                .with_num_classes(config.num_classes),
            inference_reader: AnnotationReader::new(RecordKind::Inference)
                .with_num_classes(config.num_classes),
            config,
        }
    }

    /// Evaluate every image found in either folder.
    ///
    /// Unreadable folders abort the run; problems with individual images are
    /// collected in the report and the remaining images are still evaluated.
    pub fn run(&self) -> anyhow::Result<EvaluationReport> {
        let _s = common::span!("evaluate");

        let ground_truth = list_annotation_files(&self.config.ground_truth_folder)
            .context("Failed to list ground-truth folder")?;
        let inference = list_annotation_files(&self.config.inference_folder)
            .context("Failed to list inference folder")?;

        let images: BTreeSet<&String> = ground_truth.iter().chain(&inference).collect();
        tracing::info!(
            images = images.len(),
            ground_truth_files = ground_truth.len(),
            inference_files = inference.len(),
            "Starting evaluation"
        );

        let mut counters = ConfusionCounters::new(self.config.num_classes);
        let mut failures = Vec::new();
        let mut images_evaluated = 0;

        for image in images {
            match self.evaluate_image(image) {
                Ok(result) => {
                    let totals = result.counters.totals();
                    tracing::debug!(
                        image = %image,
                        tp = totals.true_positives,
                        fp = totals.false_positives,
                        fn_ = totals.false_negatives,
                        "Image evaluated"
                    );
                    counters += &result.counters;
                    images_evaluated += 1;
                }
                Err(error) => {
                    tracing::warn!(image = %image, error = %error, "Skipping image");
                    failures.push(ImageFailure {
                        image: image.clone(),
                        error,
                    });
                }
            }
        }

        let metrics = MetricsSummary::from_counters(&counters);
        if !metrics.undefined_classes.is_empty() {
            tracing::info!(
                classes = ?metrics.undefined_classes,
                "Some classes have undefined metrics"
            );
        }
        tracing::info!(
            images_evaluated,
            failures = failures.len(),
            "Evaluation finished"
        );

        Ok(EvaluationReport {
            thresholds: self.config.thresholds(),
            images_evaluated,
            counters,
            metrics,
            failures,
        })
    }

    /// Match one image, identified by its annotation file name.
    pub fn evaluate_image(&self, image: &str) -> Result<ImageMatch, EvaluationError> {
        let inferences = self
            .inference_reader
            .read(&self.config.inference_folder.join(image))?;
        let ground_truths = self
            .ground_truth_reader
            .read(&self.config.ground_truth_folder.join(image))?;

        Ok(match_image(
            &inferences,
            &ground_truths,
            &self.config.thresholds(),
            self.config.num_classes,
        )?)
    }
}
