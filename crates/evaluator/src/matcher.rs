//! Greedy per-image assignment of inferences to ground truth.
//!
//! Inferences are visited in input order. A confident inference is matched to
//! the same-class ground truth with the highest IoU (first one wins a tie); the
//! match counts only if the IoU is strictly above the threshold and the ground
//! truth has not already been claimed by an earlier inference.

use crate::counters::{ConfusionCounters, Outcome};
use crate::errors::MatchError;
use crate::iou::iou;
use annotation::Annotation;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MatchThresholds {
    /// Inferences below this confidence are false positives.
    pub confidence: f64,
    /// Best IoU must be strictly greater than this to match.
    pub iou: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FalsePositiveReason {
    LowConfidence,
    LowIou,
    /// The best ground truth was already claimed by an earlier inference.
    DuplicateMatch { ground_truth: usize },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchOutcome {
    TruePositive { ground_truth: usize, iou: f64 },
    FalsePositive(FalsePositiveReason),
}

impl MatchOutcome {
    pub fn is_true_positive(&self) -> bool {
        matches!(self, MatchOutcome::TruePositive { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroundTruthClaim {
    /// Claimed by the inference at this index.
    Matched(usize),
    Unmatched,
}

/// Result of matching one image.
#[derive(Debug, Clone)]
pub struct ImageMatch {
    /// One entry per inference, in input order.
    pub outcomes: Vec<MatchOutcome>,
    /// One entry per ground truth, in input order.
    pub claims: Vec<GroundTruthClaim>,
    pub counters: ConfusionCounters,
}

/// Match one image's inferences against its ground truth.
///
/// An inference without a confidence value never passes the confidence gate.
pub fn match_image(
    inferences: &[Annotation],
    ground_truths: &[Annotation],
    thresholds: &MatchThresholds,
    num_classes: u32,
) -> Result<ImageMatch, MatchError> {
    let _s = common::span_debug!(
        "match_image",
        inferences = inferences.len(),
        ground_truths = ground_truths.len()
    );

    if let Some(bad) = inferences
        .iter()
        .chain(ground_truths)
        .find(|a| a.class_id >= num_classes)
    {
        return Err(MatchError::ClassOutOfRange {
            class_id: bad.class_id,
            num_classes,
        });
    }

    let mut counters = ConfusionCounters::new(num_classes);
    let mut claims = vec![GroundTruthClaim::Unmatched; ground_truths.len()];
    let mut outcomes = Vec::with_capacity(inferences.len());

    for (inference_idx, inference) in inferences.iter().enumerate() {
        let outcome = classify(inference, inference_idx, ground_truths, &mut claims, thresholds);

        let kind = if outcome.is_true_positive() {
            Outcome::TruePositive
        } else {
            Outcome::FalsePositive
        };
        let recorded = counters.record(inference.class_id, kind);
        debug_assert!(recorded, "class ids are checked before matching");
        outcomes.push(outcome);
    }

    for (gt, claim) in ground_truths.iter().zip(&claims) {
        if *claim == GroundTruthClaim::Unmatched {
            let recorded = counters.record(gt.class_id, Outcome::FalseNegative);
            debug_assert!(recorded, "class ids are checked before matching");
        }
    }

    Ok(ImageMatch {
        outcomes,
        claims,
        counters,
    })
}

fn classify(
    inference: &Annotation,
    inference_idx: usize,
    ground_truths: &[Annotation],
    claims: &mut [GroundTruthClaim],
    thresholds: &MatchThresholds,
) -> MatchOutcome {
    let confident = inference
        .confidence
        .is_some_and(|c| c >= thresholds.confidence);
    if !confident {
        return MatchOutcome::FalsePositive(FalsePositiveReason::LowConfidence);
    }

    let Some((best_idx, best_iou)) = best_ground_truth(inference, ground_truths) else {
        return MatchOutcome::FalsePositive(FalsePositiveReason::LowIou);
    };

    if best_iou <= thresholds.iou {
        return MatchOutcome::FalsePositive(FalsePositiveReason::LowIou);
    }

    match claims[best_idx] {
        GroundTruthClaim::Matched(_) => {
            MatchOutcome::FalsePositive(FalsePositiveReason::DuplicateMatch {
                ground_truth: best_idx,
            })
        }
        GroundTruthClaim::Unmatched => {
            claims[best_idx] = GroundTruthClaim::Matched(inference_idx);
            MatchOutcome::TruePositive {
                ground_truth: best_idx,
                iou: best_iou,
            }
        }
    }
}

/// Same-class ground truth with the highest IoU; the first maximum wins.
fn best_ground_truth(inference: &Annotation, ground_truths: &[Annotation]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, gt) in ground_truths.iter().enumerate() {
        if gt.class_id != inference.class_id {
            continue;
        }
        let overlap = iou(&inference.bbox, &gt.bbox);
        if best.is_none_or(|(_, best_iou)| overlap > best_iou) {
            best = Some((idx, overlap));
        }
    }
    best
}
