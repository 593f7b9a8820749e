use crate::counters::{ClassCounts, ConfusionCounters};
use serde::Serialize;
use std::fmt;

/// A ratio that may have no value because its denominator was zero.
///
/// Serializes as a number, or `null` when undefined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Metric {
    Defined(f64),
    Undefined,
}

impl Metric {
    pub fn ratio(numerator: u64, denominator: u64) -> Self {
        if denominator == 0 {
            Metric::Undefined
        } else {
            Metric::Defined(numerator as f64 / denominator as f64)
        }
    }

    pub fn value(self) -> Option<f64> {
        match self {
            Metric::Defined(v) => Some(v),
            Metric::Undefined => None,
        }
    }

    pub fn is_defined(self) -> bool {
        matches!(self, Metric::Defined(_))
    }

    /// Harmonic mean of precision and recall; defined only when both are.
    pub fn f1(precision: Metric, recall: Metric) -> Self {
        match (precision, recall) {
            (Metric::Defined(p), Metric::Defined(r)) if p + r == 0.0 => Metric::Defined(0.0),
            (Metric::Defined(p), Metric::Defined(r)) => Metric::Defined(2.0 * p * r / (p + r)),
            _ => Metric::Undefined,
        }
    }

    /// Mean over the defined values; undefined if there are none.
    pub fn mean(values: impl IntoIterator<Item = Metric>) -> Self {
        let (sum, n) = values
            .into_iter()
            .filter_map(Metric::value)
            .fold((0.0, 0u32), |(sum, n), v| (sum + v, n + 1));
        if n == 0 {
            Metric::Undefined
        } else {
            Metric::Defined(sum / f64::from(n))
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Defined(v) => write!(f, "{v:.4}"),
            Metric::Undefined => f.write_str("undefined"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Scores {
    pub precision: Metric,
    pub recall: Metric,
    pub f1: Metric,
}

impl Scores {
    pub fn from_counts(counts: &ClassCounts) -> Self {
        let precision = Metric::ratio(
            counts.true_positives,
            counts.true_positives + counts.false_positives,
        );
        let recall = Metric::ratio(
            counts.true_positives,
            counts.true_positives + counts.false_negatives,
        );
        Self {
            precision,
            recall,
            f1: Metric::f1(precision, recall),
        }
    }

    pub fn is_fully_defined(&self) -> bool {
        self.precision.is_defined() && self.recall.is_defined() && self.f1.is_defined()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassMetrics {
    pub class_id: u32,
    pub counts: ClassCounts,
    #[serde(flatten)]
    pub scores: Scores,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSummary {
    pub per_class: Vec<ClassMetrics>,
    /// Unweighted mean over classes, skipping classes where a metric is undefined.
    pub macro_average: Scores,
    /// Scores over the counts summed across classes.
    pub micro_average: Scores,
    /// Classes with at least one undefined metric.
    pub undefined_classes: Vec<u32>,
}

impl MetricsSummary {
    pub fn from_counters(counters: &ConfusionCounters) -> Self {
        let per_class: Vec<ClassMetrics> = counters
            .iter()
            .map(|(class_id, counts)| ClassMetrics {
                class_id,
                counts: *counts,
                scores: Scores::from_counts(counts),
            })
            .collect();

        let macro_average = Scores {
            precision: Metric::mean(per_class.iter().map(|c| c.scores.precision)),
            recall: Metric::mean(per_class.iter().map(|c| c.scores.recall)),
            f1: Metric::mean(per_class.iter().map(|c| c.scores.f1)),
        };

        let undefined_classes = per_class
            .iter()
            .filter(|c| !c.scores.is_fully_defined())
            .map(|c| c.class_id)
            .collect();

        Self {
            micro_average: Scores::from_counts(&counters.totals()),
            per_class,
            macro_average,
            undefined_classes,
        }
    }
}
