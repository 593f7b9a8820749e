use serde::Serialize;
use std::ops::{Add, AddAssign};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClassCounts {
    pub true_positives: u64,
    pub false_positives: u64,
    pub false_negatives: u64,
}

impl AddAssign for ClassCounts {
    fn add_assign(&mut self, rhs: Self) {
        self.true_positives += rhs.true_positives;
        self.false_positives += rhs.false_positives;
        self.false_negatives += rhs.false_negatives;
    }
}

impl Add for ClassCounts {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    TruePositive,
    FalsePositive,
    FalseNegative,
}

/// Per-class TP/FP/FN accumulators for classes `[0, num_classes)`.
///
/// Merging is element-wise addition, so per-image counters can be reduced in
/// any order and grouping with the same result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ConfusionCounters {
    classes: Vec<ClassCounts>,
}

impl ConfusionCounters {
    pub fn new(num_classes: u32) -> Self {
        Self {
            classes: vec![ClassCounts::default(); num_classes as usize],
        }
    }

    pub fn num_classes(&self) -> u32 {
        self.classes.len() as u32
    }

    pub fn get(&self, class_id: u32) -> Option<&ClassCounts> {
        self.classes.get(class_id as usize)
    }

    /// Count one outcome for `class_id`. Returns `false` for an unknown class
    /// and leaves the counters untouched.
    #[must_use]
    pub fn record(&mut self, class_id: u32, outcome: Outcome) -> bool {
        let Some(counts) = self.classes.get_mut(class_id as usize) else {
            return false;
        };
        match outcome {
            Outcome::TruePositive => counts.true_positives += 1,
            Outcome::FalsePositive => counts.false_positives += 1,
            Outcome::FalseNegative => counts.false_negatives += 1,
        }
        true
    }

    pub fn merge(&mut self, other: &ConfusionCounters) {
        if self.classes.len() < other.classes.len() {
            self.classes
                .resize(other.classes.len(), ClassCounts::default());
        }
        for (mine, theirs) in self.classes.iter_mut().zip(&other.classes) {
            *mine += *theirs;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &ClassCounts)> {
        self.classes
            .iter()
            .enumerate()
            .map(|(class_id, counts)| (class_id as u32, counts))
    }

    /// Counts summed over every class.
    pub fn totals(&self) -> ClassCounts {
        self.classes
            .iter()
            .fold(ClassCounts::default(), |acc, c| acc + *c)
    }
}

impl AddAssign<&ConfusionCounters> for ConfusionCounters {
    fn add_assign(&mut self, rhs: &ConfusionCounters) {
        self.merge(rhs);
    }
}
