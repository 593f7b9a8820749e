use crate::metrics::Scores;
use crate::service::EvaluationReport;
use std::fmt::Write;

/// Render the report as a plain-text table.
pub fn render_text(report: &EvaluationReport) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "At confidence threshold {} and IoU threshold {} over {} image(s):",
        report.thresholds.confidence, report.thresholds.iou, report.images_evaluated
    );
    let _ = writeln!(
        out,
        "{:>6} {:>6} {:>6} {:>6} {:>10} {:>10} {:>10}",
        "class", "TP", "FP", "FN", "precision", "recall", "F1"
    );

    for class in &report.metrics.per_class {
        let _ = writeln!(
            out,
            "{:>6} {:>6} {:>6} {:>6} {}",
            class.class_id,
            class.counts.true_positives,
            class.counts.false_positives,
            class.counts.false_negatives,
            score_columns(&class.scores)
        );
    }

    let totals = report.counters.totals();
    let _ = writeln!(
        out,
        "{:>6} {:>6} {:>6} {:>6} {}",
        "micro",
        totals.true_positives,
        totals.false_positives,
        totals.false_negatives,
        score_columns(&report.metrics.micro_average)
    );
    let _ = writeln!(
        out,
        "{:>6} {:>6} {:>6} {:>6} {}",
        "macro",
        "",
        "",
        "",
        score_columns(&report.metrics.macro_average)
    );

    if !report.metrics.undefined_classes.is_empty() {
        let classes: Vec<String> = report
            .metrics
            .undefined_classes
            .iter()
            .map(u32::to_string)
            .collect();
        let _ = writeln!(
            out,
            "Undefined metrics for class(es): {}",
            classes.join(", ")
        );
    }

    if !report.failures.is_empty() {
        let _ = writeln!(out, "{} image(s) could not be evaluated:", report.failures.len());
        for failure in &report.failures {
            let _ = writeln!(out, "  {}: {}", failure.image, failure.error);
        }
    }

    out
}

fn score_columns(scores: &Scores) -> String {
    format!(
        "{:>10} {:>10} {:>10}",
        scores.precision.to_string(),
        scores.recall.to_string(),
        scores.f1.to_string()
    )
}
