//! Classification metrics with support-weighted averaging

use crate::error::EvalError;
use crate::report::ClassificationMetrics;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-class tallies over one prediction vector
#[derive(Debug, Clone, Copy, Default)]
struct ClassCounts {
    /// True instances of this class in the labels
    support: usize,
    /// Correct predictions of this class
    true_positives: usize,
    /// Total predictions of this class, correct or not
    predicted: usize,
}

/// Per-class metric row for detailed classification reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassBreakdown {
    pub class: String,
    pub support: usize,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

/// Fraction of exact matches between labels and predictions
pub fn accuracy(y_true: &[String], y_pred: &[String]) -> f64 {
    let matches = y_true
        .iter()
        .zip(y_pred.iter())
        .filter(|(t, p)| t == p)
        .count();
    matches as f64 / y_true.len() as f64
}

/// Tally per-class counts, rejecting predicted classes absent from the labels
///
/// The BTreeMap keys the classes in sorted order so downstream weighted
/// sums accumulate in a fixed order and repeated runs produce identical
/// floating-point results.
fn class_counts<'a>(
    y_true: &'a [String],
    y_pred: &'a [String],
    predictor: &str,
) -> Result<BTreeMap<&'a str, ClassCounts>, EvalError> {
    let mut counts: BTreeMap<&str, ClassCounts> = BTreeMap::new();
    for label in y_true {
        counts.entry(label.as_str()).or_default().support += 1;
    }

    for (truth, predicted) in y_true.iter().zip(y_pred.iter()) {
        let entry = match counts.get_mut(predicted.as_str()) {
            Some(entry) => entry,
            None => {
                return Err(EvalError::UnknownClass {
                    predictor: predictor.to_string(),
                    label: predicted.clone(),
                })
            }
        };
        entry.predicted += 1;
        if truth == predicted {
            entry.true_positives += 1;
        }
    }

    Ok(counts)
}

/// Precision/recall/F1 for a single class
///
/// A class that was never predicted has precision 0 (and F1 0 when
/// precision + recall is 0); support is always nonzero because classes are
/// drawn from the labels, so recall stays defined.
fn class_metrics(counts: &ClassCounts) -> (f64, f64, f64) {
    let precision = if counts.predicted > 0 {
        counts.true_positives as f64 / counts.predicted as f64
    } else {
        0.0
    };
    let recall = counts.true_positives as f64 / counts.support as f64;
    let f1 = if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    };
    (precision, recall, f1)
}

/// Compute the full classification metric set for one predictor
///
/// Precision, recall, and F1 are computed per class and combined with
/// support weighting (weight = count of true instances of the class).
pub fn evaluate(
    y_true: &[String],
    y_pred: &[String],
    predictor: &str,
) -> Result<ClassificationMetrics, EvalError> {
    let counts = class_counts(y_true, y_pred, predictor)?;
    let total = y_true.len() as f64;

    let mut precision = 0.0;
    let mut recall = 0.0;
    let mut f1 = 0.0;
    for tally in counts.values() {
        let weight = tally.support as f64 / total;
        let (class_precision, class_recall, class_f1) = class_metrics(tally);
        precision += weight * class_precision;
        recall += weight * class_recall;
        f1 += weight * class_f1;
    }

    Ok(ClassificationMetrics {
        accuracy: accuracy(y_true, y_pred),
        precision,
        recall,
        f1,
    })
}

/// Per-class breakdown in sorted class order
///
/// The detailed counterpart of [`evaluate`], for reporting layers that
/// want the classification-report view rather than the weighted averages.
pub fn per_class(
    y_true: &[String],
    y_pred: &[String],
    predictor: &str,
) -> Result<Vec<ClassBreakdown>, EvalError> {
    let counts = class_counts(y_true, y_pred, predictor)?;
    Ok(counts
        .iter()
        .map(|(class, tally)| {
            let (precision, recall, f1) = class_metrics(tally);
            ClassBreakdown {
                class: class.to_string(),
                support: tally.support,
                precision,
                recall,
                f1,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_perfect_predictions() {
        let y_true = labels(&["Good", "Moderate", "Poor", "Good"]);
        let metrics = evaluate(&y_true, &y_true, "svm").unwrap();
        assert_eq!(metrics.accuracy, 1.0);
        assert_eq!(metrics.precision, 1.0);
        assert_eq!(metrics.recall, 1.0);
        assert_eq!(metrics.f1, 1.0);
    }

    #[test]
    fn test_all_one_class_predictions() {
        // labels [0,1,0,1], predictions [0,0,0,0]:
        // accuracy 0.5; class 0: P=0.5 R=1.0, class 1: never predicted
        let y_true = labels(&["0", "1", "0", "1"]);
        let y_pred = labels(&["0", "0", "0", "0"]);

        let metrics = evaluate(&y_true, &y_pred, "baseline").unwrap();
        assert!((metrics.accuracy - 0.5).abs() < 1e-12);
        assert!((metrics.precision - 0.25).abs() < 1e-12);
        assert!((metrics.recall - 0.5).abs() < 1e-12);
        // weighted F1 = 0.5 * (2 * 0.5 * 1.0 / 1.5) = 1/3
        assert!((metrics.f1 - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_predicted_class() {
        let y_true = labels(&["Good", "Moderate"]);
        let y_pred = labels(&["Good", "Hazardous"]);

        let err = evaluate(&y_true, &y_pred, "svm").unwrap_err();
        match err {
            EvalError::UnknownClass { predictor, label } => {
                assert_eq!(predictor, "svm");
                assert_eq!(label, "Hazardous");
            }
            other => panic!("expected UnknownClass, got {other:?}"),
        }
    }

    #[test]
    fn test_weighted_averaging_uses_support() {
        // 3 of class A, 1 of class B; predictor nails A, misses B entirely
        let y_true = labels(&["A", "A", "A", "B"]);
        let y_pred = labels(&["A", "A", "A", "A"]);

        let metrics = evaluate(&y_true, &y_pred, "m").unwrap();
        // A: P = 3/4, R = 1; B: P = 0, R = 0
        assert!((metrics.precision - 0.75 * 0.75).abs() < 1e-12);
        assert!((metrics.recall - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_per_class_breakdown() {
        let y_true = labels(&["Good", "Poor", "Good", "Moderate"]);
        let y_pred = labels(&["Good", "Good", "Good", "Moderate"]);

        let breakdown = per_class(&y_true, &y_pred, "rf").unwrap();
        // Sorted class order
        let classes: Vec<&str> = breakdown.iter().map(|b| b.class.as_str()).collect();
        assert_eq!(classes, vec!["Good", "Moderate", "Poor"]);

        let total_support: usize = breakdown.iter().map(|b| b.support).sum();
        assert_eq!(total_support, y_true.len());

        let good = &breakdown[0];
        assert_eq!(good.support, 2);
        assert!((good.precision - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(good.recall, 1.0);

        let poor = &breakdown[2];
        assert_eq!(poor.support, 1);
        assert_eq!(poor.precision, 0.0);
        assert_eq!(poor.recall, 0.0);
        assert_eq!(poor.f1, 0.0);
    }

    #[test]
    fn test_accuracy_exact_match_only() {
        let y_true = labels(&["1", "2"]);
        let y_pred = labels(&["1", "1"]);
        assert_eq!(accuracy(&y_true, &y_pred), 0.5);
    }
}
