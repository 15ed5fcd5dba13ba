//! Evaluation reports and the comparison table
//!
//! The comparison table is the harness's sole output artifact: one metric
//! report per predictor name, in predictor-set insertion order. It is
//! never mutated after construction.

use crate::models::ProblemType;
use serde::{Deserialize, Serialize};

/// Regression metric set for one predictor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionMetrics {
    pub mae: f64,
    pub rmse: f64,
    pub r2: f64,
}

/// Classification metric set for one predictor
///
/// Precision, recall, and F1 are support-weighted averages over the
/// classes observed in the ground truth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationMetrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

/// Metric report for one predictor, tagged by problem type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "problem_type", rename_all = "lowercase")]
pub enum MetricReport {
    Regression(RegressionMetrics),
    Classification(ClassificationMetrics),
}

impl MetricReport {
    /// The problem type this report was computed under
    pub fn problem_type(&self) -> ProblemType {
        match self {
            MetricReport::Regression(_) => ProblemType::Regression,
            MetricReport::Classification(_) => ProblemType::Classification,
        }
    }

    /// Ordered (metric name, score) view for renderers
    pub fn metrics(&self) -> Vec<(&'static str, f64)> {
        match self {
            MetricReport::Regression(m) => {
                vec![("mae", m.mae), ("rmse", m.rmse), ("r2", m.r2)]
            }
            MetricReport::Classification(m) => vec![
                ("accuracy", m.accuracy),
                ("precision", m.precision),
                ("recall", m.recall),
                ("f1", m.f1),
            ],
        }
    }

    /// Look up a single score by metric name
    pub fn metric(&self, name: &str) -> Option<f64> {
        self.metrics()
            .into_iter()
            .find(|(metric, _)| *metric == name)
            .map(|(_, score)| score)
    }
}

/// One row of the comparison table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonEntry {
    pub predictor: String,
    #[serde(flatten)]
    pub report: MetricReport,
}

/// Per-predictor metric reports in predictor-set insertion order
///
/// Serializes as an ordered sequence of entries so JSON output preserves
/// the comparison order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComparisonTable {
    entries: Vec<ComparisonEntry>,
}

impl ComparisonTable {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, predictor: String, report: MetricReport) {
        self.entries.push(ComparisonEntry { predictor, report });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Predictor names in table order
    pub fn names(&self) -> Vec<&str> {
        self.entries
            .iter()
            .map(|entry| entry.predictor.as_str())
            .collect()
    }

    /// Look up one predictor's report by name
    pub fn get(&self, predictor: &str) -> Option<&MetricReport> {
        self.entries
            .iter()
            .find(|entry| entry.predictor == predictor)
            .map(|entry| &entry.report)
    }

    /// Iterate entries in table order
    pub fn iter(&self) -> impl Iterator<Item = &ComparisonEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a ComparisonTable {
    type Item = &'a ComparisonEntry;
    type IntoIter = std::slice::Iter<'a, ComparisonEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> ComparisonTable {
        let mut table = ComparisonTable::with_capacity(2);
        table.push(
            "linear".to_string(),
            MetricReport::Regression(RegressionMetrics {
                mae: 0.25,
                rmse: 0.5,
                r2: 0.8,
            }),
        );
        table.push(
            "random_forest".to_string(),
            MetricReport::Regression(RegressionMetrics {
                mae: 0.1,
                rmse: 0.2,
                r2: 0.95,
            }),
        );
        table
    }

    #[test]
    fn test_table_order_and_lookup() {
        let table = sample_table();
        assert_eq!(table.names(), vec!["linear", "random_forest"]);
        assert_eq!(table.get("linear").unwrap().metric("r2"), Some(0.8));
        assert!(table.get("svm").is_none());
    }

    #[test]
    fn test_metric_report_view_order() {
        let report = MetricReport::Classification(ClassificationMetrics {
            accuracy: 0.9,
            precision: 0.8,
            recall: 0.7,
            f1: 0.75,
        });
        let names: Vec<&str> = report.metrics().iter().map(|(name, _)| *name).collect();
        assert_eq!(names, vec!["accuracy", "precision", "recall", "f1"]);
        assert_eq!(report.metric("f1"), Some(0.75));
        assert_eq!(report.metric("mae"), None);
    }

    #[test]
    fn test_json_preserves_order() {
        let table = sample_table();
        let json = serde_json::to_string(&table).unwrap();
        let linear_pos = json.find("linear").unwrap();
        let forest_pos = json.find("random_forest").unwrap();
        assert!(linear_pos < forest_pos);

        let round_trip: ComparisonTable = serde_json::from_str(&json).unwrap();
        assert_eq!(round_trip, table);
    }
}
