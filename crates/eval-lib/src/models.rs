//! Core data models for the evaluation harness

use crate::error::EvalError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Held-out feature rows for one evaluation call
///
/// Row count is fixed for the duration of a call. Column count is whatever
/// the predictors under comparison expect; the harness never validates
/// dimensional compatibility and instead lets prediction fail explicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureMatrix {
    rows: Vec<Vec<f64>>,
}

impl FeatureMatrix {
    /// Create a feature matrix from row-major data
    pub fn new(rows: Vec<Vec<f64>>) -> Self {
        Self { rows }
    }

    /// Number of rows (N in the evaluation contract)
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns in the first row, or 0 for an empty matrix
    pub fn n_columns(&self) -> usize {
        self.rows.first().map(Vec::len).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Borrow the underlying rows
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Borrow a single row by index
    pub fn row(&self, index: usize) -> Option<&[f64]> {
        self.rows.get(index).map(Vec::as_slice)
    }
}

/// Ground-truth or predicted outputs for one evaluation call
///
/// The two variants are the tagged counterpart of the problem types:
/// continuous values for regression, already-encoded category labels for
/// classification. Integer-encoded categories are carried as their string
/// form ("0", "1", ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetVector {
    /// Continuous numeric targets (regression)
    Continuous(Vec<f64>),
    /// Discrete category labels (classification)
    Categorical(Vec<String>),
}

/// Ground-truth values aligned 1:1 with the feature rows
pub type LabelVector = TargetVector;

/// Output of a single predictor over a feature matrix
pub type PredictionVector = TargetVector;

impl TargetVector {
    pub fn len(&self) -> usize {
        match self {
            TargetVector::Continuous(values) => values.len(),
            TargetVector::Categorical(labels) => labels.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The problem type this vector can serve as ground truth for
    pub fn kind(&self) -> ProblemType {
        match self {
            TargetVector::Continuous(_) => ProblemType::Regression,
            TargetVector::Categorical(_) => ProblemType::Classification,
        }
    }

    /// Borrow the continuous values, if this is a regression vector
    pub fn as_continuous(&self) -> Option<&[f64]> {
        match self {
            TargetVector::Continuous(values) => Some(values),
            TargetVector::Categorical(_) => None,
        }
    }

    /// Borrow the category labels, if this is a classification vector
    pub fn as_categorical(&self) -> Option<&[String]> {
        match self {
            TargetVector::Continuous(_) => None,
            TargetVector::Categorical(labels) => Some(labels),
        }
    }
}

/// Problem type of an evaluation call
///
/// Closed enum so metric-set selection is exhaustively matched; the
/// free-form strings of external callers only enter through [`FromStr`],
/// which rejects anything unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProblemType {
    Regression,
    Classification,
}

impl ProblemType {
    /// Stable lowercase name, matching the serde representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ProblemType::Regression => "regression",
            ProblemType::Classification => "classification",
        }
    }
}

impl fmt::Display for ProblemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProblemType {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "regression" => Ok(ProblemType::Regression),
            "classification" => Ok(ProblemType::Classification),
            other => Err(EvalError::UnsupportedProblemType(other.to_string())),
        }
    }
}
