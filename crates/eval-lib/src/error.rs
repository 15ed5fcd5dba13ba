//! Error taxonomy for the evaluation harness
//!
//! Every variant is a local, deterministic validation failure surfaced to
//! the caller immediately. Nothing here is retried, and no error is ever
//! downgraded to a placeholder metric value: any failure aborts the whole
//! `evaluate` call rather than producing a comparison table with missing
//! rows.

use crate::models::ProblemType;
use thiserror::Error;

/// Failures that can abort an evaluation call
#[derive(Debug, Error)]
pub enum EvalError {
    /// No predictors were registered, or the held-out set has zero rows
    #[error("empty evaluation input: {reason}")]
    EmptyInput { reason: String },

    /// A predictor produced a prediction vector whose length differs from
    /// the feature row count
    #[error("predictor '{predictor}' returned {actual} predictions for {expected} rows")]
    DimensionMismatch {
        predictor: String,
        expected: usize,
        actual: usize,
    },

    /// Labels are not aligned 1:1 with the feature rows
    #[error("labels have {labels} entries but the feature matrix has {rows} rows")]
    MisalignedLabels { rows: usize, labels: usize },

    /// A problem-type string that is neither "regression" nor "classification"
    #[error("unsupported problem type '{0}', expected 'regression' or 'classification'")]
    UnsupportedProblemType(String),

    /// The label vector's representation does not match the requested
    /// problem type
    #[error("labels are {found} but the evaluation was requested as {expected}")]
    LabelKindMismatch {
        expected: ProblemType,
        found: ProblemType,
    },

    /// A predictor produced the wrong kind of output for the requested
    /// problem type
    #[error("predictor '{predictor}' produced {found} output for a {expected} evaluation")]
    PredictionKindMismatch {
        predictor: String,
        expected: ProblemType,
        found: ProblemType,
    },

    /// A metric has no defined value for this input
    #[error("metric '{metric}' is undefined: {reason}")]
    UndefinedMetric { metric: String, reason: String },

    /// A predicted class never occurs in the ground-truth labels
    #[error("predictor '{predictor}' produced class '{label}' which never occurs in the ground truth")]
    UnknownClass { predictor: String, label: String },

    /// Two predictors were registered under the same name
    #[error("a predictor named '{0}' is already registered")]
    DuplicatePredictor(String),

    /// The predictor itself failed; its error is carried opaquely
    #[error("predictor '{predictor}' failed during prediction")]
    PredictionFailed {
        predictor: String,
        #[source]
        source: anyhow::Error,
    },

    /// A predictor exceeded the configured per-prediction timeout
    #[error("predictor '{predictor}' exceeded the {timeout_ms}ms prediction timeout")]
    Timeout { predictor: String, timeout_ms: u64 },
}

impl EvalError {
    /// Shorthand for the empty-predictor-set case
    pub(crate) fn no_predictors() -> Self {
        EvalError::EmptyInput {
            reason: "no predictors registered".to_string(),
        }
    }

    /// Shorthand for the zero-row case
    pub(crate) fn no_rows() -> Self {
        EvalError::EmptyInput {
            reason: "feature matrix has no rows".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_offender() {
        let err = EvalError::DimensionMismatch {
            predictor: "random_forest".to_string(),
            expected: 100,
            actual: 99,
        };
        let message = err.to_string();
        assert!(message.contains("random_forest"));
        assert!(message.contains("100"));
        assert!(message.contains("99"));

        let err = EvalError::UnknownClass {
            predictor: "svm".to_string(),
            label: "Hazardous".to_string(),
        };
        assert!(err.to_string().contains("svm"));
        assert!(err.to_string().contains("Hazardous"));
    }

    #[test]
    fn test_prediction_failure_preserves_source() {
        let err = EvalError::PredictionFailed {
            predictor: "lstm".to_string(),
            source: anyhow::anyhow!("feature width 3, expected 5"),
        };
        let source = std::error::Error::source(&err).expect("source should be set");
        assert!(source.to_string().contains("expected 5"));
    }
}
