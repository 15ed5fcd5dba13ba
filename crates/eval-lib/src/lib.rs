//! Model evaluation and comparison harness
//!
//! This crate provides the core functionality for:
//! - Scoring a named set of fitted predictors against held-out data
//! - Regression and classification metric sets
//! - A normalized comparison table keyed by predictor name
//! - Optional per-predictor timeouts for the concurrent evaluation path
//!
//! Predictors are opaque: anything implementing [`Predictor`] can be
//! compared, regardless of how it was trained. Data preparation and
//! rendering of the comparison table live outside this crate.

pub mod error;
pub mod harness;
pub mod metrics;
pub mod models;
pub mod predictor;
pub mod report;

pub use error::EvalError;
pub use harness::{EvaluationHarness, DEFAULT_PREDICTION_TIMEOUT};
pub use models::{FeatureMatrix, LabelVector, PredictionVector, ProblemType, TargetVector};
pub use predictor::{FnPredictor, PrecomputedPredictor, Predictor, PredictorSet};
pub use report::{
    ClassificationMetrics, ComparisonEntry, ComparisonTable, MetricReport, RegressionMetrics,
};
