//! Evaluation harness
//!
//! Single-shot pure transform: a set of fitted predictors plus one
//! held-out feature/label pair goes in, a comparison table keyed by
//! predictor name comes out. Every predictor is scored against the
//! identical data under the identical problem type, and any validation
//! failure aborts the whole call - a table with silently dropped rows
//! would mislead a caller comparing models.

use crate::error::EvalError;
use crate::metrics;
use crate::models::{FeatureMatrix, LabelVector, PredictionVector, ProblemType};
use crate::predictor::PredictorSet;
use crate::report::{ComparisonTable, MetricReport};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Default per-predictor timeout for the async evaluation path
pub const DEFAULT_PREDICTION_TIMEOUT: Duration = Duration::from_secs(30);

/// Prediction latency above which a predictor is logged as slow
const SLOW_PREDICTION: Duration = Duration::from_secs(1);

/// Scores fitted predictors against a held-out feature/label pair
#[derive(Debug, Clone)]
pub struct EvaluationHarness {
    prediction_timeout: Duration,
}

impl Default for EvaluationHarness {
    fn default() -> Self {
        Self {
            prediction_timeout: DEFAULT_PREDICTION_TIMEOUT,
        }
    }
}

impl EvaluationHarness {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-predictor timeout used by [`evaluate_with_timeout`]
    ///
    /// The synchronous [`evaluate`] path never interrupts a predictor and
    /// ignores this setting.
    ///
    /// [`evaluate`]: EvaluationHarness::evaluate
    /// [`evaluate_with_timeout`]: EvaluationHarness::evaluate_with_timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.prediction_timeout = timeout;
        self
    }

    /// Score every predictor in the set against the held-out data
    ///
    /// Runs predictors sequentially on the calling thread. The result
    /// contains one report per predictor, in set insertion order. Inputs
    /// are never mutated; identical inputs produce identical tables.
    pub fn evaluate(
        &self,
        predictors: &PredictorSet,
        features: &FeatureMatrix,
        labels: &LabelVector,
        problem_type: ProblemType,
    ) -> Result<ComparisonTable, EvalError> {
        validate_inputs(predictors, features, labels, problem_type)?;

        let mut table = ComparisonTable::with_capacity(predictors.len());
        for (name, predictor) in predictors.iter() {
            let start = Instant::now();
            let predictions =
                predictor
                    .predict(features)
                    .map_err(|source| EvalError::PredictionFailed {
                        predictor: name.to_string(),
                        source,
                    })?;
            let elapsed = start.elapsed();

            if elapsed > SLOW_PREDICTION {
                warn!(
                    predictor = name,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Slow prediction"
                );
            } else {
                debug!(
                    predictor = name,
                    elapsed_us = elapsed.as_micros() as u64,
                    "Prediction completed"
                );
            }

            let report = score(name, &predictions, labels, problem_type, features.n_rows())?;
            table.push(name.to_string(), report);
        }

        info!(
            predictors = table.len(),
            rows = features.n_rows(),
            problem_type = %problem_type,
            "Evaluation complete"
        );
        Ok(table)
    }

    /// Score every predictor concurrently, bounding each prediction call
    ///
    /// Each predictor runs on its own blocking task under the configured
    /// per-predictor timeout. Expiry fails the whole call with
    /// [`EvalError::Timeout`] naming the predictor - a timed-out row is
    /// never silently omitted. Reports are collected in set insertion
    /// order regardless of completion order, so a successful run yields
    /// the same table as [`evaluate`].
    ///
    /// A timed-out blocking call cannot be cancelled; its thread is left
    /// to finish detached.
    ///
    /// [`evaluate`]: EvaluationHarness::evaluate
    pub async fn evaluate_with_timeout(
        &self,
        predictors: &PredictorSet,
        features: &FeatureMatrix,
        labels: &LabelVector,
        problem_type: ProblemType,
    ) -> Result<ComparisonTable, EvalError> {
        validate_inputs(predictors, features, labels, problem_type)?;

        let timeout = self.prediction_timeout;
        let shared_features = Arc::new(features.clone());

        // Spawn everything up front so the timeout windows start together
        let mut handles = Vec::with_capacity(predictors.len());
        for (name, predictor) in predictors.iter() {
            let name = name.to_string();
            let predictor = Arc::clone(predictor);
            let features = Arc::clone(&shared_features);

            let task_name = name.clone();
            let handle = tokio::spawn(async move {
                let blocking =
                    tokio::task::spawn_blocking(move || predictor.predict(&features));
                match tokio::time::timeout(timeout, blocking).await {
                    Err(_) => Err(EvalError::Timeout {
                        predictor: task_name,
                        timeout_ms: timeout.as_millis() as u64,
                    }),
                    Ok(Err(join_error)) => Err(EvalError::PredictionFailed {
                        predictor: task_name,
                        source: anyhow::anyhow!(join_error),
                    }),
                    Ok(Ok(result)) => result.map_err(|source| EvalError::PredictionFailed {
                        predictor: task_name,
                        source,
                    }),
                }
            });
            handles.push((name, handle));
        }

        // Collect in insertion order, not completion order
        let mut table = ComparisonTable::with_capacity(handles.len());
        for (name, handle) in handles {
            let predictions = handle.await.map_err(|join_error| EvalError::PredictionFailed {
                predictor: name.clone(),
                source: anyhow::anyhow!(join_error),
            })??;
            let report = score(&name, &predictions, labels, problem_type, features.n_rows())?;
            table.push(name, report);
        }

        info!(
            predictors = table.len(),
            rows = features.n_rows(),
            problem_type = %problem_type,
            timeout_ms = timeout.as_millis() as u64,
            "Concurrent evaluation complete"
        );
        Ok(table)
    }
}

/// Reject empty, misaligned, or wrongly-typed inputs before any prediction
fn validate_inputs(
    predictors: &PredictorSet,
    features: &FeatureMatrix,
    labels: &LabelVector,
    problem_type: ProblemType,
) -> Result<(), EvalError> {
    if predictors.is_empty() {
        return Err(EvalError::no_predictors());
    }
    if features.is_empty() {
        return Err(EvalError::no_rows());
    }
    if labels.len() != features.n_rows() {
        return Err(EvalError::MisalignedLabels {
            rows: features.n_rows(),
            labels: labels.len(),
        });
    }
    if labels.kind() != problem_type {
        return Err(EvalError::LabelKindMismatch {
            expected: problem_type,
            found: labels.kind(),
        });
    }
    Ok(())
}

/// Compute one predictor's metric report from its prediction vector
fn score(
    name: &str,
    predictions: &PredictionVector,
    labels: &LabelVector,
    problem_type: ProblemType,
    n_rows: usize,
) -> Result<MetricReport, EvalError> {
    if predictions.len() != n_rows {
        return Err(EvalError::DimensionMismatch {
            predictor: name.to_string(),
            expected: n_rows,
            actual: predictions.len(),
        });
    }

    match problem_type {
        ProblemType::Regression => {
            let y_pred =
                predictions
                    .as_continuous()
                    .ok_or_else(|| EvalError::PredictionKindMismatch {
                        predictor: name.to_string(),
                        expected: problem_type,
                        found: predictions.kind(),
                    })?;
            let y_true = labels
                .as_continuous()
                .ok_or_else(|| EvalError::LabelKindMismatch {
                    expected: problem_type,
                    found: labels.kind(),
                })?;
            Ok(MetricReport::Regression(metrics::regression::evaluate(
                y_true, y_pred,
            )?))
        }
        ProblemType::Classification => {
            let y_pred =
                predictions
                    .as_categorical()
                    .ok_or_else(|| EvalError::PredictionKindMismatch {
                        predictor: name.to_string(),
                        expected: problem_type,
                        found: predictions.kind(),
                    })?;
            let y_true = labels
                .as_categorical()
                .ok_or_else(|| EvalError::LabelKindMismatch {
                    expected: problem_type,
                    found: labels.kind(),
                })?;
            Ok(MetricReport::Classification(
                metrics::classification::evaluate(y_true, y_pred, name)?,
            ))
        }
    }
}
