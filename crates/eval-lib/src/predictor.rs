//! Predictor abstraction
//!
//! A predictor is an opaque, already-fitted model exposing a single
//! capability: map a feature matrix to a prediction vector. How it was
//! trained (linear, tree ensemble, kernel, sequence model) is irrelevant
//! to the harness.

use crate::error::EvalError;
use crate::models::{FeatureMatrix, PredictionVector};
use anyhow::Result;
use std::sync::Arc;

/// Trait for fitted prediction implementations
///
/// Implementations must be pure with respect to the feature matrix: the
/// harness may invoke `predict` from a blocking worker task and relies on
/// nothing being mutated during evaluation.
pub trait Predictor: Send + Sync {
    /// Produce one prediction per feature row
    fn predict(&self, features: &FeatureMatrix) -> Result<PredictionVector>;
}

/// An ordered, name-unique collection of predictors
///
/// Iteration order is insertion order, and the comparison table produced
/// by an evaluation reproduces it exactly.
#[derive(Default)]
pub struct PredictorSet {
    entries: Vec<(String, Arc<dyn Predictor>)>,
}

impl PredictorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a predictor under a unique name
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        predictor: impl Predictor + 'static,
    ) -> Result<(), EvalError> {
        self.insert_arc(name, Arc::new(predictor))
    }

    /// Register an already shared predictor under a unique name
    pub fn insert_arc(
        &mut self,
        name: impl Into<String>,
        predictor: Arc<dyn Predictor>,
    ) -> Result<(), EvalError> {
        let name = name.into();
        if self.entries.iter().any(|(existing, _)| *existing == name) {
            return Err(EvalError::DuplicatePredictor(name));
        }
        self.entries.push((name, predictor));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate (name, predictor) pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn Predictor>)> {
        self.entries
            .iter()
            .map(|(name, predictor)| (name.as_str(), predictor))
    }

    /// Registered names in insertion order
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }
}

/// A predictor backed by a stored prediction vector
///
/// Stands in for a fitted model whose predictions over the held-out set
/// were computed elsewhere and exported alongside the labels. Ignores the
/// feature matrix entirely; the harness still checks the stored vector's
/// length against the row count.
pub struct PrecomputedPredictor {
    predictions: PredictionVector,
}

impl PrecomputedPredictor {
    pub fn new(predictions: PredictionVector) -> Self {
        Self { predictions }
    }
}

impl Predictor for PrecomputedPredictor {
    fn predict(&self, _features: &FeatureMatrix) -> Result<PredictionVector> {
        Ok(self.predictions.clone())
    }
}

/// Adapter turning a closure into a predictor
pub struct FnPredictor<F> {
    f: F,
}

impl<F> FnPredictor<F>
where
    F: Fn(&FeatureMatrix) -> Result<PredictionVector> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> Predictor for FnPredictor<F>
where
    F: Fn(&FeatureMatrix) -> Result<PredictionVector> + Send + Sync,
{
    fn predict(&self, features: &FeatureMatrix) -> Result<PredictionVector> {
        (self.f)(features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EvalError;
    use crate::models::TargetVector;

    #[test]
    fn test_insertion_order_preserved() {
        let mut set = PredictorSet::new();
        for name in ["zeta", "alpha", "mid"] {
            set.insert(
                name,
                PrecomputedPredictor::new(TargetVector::Continuous(vec![1.0])),
            )
            .unwrap();
        }
        assert_eq!(set.names(), vec!["zeta", "alpha", "mid"]);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut set = PredictorSet::new();
        set.insert(
            "linear",
            PrecomputedPredictor::new(TargetVector::Continuous(vec![1.0])),
        )
        .unwrap();

        let err = set
            .insert(
                "linear",
                PrecomputedPredictor::new(TargetVector::Continuous(vec![2.0])),
            )
            .unwrap_err();
        assert!(matches!(err, EvalError::DuplicatePredictor(name) if name == "linear"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_fn_predictor_sees_features() {
        let predictor = FnPredictor::new(|features: &FeatureMatrix| {
            Ok(TargetVector::Continuous(
                features.rows().iter().map(|row| row[0] * 2.0).collect(),
            ))
        });

        let features = FeatureMatrix::new(vec![vec![1.0], vec![2.0]]);
        let predictions = predictor.predict(&features).unwrap();
        assert_eq!(predictions, TargetVector::Continuous(vec![2.0, 4.0]));
    }

    #[test]
    fn test_precomputed_ignores_features() {
        let predictor =
            PrecomputedPredictor::new(TargetVector::Categorical(vec!["Good".to_string()]));
        let features = FeatureMatrix::new(vec![vec![0.0; 8]; 5]);
        let predictions = predictor.predict(&features).unwrap();
        assert_eq!(predictions.len(), 1);
    }
}
