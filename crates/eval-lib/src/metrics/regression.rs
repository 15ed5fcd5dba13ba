//! Regression error metrics

use crate::error::EvalError;
use crate::report::RegressionMetrics;

/// Mean absolute error over aligned true/predicted values
pub fn mean_absolute_error(y_true: &[f64], y_pred: &[f64]) -> f64 {
    let n = y_true.len();
    let sum: f64 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(t, p)| (t - p).abs())
        .sum();
    sum / n as f64
}

/// Root mean squared error over aligned true/predicted values
pub fn root_mean_squared_error(y_true: &[f64], y_pred: &[f64]) -> f64 {
    let n = y_true.len();
    let sum: f64 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(t, p)| (t - p).powi(2))
        .sum();
    (sum / n as f64).sqrt()
}

/// Coefficient of determination: 1 − RSS/TSS around the label mean
///
/// Fails with `UndefinedMetric` when the total sum of squares is zero
/// (all labels identical) instead of passing through NaN or ±∞.
pub fn r_squared(y_true: &[f64], y_pred: &[f64]) -> Result<f64, EvalError> {
    let n = y_true.len() as f64;
    let mean = y_true.iter().sum::<f64>() / n;

    let rss: f64 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(t, p)| (t - p).powi(2))
        .sum();
    let tss: f64 = y_true.iter().map(|t| (t - mean).powi(2)).sum();

    if tss < f64::EPSILON {
        return Err(EvalError::UndefinedMetric {
            metric: "r2".to_string(),
            reason: "all labels are identical, total sum of squares is zero".to_string(),
        });
    }

    Ok(1.0 - rss / tss)
}

/// Compute the full regression metric set for one predictor
pub fn evaluate(y_true: &[f64], y_pred: &[f64]) -> Result<RegressionMetrics, EvalError> {
    Ok(RegressionMetrics {
        mae: mean_absolute_error(y_true, y_pred),
        rmse: root_mean_squared_error(y_true, y_pred),
        r2: r_squared(y_true, y_pred)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_predictions() {
        let y_true = [1.0, 2.0, 3.0, 4.0];
        let metrics = evaluate(&y_true, &y_true).unwrap();
        assert_eq!(metrics.mae, 0.0);
        assert_eq!(metrics.rmse, 0.0);
        assert_eq!(metrics.r2, 1.0);
    }

    #[test]
    fn test_known_error_values() {
        // labels [1,2,3,4], predictions [1,2,3,5]:
        // MAE = 0.25, RMSE = 0.5, TSS = 5.0, RSS = 1.0, R² = 0.8
        let y_true = [1.0, 2.0, 3.0, 4.0];
        let y_pred = [1.0, 2.0, 3.0, 5.0];

        let metrics = evaluate(&y_true, &y_pred).unwrap();
        assert!((metrics.mae - 0.25).abs() < 1e-12);
        assert!((metrics.rmse - 0.5).abs() < 1e-12);
        assert!((metrics.r2 - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_constant_labels_undefined_r2() {
        let y_true = [3.0, 3.0, 3.0];
        let y_pred = [3.0, 2.0, 4.0];

        let err = r_squared(&y_true, &y_pred).unwrap_err();
        assert!(matches!(err, EvalError::UndefinedMetric { ref metric, .. } if metric == "r2"));

        // The full metric set must fail too, not return a partial report
        assert!(evaluate(&y_true, &y_pred).is_err());
    }

    #[test]
    fn test_r2_can_go_negative() {
        // Predicting far from the mean is worse than the mean baseline
        let y_true = [1.0, 2.0, 3.0];
        let y_pred = [10.0, 10.0, 10.0];
        let r2 = r_squared(&y_true, &y_pred).unwrap();
        assert!(r2 < 0.0);
    }

    #[test]
    fn test_mae_rmse_single_row() {
        let metrics_mae = mean_absolute_error(&[2.0], &[5.0]);
        let metrics_rmse = root_mean_squared_error(&[2.0], &[5.0]);
        assert_eq!(metrics_mae, 3.0);
        assert_eq!(metrics_rmse, 3.0);
    }
}
