//! Evaluation dataset loading
//!
//! The expected file shape is a CSV export of a held-out test set: one
//! ground-truth label column, one prediction column per model under
//! comparison (stored predictions stand in for the fitted models), and
//! optionally the numeric feature columns the models saw.

use anyhow::{bail, Context, Result};
use eval_lib::{FeatureMatrix, ProblemType, TargetVector};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

/// Prediction columns are auto-detected by this prefix when none are named
pub const PREDICTION_PREFIX: &str = "pred_";

/// A parsed evaluation dataset
#[derive(Debug, Clone)]
pub struct EvalDataset {
    pub labels: TargetVector,
    /// (model name, stored predictions) in column order
    pub predictions: Vec<(String, TargetVector)>,
    pub features: FeatureMatrix,
}

/// Load an evaluation dataset from a CSV file
///
/// When `prediction_columns` is empty, every column starting with
/// [`PREDICTION_PREFIX`] is taken and the prefix is stripped from the
/// model name; otherwise the named columns are used verbatim.
pub fn load(
    path: &Path,
    label_column: &str,
    prediction_columns: &[String],
    problem_type: ProblemType,
) -> Result<EvalDataset> {
    let mut reader =
        csv::Reader::from_path(path).with_context(|| format!("reading {}", path.display()))?;
    let headers = reader.headers().context("reading CSV header")?.clone();

    let label_index = headers
        .iter()
        .position(|header| header == label_column)
        .with_context(|| format!("label column '{}' not found", label_column))?;

    let prediction_indices: Vec<(usize, String)> = if prediction_columns.is_empty() {
        headers
            .iter()
            .enumerate()
            .filter(|(_, header)| header.starts_with(PREDICTION_PREFIX))
            .map(|(index, header)| (index, header[PREDICTION_PREFIX.len()..].to_string()))
            .collect()
    } else {
        prediction_columns
            .iter()
            .map(|name| {
                let index = headers
                    .iter()
                    .position(|header| header == name)
                    .with_context(|| format!("prediction column '{}' not found", name))?;
                Ok((index, name.clone()))
            })
            .collect::<Result<_>>()?
    };
    if prediction_indices.is_empty() {
        bail!(
            "no prediction columns found: expected columns prefixed with '{}' or explicit --prediction-columns",
            PREDICTION_PREFIX
        );
    }

    let records: Vec<csv::StringRecord> = reader
        .records()
        .collect::<Result<_, _>>()
        .context("reading CSV rows")?;

    let labels = parse_column(&records, label_index, label_column, problem_type)?;
    let mut predictions = Vec::with_capacity(prediction_indices.len());
    for (index, name) in &prediction_indices {
        predictions.push((
            name.clone(),
            parse_column(&records, *index, name, problem_type)?,
        ));
    }

    let features = feature_matrix(headers.len(), &records, label_index, &prediction_indices);

    Ok(EvalDataset {
        labels,
        predictions,
        features,
    })
}

/// Parse one column as labels or predictions for the given problem type
fn parse_column(
    records: &[csv::StringRecord],
    index: usize,
    name: &str,
    problem_type: ProblemType,
) -> Result<TargetVector> {
    match problem_type {
        ProblemType::Regression => {
            let mut values = Vec::with_capacity(records.len());
            for (row, record) in records.iter().enumerate() {
                let cell = record
                    .get(index)
                    .with_context(|| format!("row {} has no column '{}'", row + 1, name))?;
                let value: f64 = cell.trim().parse().with_context(|| {
                    format!("row {} column '{}': '{}' is not numeric", row + 1, name, cell)
                })?;
                values.push(value);
            }
            Ok(TargetVector::Continuous(values))
        }
        ProblemType::Classification => {
            let mut labels = Vec::with_capacity(records.len());
            for (row, record) in records.iter().enumerate() {
                let cell = record
                    .get(index)
                    .with_context(|| format!("row {} has no column '{}'", row + 1, name))?;
                labels.push(cell.trim().to_string());
            }
            Ok(TargetVector::Categorical(labels))
        }
    }
}

/// Columns that are neither label nor prediction become feature columns,
/// as long as every cell in them parses as a number
fn feature_matrix(
    n_columns: usize,
    records: &[csv::StringRecord],
    label_index: usize,
    prediction_indices: &[(usize, String)],
) -> FeatureMatrix {
    let reserved: HashSet<usize> = prediction_indices
        .iter()
        .map(|(index, _)| *index)
        .chain([label_index])
        .collect();

    let mut columns: Vec<Vec<f64>> = Vec::new();
    'columns: for index in 0..n_columns {
        if reserved.contains(&index) {
            continue;
        }
        let mut values = Vec::with_capacity(records.len());
        for record in records {
            match record
                .get(index)
                .and_then(|cell| cell.trim().parse::<f64>().ok())
            {
                Some(value) => values.push(value),
                None => {
                    // Non-numeric column (timestamps, ids), not a feature
                    tracing::debug!(column = index, "Skipping non-numeric feature column");
                    continue 'columns;
                }
            }
        }
        columns.push(values);
    }

    let rows = (0..records.len())
        .map(|row| columns.iter().map(|column| column[row]).collect())
        .collect();
    FeatureMatrix::new(rows)
}

/// Dataset summary for the inspect command
#[derive(Debug, Clone, Serialize)]
pub struct DatasetSummary {
    pub rows: usize,
    pub columns: Vec<String>,
    pub prediction_columns: Vec<String>,
    /// Distinct label values with their counts, in sorted order
    pub label_counts: Vec<(String, usize)>,
}

/// Summarize a dataset without evaluating it
pub fn summarize(path: &Path, label_column: &str) -> Result<DatasetSummary> {
    let mut reader =
        csv::Reader::from_path(path).with_context(|| format!("reading {}", path.display()))?;
    let headers = reader.headers().context("reading CSV header")?.clone();

    let label_index = headers
        .iter()
        .position(|header| header == label_column)
        .with_context(|| format!("label column '{}' not found", label_column))?;

    let mut rows = 0;
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for record in reader.records() {
        let record = record.context("reading CSV rows")?;
        rows += 1;
        if let Some(cell) = record.get(label_index) {
            *counts.entry(cell.trim().to_string()).or_insert(0) += 1;
        }
    }

    Ok(DatasetSummary {
        rows,
        columns: headers.iter().map(str::to_string).collect(),
        prediction_columns: headers
            .iter()
            .filter(|header| header.starts_with(PREDICTION_PREFIX))
            .map(str::to_string)
            .collect(),
        label_counts: counts.into_iter().collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("create temp file");
        file.write_all(content.as_bytes()).expect("write csv");
        file
    }

    #[test]
    fn test_load_regression_dataset() {
        let file = write_csv(
            "pm25,humidity,label,pred_linear,pred_forest\n\
             10.0,40.5,11.0,10.5,11.2\n\
             22.0,55.0,25.0,24.0,24.8\n",
        );

        let dataset = load(file.path(), "label", &[], ProblemType::Regression).unwrap();
        assert_eq!(
            dataset.labels,
            TargetVector::Continuous(vec![11.0, 25.0])
        );
        assert_eq!(dataset.predictions.len(), 2);
        assert_eq!(dataset.predictions[0].0, "linear");
        assert_eq!(dataset.predictions[1].0, "forest");
        assert_eq!(dataset.features.n_rows(), 2);
        assert_eq!(dataset.features.n_columns(), 2);
        assert_eq!(dataset.features.row(0), Some(&[10.0, 40.5][..]));
    }

    #[test]
    fn test_load_classification_dataset_with_text_column() {
        let file = write_csv(
            "station,pm25,label,pred_svm\n\
             riverside,10.0,Good,Good\n\
             downtown,60.0,Hazardous,Good\n",
        );

        let dataset = load(file.path(), "label", &[], ProblemType::Classification).unwrap();
        assert_eq!(
            dataset.labels,
            TargetVector::Categorical(vec!["Good".to_string(), "Hazardous".to_string()])
        );
        // "station" is not numeric, so only pm25 survives as a feature
        assert_eq!(dataset.features.n_columns(), 1);
    }

    #[test]
    fn test_explicit_prediction_columns() {
        let file = write_csv(
            "label,model_a,model_b\n\
             1.0,1.1,0.9\n",
        );

        let columns = vec!["model_b".to_string()];
        let dataset = load(file.path(), "label", &columns, ProblemType::Regression).unwrap();
        assert_eq!(dataset.predictions.len(), 1);
        assert_eq!(dataset.predictions[0].0, "model_b");
    }

    #[test]
    fn test_missing_label_column() {
        let file = write_csv("a,pred_m\n1.0,2.0\n");
        let err = load(file.path(), "label", &[], ProblemType::Regression).unwrap_err();
        assert!(err.to_string().contains("label"));
    }

    #[test]
    fn test_no_prediction_columns() {
        let file = write_csv("label,other\n1.0,2.0\n");
        let err = load(file.path(), "label", &[], ProblemType::Regression).unwrap_err();
        assert!(err.to_string().contains("no prediction columns"));
    }

    #[test]
    fn test_non_numeric_regression_cell() {
        let file = write_csv("label,pred_m\n1.0,high\n");
        let err = load(file.path(), "label", &[], ProblemType::Regression).unwrap_err();
        assert!(err.to_string().contains("not numeric"));
    }

    #[test]
    fn test_summarize_counts_classes() {
        let file = write_csv(
            "label,pred_svm\n\
             Good,Good\n\
             Good,Moderate\n\
             Poor,Poor\n",
        );

        let summary = summarize(file.path(), "label").unwrap();
        assert_eq!(summary.rows, 3);
        assert_eq!(summary.prediction_columns, vec!["pred_svm"]);
        assert_eq!(
            summary.label_counts,
            vec![("Good".to_string(), 2), ("Poor".to_string(), 1)]
        );
    }
}
