//! The evaluate subcommand

use crate::dataset::{self, EvalDataset};
use crate::output::{self, OutputFormat};
use anyhow::{Context, Result};
use colored::Colorize;
use eval_lib::metrics::classification;
use eval_lib::{
    ComparisonTable, EvaluationHarness, PrecomputedPredictor, PredictorSet, ProblemType,
};
use serde::Serialize;
use std::path::Path;
use std::time::Duration;

/// JSON envelope for one evaluation run
#[derive(Serialize)]
struct EvaluationRunReport<'a> {
    generated_at: i64,
    dataset: String,
    rows: usize,
    problem_type: ProblemType,
    results: &'a ComparisonTable,
}

/// Load the dataset, evaluate every prediction column, render the table
pub async fn run(
    data: &Path,
    problem_type: &str,
    label_column: &str,
    prediction_columns: &[String],
    timeout_ms: Option<u64>,
    per_class: bool,
    format: OutputFormat,
) -> Result<()> {
    let problem_type: ProblemType = problem_type.parse()?;
    let dataset = dataset::load(data, label_column, prediction_columns, problem_type)?;

    let mut predictors = PredictorSet::new();
    for (name, predictions) in &dataset.predictions {
        predictors.insert(name.clone(), PrecomputedPredictor::new(predictions.clone()))?;
    }

    let table = match timeout_ms {
        Some(ms) => {
            let harness = EvaluationHarness::new().with_timeout(Duration::from_millis(ms));
            harness
                .evaluate_with_timeout(
                    &predictors,
                    &dataset.features,
                    &dataset.labels,
                    problem_type,
                )
                .await?
        }
        None => EvaluationHarness::new().evaluate(
            &predictors,
            &dataset.features,
            &dataset.labels,
            problem_type,
        )?,
    };

    match format {
        OutputFormat::Json => {
            let report = EvaluationRunReport {
                generated_at: chrono::Utc::now().timestamp(),
                dataset: data.display().to_string(),
                rows: dataset.labels.len(),
                problem_type,
                results: &table,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Table => {
            println!(
                "{} {} · {} rows · {}",
                "Comparison:".bold(),
                data.display(),
                dataset.labels.len(),
                problem_type
            );
            output::print_comparison(&table);
            println!("Total: {} models", table.len());
        }
    }

    if per_class {
        print_per_class_breakdowns(&dataset, problem_type)?;
    }

    Ok(())
}

/// Print the detailed per-class view for every model
fn print_per_class_breakdowns(dataset: &EvalDataset, problem_type: ProblemType) -> Result<()> {
    if problem_type != ProblemType::Classification {
        output::print_warning("--per-class only applies to classification runs");
        return Ok(());
    }

    let y_true = dataset
        .labels
        .as_categorical()
        .context("classification labels expected")?;
    for (name, predictions) in &dataset.predictions {
        let y_pred = predictions
            .as_categorical()
            .context("classification predictions expected")?;
        let breakdown = classification::per_class(y_true, y_pred, name)?;
        output::print_per_class(name, &breakdown);
    }
    Ok(())
}
