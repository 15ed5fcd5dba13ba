//! The inspect subcommand

use crate::dataset;
use crate::output::{self, OutputFormat};
use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use tabled::{settings::Style, Table, Tabled};

/// Row for the label distribution table
#[derive(Tabled)]
struct LabelRow {
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Count")]
    count: usize,
    #[tabled(rename = "Share")]
    share: String,
}

/// Summarize a dataset: row count, columns, label distribution
pub fn run(data: &Path, label_column: &str, format: OutputFormat) -> Result<()> {
    let summary = dataset::summarize(data, label_column)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Table => {
            println!("{} {}", "Dataset:".bold(), data.display());
            println!("Rows:    {}", summary.rows);
            println!("Columns: {}", summary.columns.join(", "));
            if summary.prediction_columns.is_empty() {
                output::print_warning("no prediction columns detected");
            } else {
                output::print_info(&format!(
                    "prediction columns: {}",
                    summary.prediction_columns.join(", ")
                ));
            }

            // A label column with many distinct values is continuous;
            // a distribution table would just echo the rows back
            if summary.rows > 0 && summary.label_counts.len() <= 20 {
                let rows: Vec<LabelRow> = summary
                    .label_counts
                    .iter()
                    .map(|(label, count)| LabelRow {
                        label: label.clone(),
                        count: *count,
                        share: format!("{:.1}%", 100.0 * *count as f64 / summary.rows as f64),
                    })
                    .collect();
                let table = Table::new(rows).with(Style::rounded()).to_string();
                println!("{}", table);
            } else {
                output::print_info(&format!(
                    "label column '{}' has {} distinct values",
                    label_column,
                    summary.label_counts.len()
                ));
            }
        }
    }

    Ok(())
}
