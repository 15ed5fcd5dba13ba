//! Output formatting utilities

use clap::ValueEnum;
use colored::Colorize;
use eval_lib::metrics::ClassBreakdown;
use eval_lib::ComparisonTable;
use tabled::{settings::Style, Table, Tabled};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

/// Row for regression comparisons
#[derive(Tabled)]
struct RegressionRow {
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "MAE")]
    mae: String,
    #[tabled(rename = "RMSE")]
    rmse: String,
    #[tabled(rename = "R²")]
    r2: String,
}

/// Row for classification comparisons
#[derive(Tabled)]
struct ClassificationRow {
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "Accuracy")]
    accuracy: String,
    #[tabled(rename = "Precision")]
    precision: String,
    #[tabled(rename = "Recall")]
    recall: String,
    #[tabled(rename = "F1")]
    f1: String,
}

/// Row for per-class breakdowns
#[derive(Tabled)]
struct ClassRow {
    #[tabled(rename = "Class")]
    class: String,
    #[tabled(rename = "Support")]
    support: usize,
    #[tabled(rename = "Precision")]
    precision: String,
    #[tabled(rename = "Recall")]
    recall: String,
    #[tabled(rename = "F1")]
    f1: String,
}

/// Print a comparison table with the best score per column highlighted
pub fn print_comparison(table: &ComparisonTable) {
    let Some(first) = table.iter().next() else {
        return;
    };

    let metric_names: Vec<&'static str> = first
        .report
        .metrics()
        .iter()
        .map(|(name, _)| *name)
        .collect();
    let best: Vec<f64> = metric_names
        .iter()
        .map(|name| best_score(table, name))
        .collect();

    let format_cell = |score: f64, best: f64| {
        let formatted = format_score(score);
        if score == best && table.len() > 1 {
            formatted.green().bold().to_string()
        } else {
            formatted
        }
    };

    let rendered = match first.report {
        eval_lib::MetricReport::Regression(_) => {
            let rows: Vec<RegressionRow> = table
                .iter()
                .map(|entry| {
                    let scores = entry.report.metrics();
                    RegressionRow {
                        model: entry.predictor.clone(),
                        mae: format_cell(scores[0].1, best[0]),
                        rmse: format_cell(scores[1].1, best[1]),
                        r2: format_cell(scores[2].1, best[2]),
                    }
                })
                .collect();
            Table::new(rows).with(Style::rounded()).to_string()
        }
        eval_lib::MetricReport::Classification(_) => {
            let rows: Vec<ClassificationRow> = table
                .iter()
                .map(|entry| {
                    let scores = entry.report.metrics();
                    ClassificationRow {
                        model: entry.predictor.clone(),
                        accuracy: format_cell(scores[0].1, best[0]),
                        precision: format_cell(scores[1].1, best[1]),
                        recall: format_cell(scores[2].1, best[2]),
                        f1: format_cell(scores[3].1, best[3]),
                    }
                })
                .collect();
            Table::new(rows).with(Style::rounded()).to_string()
        }
    };
    println!("{}", rendered);
}

/// Print a per-class breakdown for one model
pub fn print_per_class(model: &str, breakdown: &[ClassBreakdown]) {
    println!("\n{} {}", "Per-class breakdown:".bold(), model.cyan());
    let rows: Vec<ClassRow> = breakdown
        .iter()
        .map(|class| ClassRow {
            class: class.class.clone(),
            support: class.support,
            precision: format_score(class.precision),
            recall: format_score(class.recall),
            f1: format_score(class.f1),
        })
        .collect();
    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{}", table);
}

/// Best value for one metric column across the table
///
/// Error metrics (MAE, RMSE) are best when lowest; every other metric is
/// best when highest.
fn best_score(table: &ComparisonTable, metric: &str) -> f64 {
    let scores = table
        .iter()
        .filter_map(|entry| entry.report.metric(metric));
    if lower_is_better(metric) {
        scores.fold(f64::INFINITY, f64::min)
    } else {
        scores.fold(f64::NEG_INFINITY, f64::max)
    }
}

fn lower_is_better(metric: &str) -> bool {
    matches!(metric, "mae" | "rmse")
}

/// Format a score with a fixed width suited to metric magnitudes
pub fn format_score(score: f64) -> String {
    format!("{:.4}", score)
}

/// Print an error message
#[allow(dead_code)]
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}
