//! Air quality model evaluation CLI
//!
//! A command-line tool that loads an evaluation dataset (held-out labels
//! plus one stored prediction column per model), scores every model with
//! the evaluation harness, and renders the comparison table.

mod commands;
mod config;
mod dataset;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Model evaluation CLI
#[derive(Parser)]
#[command(name = "aqeval")]
#[command(author, version, about = "Compare fitted models on held-out data", long_about = None)]
pub struct Cli {
    /// Output format (defaults to the AQEVAL_FORMAT environment setting, then table)
    #[arg(long, short)]
    pub format: Option<output::OutputFormat>,

    /// Enable verbose output
    #[arg(long, short)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate every prediction column in a dataset against its labels
    Evaluate {
        /// Path to the evaluation dataset (CSV)
        data: PathBuf,

        /// Problem type (regression or classification)
        #[arg(long, short = 't')]
        problem_type: String,

        /// Name of the ground-truth label column
        #[arg(long, short, default_value = "label")]
        label_column: String,

        /// Prediction columns to evaluate (default: every column prefixed with "pred_")
        #[arg(long, short)]
        prediction_columns: Vec<String>,

        /// Per-predictor timeout in milliseconds; runs predictors concurrently
        #[arg(long)]
        timeout_ms: Option<u64>,

        /// Also print the per-class breakdown for each model (classification only)
        #[arg(long)]
        per_class: bool,
    },

    /// Summarize a dataset without evaluating it
    Inspect {
        /// Path to the dataset (CSV)
        data: PathBuf,

        /// Name of the ground-truth label column
        #[arg(long, short, default_value = "label")]
        label_column: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .init();

    let config = config::CliConfig::load()?;
    let format = cli.format.unwrap_or_else(|| config.output_format());

    match cli.command {
        Commands::Evaluate {
            data,
            problem_type,
            label_column,
            prediction_columns,
            timeout_ms,
            per_class,
        } => {
            let timeout_ms = timeout_ms.or(config.timeout_ms());
            commands::evaluate::run(
                &data,
                &problem_type,
                &label_column,
                &prediction_columns,
                timeout_ms,
                per_class,
                format,
            )
            .await
        }
        Commands::Inspect { data, label_column } => {
            commands::inspect::run(&data, &label_column, format)
        }
    }
}
