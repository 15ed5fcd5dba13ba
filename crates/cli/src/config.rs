//! CLI configuration

use crate::output::OutputFormat;
use anyhow::Result;
use serde::Deserialize;

/// CLI defaults, loaded from the environment
#[derive(Debug, Clone, Deserialize)]
pub struct CliConfig {
    /// Default output format ("table" or "json")
    #[serde(default = "default_format")]
    pub format: String,

    /// Default per-predictor timeout in milliseconds; 0 keeps the
    /// sequential evaluation path
    #[serde(default)]
    pub timeout_ms: u64,
}

fn default_format() -> String {
    "table".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            timeout_ms: 0,
        }
    }
}

impl CliConfig {
    /// Load configuration from AQEVAL_-prefixed environment variables
    pub fn load() -> Result<Self> {
        let config = config::Config::builder()
            .add_source(config::Environment::with_prefix("AQEVAL"))
            .build()?;

        Ok(config.try_deserialize().unwrap_or_default())
    }

    /// The configured output format, falling back to table on anything unknown
    pub fn output_format(&self) -> OutputFormat {
        match self.format.to_ascii_lowercase().as_str() {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Table,
        }
    }

    /// The configured timeout, with 0 meaning "none"
    pub fn timeout_ms(&self) -> Option<u64> {
        if self.timeout_ms > 0 {
            Some(self.timeout_ms)
        } else {
            None
        }
    }
}
