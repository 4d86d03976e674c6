//! CLI command implementations for Pocket Kingdom.

pub(crate) mod play;
pub(crate) mod rules;
pub(crate) mod run;
pub(crate) mod simulate;

mod output;

use clap::ValueEnum;
use pocket_kingdom::{ParseCommandError, Rules, RulesError};
use std::error::Error;
use std::fmt;
use std::path::Path;

/// Output format for the `run` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Output format for the `simulate` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum SimulationFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
    /// CSV format.
    Csv,
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<RulesError> for CliError {
    fn from(e: RulesError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<ParseCommandError> for CliError {
    fn from(e: ParseCommandError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(format!("JSON serialization failed: {e}"))
    }
}

/// Load rules from a file, or use the defaults.
pub(crate) fn load_rules(path: Option<&Path>) -> Result<Rules, CliError> {
    match path {
        Some(path) => Ok(Rules::load(path)?),
        None => Ok(Rules::default()),
    }
}

/// Use the given seed or derive one from the clock.
pub(crate) fn resolve_seed(seed: Option<u64>) -> u64 {
    #[allow(clippy::cast_possible_truncation)]
    seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42)
    })
}
