//! Rules command implementation.

use super::{CliError, load_rules};
use std::path::Path;

/// Execute the rules command.
///
/// # Errors
///
/// Returns an error if the rules file is unreadable or invalid.
pub(crate) fn execute(path: Option<&Path>) -> Result<(), CliError> {
    let rules = load_rules(path)?;

    if let Some(path) = path {
        eprintln!("{}: OK", path.display());
    }

    let json = serde_json::to_string_pretty(&rules)?;
    println!("{json}");

    Ok(())
}
