//! Run command implementation.

use super::output::{JsonSession, format_chronicle, format_status};
use super::{CliError, OutputFormat, load_rules, resolve_seed};
use pocket_kingdom::{Command, Session};
use std::path::Path;
use tracing::info;

/// Execute the run command.
///
/// Every command is parsed before any is applied, so a typo aborts the
/// script without playing half of it.
///
/// # Errors
///
/// Returns an error if the rules cannot be loaded or a command is invalid.
pub(crate) fn execute(
    commands: &[String],
    seed: Option<u64>,
    rules: Option<&Path>,
    format: OutputFormat,
) -> Result<(), CliError> {
    let rules = load_rules(rules)?;
    let seed = resolve_seed(seed);

    let script = commands
        .iter()
        .map(|line| line.parse::<Command>())
        .collect::<Result<Vec<_>, _>>()?;

    info!(seed, commands = script.len(), "Running script");
    let session = Session::replay(seed, rules, &script);

    match format {
        OutputFormat::Text => {
            println!("Seed: {seed}");
            println!();
            print!("{}", format_status(&session));
            println!();
            println!("Log:");
            print!("{}", format_chronicle(session.chronicle()));
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&JsonSession::from_session(&session))?;
            println!("{json}");
        }
    }

    Ok(())
}
