//! Simulate command implementation.

use super::output::{JsonSimulationResult, format_simulation_csv, format_simulation_text};
use super::{CliError, SimulationFormat, load_rules, resolve_seed};
use indicatif::{ProgressBar, ProgressStyle};
use pocket_kingdom::simulation::{SimulationConfig, Strategy, run_simulation};
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// Execute the simulate command.
///
/// # Errors
///
/// Returns an error if the rules cannot be loaded or output fails.
#[allow(clippy::too_many_arguments)]
pub(crate) fn execute(
    strategy: Strategy,
    games: u64,
    seed: Option<u64>,
    threads: Option<usize>,
    max_turns: Option<u32>,
    rules: Option<&Path>,
    format: SimulationFormat,
    progress: bool,
) -> Result<(), CliError> {
    let rules = load_rules(rules)?;

    // Set thread pool size if specified
    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    let base_seed = resolve_seed(seed);

    let mut config = SimulationConfig {
        rules,
        ..SimulationConfig::default()
    };
    if let Some(t) = max_turns {
        config.max_turns = t;
    }

    let pb = if progress {
        let pb = ProgressBar::new(games);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} games ({per_sec})")
            .map_err(|e| CliError::new(format!("Invalid progress template: {e}")))?
            .progress_chars("=>-");
        pb.set_style(style);
        Some(pb)
    } else {
        None
    };

    info!(games, base_seed, ?strategy, "Starting simulation");
    let start = Instant::now();

    let stats = run_simulation(base_seed, games, strategy, &config, || {
        if let Some(pb) = &pb {
            pb.inc(1);
        }
    });

    if let Some(pb) = pb {
        pb.finish_with_message("done");
    }

    let duration = start.elapsed();

    #[allow(clippy::cast_precision_loss)]
    let games_per_sec = if duration.as_secs_f64() > 0.0 {
        stats.games_played as f64 / duration.as_secs_f64()
    } else {
        0.0
    };

    match format {
        SimulationFormat::Text => {
            println!();
            print!("{}", format_simulation_text(&stats, strategy));
            println!();
            println!("Duration: {:.2}s ({:.0} games/sec)", duration.as_secs_f64(), games_per_sec);
        }
        SimulationFormat::Json => {
            let json_result = JsonSimulationResult::from_stats(&stats, strategy, base_seed);
            let json = serde_json::to_string_pretty(&json_result)?;
            println!("{json}");
        }
        SimulationFormat::Csv => {
            print!("{}", format_simulation_csv(&stats, strategy));
        }
    }

    Ok(())
}
