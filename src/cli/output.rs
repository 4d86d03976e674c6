//! Output formatting utilities for CLI.

use pocket_kingdom::game::{Buildings, Chronicle, Phase, Resources, calculate_ledger};
use pocket_kingdom::simulation::{SimulationStats, Strategy};
use pocket_kingdom::{Event, Session};
use serde::Serialize;
use std::fmt::Write as _;

/// JSON-serializable session state.
#[derive(Debug, Serialize)]
pub(super) struct JsonSession {
    /// Random seed used.
    pub(super) seed: u64,
    /// Current turn.
    pub(super) turn: u32,
    /// Current phase.
    pub(super) phase: Phase,
    /// Current resources.
    pub(super) resources: Resources,
    /// Current buildings.
    pub(super) buildings: Buildings,
    /// Population capacity.
    pub(super) capacity: u32,
    /// Log, newest first.
    pub(super) log: Vec<JsonLogEntry>,
    /// Commands applied.
    pub(super) history: Vec<String>,
}

/// JSON-serializable log line.
#[derive(Debug, Serialize)]
pub(super) struct JsonLogEntry {
    /// Turn the entry was written.
    pub(super) turn: u32,
    /// Display text.
    pub(super) message: String,
}

impl JsonSession {
    /// Create from a Session.
    pub(super) fn from_session(session: &Session) -> Self {
        let kingdom = session.kingdom();
        Self {
            seed: session.seed(),
            turn: kingdom.turn,
            phase: kingdom.phase,
            resources: kingdom.resources,
            buildings: kingdom.buildings,
            capacity: kingdom.population_capacity(session.rules()),
            log: session
                .chronicle()
                .iter()
                .map(|entry| JsonLogEntry {
                    turn: entry.turn,
                    message: entry.event.to_string(),
                })
                .collect(),
            history: session.history().iter().map(ToString::to_string).collect(),
        }
    }
}

fn phase_banner(phase: Phase) -> &'static str {
    match phase {
        Phase::Playing => "END TURN",
        Phase::GameOver => "GAME OVER",
        Phase::Victory => "VICTORY!",
    }
}

/// Format the kingdom as human-readable text.
pub(super) fn format_status(session: &Session) -> String {
    let kingdom = session.kingdom();
    let rules = session.rules();
    let res = &kingdom.resources;
    let b = &kingdom.buildings;
    let mut output = String::new();

    let _ = writeln!(output, "Pocket Kingdom - turn {} [{}]", kingdom.turn, phase_banner(kingdom.phase));
    let _ = writeln!(
        output,
        "  Gold: {}  Food: {}  People: {} (max {})  Army: {}",
        res.gold,
        res.food,
        res.population,
        kingdom.population_capacity(rules),
        res.army
    );
    let _ = writeln!(
        output,
        "  Houses: {}  Farms: {}  Mines: {}  Barracks: {}",
        b.houses, b.farm, b.mine, b.barracks
    );

    if !kingdom.is_over() {
        let ledger = calculate_ledger(kingdom, rules);
        let _ = writeln!(
            output,
            "  Next turn: {:+} food, +{} gold, +{} people",
            ledger.food_balance(),
            ledger.gold_produced,
            ledger.growth
        );
        if !kingdom.recruitment_unlocked() {
            let _ = writeln!(output, "  Build barracks to train soldiers.");
        }

        let progress = kingdom.wonder_progress(rules);
        let mark = |met: bool| if met { "ok" } else { ".." };
        let _ = writeln!(
            output,
            "  Grand Castle: gold {}/{} {}  food {}/{} {}  people {}/{} {}",
            progress.gold.0,
            progress.gold.1,
            mark(progress.gold_met()),
            progress.food.0,
            progress.food.1,
            mark(progress.food_met()),
            progress.population.0,
            progress.population.1,
            mark(progress.population_met()),
        );
    }

    output
}

/// Format one event, marking refused orders.
pub(super) fn format_event(event: &Event) -> String {
    if event.is_rejection() {
        format!("x {event}")
    } else {
        format!("  {event}")
    }
}

/// Format the chronicle, newest first.
pub(super) fn format_chronicle(chronicle: &Chronicle) -> String {
    let mut output = String::new();
    for entry in chronicle.iter() {
        let _ = writeln!(output, "  [{}] {}", entry.turn, format_event(&entry.event));
    }
    output
}

/// JSON-serializable simulation result.
#[derive(Debug, Serialize)]
pub(super) struct JsonSimulationResult {
    /// Policy that played.
    strategy: Strategy,
    /// First seed.
    base_seed: u64,
    /// Total games played.
    games_played: u64,
    /// Games won.
    victories: u64,
    /// Games lost.
    defeats: u64,
    /// Games that hit the turn limit.
    timeouts: u64,
    /// Win rate (0.0-1.0).
    victory_rate: f64,
    /// Average game length in turns.
    avg_turns: f64,
    /// Average winning game length.
    avg_victory_turns: f64,
    /// Shortest winning game.
    fastest_victory: Option<u32>,
}

impl JsonSimulationResult {
    /// Create from stats.
    pub(super) fn from_stats(stats: &SimulationStats, strategy: Strategy, base_seed: u64) -> Self {
        Self {
            strategy,
            base_seed,
            games_played: stats.games_played,
            victories: stats.victories,
            defeats: stats.defeats,
            timeouts: stats.timeouts,
            victory_rate: stats.victory_rate(),
            avg_turns: stats.avg_turns(),
            avg_victory_turns: stats.avg_victory_turns(),
            fastest_victory: stats.fastest_victory,
        }
    }
}

/// Format simulation stats as human-readable text.
pub(super) fn format_simulation_text(stats: &SimulationStats, strategy: Strategy) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Simulation Results ({} games, {strategy:?})", stats.games_played);
    output.push_str("========================================\n\n");

    let _ = writeln!(
        output,
        "  Victories: {} ({:.1}%)",
        stats.victories,
        stats.victory_rate() * 100.0
    );
    let _ = writeln!(
        output,
        "  Defeats:   {} ({:.1}%)",
        stats.defeats,
        stats.defeat_rate() * 100.0
    );
    let _ = writeln!(output, "  Timeouts:  {}", stats.timeouts);
    let _ = writeln!(output, "\nAverage Game Length: {:.0} turns", stats.avg_turns());
    if let Some(fastest) = stats.fastest_victory {
        let _ = writeln!(
            output,
            "Average Victory: {:.0} turns (fastest {fastest})",
            stats.avg_victory_turns()
        );
    }

    output
}

/// Format simulation stats as CSV.
pub(super) fn format_simulation_csv(stats: &SimulationStats, strategy: Strategy) -> String {
    let mut output = String::new();

    output.push_str("strategy,games,victories,defeats,timeouts,victory_rate,avg_turns\n");
    let _ = writeln!(
        output,
        "{:?},{},{},{},{},{:.4},{:.2}",
        strategy,
        stats.games_played,
        stats.victories,
        stats.defeats,
        stats.timeouts,
        stats.victory_rate(),
        stats.avg_turns()
    );

    output
}
