//! Batch simulation of automated reigns.
//!
//! Provides a pure function interface: `(seed, strategy, config) -> GameResult`
//!
//! Used for balance testing: a fixed policy plays many seeded games in
//! parallel and the outcomes are aggregated with a lock-free fold/reduce.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::game::{
    BuildingKind, Command, Kingdom, Phase, Rules, Session, calculate_ledger, raid_strength,
};

/// Orders a policy may issue before ending a turn.
const MAX_ORDERS_PER_TURN: usize = 32;

/// Civilians a garrison keeps back from recruitment.
const GARRISON_RESERVE: u32 = 5;

/// Automated playing policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Never builds anything.
    Idle,
    /// Keeps food positive, houses the people and saves for the castle.
    Farmer,
    /// Farmer plus an army sized to the next raid.
    Garrison,
}

impl Strategy {
    /// Next order for this kingdom, or `None` to end the turn.
    #[must_use]
    pub fn next_order(self, kingdom: &Kingdom, rules: &Rules) -> Option<Command> {
        match self {
            Self::Idle => None,
            Self::Farmer => farmer_order(kingdom, rules),
            Self::Garrison => garrison_order(kingdom, rules).or_else(|| farmer_order(kingdom, rules)),
        }
    }
}

fn affordable(kingdom: &Kingdom, rules: &Rules, kind: BuildingKind) -> bool {
    kingdom.resources.can_afford(rules.buildings.get(kind))
}

fn farmer_order(kingdom: &Kingdom, rules: &Rules) -> Option<Command> {
    if kingdom.wonder_progress(rules).is_ready() {
        return Some(Command::BuildWonder);
    }

    let ledger = calculate_ledger(kingdom, rules);
    let res = &kingdom.resources;
    let margin = i64::from(rules.rates.food_per_person) * 2;

    if ledger.food_balance() < margin && affordable(kingdom, rules, BuildingKind::Farm) {
        return Some(Command::Build(BuildingKind::Farm));
    }

    if res.population + 1 >= ledger.capacity
        && ledger.food_balance() > 0
        && affordable(kingdom, rules, BuildingKind::Houses)
    {
        return Some(Command::Build(BuildingKind::Houses));
    }

    if kingdom.buildings.mine < kingdom.buildings.houses / 2
        && affordable(kingdom, rules, BuildingKind::Mine)
    {
        return Some(Command::Build(BuildingKind::Mine));
    }

    None
}

fn garrison_order(kingdom: &Kingdom, rules: &Rules) -> Option<Command> {
    let res = &kingdom.resources;

    if !kingdom.recruitment_unlocked() {
        return affordable(kingdom, rules, BuildingKind::Barracks)
            .then_some(Command::Build(BuildingKind::Barracks));
    }

    let threat = raid_strength(kingdom.turn.saturating_add(1), rules);
    let can_recruit = res.can_afford(rules.soldier) && res.population > GARRISON_RESERVE;
    (res.army < threat && can_recruit).then_some(Command::Recruit)
}

/// Limits for a simulated game.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Turn limit before the game counts as a timeout.
    pub max_turns: u32,
    /// Rules in force.
    pub rules: Rules,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_turns: 300,
            rules: Rules::default(),
        }
    }
}

/// How a simulated game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GameOutcome {
    /// The Grand Castle was built.
    Victory,
    /// The kingdom emptied.
    Defeat,
    /// The turn limit was reached.
    Timeout,
}

/// Final result of a simulated game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    /// The seed used for this game.
    pub seed: u64,
    /// Policy that played.
    pub strategy: Strategy,
    /// How the game ended.
    pub outcome: GameOutcome,
    /// Turns resolved.
    pub turns_played: u32,
    /// Kingdom at the end.
    pub kingdom: Kingdom,
}

/// Play one game to its end or the turn limit.
#[must_use]
pub fn play_game(seed: u64, strategy: Strategy, config: &SimulationConfig) -> GameResult {
    let mut session = Session::new(seed, config.rules.clone());

    while !session.is_over() && session.kingdom().turn <= config.max_turns {
        for _ in 0..MAX_ORDERS_PER_TURN {
            let Some(order) = strategy.next_order(session.kingdom(), session.rules()) else {
                break;
            };
            let before = *session.kingdom();
            session.apply(order);
            if *session.kingdom() == before || session.is_over() {
                break;
            }
        }
        if session.is_over() {
            break;
        }
        session.end_turn();
    }

    let kingdom = *session.kingdom();
    let outcome = match kingdom.phase {
        Phase::Victory => GameOutcome::Victory,
        Phase::GameOver => GameOutcome::Defeat,
        Phase::Playing => GameOutcome::Timeout,
    };
    debug!(seed, ?strategy, ?outcome, turn = kingdom.turn, "Game finished");

    GameResult {
        seed,
        strategy,
        outcome,
        turns_played: kingdom.turn - 1,
        kingdom,
    }
}

/// Aggregated outcomes across many games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SimulationStats {
    /// Total games played.
    pub games_played: u64,
    /// Games won.
    pub victories: u64,
    /// Games lost.
    pub defeats: u64,
    /// Games that hit the turn limit.
    pub timeouts: u64,
    /// Total turns across all games.
    total_turns: u64,
    /// Total turns across won games.
    victory_turns: u64,
    /// Shortest winning game.
    pub fastest_victory: Option<u32>,
}

impl SimulationStats {
    /// Add a game result to the stats.
    pub fn add_result(&mut self, result: &GameResult) {
        self.games_played += 1;
        self.total_turns += u64::from(result.turns_played);

        match result.outcome {
            GameOutcome::Victory => {
                self.victories += 1;
                self.victory_turns += u64::from(result.turns_played);
                self.fastest_victory = Some(
                    self.fastest_victory
                        .map_or(result.turns_played, |t| t.min(result.turns_played)),
                );
            }
            GameOutcome::Defeat => self.defeats += 1,
            GameOutcome::Timeout => self.timeouts += 1,
        }
    }

    /// Merge stats collected on another thread.
    pub fn merge(&mut self, other: &Self) {
        self.games_played += other.games_played;
        self.victories += other.victories;
        self.defeats += other.defeats;
        self.timeouts += other.timeouts;
        self.total_turns += other.total_turns;
        self.victory_turns += other.victory_turns;
        self.fastest_victory = match (self.fastest_victory, other.fastest_victory) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
    }

    /// Share of games won (0.0-1.0).
    #[must_use]
    pub fn victory_rate(&self) -> f64 {
        ratio(self.victories, self.games_played)
    }

    /// Share of games lost (0.0-1.0).
    #[must_use]
    pub fn defeat_rate(&self) -> f64 {
        ratio(self.defeats, self.games_played)
    }

    /// Average game length.
    #[must_use]
    pub fn avg_turns(&self) -> f64 {
        ratio(self.total_turns, self.games_played)
    }

    /// Average length of won games.
    #[must_use]
    pub fn avg_victory_turns(&self) -> f64 {
        ratio(self.victory_turns, self.victories)
    }
}

#[allow(clippy::cast_precision_loss)]
fn ratio(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

/// Play `games` games with consecutive seeds starting at `base_seed`.
///
/// Games run in parallel; `on_game` is called once per finished game and
/// must be cheap.
pub fn run_simulation<F>(
    base_seed: u64,
    games: u64,
    strategy: Strategy,
    config: &SimulationConfig,
    on_game: F,
) -> SimulationStats
where
    F: Fn() + Sync,
{
    (0..games)
        .into_par_iter()
        .fold(SimulationStats::default, |mut local, i| {
            let result = play_game(base_seed.wrapping_add(i), strategy, config);
            local.add_result(&result);
            on_game();
            local
        })
        .reduce(SimulationStats::default, |mut a, b| {
            a.merge(&b);
            a
        })
}
