//! Game layer for Pocket Kingdom.
//!
//! Implements the kingdom rules:
//! - Configuration tables (costs, rates, event constants)
//! - Kingdom state (resources, buildings, turn, phase)
//! - Economy (production, upkeep, growth) and turn resolution
//! - Events (famine, raids) and their log messages
//! - Player actions (construction, recruitment, the Grand Castle)
//! - Sessions that own a live kingdom and its chronicle

mod actions;
mod chronicle;
mod command;
mod economy;
mod events;
mod invariants;
mod rules;
mod session;
mod state;

pub use actions::{ActionReport, Outcome, attempt_wonder, buy_building, recruit_soldier};
pub use chronicle::{Chronicle, LogEntry};
pub use command::{Command, CommandResult, apply_command};
pub use economy::{
    TurnLedger, TurnReport, calculate_ledger, resolve_turn, resolve_turn_with_roll,
};
pub use events::{
    Event, RaidResult, famine_deaths, raid_strength, raid_triggers, resolve_raid,
};
pub use invariants::{InvariantViolation, assert_invariants, check_invariants, check_transition};
pub use rules::{BuildingCosts, BuildingKind, Cost, EventRules, Rates, Rules, StartProfile};
pub use session::Session;
pub use state::{Buildings, Kingdom, Phase, Resources, WonderProgress};
