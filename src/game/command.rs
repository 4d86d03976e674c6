//! Player commands and their text form.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ParseCommandError;
use crate::game::{
    BuildingKind, Event, Kingdom, Rules, attempt_wonder, buy_building, recruit_soldier,
    resolve_turn,
};

/// A single player order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    /// Resolve the turn.
    EndTurn,
    /// Construct a building.
    Build(BuildingKind),
    /// Train a soldier.
    Recruit,
    /// Attempt the Grand Castle.
    BuildWonder,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EndTurn => write!(f, "end"),
            Self::Build(kind) => write!(f, "build {kind}"),
            Self::Recruit => write!(f, "recruit"),
            Self::BuildWonder => write!(f, "wonder"),
        }
    }
}

impl FromStr for Command {
    type Err = ParseCommandError;

    /// Accepts `end`, `build <kind>`, a bare building key, `recruit` and
    /// `wonder`, plus a few short aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let Some(verb) = words.next() else {
            return Err(ParseCommandError::Empty);
        };

        match verb.to_ascii_lowercase().as_str() {
            "end" | "next" | "e" | "n" => Ok(Self::EndTurn),
            "recruit" | "soldier" | "r" => Ok(Self::Recruit),
            "wonder" | "castle" | "w" => Ok(Self::BuildWonder),
            "build" | "b" => {
                let kind = words.next().ok_or(ParseCommandError::MissingBuilding)?;
                Ok(Self::Build(kind.parse()?))
            }
            other => other
                .parse::<BuildingKind>()
                .map(Self::Build)
                .map_err(|_| ParseCommandError::Unknown(verb.to_string())),
        }
    }
}

/// Kingdom and events produced by applying one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    /// Kingdom afterwards.
    pub kingdom: Kingdom,
    /// Events to log, oldest first.
    pub events: Vec<Event>,
    /// Whether the kingdom changed.
    pub applied: bool,
}

/// Apply a command. Only [`Command::EndTurn`] draws from `rng`.
pub fn apply_command<R: Rng>(
    kingdom: &Kingdom,
    rules: &Rules,
    command: Command,
    rng: &mut R,
) -> CommandResult {
    let report = match command {
        Command::EndTurn => {
            let turn = resolve_turn(kingdom, rules, rng);
            return CommandResult {
                kingdom: turn.kingdom,
                events: turn.events,
                applied: turn.advanced,
            };
        }
        Command::Build(kind) => buy_building(kingdom, rules, kind),
        Command::Recruit => recruit_soldier(kingdom, rules),
        Command::BuildWonder => attempt_wonder(kingdom, rules),
    };

    CommandResult {
        kingdom: report.kingdom,
        events: report.event.into_iter().collect(),
        applied: report.is_applied(),
    }
}
