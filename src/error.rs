//! Error types for rule loading and text input.
//!
//! The engine itself never fails: invalid player actions are reported as
//! rejected outcomes. Only the boundaries that touch the outside world
//! (rule files, typed-in commands) return these errors.

use std::path::PathBuf;

/// Errors raised while loading or validating a rule set.
#[derive(Debug, thiserror::Error)]
pub enum RulesError {
    /// The rules file could not be read.
    #[error("failed to read rules file {path}: {source}")]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The rules file is not valid JSON for [`Rules`](crate::game::Rules).
    #[error("failed to parse rules: {0}")]
    Parse(#[from] serde_json::Error),

    /// The raid chance is not a probability.
    #[error("raid chance {0} must be within [0, 1]")]
    RaidChanceOutOfRange(f64),

    /// The raid growth factor is negative or not finite.
    #[error("raid growth factor {0} must be a finite, non-negative number")]
    InvalidRaidGrowth(f64),

    /// A divisor used by the event rules is zero.
    #[error("{0} must be greater than zero")]
    ZeroDivisor(&'static str),

    /// Soldiers would be trained out of nobody.
    #[error("soldier population cost must be at least 1")]
    ZeroSoldierHeadcount,

    /// The chronicle could not hold any entries.
    #[error("log capacity must be at least 1")]
    ZeroLogCapacity,
}

/// Error returned when a building key is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown building '{0}' (expected farm, mine, barracks or houses)")]
pub struct ParseBuildingError(pub String);

/// Error returned when a typed command cannot be understood.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseCommandError {
    /// Nothing was typed.
    #[error("empty command")]
    Empty,

    /// The verb is not a known command.
    #[error("unknown command '{0}'")]
    Unknown(String),

    /// `build` was given without a building.
    #[error("'build' needs a building: farm, mine, barracks or houses")]
    MissingBuilding,

    /// The building named after `build` is not valid.
    #[error(transparent)]
    Building(#[from] ParseBuildingError),
}

/// Result type for rule loading.
pub type RulesResult<T> = Result<T, RulesError>;
