// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Pocket Kingdom: a deterministic, turn-based kingdom management engine.
//!
//! The player spends gold and food on buildings, grows a population, trains
//! soldiers and survives famines and raids until the Grand Castle stands or
//! the last subject is gone.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   CLI / Batch Simulation            │
//! ├─────────────────────────────────────┤
//! │   Session (kingdom, log, seeded RNG)│
//! ├─────────────────────────────────────┤
//! │   Actions  │  Economy & Events      │
//! ├─────────────────────────────────────┤
//! │   Kingdom State  │  Rules           │
//! └─────────────────────────────────────┘
//! ```
//!
//! Every engine operation is a pure function from one [`Kingdom`] to the
//! next. Randomness is injected, one draw per turn, so seeded games replay
//! exactly.

pub mod error;
pub mod game;
pub mod simulation;

pub use error::{ParseBuildingError, ParseCommandError, RulesError, RulesResult};

// Re-export key game types at crate root for convenience
pub use game::{
    ActionReport, BuildingKind, Chronicle, Command, Event, Kingdom, Outcome, Phase, Rules,
    Session, TurnReport,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reexports_drive_a_turn() {
        let mut session = Session::new(0, Rules::default());
        session.build(BuildingKind::Farm);
        session.end_turn();
        assert_eq!(session.kingdom().turn, 2);
        assert_eq!(session.kingdom().phase, Phase::Playing);
    }
}
