//! Game invariants - sanity checks that detect bugs.
//!
//! These should NEVER trigger. Resources are unsigned and every rule clamps
//! at zero, so a violation means the engine itself is wrong.

use crate::game::{Kingdom, Phase};

/// Invariant violation error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invariant violation: {message}")]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl InvariantViolation {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Check invariants that hold for any single kingdom snapshot.
#[must_use]
pub fn check_invariants(kingdom: &Kingdom) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    if kingdom.turn == 0 {
        violations.push(InvariantViolation::new("Turn counter starts at 1"));
    }

    if kingdom.phase == Phase::GameOver && kingdom.resources.population > 0 {
        violations.push(InvariantViolation::new(format!(
            "Game over with {} people still alive",
            kingdom.resources.population
        )));
    }

    violations
}

/// Check invariants between two consecutive snapshots.
#[must_use]
pub fn check_transition(before: &Kingdom, after: &Kingdom) -> Vec<InvariantViolation> {
    let mut violations = check_invariants(after);

    if after.turn < before.turn || after.turn - before.turn > 1 {
        violations.push(InvariantViolation::new(format!(
            "Turn moved from {} to {}",
            before.turn, after.turn
        )));
    }

    if !after.buildings.dominates(&before.buildings) {
        violations.push(InvariantViolation::new(format!(
            "Buildings decreased: {:?} -> {:?}",
            before.buildings, after.buildings
        )));
    }

    if before.is_over() && after != before {
        violations.push(InvariantViolation::new(format!(
            "Kingdom changed after the game ended in {:?}",
            before.phase
        )));
    }

    violations
}

/// Assert a transition is valid, panicking if any invariant is violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(before: &Kingdom, after: &Kingdom) {
    let violations = check_transition(before, after);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Game invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_before: &Kingdom, _after: &Kingdom) {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{BuildingKind, Rules, buy_building, resolve_turn_with_roll};

    #[test]
    fn test_fresh_kingdom_passes() {
        assert!(check_invariants(&Kingdom::default()).is_empty());
    }

    #[test]
    fn test_turn_and_purchase_transitions_pass() {
        let rules = Rules::default();
        let start = Kingdom::new(&rules);

        let built = buy_building(&start, &rules, BuildingKind::Farm).kingdom;
        assert!(check_transition(&start, &built).is_empty());

        let next = resolve_turn_with_roll(&built, &rules, 0.5).kingdom;
        assert!(check_transition(&built, &next).is_empty());
    }

    #[test]
    fn test_detects_living_game_over() {
        let mut kingdom = Kingdom::default();
        kingdom.phase = Phase::GameOver;

        let violations = check_invariants(&kingdom);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("10 people"));
    }

    #[test]
    fn test_detects_demolition() {
        let before = Kingdom::default();
        let mut after = before;
        after.buildings.farm = 0;

        assert!(!check_transition(&before, &after).is_empty());
    }

    #[test]
    fn test_detects_turn_skip() {
        let before = Kingdom::default();
        let mut after = before;
        after.turn += 2;

        assert!(!check_transition(&before, &after).is_empty());
    }

    #[test]
    fn test_detects_change_after_victory() {
        let mut before = Kingdom::default();
        before.phase = Phase::Victory;
        let mut after = before;
        after.resources.gold += 1;

        let violations = check_transition(&before, &after);
        assert_eq!(violations.len(), 1);
    }

    #[test]
    #[should_panic(expected = "Game invariant violations")]
    #[cfg(debug_assertions)]
    fn test_assert_panics_in_debug() {
        let before = Kingdom::default();
        let mut after = before;
        after.turn = 0;
        assert_invariants(&before, &after);
    }
}
