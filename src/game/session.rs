//! A single play session: the live kingdom, its chronicle and its dice.
//!
//! Sessions are deterministic. Given the same seed, rules and commands,
//! two sessions end in identical states, so a game can be reproduced from
//! its command history alone.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::game::{
    BuildingKind, Chronicle, Command, Event, Kingdom, Rules, apply_command, assert_invariants,
};

/// Owner of one kingdom for the length of a game.
#[derive(Debug, Clone)]
pub struct Session {
    rules: Rules,
    seed: u64,
    rng: ChaCha8Rng,
    kingdom: Kingdom,
    chronicle: Chronicle,
    history: Vec<Command>,
}

impl Session {
    /// Start a new game.
    #[must_use]
    pub fn new(seed: u64, rules: Rules) -> Self {
        let kingdom = Kingdom::new(&rules);
        let chronicle = Chronicle::with_welcome(rules.log_capacity, kingdom.turn);
        info!(seed, "Session started");
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
            kingdom,
            chronicle,
            history: Vec::new(),
            rules,
        }
    }

    /// Rebuild a session by replaying commands from a fresh start.
    #[must_use]
    pub fn replay(seed: u64, rules: Rules, commands: &[Command]) -> Self {
        let mut session = Self::new(seed, rules);
        for &command in commands {
            session.apply(command);
        }
        session
    }

    /// Apply one command, record it and log its events.
    ///
    /// Returns the events produced, oldest first.
    pub fn apply(&mut self, command: Command) -> Vec<Event> {
        let before = self.kingdom;
        let result = apply_command(&before, &self.rules, command, &mut self.rng);
        assert_invariants(&before, &result.kingdom);

        self.history.push(command);
        self.kingdom = result.kingdom;
        self.chronicle
            .extend(self.kingdom.turn, result.events.iter().copied());
        result.events
    }

    /// End the turn.
    pub fn end_turn(&mut self) -> Vec<Event> {
        self.apply(Command::EndTurn)
    }

    /// Construct a building.
    pub fn build(&mut self, kind: BuildingKind) -> Vec<Event> {
        self.apply(Command::Build(kind))
    }

    /// Recruit a soldier.
    pub fn recruit(&mut self) -> Vec<Event> {
        self.apply(Command::Recruit)
    }

    /// Attempt the Grand Castle.
    pub fn build_wonder(&mut self) -> Vec<Event> {
        self.apply(Command::BuildWonder)
    }

    /// Throw the kingdom away and start over with the same seed and rules.
    pub fn reset(&mut self) {
        info!(seed = self.seed, turn = self.kingdom.turn, "Session reset");
        *self = Self::new(self.seed, self.rules.clone());
    }

    /// Current kingdom.
    #[must_use]
    pub const fn kingdom(&self) -> &Kingdom {
        &self.kingdom
    }

    /// Event log.
    #[must_use]
    pub const fn chronicle(&self) -> &Chronicle {
        &self.chronicle
    }

    /// Rules in force.
    #[must_use]
    pub const fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Seed the session was started with.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Every command applied since the start or the last reset.
    #[must_use]
    pub fn history(&self) -> &[Command] {
        &self.history
    }

    /// Whether the game has ended.
    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.kingdom.is_over()
    }
}
