#![no_main]

//! Session fuzzer.
//!
//! Plays arbitrary command sequences from an arbitrary starting kingdom and
//! checks the state and transition invariants after every command.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pocket_kingdom::game::{check_invariants, check_transition};
use pocket_kingdom::{BuildingKind, Command, Phase, Rules, Session};

/// A fuzzer-generated order.
#[derive(Arbitrary, Debug, Clone, Copy)]
enum FuzzCommand {
    EndTurn,
    Build(u8),
    Recruit,
    Wonder,
}

impl FuzzCommand {
    fn to_command(self) -> Command {
        match self {
            Self::EndTurn => Command::EndTurn,
            Self::Build(k) => {
                Command::Build(BuildingKind::ALL[usize::from(k) % BuildingKind::ALL.len()])
            }
            Self::Recruit => Command::Recruit,
            Self::Wonder => Command::BuildWonder,
        }
    }
}

/// Structured input for session fuzzing.
#[derive(Arbitrary, Debug)]
struct SessionInput {
    /// Starting stockpiles (gold, food, population, army).
    start: [u16; 4],
    /// Starting houses and farms.
    houses: u8,
    farms: u8,
    /// Report both famine and raid on the same turn.
    report_all_events: bool,
    /// Session seed.
    seed: u64,
    /// Orders to play.
    commands: Vec<FuzzCommand>,
}

fuzz_target!(|input: SessionInput| {
    let mut rules = Rules::default();
    rules.start.gold = u32::from(input.start[0]);
    rules.start.food = u32::from(input.start[1]);
    rules.start.population = u32::from(input.start[2]).max(1);
    rules.start.army = u32::from(input.start[3]);
    rules.start.houses = u32::from(input.houses);
    rules.start.farm = u32::from(input.farms);
    rules.report_all_events = input.report_all_events;

    let mut session = Session::new(input.seed, rules);

    for fuzz_command in input.commands.into_iter().take(500) {
        let before = *session.kingdom();
        let events = session.apply(fuzz_command.to_command());
        let after = *session.kingdom();

        assert!(check_invariants(&after).is_empty(), "{:?}", check_invariants(&after));
        assert!(check_transition(&before, &after).is_empty());
        assert!(events.len() <= 3);

        if before.phase != Phase::Playing {
            assert_eq!(before, after);
        }
    }
});
