//! Property-based tests for game mechanics.
//!
//! These tests verify properties of the economy, events and actions.
//! Run with: cargo test --release prop_game

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use proptest::prelude::*;

use pocket_kingdom::game::{
    Buildings, Kingdom, Phase, Resources, attempt_wonder, buy_building, calculate_ledger,
    check_invariants, check_transition, famine_deaths, raid_strength, recruit_soldier,
    resolve_turn_with_roll,
};
use pocket_kingdom::{BuildingKind, Command, Event, Outcome, Rules, Session};

fn arb_kind() -> impl Strategy<Value = BuildingKind> {
    prop::sample::select(BuildingKind::ALL.to_vec())
}

fn arb_command() -> impl Strategy<Value = Command> {
    prop_oneof![
        4 => Just(Command::EndTurn),
        3 => arb_kind().prop_map(Command::Build),
        2 => Just(Command::Recruit),
        1 => Just(Command::BuildWonder),
    ]
}

prop_compose! {
    fn arb_kingdom()(
        gold in 0u32..5_000,
        food in 0u32..5_000,
        population in 1u32..500,
        army in 0u32..200,
        farm in 0u32..40,
        mine in 0u32..40,
        barracks in 0u32..3,
        houses in 0u32..100,
        turn in 1u32..400,
    ) -> Kingdom {
        Kingdom {
            resources: Resources { gold, food, population, army },
            buildings: Buildings { farm, mine, barracks, houses },
            turn,
            phase: Phase::Playing,
        }
    }
}

fn arb_terminal_kingdom() -> impl Strategy<Value = Kingdom> {
    (arb_kingdom(), any::<bool>()).prop_map(|(mut k, won)| {
        if won {
            k.phase = Phase::Victory;
        } else {
            k.phase = Phase::GameOver;
            k.resources.population = 0;
        }
        k
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2000))]

    /// Turns advance by exactly one and keep every invariant.
    #[test]
    fn prop_turn_advances_by_one(k in arb_kingdom(), roll in 0.0f64..1.0) {
        let rules = Rules::default();
        let report = resolve_turn_with_roll(&k, &rules, roll);

        prop_assert!(report.advanced);
        prop_assert_eq!(report.kingdom.turn, k.turn + 1);
        prop_assert!(check_invariants(&report.kingdom).is_empty());
        prop_assert!(check_transition(&k, &report.kingdom).is_empty());
        prop_assert_eq!(report.kingdom.buildings, k.buildings);
        prop_assert!(report.events.len() <= 2);
    }

    /// Famine strikes exactly when the granary would go negative.
    #[test]
    fn prop_famine_iff_deficit(k in arb_kingdom()) {
        let rules = Rules::default();
        let ledger = calculate_ledger(&k, &rules);
        let provisional = i64::from(k.resources.food) + ledger.food_balance();

        // High roll: no raid can hide the famine message
        let report = resolve_turn_with_roll(&k, &rules, 0.999);
        let famine = report
            .events
            .iter()
            .find_map(|e| match e {
                Event::Famine { deaths } => Some(*deaths),
                _ => None,
            });

        if provisional < 0 {
            let expected = famine_deaths(provisional.unsigned_abs(), &rules);
            prop_assert_eq!(famine, Some(expected));
            prop_assert_eq!(expected, u32::try_from(provisional.unsigned_abs() / 5).unwrap() + 1);
            prop_assert_eq!(report.kingdom.resources.food, 0);
        } else {
            prop_assert_eq!(famine, None);
            prop_assert_eq!(i64::from(report.kingdom.resources.food), provisional);
        }
    }

    /// Raids never come before turn six and always come on a low roll after.
    #[test]
    fn prop_raid_gate(k in arb_kingdom(), roll in 0.0f64..0.25) {
        let rules = Rules::default();
        let report = resolve_turn_with_roll(&k, &rules, roll);
        let raided = report
            .events
            .iter()
            .any(|e| matches!(e, Event::RaidRepelled { .. } | Event::RaidPlundered { .. }));

        prop_assert_eq!(raided, report.kingdom.turn > 5);
    }

    /// A raid's strength follows the turn and the army decides the result.
    #[test]
    fn prop_raid_outcome_follows_army(k in arb_kingdom()) {
        let rules = Rules::default();
        let next_turn = k.turn + 1;
        let report = resolve_turn_with_roll(&k, &rules, 0.0);

        if next_turn > 5 {
            let strength = raid_strength(next_turn, &rules);
            let raid = report.events.iter().find(|e| !matches!(e, Event::Desolation));
            if k.resources.army >= strength {
                prop_assert_eq!(
                    raid,
                    Some(&Event::RaidRepelled { strength, loot: strength * 5 })
                );
            } else {
                let is_plunder = matches!(raid, Some(Event::RaidPlundered { strength: s, .. }) if *s == strength);
                prop_assert!(is_plunder);
            }
        }
    }

    /// An emptied kingdom is lost, and only an emptied kingdom.
    #[test]
    fn prop_game_over_iff_empty(k in arb_kingdom(), roll in 0.0f64..1.0) {
        let rules = Rules::default();
        let report = resolve_turn_with_roll(&k, &rules, roll);
        let empty = report.kingdom.resources.population == 0;

        prop_assert_eq!(report.kingdom.phase == Phase::GameOver, empty);
        prop_assert_eq!(report.events.last() == Some(&Event::Desolation), empty);
    }

    /// Terminal kingdoms never change.
    #[test]
    fn prop_terminal_is_frozen(
        k in arb_terminal_kingdom(),
        kind in arb_kind(),
        roll in 0.0f64..1.0,
    ) {
        let rules = Rules::default();

        let turn = resolve_turn_with_roll(&k, &rules, roll);
        prop_assert!(!turn.advanced);
        prop_assert_eq!(turn.kingdom, k);
        prop_assert!(turn.events.is_empty());

        let build = buy_building(&k, &rules, kind);
        prop_assert_eq!(build.outcome, Outcome::Rejected);
        prop_assert_eq!(build.kingdom, k);

        let recruit = recruit_soldier(&k, &rules);
        prop_assert_eq!(recruit.kingdom, k);

        let wonder = attempt_wonder(&k, &rules);
        prop_assert_eq!(wonder.kingdom, k);
        prop_assert_eq!(wonder.event, None);
    }

    /// Construction applies exactly when it is affordable.
    #[test]
    fn prop_build_iff_affordable(k in arb_kingdom(), kind in arb_kind()) {
        let rules = Rules::default();
        let cost = rules.buildings.get(kind);
        let report = buy_building(&k, &rules, kind);
        let affordable = k.resources.gold >= cost.gold && k.resources.food >= cost.food;

        prop_assert_eq!(report.is_applied(), affordable);
        if affordable {
            prop_assert_eq!(report.kingdom.resources.gold, k.resources.gold - cost.gold);
            prop_assert_eq!(report.kingdom.resources.food, k.resources.food - cost.food);
            prop_assert_eq!(report.kingdom.buildings.count(kind), k.buildings.count(kind) + 1);
        } else {
            prop_assert_eq!(report.kingdom, k);
        }
    }

    /// Recruitment trades a citizen, gold and food for a soldier.
    #[test]
    fn prop_recruit_conserves_heads(k in arb_kingdom()) {
        let rules = Rules::default();
        let report = recruit_soldier(&k, &rules);
        let res = k.resources;
        let eligible = res.gold >= 20 && res.food >= 50 && res.population > 1;

        prop_assert_eq!(report.is_applied(), eligible);
        let after = report.kingdom.resources;
        prop_assert_eq!(after.population + after.army, res.population + res.army);
        if eligible {
            prop_assert_eq!(after.army, res.army + 1);
            prop_assert_eq!(after.gold, res.gold - 20);
            prop_assert_eq!(after.food, res.food - 50);
        }
    }

    /// The wonder wins exactly at its thresholds and costs nothing by default.
    #[test]
    fn prop_wonder_threshold(k in arb_kingdom(), boost in any::<bool>()) {
        let rules = Rules::default();
        let mut k = k;
        if boost {
            k.resources.gold += 1000;
            k.resources.food += 1000;
            k.resources.population += 50;
        }
        let ready = k.resources.gold >= 1000 && k.resources.food >= 1000 && k.resources.population >= 50;
        let report = attempt_wonder(&k, &rules);

        prop_assert_eq!(report.kingdom.phase == Phase::Victory, ready);
        prop_assert_eq!(report.kingdom.resources, k.resources);
    }

    /// Seeded sessions replay exactly and keep every invariant.
    #[test]
    fn prop_session_replay(
        seed in any::<u64>(),
        script in prop::collection::vec(arb_command(), 0..120),
    ) {
        let rules = Rules::default();
        let mut session = Session::new(seed, rules.clone());
        let mut before = *session.kingdom();

        for &command in &script {
            session.apply(command);
            let after = *session.kingdom();
            prop_assert!(check_invariants(&after).is_empty());
            prop_assert!(check_transition(&before, &after).is_empty());
            before = after;
        }

        let replayed = Session::replay(seed, rules, &script);
        prop_assert_eq!(replayed.kingdom(), session.kingdom());
        prop_assert_eq!(replayed.chronicle(), session.chronicle());
    }
}
