//! Turn events (famine, raids) and the messages shown to the player.
//!
//! Raids strike with strength `floor(turn × 1.2) + 2`. An army at least that
//! large repels them and loots gold; anything smaller loses gold and people
//! in proportion to the shortfall.

use std::fmt;

use serde::Serialize;

use crate::game::{BuildingKind, Resources, Rules};

/// Something that happened, as reported to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Event {
    /// First entry of every chronicle.
    Welcome,
    /// Food ran out and people starved.
    Famine {
        /// People who died.
        deaths: u32,
    },
    /// A raid was beaten back.
    RaidRepelled {
        /// Raid strength faced.
        strength: u32,
        /// Gold taken from the raiders.
        loot: u32,
    },
    /// Raiders overran the defenders.
    RaidPlundered {
        /// Raid strength faced.
        strength: u32,
        /// Gold lost.
        gold_lost: u32,
        /// People lost.
        population_lost: u32,
    },
    /// The last inhabitant is gone.
    Desolation,
    /// A building was completed.
    Constructed(BuildingKind),
    /// A building could not be paid for.
    InsufficientResources(BuildingKind),
    /// A soldier joined the army.
    SoldierRecruited,
    /// Recruitment requirements were not met.
    RecruitmentDenied,
    /// The Grand Castle stands.
    WonderCompleted,
    /// An order arrived after the game ended.
    ReignEnded,
}

impl Event {
    /// Whether this event reports a failed player action.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::InsufficientResources(_) | Self::RecruitmentDenied | Self::ReignEnded
        )
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Welcome => write!(f, "Welcome, Your Majesty!"),
            Self::Famine { deaths } => write!(f, "Famine! {deaths} villagers starved."),
            Self::RaidRepelled { loot, .. } => write!(f, "Raid repelled! (+{loot} gold)"),
            Self::RaidPlundered {
                gold_lost,
                population_lost,
                ..
            } => write!(
                f,
                "We were plundered! (-{gold_lost} gold, -{population_lost} people)"
            ),
            Self::Desolation => write!(f, "The kingdom lies empty. Game over."),
            Self::Constructed(kind) => write!(f, "Built: {}", kind.display_name()),
            Self::InsufficientResources(_) => write!(f, "Not enough resources!"),
            Self::SoldierRecruited => write!(f, "A soldier has been recruited!"),
            Self::RecruitmentDenied => write!(f, "Recruits need gold, food and spare people!"),
            Self::WonderCompleted => write!(f, "THE GRAND CASTLE HAS BEEN BUILT!"),
            Self::ReignEnded => write!(f, "The reign is over; no more orders can be given."),
        }
    }
}

/// People lost to a food deficit of `deficit` (a positive amount).
#[must_use]
pub fn famine_deaths(deficit: u64, rules: &Rules) -> u32 {
    let blocks = deficit / u64::from(rules.events.famine_divisor.max(1));
    u32::try_from(blocks).unwrap_or(u32::MAX).saturating_add(1)
}

/// Strength of a raid arriving on `turn`.
#[must_use]
pub fn raid_strength(turn: u32, rules: &Rules) -> u32 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let scaled = (f64::from(turn) * rules.events.raid_growth).floor() as u32;
    scaled.saturating_add(rules.events.raid_base_strength)
}

/// Whether a raid arrives on `turn` given this turn's random `roll`.
#[must_use]
pub fn raid_triggers(turn: u32, roll: f64, rules: &Rules) -> bool {
    turn > rules.events.raid_start_turn && roll < rules.events.raid_chance
}

/// Result of a raid against the kingdom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RaidResult {
    /// Whether the army held.
    pub repelled: bool,
    /// Raid strength faced.
    pub strength: u32,
    /// Gold change applied (loot or losses).
    pub gold_delta: i64,
    /// People lost.
    pub population_lost: u32,
}

impl RaidResult {
    /// The event describing this raid.
    #[must_use]
    pub fn event(&self) -> Event {
        if self.repelled {
            Event::RaidRepelled {
                strength: self.strength,
                loot: u32::try_from(self.gold_delta).unwrap_or(u32::MAX),
            }
        } else {
            Event::RaidPlundered {
                strength: self.strength,
                gold_lost: u32::try_from(-self.gold_delta).unwrap_or(u32::MAX),
                population_lost: self.population_lost,
            }
        }
    }
}

/// Resolve a raid of the given strength, updating resources in place.
///
/// Defense succeeds when `army >= strength`. A failed defense loses
/// `damage × 10` gold and `damage / 2` people, both floored at zero; the
/// reported losses are what was actually taken.
pub fn resolve_raid(resources: &mut Resources, strength: u32, rules: &Rules) -> RaidResult {
    let events = &rules.events;

    if resources.army >= strength {
        let loot = strength.saturating_mul(events.loot_per_strength);
        resources.gold = resources.gold.saturating_add(loot);
        return RaidResult {
            repelled: true,
            strength,
            gold_delta: i64::from(loot),
            population_lost: 0,
        };
    }

    let damage = strength - resources.army;
    let gold_before = resources.gold;
    let pop_before = resources.population;

    resources.gold = resources
        .gold
        .saturating_sub(damage.saturating_mul(events.gold_lost_per_damage));
    resources.population = resources
        .population
        .saturating_sub(damage / events.damage_per_casualty.max(1));

    RaidResult {
        repelled: false,
        strength,
        gold_delta: i64::from(resources.gold) - i64::from(gold_before),
        population_lost: pop_before - resources.population,
    }
}

/// Kani formal verification proofs.
///
/// Run with: `cargo kani`
#[cfg(kani)]
mod kani_proofs {
    use super::*;

    /// Famine always claims at least one life and never panics.
    #[kani::proof]
    fn prove_famine_deaths_positive() {
        let deficit: u64 = kani::any();
        let rules = Rules::default();

        let deaths = famine_deaths(deficit, &rules);
        assert!(deaths >= 1);
    }

    /// A failed raid never takes more than the kingdom has.
    #[kani::proof]
    fn prove_raid_losses_bounded() {
        let mut resources = Resources {
            gold: kani::any(),
            food: 0,
            population: kani::any(),
            army: kani::any(),
        };
        let strength: u32 = kani::any();
        let before = resources;

        let result = resolve_raid(&mut resources, strength, &Rules::default());

        if !result.repelled {
            assert!(resources.gold <= before.gold);
            assert!(resources.population <= before.population);
            assert_eq!(result.population_lost, before.population - resources.population);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resources(gold: u32, population: u32, army: u32) -> Resources {
        Resources {
            gold,
            food: 0,
            population,
            army,
        }
    }

    #[test]
    fn test_famine_deaths() {
        let rules = Rules::default();
        assert_eq!(famine_deaths(1, &rules), 1);
        assert_eq!(famine_deaths(4, &rules), 1);
        assert_eq!(famine_deaths(5, &rules), 2);
        assert_eq!(famine_deaths(14, &rules), 3);
    }

    #[test]
    fn test_raid_strength_scales_with_turn() {
        let rules = Rules::default();
        assert_eq!(raid_strength(6, &rules), 9);
        assert_eq!(raid_strength(10, &rules), 14);
        assert_eq!(raid_strength(20, &rules), 26);
    }

    #[test]
    fn test_raid_eligibility() {
        let rules = Rules::default();
        assert!(!raid_triggers(5, 0.0, &rules));
        assert!(raid_triggers(6, 0.0, &rules));
        assert!(raid_triggers(6, 0.249, &rules));
        assert!(!raid_triggers(6, 0.25, &rules));
    }

    #[test]
    fn test_raid_repelled_loots_gold() {
        let rules = Rules::default();
        let mut res = resources(100, 10, 9);

        let result = resolve_raid(&mut res, 9, &rules);

        assert!(result.repelled);
        assert_eq!(res.gold, 145);
        assert_eq!(res.population, 10);
        assert_eq!(
            result.event(),
            Event::RaidRepelled {
                strength: 9,
                loot: 45
            }
        );
    }

    #[test]
    fn test_raid_plunders_weak_defense() {
        let rules = Rules::default();
        let mut res = resources(100, 10, 4);

        // damage = 5: -50 gold, -2 people
        let result = resolve_raid(&mut res, 9, &rules);

        assert!(!result.repelled);
        assert_eq!(res.gold, 50);
        assert_eq!(res.population, 8);
        assert_eq!(res.army, 4);
        assert_eq!(
            result.event(),
            Event::RaidPlundered {
                strength: 9,
                gold_lost: 50,
                population_lost: 2
            }
        );
    }

    #[test]
    fn test_raid_losses_floor_at_zero() {
        let rules = Rules::default();
        let mut res = resources(30, 1, 0);

        let result = resolve_raid(&mut res, 9, &rules);

        assert_eq!(res.gold, 0);
        assert_eq!(res.population, 0);
        assert_eq!(result.population_lost, 1);
    }

    #[test]
    fn test_event_messages() {
        assert_eq!(Event::Famine { deaths: 2 }.to_string(), "Famine! 2 villagers starved.");
        assert_eq!(
            Event::Constructed(BuildingKind::Houses).to_string(),
            "Built: House"
        );
        assert!(Event::RecruitmentDenied.is_rejection());
        assert!(!Event::SoldierRecruited.is_rejection());
    }
}
