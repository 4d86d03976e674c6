//! Player actions: construction, recruitment, and the Grand Castle.
//!
//! Every action either applies in full or leaves the kingdom untouched. A
//! rejected action carries the event explaining why.

use serde::Serialize;
use tracing::{debug, info};

use crate::game::{BuildingKind, Event, Kingdom, Phase, Rules};

/// Whether an action changed the kingdom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    /// State changed.
    Applied,
    /// State unchanged.
    Rejected,
}

/// Result of a player action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionReport {
    /// Kingdom after the action (identical to the input when rejected).
    pub kingdom: Kingdom,
    /// Whether the action applied.
    pub outcome: Outcome,
    /// Message for the log. Only a failed wonder attempt has none.
    pub event: Option<Event>,
}

impl ActionReport {
    fn applied(kingdom: Kingdom, event: Event) -> Self {
        Self {
            kingdom,
            outcome: Outcome::Applied,
            event: Some(event),
        }
    }

    fn rejected(kingdom: &Kingdom, event: Option<Event>) -> Self {
        if let Some(event) = event {
            debug!(turn = kingdom.turn, %event, "Action rejected");
        }
        Self {
            kingdom: *kingdom,
            outcome: Outcome::Rejected,
            event,
        }
    }

    /// Whether the action changed the kingdom.
    #[must_use]
    pub fn is_applied(&self) -> bool {
        self.outcome == Outcome::Applied
    }
}

/// Construct one building of `kind`, paying its gold and food.
#[must_use]
pub fn buy_building(kingdom: &Kingdom, rules: &Rules, kind: BuildingKind) -> ActionReport {
    if kingdom.is_over() {
        return ActionReport::rejected(kingdom, Some(Event::ReignEnded));
    }

    let cost = rules.buildings.get(kind);
    if !kingdom.resources.can_afford(cost) {
        return ActionReport::rejected(kingdom, Some(Event::InsufficientResources(kind)));
    }

    let mut next = *kingdom;
    next.resources.pay(cost);
    next.buildings.add(kind);
    debug!(
        turn = next.turn,
        building = %kind,
        count = next.buildings.count(kind),
        "Constructed"
    );
    ActionReport::applied(next, Event::Constructed(kind))
}

/// Train one soldier from the population.
///
/// Needs the soldier's gold and food and more people than the soldier's
/// head count, so at least one civilian always remains.
#[must_use]
pub fn recruit_soldier(kingdom: &Kingdom, rules: &Rules) -> ActionReport {
    if kingdom.is_over() {
        return ActionReport::rejected(kingdom, Some(Event::ReignEnded));
    }

    let cost = rules.soldier;
    let heads = cost.population;
    let res = &kingdom.resources;
    if !res.can_afford(cost) || res.population <= heads {
        return ActionReport::rejected(kingdom, Some(Event::RecruitmentDenied));
    }

    let mut next = *kingdom;
    next.resources.pay(cost);
    next.resources.population -= heads;
    next.resources.army = next.resources.army.saturating_add(1);
    debug!(turn = next.turn, army = next.resources.army, "Soldier recruited");
    ActionReport::applied(next, Event::SoldierRecruited)
}

/// Try to complete the Grand Castle.
///
/// Succeeds when gold, food and population all reach the wonder's
/// thresholds. The resources are a gate, not a price, unless
/// [`Rules::wonder_consumes_cost`] is set. Unmet thresholds or a finished
/// game are a silent no-op.
#[must_use]
pub fn attempt_wonder(kingdom: &Kingdom, rules: &Rules) -> ActionReport {
    if kingdom.is_over() || !kingdom.wonder_progress(rules).is_ready() {
        return ActionReport::rejected(kingdom, None);
    }

    let mut next = *kingdom;
    if rules.wonder_consumes_cost {
        next.resources.pay(rules.wonder);
    }
    next.phase = Phase::Victory;
    info!(turn = next.turn, "Grand Castle completed");
    ActionReport::applied(next, Event::WonderCompleted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Resources;

    fn kingdom(gold: u32, food: u32, population: u32) -> Kingdom {
        Kingdom {
            resources: Resources {
                gold,
                food,
                population,
                army: 0,
            },
            ..Kingdom::default()
        }
    }

    #[test]
    fn test_buy_farm() {
        let rules = Rules::default();
        let before = kingdom(100, 100, 10);

        let report = buy_building(&before, &rules, BuildingKind::Farm);

        assert!(report.is_applied());
        assert_eq!(report.kingdom.resources.gold, 50);
        assert_eq!(report.kingdom.resources.food, 100);
        assert_eq!(report.kingdom.buildings.farm, before.buildings.farm + 1);
        assert_eq!(report.event, Some(Event::Constructed(BuildingKind::Farm)));
    }

    #[test]
    fn test_buy_mine_without_gold_rejected() {
        let rules = Rules::default();
        let before = kingdom(50, 100, 10);

        let report = buy_building(&before, &rules, BuildingKind::Mine);

        assert_eq!(report.outcome, Outcome::Rejected);
        assert_eq!(report.kingdom, before);
        assert_eq!(
            report.event,
            Some(Event::InsufficientResources(BuildingKind::Mine))
        );
    }

    #[test]
    fn test_buy_needs_food_too() {
        let rules = Rules::default();
        let before = kingdom(500, 29, 10);

        let report = buy_building(&before, &rules, BuildingKind::Houses);
        assert_eq!(report.outcome, Outcome::Rejected);

        let report = buy_building(&kingdom(500, 30, 10), &rules, BuildingKind::Houses);
        assert!(report.is_applied());
        assert_eq!(report.kingdom.resources.food, 0);
        assert_eq!(report.kingdom.buildings.houses, 2);
    }

    #[test]
    fn test_recruit_soldier() {
        let rules = Rules::default();
        let report = recruit_soldier(&kingdom(20, 50, 2), &rules);

        assert!(report.is_applied());
        let res = report.kingdom.resources;
        assert_eq!((res.gold, res.food, res.population, res.army), (0, 0, 1, 1));
        assert_eq!(report.event, Some(Event::SoldierRecruited));
    }

    #[test]
    fn test_recruit_needs_spare_person() {
        let rules = Rules::default();
        let before = kingdom(500, 500, 1);

        let report = recruit_soldier(&before, &rules);

        assert_eq!(report.outcome, Outcome::Rejected);
        assert_eq!(report.kingdom, before);
        assert_eq!(report.event, Some(Event::RecruitmentDenied));
    }

    #[test]
    fn test_recruit_needs_gold_and_food() {
        let rules = Rules::default();
        assert!(!recruit_soldier(&kingdom(19, 500, 10), &rules).is_applied());
        assert!(!recruit_soldier(&kingdom(500, 49, 10), &rules).is_applied());
    }

    #[test]
    fn test_wonder_victory_keeps_resources() {
        let rules = Rules::default();
        let before = kingdom(1000, 1000, 50);

        let report = attempt_wonder(&before, &rules);

        assert!(report.is_applied());
        assert_eq!(report.kingdom.phase, Phase::Victory);
        assert_eq!(report.kingdom.resources, before.resources);
        assert_eq!(report.event, Some(Event::WonderCompleted));
    }

    #[test]
    fn test_wonder_can_consume_cost() {
        let rules = Rules {
            wonder_consumes_cost: true,
            ..Rules::default()
        };

        let report = attempt_wonder(&kingdom(1200, 1000, 50), &rules);

        assert_eq!(report.kingdom.phase, Phase::Victory);
        assert_eq!(report.kingdom.resources.gold, 200);
        assert_eq!(report.kingdom.resources.food, 0);
        assert_eq!(report.kingdom.resources.population, 50);
    }

    #[test]
    fn test_wonder_unmet_is_silent() {
        let rules = Rules::default();
        let before = kingdom(1000, 1000, 49);

        let report = attempt_wonder(&before, &rules);

        assert_eq!(report.outcome, Outcome::Rejected);
        assert_eq!(report.kingdom, before);
        assert_eq!(report.event, None);
    }

    #[test]
    fn test_terminal_kingdom_rejects_everything() {
        let rules = Rules::default();
        for phase in [Phase::GameOver, Phase::Victory] {
            let mut before = kingdom(5000, 5000, 100);
            before.phase = phase;

            let build = buy_building(&before, &rules, BuildingKind::Farm);
            assert_eq!(build.kingdom, before);
            assert_eq!(build.event, Some(Event::ReignEnded));

            let recruit = recruit_soldier(&before, &rules);
            assert_eq!(recruit.kingdom, before);

            let wonder = attempt_wonder(&before, &rules);
            assert_eq!(wonder.kingdom, before);
            assert_eq!(wonder.event, None);
        }
    }
}
