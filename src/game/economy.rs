//! Economy system: production, upkeep, growth, and turn resolution.
//!
//! # Turn Order
//!
//! 1. Advance the turn counter.
//! 2. Compute production and upkeep from the incoming buildings and people.
//! 3. Grow by one person when food is in surplus and housing is free.
//! 4. Famine: a negative granary kills `floor(deficit / 5) + 1` people.
//! 5. Raid: after turn 5, one roll in four brings raiders.
//! 6. An empty kingdom is lost.
//!
//! Exactly one random draw is consumed per resolved turn.

use rand::Rng;
use tracing::{debug, info};

use crate::game::{
    Event, Kingdom, Phase, Rules, famine_deaths, raid_strength, raid_triggers, resolve_raid,
};

/// Production and upkeep for one turn, computed from a kingdom snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnLedger {
    /// Food harvested by farms.
    pub food_produced: u32,
    /// Gold from mines and taxes.
    pub gold_produced: u32,
    /// Food eaten by people and soldiers.
    pub food_consumed: u32,
    /// Population the houses can shelter.
    pub capacity: u32,
    /// People gained this turn.
    pub growth: u32,
}

impl TurnLedger {
    /// Net food change (production minus consumption).
    #[must_use]
    pub fn food_balance(&self) -> i64 {
        i64::from(self.food_produced) - i64::from(self.food_consumed)
    }
}

/// Calculate the ledger the next end of turn will apply.
#[must_use]
pub fn calculate_ledger(kingdom: &Kingdom, rules: &Rules) -> TurnLedger {
    let rates = &rules.rates;
    let res = &kingdom.resources;
    let buildings = &kingdom.buildings;

    let food_produced = buildings.farm.saturating_mul(rates.food_per_farm);
    let gold_produced = buildings
        .mine
        .saturating_mul(rates.gold_per_mine)
        .saturating_add(res.population.saturating_mul(rates.gold_per_person));
    let food_consumed = res
        .population
        .saturating_mul(rates.food_per_person)
        .saturating_add(res.army.saturating_mul(rates.food_per_soldier));
    let capacity = kingdom.population_capacity(rules);

    let growth = if food_produced > food_consumed && res.population < capacity {
        rates.growth_per_turn
    } else {
        0
    };

    TurnLedger {
        food_produced,
        gold_produced,
        food_consumed,
        capacity,
        growth,
    }
}

/// Result of ending a turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReport {
    /// Kingdom after the turn.
    pub kingdom: Kingdom,
    /// Events to log, oldest first: at most one famine or raid event, then
    /// the game-over event if the kingdom emptied.
    pub events: Vec<Event>,
    /// False when the kingdom was already in a terminal phase.
    pub advanced: bool,
}

/// End the turn, drawing the raid roll from `rng`.
///
/// A terminal kingdom is returned unchanged and no roll is drawn.
pub fn resolve_turn<R: Rng>(kingdom: &Kingdom, rules: &Rules, rng: &mut R) -> TurnReport {
    if kingdom.is_over() {
        return unchanged(kingdom);
    }
    let roll: f64 = rng.random();
    resolve_turn_with_roll(kingdom, rules, roll)
}

/// End the turn with an explicit raid roll in `[0, 1)`.
#[must_use]
pub fn resolve_turn_with_roll(kingdom: &Kingdom, rules: &Rules, roll: f64) -> TurnReport {
    if kingdom.is_over() {
        return unchanged(kingdom);
    }

    let mut next = *kingdom;
    next.turn = next.turn.saturating_add(1);

    let ledger = calculate_ledger(kingdom, rules);
    debug!(
        turn = next.turn,
        food_produced = ledger.food_produced,
        food_consumed = ledger.food_consumed,
        gold_produced = ledger.gold_produced,
        growth = ledger.growth,
        "Turn ledger"
    );

    let res = &mut next.resources;
    let food = i64::from(res.food) + ledger.food_balance();
    res.gold = res.gold.saturating_add(ledger.gold_produced);
    res.population = res.population.saturating_add(ledger.growth);

    let mut events = Vec::with_capacity(2);

    if food < 0 {
        let deaths = famine_deaths(food.unsigned_abs(), rules);
        res.population = res.population.saturating_sub(deaths);
        res.food = 0;
        debug!(turn = next.turn, deaths, "Famine");
        events.push(Event::Famine { deaths });
    } else {
        res.food = u32::try_from(food).unwrap_or(u32::MAX);
    }

    if raid_triggers(next.turn, roll, rules) {
        let strength = raid_strength(next.turn, rules);
        let raid = resolve_raid(res, strength, rules);
        debug!(
            turn = next.turn,
            strength,
            army = res.army,
            repelled = raid.repelled,
            "Raid"
        );
        if !rules.report_all_events {
            events.clear();
        }
        events.push(raid.event());
    }

    if res.population == 0 {
        next.phase = Phase::GameOver;
        info!(turn = next.turn, "Kingdom emptied; game over");
        events.push(Event::Desolation);
    }

    TurnReport {
        kingdom: next,
        events,
        advanced: true,
    }
}

fn unchanged(kingdom: &Kingdom) -> TurnReport {
    TurnReport {
        kingdom: *kingdom,
        events: Vec::new(),
        advanced: false,
    }
}
