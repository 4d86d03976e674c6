//! Configuration tables: costs, production rates and event constants.
//!
//! [`Rules::default`] reproduces the classic Pocket Kingdom balance. Any
//! subset of fields can be overridden from a JSON file; missing fields keep
//! their defaults.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ParseBuildingError, RulesError, RulesResult};

/// Kinds of building the player can construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildingKind {
    /// Produces food.
    Farm,
    /// Produces gold.
    Mine,
    /// Unlocks soldier recruitment.
    Barracks,
    /// Raises the population cap.
    Houses,
}

impl BuildingKind {
    /// Every building kind, in menu order.
    pub const ALL: [Self; 4] = [Self::Houses, Self::Farm, Self::Mine, Self::Barracks];

    /// Key used in rule files and typed commands.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Farm => "farm",
            Self::Mine => "mine",
            Self::Barracks => "barracks",
            Self::Houses => "houses",
        }
    }

    /// Human-readable name used in log messages.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Farm => "Farm",
            Self::Mine => "Mine",
            Self::Barracks => "Barracks",
            Self::Houses => "House",
        }
    }
}

impl fmt::Display for BuildingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for BuildingKind {
    type Err = ParseBuildingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "farm" | "farms" => Ok(Self::Farm),
            "mine" | "mines" => Ok(Self::Mine),
            "barracks" => Ok(Self::Barracks),
            "houses" | "house" => Ok(Self::Houses),
            _ => Err(ParseBuildingError(s.to_string())),
        }
    }
}

/// Price of a purchase. `population` is a threshold for the wonder and a
/// head count for soldiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Cost {
    /// Gold required.
    pub gold: u32,
    /// Food required.
    pub food: u32,
    /// Population required.
    pub population: u32,
}

impl Cost {
    /// Cost in gold and food only.
    #[must_use]
    pub const fn new(gold: u32, food: u32) -> Self {
        Self {
            gold,
            food,
            population: 0,
        }
    }
}

/// Construction cost for each building kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildingCosts {
    /// Farm cost.
    pub farm: Cost,
    /// Mine cost.
    pub mine: Cost,
    /// Barracks cost.
    pub barracks: Cost,
    /// Houses cost.
    pub houses: Cost,
}

impl Default for BuildingCosts {
    fn default() -> Self {
        Self {
            farm: Cost::new(50, 0),
            mine: Cost::new(100, 20),
            barracks: Cost::new(150, 50),
            houses: Cost::new(30, 30),
        }
    }
}

impl BuildingCosts {
    /// Cost for a single kind.
    #[must_use]
    pub const fn get(&self, kind: BuildingKind) -> Cost {
        match kind {
            BuildingKind::Farm => self.farm,
            BuildingKind::Mine => self.mine,
            BuildingKind::Barracks => self.barracks,
            BuildingKind::Houses => self.houses,
        }
    }
}

/// Per-turn production and consumption rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Rates {
    /// Food produced by each farm.
    pub food_per_farm: u32,
    /// Gold produced by each mine.
    pub gold_per_mine: u32,
    /// Gold paid by each person (taxes).
    pub gold_per_person: u32,
    /// Population capacity provided by each house.
    pub people_per_house: u32,
    /// Food eaten by each person.
    pub food_per_person: u32,
    /// Food eaten by each soldier.
    pub food_per_soldier: u32,
    /// People gained on a turn with surplus and free housing.
    pub growth_per_turn: u32,
}

impl Default for Rates {
    fn default() -> Self {
        Self {
            food_per_farm: 15,
            gold_per_mine: 10,
            gold_per_person: 1,
            people_per_house: 5,
            food_per_person: 2,
            food_per_soldier: 3,
            growth_per_turn: 1,
        }
    }
}

/// Famine and raid constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EventRules {
    /// Each full block of this much missing food kills one extra person.
    pub famine_divisor: u32,
    /// Raids can only happen once the turn counter is above this value.
    pub raid_start_turn: u32,
    /// Probability that an eligible turn brings a raid.
    pub raid_chance: f64,
    /// Raid strength grows by this factor per turn.
    pub raid_growth: f64,
    /// Flat raid strength added on top of the turn scaling.
    pub raid_base_strength: u32,
    /// Gold looted per point of strength when a raid is repelled.
    pub loot_per_strength: u32,
    /// Gold lost per point of unmatched raid strength.
    pub gold_lost_per_damage: u32,
    /// One person is lost per this many points of unmatched raid strength.
    pub damage_per_casualty: u32,
}

impl Default for EventRules {
    fn default() -> Self {
        Self {
            famine_divisor: 5,
            raid_start_turn: 5,
            raid_chance: 0.25,
            raid_growth: 1.2,
            raid_base_strength: 2,
            loot_per_strength: 5,
            gold_lost_per_damage: 10,
            damage_per_casualty: 2,
        }
    }
}

/// Resources and buildings a fresh kingdom starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StartProfile {
    /// Starting gold.
    pub gold: u32,
    /// Starting food.
    pub food: u32,
    /// Starting population.
    pub population: u32,
    /// Starting army.
    pub army: u32,
    /// Starting farms.
    pub farm: u32,
    /// Starting mines.
    pub mine: u32,
    /// Starting barracks.
    pub barracks: u32,
    /// Starting houses.
    pub houses: u32,
}

impl Default for StartProfile {
    fn default() -> Self {
        Self {
            gold: 100,
            food: 100,
            population: 10,
            army: 0,
            farm: 1,
            mine: 0,
            barracks: 0,
            houses: 1,
        }
    }
}

/// Complete rule set for a game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Rules {
    /// Building construction costs.
    pub buildings: BuildingCosts,
    /// Cost of recruiting one soldier (population is the head count spent).
    pub soldier: Cost,
    /// Threshold for completing the Grand Castle.
    pub wonder: Cost,
    /// Production and consumption rates.
    pub rates: Rates,
    /// Famine and raid constants.
    pub events: EventRules,
    /// Initial kingdom.
    pub start: StartProfile,
    /// Number of entries the chronicle keeps.
    pub log_capacity: usize,
    /// Deduct the wonder's gold and food on victory.
    pub wonder_consumes_cost: bool,
    /// Report a famine even when a raid happens on the same turn.
    pub report_all_events: bool,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            buildings: BuildingCosts::default(),
            soldier: Cost {
                gold: 20,
                food: 50,
                population: 1,
            },
            wonder: Cost {
                gold: 1000,
                food: 1000,
                population: 50,
            },
            rates: Rates::default(),
            events: EventRules::default(),
            start: StartProfile::default(),
            log_capacity: 6,
            wonder_consumes_cost: false,
            report_all_events: false,
        }
    }
}

impl Rules {
    /// Parse rules from JSON, filling omitted fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the rules are invalid.
    pub fn from_json(json: &str) -> RulesResult<Self> {
        let rules: Self = serde_json::from_str(json)?;
        rules.validate()?;
        Ok(rules)
    }

    /// Load rules from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// rules are invalid.
    pub fn load(path: &Path) -> RulesResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| RulesError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Check that the rules can drive a game.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> RulesResult<()> {
        let events = &self.events;
        if !(0.0..=1.0).contains(&events.raid_chance) {
            return Err(RulesError::RaidChanceOutOfRange(events.raid_chance));
        }
        if !events.raid_growth.is_finite() || events.raid_growth < 0.0 {
            return Err(RulesError::InvalidRaidGrowth(events.raid_growth));
        }
        if events.famine_divisor == 0 {
            return Err(RulesError::ZeroDivisor("famine_divisor"));
        }
        if events.damage_per_casualty == 0 {
            return Err(RulesError::ZeroDivisor("damage_per_casualty"));
        }
        if self.soldier.population == 0 {
            return Err(RulesError::ZeroSoldierHeadcount);
        }
        if self.log_capacity == 0 {
            return Err(RulesError::ZeroLogCapacity);
        }
        Ok(())
    }
}
