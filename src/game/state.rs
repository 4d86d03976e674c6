//! Kingdom state: resources, buildings, turn counter and phase.

use serde::{Deserialize, Serialize};

use crate::game::{BuildingKind, Cost, Rules};

/// Stockpiles and head counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Resources {
    /// Treasury.
    pub gold: u32,
    /// Granary.
    pub food: u32,
    /// Civilians.
    pub population: u32,
    /// Soldiers.
    pub army: u32,
}

impl Resources {
    /// Whether gold and food cover a cost.
    #[must_use]
    pub const fn can_afford(&self, cost: Cost) -> bool {
        self.gold >= cost.gold && self.food >= cost.food
    }

    /// Deduct the gold and food of a cost. Saturates at zero.
    pub fn pay(&mut self, cost: Cost) {
        self.gold = self.gold.saturating_sub(cost.gold);
        self.food = self.food.saturating_sub(cost.food);
    }
}

/// Building counts. Counts only ever go up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Buildings {
    /// Farms owned.
    pub farm: u32,
    /// Mines owned.
    pub mine: u32,
    /// Barracks owned.
    pub barracks: u32,
    /// Houses owned.
    pub houses: u32,
}

impl Buildings {
    /// Count for a single kind.
    #[must_use]
    pub const fn count(&self, kind: BuildingKind) -> u32 {
        match kind {
            BuildingKind::Farm => self.farm,
            BuildingKind::Mine => self.mine,
            BuildingKind::Barracks => self.barracks,
            BuildingKind::Houses => self.houses,
        }
    }

    /// Add one building of the given kind.
    pub fn add(&mut self, kind: BuildingKind) {
        let slot = match kind {
            BuildingKind::Farm => &mut self.farm,
            BuildingKind::Mine => &mut self.mine,
            BuildingKind::Barracks => &mut self.barracks,
            BuildingKind::Houses => &mut self.houses,
        };
        *slot = slot.saturating_add(1);
    }

    /// Whether every count is at least the count in `earlier`.
    #[must_use]
    pub fn dominates(&self, earlier: &Self) -> bool {
        BuildingKind::ALL
            .iter()
            .all(|&kind| self.count(kind) >= earlier.count(kind))
    }
}

/// Game phase. `GameOver` and `Victory` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Phase {
    /// The reign continues.
    #[default]
    Playing,
    /// The population died out.
    GameOver,
    /// The Grand Castle was completed.
    Victory,
}

impl Phase {
    /// Whether no further turns or purchases are allowed.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Playing)
    }
}

/// Complete kingdom snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kingdom {
    /// Current stockpiles.
    pub resources: Resources,
    /// Current buildings.
    pub buildings: Buildings,
    /// Turn number, starting at 1.
    pub turn: u32,
    /// Current phase.
    pub phase: Phase,
}

impl Default for Kingdom {
    fn default() -> Self {
        Self::new(&Rules::default())
    }
}

impl Kingdom {
    /// Create the starting kingdom described by the rules.
    #[must_use]
    pub fn new(rules: &Rules) -> Self {
        let start = &rules.start;
        Self {
            resources: Resources {
                gold: start.gold,
                food: start.food,
                population: start.population,
                army: start.army,
            },
            buildings: Buildings {
                farm: start.farm,
                mine: start.mine,
                barracks: start.barracks,
                houses: start.houses,
            },
            turn: 1,
            phase: Phase::Playing,
        }
    }

    /// Get the current turn number.
    #[must_use]
    pub const fn turn(&self) -> u32 {
        self.turn
    }

    /// Check if the game has ended, won or lost.
    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Maximum population the houses can shelter.
    #[must_use]
    pub fn population_capacity(&self, rules: &Rules) -> u32 {
        self.buildings
            .houses
            .saturating_mul(rules.rates.people_per_house)
    }

    /// Soldiers can only be trained once a barracks stands.
    #[must_use]
    pub const fn recruitment_unlocked(&self) -> bool {
        self.buildings.barracks > 0
    }

    /// Progress towards the Grand Castle.
    #[must_use]
    pub fn wonder_progress(&self, rules: &Rules) -> WonderProgress {
        WonderProgress {
            gold: (self.resources.gold, rules.wonder.gold),
            food: (self.resources.food, rules.wonder.food),
            population: (self.resources.population, rules.wonder.population),
        }
    }
}

/// Current versus required amounts for the wonder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WonderProgress {
    /// (current, required) gold.
    pub gold: (u32, u32),
    /// (current, required) food.
    pub food: (u32, u32),
    /// (current, required) population.
    pub population: (u32, u32),
}

impl WonderProgress {
    /// Whether the gold requirement is met.
    #[must_use]
    pub const fn gold_met(&self) -> bool {
        self.gold.0 >= self.gold.1
    }

    /// Whether the food requirement is met.
    #[must_use]
    pub const fn food_met(&self) -> bool {
        self.food.0 >= self.food.1
    }

    /// Whether the population requirement is met.
    #[must_use]
    pub const fn population_met(&self) -> bool {
        self.population.0 >= self.population.1
    }

    /// Whether the wonder can be built right now.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.gold_met() && self.food_met() && self.population_met()
    }
}
