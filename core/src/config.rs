//! Game configuration, per-level overrides, and declarative level records.

use serde::{Deserialize, Serialize};

use crate::goal::LevelGoals;
use crate::{ItemKind, ResourceKind};

/// Cost table for one construction kind: required item counts, all of which
/// must be covered before any is consumed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildCost {
    entries: Vec<(ItemKind, u32)>,
}

impl BuildCost {
    /// Creates a cost table from explicit requirements.
    #[must_use]
    pub fn new(entries: Vec<(ItemKind, u32)>) -> Self {
        Self { entries }
    }

    /// Creates a cost table from a requirement slice.
    #[must_use]
    pub fn of(entries: &[(ItemKind, u32)]) -> Self {
        Self {
            entries: entries.to_vec(),
        }
    }

    /// The individual item requirements.
    #[must_use]
    pub fn entries(&self) -> &[(ItemKind, u32)] {
        &self.entries
    }
}

/// Relative spawn weights for the five harvestable resources.
///
/// Tile counts per resource are proportional to these weights up to
/// rounding; any rounding shortfall is filled with wood.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceWeights {
    /// Weight for brick tiles.
    pub brick: u32,
    /// Weight for wheat tiles.
    pub wheat: u32,
    /// Weight for wood tiles.
    pub wood: u32,
    /// Weight for sheep tiles.
    pub sheep: u32,
    /// Weight for stone tiles.
    pub stone: u32,
}

impl ResourceWeights {
    /// Weight configured for the provided resource.
    #[must_use]
    pub const fn weight(&self, resource: ResourceKind) -> u32 {
        match resource {
            ResourceKind::Brick => self.brick,
            ResourceKind::Wheat => self.wheat,
            ResourceKind::Wood => self.wood,
            ResourceKind::Sheep => self.sheep,
            ResourceKind::Stone => self.stone,
        }
    }
}

impl Default for ResourceWeights {
    fn default() -> Self {
        Self {
            brick: 4,
            wheat: 4,
            wood: 4,
            sheep: 4,
            stone: 4,
        }
    }
}

/// Per-resource weight overrides, merged key-by-key onto a base table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceWeightOverrides {
    /// Replacement weight for brick, if any.
    pub brick: Option<u32>,
    /// Replacement weight for wheat, if any.
    pub wheat: Option<u32>,
    /// Replacement weight for wood, if any.
    pub wood: Option<u32>,
    /// Replacement weight for sheep, if any.
    pub sheep: Option<u32>,
    /// Replacement weight for stone, if any.
    pub stone: Option<u32>,
}

impl ResourceWeightOverrides {
    /// Applies the overrides onto a base weight table.
    #[must_use]
    pub fn apply(&self, base: ResourceWeights) -> ResourceWeights {
        ResourceWeights {
            brick: self.brick.unwrap_or(base.brick),
            wheat: self.wheat.unwrap_or(base.wheat),
            wood: self.wood.unwrap_or(base.wood),
            sheep: self.sheep.unwrap_or(base.sheep),
            stone: self.stone.unwrap_or(base.stone),
        }
    }
}

/// Complete configuration the simulation core runs with.
///
/// Supplied by the orchestrating adapter and consumed read-only by every
/// system.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Board radius: every tile lies within this hex distance of the origin.
    pub map_radius: u32,
    /// Circumradius of one hex tile in pixels.
    pub hex_size: f32,
    /// Jump length in hex units for an instantaneous tap.
    pub jump_min_hex: f32,
    /// Jump length in hex units for a fully charged press.
    pub jump_max_hex: f32,
    /// Press duration in milliseconds that charges a jump fully.
    pub press_ms_full: u32,
    /// Cost of constructing a house.
    pub house_cost: BuildCost,
    /// Cost of crafting a weapon batch.
    pub weapon_cost: BuildCost,
    /// Cost of constructing a catapult on top of a house.
    pub catapult_cost: BuildCost,
    /// Weapons produced per craft; values below one behave as one.
    pub weapon_yield: u32,
    /// Score target for threshold-mode victory.
    pub score_to_win: u32,
    /// Turn limit; zero means unlimited.
    pub turn_limit: u32,
    /// Relative tile-distribution weights per resource.
    pub resource_weights: ResourceWeights,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            map_radius: 3,
            hex_size: 44.0,
            jump_min_hex: 0.25,
            jump_max_hex: 3.0,
            press_ms_full: 800,
            house_cost: BuildCost::of(&[
                (ItemKind::Brick, 1),
                (ItemKind::Wheat, 1),
                (ItemKind::Wood, 1),
                (ItemKind::Sheep, 1),
            ]),
            weapon_cost: BuildCost::of(&[(ItemKind::Stone, 2), (ItemKind::Wood, 1)]),
            catapult_cost: BuildCost::of(&[(ItemKind::Stone, 3), (ItemKind::Brick, 2)]),
            weapon_yield: 1,
            score_to_win: 5,
            turn_limit: 0,
            resource_weights: ResourceWeights::default(),
        }
    }
}

/// Partial configuration supplied by a level.
///
/// Every present field replaces the default wholesale, except the resource
/// weights which merge key-by-key.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigOverrides {
    /// Replacement board radius.
    pub map_radius: Option<u32>,
    /// Replacement hex circumradius.
    pub hex_size: Option<f32>,
    /// Replacement minimum jump length.
    pub jump_min_hex: Option<f32>,
    /// Replacement maximum jump length.
    pub jump_max_hex: Option<f32>,
    /// Replacement full-charge press duration.
    pub press_ms_full: Option<u32>,
    /// Replacement house cost table.
    pub house_cost: Option<BuildCost>,
    /// Replacement weapon cost table.
    pub weapon_cost: Option<BuildCost>,
    /// Replacement catapult cost table.
    pub catapult_cost: Option<BuildCost>,
    /// Replacement weapon yield.
    pub weapon_yield: Option<u32>,
    /// Replacement score target.
    pub score_to_win: Option<u32>,
    /// Replacement turn limit.
    pub turn_limit: Option<u32>,
    /// Key-by-key weight overrides.
    pub resource_weights: ResourceWeightOverrides,
}

impl ConfigOverrides {
    /// Merges the overrides onto a base configuration.
    #[must_use]
    pub fn apply(&self, base: &GameConfig) -> GameConfig {
        GameConfig {
            map_radius: self.map_radius.unwrap_or(base.map_radius),
            hex_size: self.hex_size.unwrap_or(base.hex_size),
            jump_min_hex: self.jump_min_hex.unwrap_or(base.jump_min_hex),
            jump_max_hex: self.jump_max_hex.unwrap_or(base.jump_max_hex),
            press_ms_full: self.press_ms_full.unwrap_or(base.press_ms_full),
            house_cost: self.house_cost.clone().unwrap_or_else(|| base.house_cost.clone()),
            weapon_cost: self
                .weapon_cost
                .clone()
                .unwrap_or_else(|| base.weapon_cost.clone()),
            catapult_cost: self
                .catapult_cost
                .clone()
                .unwrap_or_else(|| base.catapult_cost.clone()),
            weapon_yield: self.weapon_yield.unwrap_or(base.weapon_yield),
            score_to_win: self.score_to_win.unwrap_or(base.score_to_win),
            turn_limit: self.turn_limit.unwrap_or(base.turn_limit),
            resource_weights: self.resource_weights.apply(base.resource_weights),
        }
    }
}

/// One step of the per-turn effect sequence a level runs at turn start.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnEffect {
    /// Advance every enemy one position along its ring.
    MoveEnemies,
    /// Attempt the cadence-based enemy spawn for this turn.
    SpawnEnemies,
    /// Fire every registered catapult at its neighbouring tiles.
    CatapultVolley,
    /// Resolve the player sharing a tile with a monster.
    ResolvePlayerContact,
}

/// Declarative per-level capability and scoring record.
///
/// Levels differ only through this data; one generic turn-processing routine
/// consumes it, so every level ruleset is independently testable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelRules {
    /// Whether the enemy system participates at all.
    pub enemies_enabled: bool,
    /// Whether catapult construction is available.
    pub catapults_enabled: bool,
    /// Whether weapon crafting is available.
    pub weapons_enabled: bool,
    /// Score awarded when a house is completed.
    pub house_build_score: u32,
    /// Score awarded when a catapult is completed.
    pub catapult_build_score: u32,
    /// Enemy spawn cadence in turns; zero disables spawning.
    pub spawn_rate: u32,
    /// Ordered effect steps executed at the start of every turn.
    pub turn_effects: Vec<TurnEffect>,
}

impl Default for LevelRules {
    fn default() -> Self {
        Self {
            enemies_enabled: false,
            catapults_enabled: false,
            weapons_enabled: false,
            house_build_score: 1,
            catapult_build_score: 2,
            spawn_rate: 5,
            turn_effects: vec![TurnEffect::SpawnEnemies, TurnEffect::ResolvePlayerContact],
        }
    }
}

/// A complete level definition: identity, config overrides, capability
/// record, and optional goal expressions.
#[derive(Clone, Debug, PartialEq)]
pub struct LevelSpec {
    /// Stable level identifier.
    pub id: u32,
    /// Human-readable level name.
    pub name: &'static str,
    /// Partial configuration merged onto the defaults.
    pub overrides: ConfigOverrides,
    /// Capability and scoring record for the generic turn routine.
    pub rules: LevelRules,
    /// Goal expressions; `None` selects legacy threshold victory.
    pub goals: Option<LevelGoals>,
}

impl LevelSpec {
    /// Resolves the effective configuration for this level.
    #[must_use]
    pub fn config(&self) -> GameConfig {
        self.overrides.apply(&GameConfig::default())
    }
}
