#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared contracts for the HexHop simulation engine.
//!
//! This crate defines the leaf vocabulary every other workspace crate speaks:
//! axial hex geometry, resource and inventory kinds, game configuration and
//! level records, goal expressions, and the closed result enumerations that
//! replace exceptions for expected game outcomes. It depends on nothing else
//! in the workspace so that systems and adapters can share types without
//! sharing state.

pub mod config;
pub mod geometry;
pub mod goal;

use serde::{Deserialize, Serialize};

pub use config::{
    BuildCost, ConfigOverrides, GameConfig, LevelRules, LevelSpec, ResourceWeightOverrides,
    ResourceWeights, TurnEffect,
};
pub use geometry::{axial_to_pixel, hex_vertices, point_in_hex, Axial, PixelPoint};
pub use goal::{GoalAtom, GoalExpr, LevelGoals};

/// Resources that can be harvested from board tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ResourceKind {
    /// Brick, harvested from clay tiles.
    Brick,
    /// Wheat, harvested from field tiles.
    Wheat,
    /// Wood, harvested from forest tiles.
    Wood,
    /// Sheep, harvested from pasture tiles.
    Sheep,
    /// Stone, harvested from quarry tiles.
    Stone,
}

impl ResourceKind {
    /// All harvestable resource kinds in their canonical order.
    pub const ALL: [ResourceKind; 5] = [
        ResourceKind::Brick,
        ResourceKind::Wheat,
        ResourceKind::Wood,
        ResourceKind::Sheep,
        ResourceKind::Stone,
    ];
}

/// Kinds of items a player can hold in inventory.
///
/// Extends [`ResourceKind`] with the crafted weapon, which is produced by the
/// build economy rather than harvested from tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ItemKind {
    /// Brick resource.
    Brick,
    /// Wheat resource.
    Wheat,
    /// Wood resource.
    Wood,
    /// Sheep resource.
    Sheep,
    /// Stone resource.
    Stone,
    /// Crafted weapon, consumed when fighting a monster.
    Weapon,
}

impl ItemKind {
    /// All inventory kinds in their canonical order.
    pub const ALL: [ItemKind; 6] = [
        ItemKind::Brick,
        ItemKind::Wheat,
        ItemKind::Wood,
        ItemKind::Sheep,
        ItemKind::Stone,
        ItemKind::Weapon,
    ];

    const fn index(self) -> usize {
        match self {
            ItemKind::Brick => 0,
            ItemKind::Wheat => 1,
            ItemKind::Wood => 2,
            ItemKind::Sheep => 3,
            ItemKind::Stone => 4,
            ItemKind::Weapon => 5,
        }
    }
}

impl From<ResourceKind> for ItemKind {
    fn from(resource: ResourceKind) -> Self {
        match resource {
            ResourceKind::Brick => ItemKind::Brick,
            ResourceKind::Wheat => ItemKind::Wheat,
            ResourceKind::Wood => ItemKind::Wood,
            ResourceKind::Sheep => ItemKind::Sheep,
            ResourceKind::Stone => ItemKind::Stone,
        }
    }
}

/// Dense per-kind item counts held by the player.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    counts: [u32; 6],
}

impl Inventory {
    /// Creates an empty inventory.
    #[must_use]
    pub const fn new() -> Self {
        Self { counts: [0; 6] }
    }

    /// Number of items of the provided kind currently held.
    #[must_use]
    pub const fn count(&self, kind: ItemKind) -> u32 {
        self.counts[kind.index()]
    }

    /// Adds the provided number of items of one kind.
    pub fn add(&mut self, kind: ItemKind, amount: u32) {
        let slot = &mut self.counts[kind.index()];
        *slot = slot.saturating_add(amount);
    }

    /// Removes up to `amount` items of one kind, clamping at zero.
    pub fn remove(&mut self, kind: ItemKind, amount: u32) {
        let slot = &mut self.counts[kind.index()];
        *slot = slot.saturating_sub(amount);
    }

    /// Reports whether every requirement of the cost table is covered.
    #[must_use]
    pub fn covers(&self, cost: &BuildCost) -> bool {
        cost.entries()
            .iter()
            .all(|&(kind, needed)| self.count(kind) >= needed)
    }

    /// Consumes the cost table all-or-nothing.
    ///
    /// Returns `false` and leaves the inventory untouched when any
    /// requirement is not covered.
    pub fn consume(&mut self, cost: &BuildCost) -> bool {
        if !self.covers(cost) {
            return false;
        }
        for &(kind, needed) in cost.entries() {
            self.remove(kind, needed);
        }
        true
    }
}

/// Mutable per-player simulation state.
///
/// Mutated in place by the rules, builder, and contact-resolution paths and
/// deep-cloned into turn snapshots for undo.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Current position in pixel space.
    pub pos: PixelPoint,
    /// Items currently held.
    pub inventory: Inventory,
    /// Number of houses the player has built.
    pub houses: u32,
    /// Number of completed turns.
    pub turns: u32,
}

impl PlayerState {
    /// Creates a fresh player at the board origin with nothing in hand.
    #[must_use]
    pub fn at_origin() -> Self {
        Self {
            pos: PixelPoint::new(0.0, 0.0),
            inventory: Inventory::new(),
            houses: 0,
            turns: 0,
        }
    }
}

/// Reasons a run can be lost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoseReason {
    /// The player shared a tile with a monster while unarmed.
    Monster,
    /// The player landed outside every tile.
    OutOfMap,
    /// The turn limit expired before the win condition was met.
    TurnLimit,
}

/// Result of a victory evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The win condition is satisfied.
    Win,
    /// A lose condition is satisfied; lose takes priority over win.
    Lose,
    /// Neither condition is satisfied yet.
    Ongoing,
}
