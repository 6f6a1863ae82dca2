#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Build economy: validation and application of construction requests.
//!
//! Three construction kinds exist, each with a configured cost table. Houses
//! require an empty tile under the player; weapons have no tile
//! precondition; catapults require a house under the player and delegate the
//! tile mutation to the catapult system. Every `can_build_*` predicate is
//! side-effect-free and mirrors its `build_*` mutator exactly, so
//! `can_build_x == true` if and only if `build_x` succeeds.

use hexhop_board::Board;
use hexhop_core::{GameConfig, ItemKind, PlayerState};
use hexhop_system_catapult::Catapults;

/// Stateless validator and mutator for the build economy.
#[derive(Clone, Debug)]
pub struct Builder {
    config: GameConfig,
}

impl Builder {
    /// Creates a builder bound to the provided configuration.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self { config }
    }

    /// Whether a house can be built on the player's current tile.
    #[must_use]
    pub fn can_build_house(&self, player: &PlayerState, board: &Board) -> bool {
        let Some(tile) = board.tile_at_pixel(player.pos) else {
            return false;
        };
        !tile.has_structure() && player.inventory.covers(&self.config.house_cost)
    }

    /// Builds a house on the player's current tile.
    ///
    /// Consumes the cost, sets the house flag via the board's builder
    /// mutation right, and increments the player's house counter.
    pub fn build_house(&self, player: &mut PlayerState, board: &mut Board) -> bool {
        let Some(coord) = board.tile_at_pixel(player.pos).map(|tile| tile.axial()) else {
            return false;
        };
        let Some(tile) = board.tile(coord) else {
            return false;
        };
        if tile.has_structure() {
            return false;
        }
        if !player.inventory.consume(&self.config.house_cost) {
            return false;
        }
        let placed = board.place_house(coord);
        debug_assert!(placed, "empty tile must accept a house");
        player.houses += 1;
        true
    }

    /// Whether a weapon batch can be crafted. No tile precondition.
    #[must_use]
    pub fn can_build_weapon(&self, player: &PlayerState) -> bool {
        player.inventory.covers(&self.config.weapon_cost)
    }

    /// Crafts a weapon batch, adding the configured yield (at least one).
    pub fn build_weapon(&self, player: &mut PlayerState) -> bool {
        if !player.inventory.consume(&self.config.weapon_cost) {
            return false;
        }
        player
            .inventory
            .add(ItemKind::Weapon, self.config.weapon_yield.max(1));
        true
    }

    /// Whether a catapult can be built on the player's current tile.
    ///
    /// Requires a tile that already carries a house.
    #[must_use]
    pub fn can_build_catapult(&self, player: &PlayerState, board: &Board) -> bool {
        let Some(tile) = board.tile_at_pixel(player.pos) else {
            return false;
        };
        tile.has_house() && player.inventory.covers(&self.config.catapult_cost)
    }

    /// Builds a catapult in place of the house under the player.
    ///
    /// Consumes the cost and delegates the house-to-catapult swap and
    /// registration to the catapult system.
    pub fn build_catapult(
        &self,
        player: &mut PlayerState,
        board: &mut Board,
        catapults: &mut Catapults,
    ) -> bool {
        if !self.can_build_catapult(player, board) {
            return false;
        }
        if !player.inventory.consume(&self.config.catapult_cost) {
            return false;
        }
        let built = catapults.build_at(board, player.pos);
        debug_assert!(built, "validated tile must accept a catapult");
        built
    }
}
