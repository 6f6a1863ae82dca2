#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Catapult registry and area attacks.
//!
//! The registry is a derived cache of the board's catapult flags; the board
//! stays the source of truth. Construction here performs only the tile
//! mutation and registration; cost validation and charging belong to the
//! builder. Enemy kamikaze runs and undo both rewrite board flags without
//! passing through this system, so both paths must be followed by
//! [`Catapults::sync_from_board`].

use std::collections::BTreeSet;

use hexhop_board::Board;
use hexhop_core::{Axial, PixelPoint};
use hexhop_system_enemies::Enemies;

/// Registry of tiles carrying an active catapult.
#[derive(Clone, Debug, Default)]
pub struct Catapults {
    spots: BTreeSet<Axial>,
}

impl Catapults {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered catapults.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.spots.len() as u32
    }

    /// Registered coordinates in sorted order.
    pub fn spots(&self) -> impl Iterator<Item = Axial> + '_ {
        self.spots.iter().copied()
    }

    /// Converts the house under the given position into a catapult.
    ///
    /// The tile must currently carry a house; the swap is delegated to the
    /// board's field-level API and the coordinate is registered. No resource
    /// logic runs here; the builder has already validated and charged the
    /// cost.
    pub fn build_at(&mut self, board: &mut Board, pos: PixelPoint) -> bool {
        let Some(coord) = board.tile_at_pixel(pos).map(|tile| tile.axial()) else {
            return false;
        };
        if !board.swap_house_for_catapult(coord) {
            return false;
        }
        let _ = self.spots.insert(coord);
        true
    }

    /// Fires every registered catapult at its six neighbouring tiles.
    ///
    /// Enemies on any in-board neighbour are bulk-removed. Returns every
    /// attacked coordinate. Never awards score; construction scoring is the
    /// turn sequencer's concern.
    pub fn attack(&self, board: &Board, enemies: &mut Enemies) -> Vec<Axial> {
        let mut attacked = Vec::new();
        for &spot in &self.spots {
            if board.tile(spot).is_none() {
                continue;
            }
            let neighbors: Vec<Axial> = spot
                .neighbors()
                .into_iter()
                .filter(|&coord| board.tile(coord).is_some())
                .collect();
            let _ = enemies.remove_at(&neighbors);
            attacked.extend(neighbors);
        }
        attacked
    }

    /// Rebuilds the registry from the board's catapult flags.
    ///
    /// Required after any path that mutates the flags directly: kamikaze
    /// destruction and snapshot restoration.
    pub fn sync_from_board(&mut self, board: &Board) {
        self.spots = board
            .iter()
            .filter(|tile| tile.has_catapult())
            .map(|tile| tile.axial())
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::Catapults;
    use hexhop_board::Board;
    use hexhop_core::{Axial, GameConfig};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn fresh_board() -> Board {
        let config = GameConfig {
            map_radius: 2,
            ..GameConfig::default()
        };
        Board::generate(&config, &mut ChaCha8Rng::seed_from_u64(31))
    }

    #[test]
    fn building_requires_an_existing_house() {
        let mut board = fresh_board();
        let mut catapults = Catapults::new();
        let tile = board.tile(Axial::origin()).expect("center tile");
        let pos = tile.center();

        assert!(!catapults.build_at(&mut board, pos));
        assert!(board.place_house(Axial::origin()));
        assert!(catapults.build_at(&mut board, pos));
        assert_eq!(catapults.count(), 1);

        let tile = board.tile(Axial::origin()).expect("center tile");
        assert!(tile.has_catapult());
        assert!(!tile.has_house());
    }

    #[test]
    fn sync_drops_coordinates_razed_behind_the_registry() {
        let mut board = fresh_board();
        let mut catapults = Catapults::new();
        assert!(board.place_house(Axial::origin()));
        let pos = board.tile(Axial::origin()).expect("tile").center();
        assert!(catapults.build_at(&mut board, pos));

        board.raze(Axial::origin());
        catapults.sync_from_board(&board);
        assert_eq!(catapults.count(), 0);
    }
}
