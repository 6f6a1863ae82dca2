#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Enemy spawn cadence, ring movement, and combat bookkeeping.
//!
//! Enemies occupy board coordinates and advance one position per turn along
//! their ring's precomputed sequence. Stepping onto a tile that carries a
//! structure razes the structure and destroys the enemy (the only structure
//! removal besides the house-to-catapult swap). Movement failures are benign
//! stalls, never errors: an enemy that cannot find its ring, its own
//! position, or a free destination simply holds for the turn.

use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use hexhop_board::Board;
use hexhop_core::{Axial, PixelPoint};

/// Spawn tiles must be farther than this many pixels from the player.
const MIN_SPAWN_DISTANCE: f32 = 20.0;

/// Serializable enemy-system state for turn snapshots.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemiesState {
    /// Enemy coordinates in processing order.
    pub positions: Vec<Axial>,
    /// Turn number of the most recent spawn, if any.
    pub last_turn_spawned: Option<u32>,
}

/// The roaming-monster system.
#[derive(Debug)]
pub struct Enemies {
    enemies: Vec<Axial>,
    last_turn_spawned: Option<u32>,
    rng: ChaCha8Rng,
}

impl Enemies {
    /// Creates an empty enemy system seeded for deterministic spawning.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            enemies: Vec::new(),
            last_turn_spawned: None,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Number of live enemies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    /// Whether no enemies are alive.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    /// Enemy coordinates in processing order.
    #[must_use]
    pub fn positions(&self) -> &[Axial] {
        &self.enemies
    }

    /// Attempts the cadence-based spawn for a turn.
    ///
    /// Fires exactly when `spawn_rate > 0`, `turn > 0`, `turn` is a multiple
    /// of the cadence, and this turn has not spawned before. The spawn tile
    /// is chosen uniformly among tiles with no structure, no enemy, and a
    /// pixel distance from the player above the fixed minimum; when no tile
    /// qualifies the turn is still marked as handled.
    pub fn try_spawn_by_turns(
        &mut self,
        turn: u32,
        spawn_rate: u32,
        player_pos: PixelPoint,
        board: &Board,
    ) {
        if spawn_rate == 0 || turn == 0 || turn % spawn_rate != 0 {
            return;
        }
        if self.last_turn_spawned == Some(turn) {
            return;
        }
        self.spawn(player_pos, board);
        self.last_turn_spawned = Some(turn);
    }

    fn spawn(&mut self, player_pos: PixelPoint, board: &Board) {
        let eligible: Vec<Axial> = board
            .iter()
            .filter(|tile| {
                !tile.has_structure()
                    && !self.enemies.contains(&tile.axial())
                    && tile.center().distance_to(player_pos) > MIN_SPAWN_DISTANCE
            })
            .map(|tile| tile.axial())
            .collect();

        if let Some(&coord) = eligible.choose(&mut self.rng) {
            self.enemies.push(coord);
        }
    }

    /// Advances every enemy one position along its ring's stored sequence.
    ///
    /// Radius-zero enemies hold. An enemy whose destination is occupied by
    /// another enemy, or whose ring or self-index cannot be found, holds in
    /// place. A destination carrying a house or catapult is razed and the
    /// enemy removes itself.
    pub fn advance_all(&mut self, board: &mut Board) {
        let mut index = 0;
        while index < self.enemies.len() {
            let coord = self.enemies[index];
            let radius = board.ring_radius(coord);
            if radius == 0 {
                index += 1;
                continue;
            }

            let ring = board.ring(radius);
            let Some(position) = ring.iter().position(|&entry| entry == coord) else {
                index += 1;
                continue;
            };
            let next = ring[(position + 1) % ring.len()];

            let blocked = self
                .enemies
                .iter()
                .enumerate()
                .any(|(other, &entry)| other != index && entry == next);
            if blocked {
                index += 1;
                continue;
            }

            let hits_structure = board.tile(next).is_some_and(|tile| tile.has_structure());
            if hits_structure {
                board.raze(next);
                let _ = self.enemies.remove(index);
                continue;
            }

            self.enemies[index] = next;
            index += 1;
        }
    }

    /// Whether an enemy occupies the coordinate.
    #[must_use]
    pub fn enemy_at(&self, axial: Axial) -> bool {
        self.enemies.contains(&axial)
    }

    /// Removes one enemy at the coordinate. Returns whether one was removed.
    pub fn remove(&mut self, axial: Axial) -> bool {
        match self.enemies.iter().position(|&entry| entry == axial) {
            Some(index) => {
                let _ = self.enemies.remove(index);
                true
            }
            None => false,
        }
    }

    /// Bulk-removes every enemy standing on any of the coordinates, as used
    /// by area attacks. Returns the number removed.
    pub fn remove_at(&mut self, coords: &[Axial]) -> usize {
        let before = self.enemies.len();
        self.enemies.retain(|entry| !coords.contains(entry));
        before - self.enemies.len()
    }

    /// Removes every enemy.
    pub fn clear(&mut self) {
        self.enemies.clear();
    }

    /// Captures the undo state: positions plus the last-spawn marker.
    ///
    /// The RNG stream is deliberately not captured; an undone turn may spawn
    /// on a different tile, which matches replaying a fresh random choice.
    #[must_use]
    pub fn state(&self) -> EnemiesState {
        EnemiesState {
            positions: self.enemies.clone(),
            last_turn_spawned: self.last_turn_spawned,
        }
    }

    /// Restores a previously captured undo state.
    pub fn restore(&mut self, state: &EnemiesState) {
        self.clear();
        self.enemies.extend(state.positions.iter().copied());
        self.last_turn_spawned = state.last_turn_spawned;
    }

    #[cfg(test)]
    fn place_for_test(&mut self, coord: Axial) {
        self.enemies.push(coord);
    }
}

#[cfg(test)]
mod tests {
    use super::Enemies;
    use hexhop_board::Board;
    use hexhop_core::{Axial, GameConfig, PixelPoint};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn fresh_board(radius: u32) -> Board {
        let config = GameConfig {
            map_radius: radius,
            ..GameConfig::default()
        };
        Board::generate(&config, &mut ChaCha8Rng::seed_from_u64(2))
    }

    #[test]
    fn spawn_fires_once_per_distinct_turn() {
        let board = fresh_board(3);
        let mut enemies = Enemies::new(5);
        let player = PixelPoint::new(0.0, 0.0);

        enemies.try_spawn_by_turns(3, 3, player, &board);
        assert_eq!(enemies.len(), 1);
        enemies.try_spawn_by_turns(3, 3, player, &board);
        assert_eq!(enemies.len(), 1);
        enemies.try_spawn_by_turns(6, 3, player, &board);
        assert_eq!(enemies.len(), 2);
    }

    #[test]
    fn spawn_skips_off_cadence_and_zero_turns() {
        let board = fresh_board(2);
        let mut enemies = Enemies::new(5);
        let player = PixelPoint::new(0.0, 0.0);

        enemies.try_spawn_by_turns(0, 3, player, &board);
        enemies.try_spawn_by_turns(2, 3, player, &board);
        enemies.try_spawn_by_turns(4, 0, player, &board);
        assert!(enemies.is_empty());
    }

    #[test]
    fn spawn_keeps_distance_from_the_player() {
        let board = fresh_board(2);
        let mut enemies = Enemies::new(9);
        let player = PixelPoint::new(0.0, 0.0);

        for turn in 1..=30 {
            enemies.try_spawn_by_turns(turn, 1, player, &board);
        }
        for &coord in enemies.positions() {
            let tile = board.tile(coord).expect("tile");
            assert!(tile.center().distance_to(player) > 20.0);
        }
    }

    #[test]
    fn center_enemy_never_moves() {
        let mut board = fresh_board(2);
        let mut enemies = Enemies::new(1);
        enemies.place_for_test(Axial::origin());

        enemies.advance_all(&mut board);
        assert_eq!(enemies.positions(), &[Axial::origin()]);
    }

    #[test]
    fn occupied_destination_makes_the_enemy_hold() {
        let mut board = fresh_board(2);
        let mut enemies = Enemies::new(1);
        let ring = board.ring(1).to_vec();
        enemies.place_for_test(ring[1]);
        enemies.place_for_test(ring[0]);

        enemies.advance_all(&mut board);

        // The first enemy moved into ring[2]; the second wanted ring[1],
        // which was freed in the same pass, so it advanced as well.
        assert_eq!(enemies.positions(), &[ring[2], ring[1]]);

        let mut blocked = Enemies::new(1);
        blocked.place_for_test(ring[0]);
        blocked.place_for_test(ring[1]);
        blocked.advance_all(&mut board);
        // ring[0] wants ring[1], still occupied at that moment: hold.
        assert_eq!(blocked.positions()[0], ring[0]);
    }

    #[test]
    fn kamikaze_razes_the_structure_and_removes_the_enemy() {
        let mut board = fresh_board(2);
        let mut enemies = Enemies::new(1);
        let ring = board.ring(1).to_vec();
        assert!(board.place_house(ring[1]));
        enemies.place_for_test(ring[0]);

        enemies.advance_all(&mut board);

        assert!(enemies.is_empty());
        assert!(!board.tile(ring[1]).expect("tile").has_structure());
    }

    #[test]
    fn clear_removes_every_enemy() {
        let board = fresh_board(2);
        let mut enemies = Enemies::new(4);
        for turn in 1..=3 {
            enemies.try_spawn_by_turns(turn, 1, PixelPoint::new(0.0, 0.0), &board);
        }
        assert!(!enemies.is_empty());

        enemies.clear();
        assert!(enemies.is_empty());
    }

    #[test]
    fn state_round_trips() {
        let board = fresh_board(2);
        let mut enemies = Enemies::new(77);
        enemies.try_spawn_by_turns(3, 3, PixelPoint::new(0.0, 0.0), &board);
        let state = enemies.state();

        let mut restored = Enemies::new(0);
        restored.restore(&state);
        assert_eq!(restored.positions(), enemies.positions());
        assert_eq!(restored.state(), state);
    }
}
