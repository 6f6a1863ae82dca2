#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative board state for the HexHop engine.
//!
//! The board owns every tile: procedural generation with resource-weighted
//! distribution, O(1) lookup by axial coordinate, pixel hit-testing, and the
//! precomputed ring sequences enemies traverse. Structure flags are mutated
//! only through the field-level API at the bottom of this file; the builder
//! places houses, the catapult system swaps a house for a catapult, and the
//! enemy system razes tiles on kamikaze impact. No other mutation path
//! exists, so the two flags can never be set on the same tile.

use std::collections::HashMap;

use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};

use hexhop_core::{
    axial_to_pixel, point_in_hex, Axial, GameConfig, PixelPoint, ResourceKind,
};

/// Per-side walk directions used to trace a ring, starting from `(radius, 0)`.
///
/// The resulting order is the single ring traversal direction used across the
/// engine; enemy movement advances along it verbatim.
const RING_SIDE_DIRECTIONS: [(i32, i32); 6] =
    [(0, -1), (-1, 0), (-1, 1), (0, 1), (1, 0), (1, -1)];

/// One hexagonal tile of the board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    axial: Axial,
    center: PixelPoint,
    resource: ResourceKind,
    has_house: bool,
    has_catapult: bool,
}

impl Tile {
    /// Axial coordinate of the tile, unique within its board.
    #[must_use]
    pub const fn axial(&self) -> Axial {
        self.axial
    }

    /// Pixel center of the tile.
    #[must_use]
    pub const fn center(&self) -> PixelPoint {
        self.center
    }

    /// Resource harvested when landing on the tile.
    #[must_use]
    pub const fn resource(&self) -> ResourceKind {
        self.resource
    }

    /// Whether a house stands on the tile.
    #[must_use]
    pub const fn has_house(&self) -> bool {
        self.has_house
    }

    /// Whether a catapult stands on the tile.
    #[must_use]
    pub const fn has_catapult(&self) -> bool {
        self.has_catapult
    }

    /// Whether any structure stands on the tile.
    #[must_use]
    pub const fn has_structure(&self) -> bool {
        self.has_house || self.has_catapult
    }
}

/// The full hex board covering every axial coordinate within a radius.
#[derive(Clone, Debug)]
pub struct Board {
    tiles: Vec<Tile>,
    by_coord: HashMap<Axial, usize>,
    rings: Vec<Vec<Axial>>,
    hex_size: f32,
}

impl Board {
    /// Generates a fresh board for the provided configuration.
    ///
    /// Enumerates every axial coordinate within `map_radius` of the origin,
    /// deals one entry of the shuffled resource pool to each tile, projects
    /// pixel centers, and precomputes the ring sequence for every radius.
    /// All randomness flows through the injected generator, so equal seeds
    /// reproduce equal boards.
    #[must_use]
    pub fn generate<R: Rng>(config: &GameConfig, rng: &mut R) -> Self {
        let radius = config.map_radius as i32;
        let mut coords = Vec::new();
        for q in -radius..=radius {
            let low = (-radius).max(-q - radius);
            let high = radius.min(-q + radius);
            for r in low..=high {
                coords.push(Axial::new(q, r));
            }
        }

        let mut pool = resource_pool(&config.resource_weights, coords.len());
        pool.shuffle(rng);

        let mut tiles = Vec::with_capacity(coords.len());
        let mut by_coord = HashMap::with_capacity(coords.len());
        for (index, (&axial, &resource)) in coords.iter().zip(pool.iter()).enumerate() {
            tiles.push(Tile {
                axial,
                center: axial_to_pixel(axial, config.hex_size),
                resource,
                has_house: false,
                has_catapult: false,
            });
            let _ = by_coord.insert(axial, index);
        }

        let rings = (1..=config.map_radius)
            .map(|ring_radius| trace_ring(ring_radius, &by_coord))
            .collect();

        Self {
            tiles,
            by_coord,
            rings,
            hex_size: config.hex_size,
        }
    }

    /// Number of tiles on the board.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the board holds no tiles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Iterator over every tile in the stable generation order.
    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Looks up the tile at an axial coordinate.
    #[must_use]
    pub fn tile(&self, axial: Axial) -> Option<&Tile> {
        self.by_coord.get(&axial).map(|&index| &self.tiles[index])
    }

    /// Every tile whose hexagonal footprint contains the point, in tile
    /// order. Empty when the point lies outside the board.
    #[must_use]
    pub fn tiles_at_pixel(&self, point: PixelPoint) -> Vec<&Tile> {
        self.tiles
            .iter()
            .filter(|tile| point_in_hex(tile.center, self.hex_size, point))
            .collect()
    }

    /// The topmost tile containing the point: the last match, with no
    /// nearest-tile fallback. A point outside every tile is a hard miss.
    #[must_use]
    pub fn tile_at_pixel(&self, point: PixelPoint) -> Option<&Tile> {
        self.tiles_at_pixel(point).pop()
    }

    /// Ring radius of a coordinate: its hex distance from the origin.
    #[must_use]
    pub fn ring_radius(&self, axial: Axial) -> u32 {
        axial.distance_from_origin()
    }

    /// The precomputed ring sequence for a radius, or empty when the radius
    /// is zero or beyond the board.
    #[must_use]
    pub fn ring(&self, radius: u32) -> &[Axial] {
        match radius.checked_sub(1) {
            Some(index) => self
                .rings
                .get(index as usize)
                .map_or(&[], |ring| ring.as_slice()),
            None => &[],
        }
    }

    /// House flags over the stable tile order, for turn snapshots.
    #[must_use]
    pub fn house_flags(&self) -> Vec<bool> {
        self.tiles.iter().map(|tile| tile.has_house).collect()
    }

    /// Restores house flags captured by [`Board::house_flags`].
    pub fn set_house_flags(&mut self, flags: &[bool]) {
        for (tile, &flag) in self.tiles.iter_mut().zip(flags) {
            tile.has_house = flag;
        }
    }

    /// Catapult flags over the stable tile order, for turn snapshots.
    #[must_use]
    pub fn catapult_flags(&self) -> Vec<bool> {
        self.tiles.iter().map(|tile| tile.has_catapult).collect()
    }

    /// Restores catapult flags captured by [`Board::catapult_flags`].
    pub fn set_catapult_flags(&mut self, flags: &[bool]) {
        for (tile, &flag) in self.tiles.iter_mut().zip(flags) {
            tile.has_catapult = flag;
        }
    }

    /// Places a house on an empty tile. Builder-system mutation right.
    ///
    /// Returns `false` when the tile is missing or already carries a
    /// structure.
    pub fn place_house(&mut self, axial: Axial) -> bool {
        match self.tile_mut(axial) {
            Some(tile) if !tile.has_structure() => {
                tile.has_house = true;
                true
            }
            _ => false,
        }
    }

    /// Replaces a house with a catapult in place. Catapult-system mutation
    /// right.
    ///
    /// Returns `false` when the tile is missing or carries no house.
    pub fn swap_house_for_catapult(&mut self, axial: Axial) -> bool {
        match self.tile_mut(axial) {
            Some(tile) if tile.has_house => {
                tile.has_house = false;
                tile.has_catapult = true;
                true
            }
            _ => false,
        }
    }

    /// Clears both structure flags of a tile. Enemy-system mutation right,
    /// used when an enemy crashes into a building.
    pub fn raze(&mut self, axial: Axial) {
        if let Some(tile) = self.tile_mut(axial) {
            tile.has_house = false;
            tile.has_catapult = false;
        }
    }

    fn tile_mut(&mut self, axial: Axial) -> Option<&mut Tile> {
        let index = *self.by_coord.get(&axial)?;
        self.tiles.get_mut(index)
    }
}

/// Builds the resource pool for `tile_count` tiles: per-resource counts
/// proportional to the configured weights up to rounding, truncated to the
/// tile count, with any shortfall filled by wood.
fn resource_pool(weights: &hexhop_core::ResourceWeights, tile_count: usize) -> Vec<ResourceKind> {
    let total: u32 = ResourceKind::ALL
        .iter()
        .map(|&resource| weights.weight(resource))
        .sum();
    let total = total.max(1) as f64;

    let mut pool = Vec::with_capacity(tile_count);
    for resource in ResourceKind::ALL {
        let share = weights.weight(resource) as f64 / total;
        let count = (share * tile_count as f64).round() as usize;
        pool.extend(std::iter::repeat(resource).take(count));
    }

    pool.truncate(tile_count);
    while pool.len() < tile_count {
        pool.push(ResourceKind::Wood);
    }
    pool
}

/// Walks one ring starting at `(radius, 0)`, taking `radius` steps along
/// each of the six side directions.
fn trace_ring(radius: u32, by_coord: &HashMap<Axial, usize>) -> Vec<Axial> {
    let mut q = radius as i32;
    let mut r = 0;
    let mut ring = Vec::with_capacity(6 * radius as usize);
    for (dq, dr) in RING_SIDE_DIRECTIONS {
        for _ in 0..radius {
            let coord = Axial::new(q, r);
            if by_coord.contains_key(&coord) {
                ring.push(coord);
            }
            q += dq;
            r += dr;
        }
    }
    ring
}

#[cfg(test)]
mod tests {
    use super::Board;
    use hexhop_core::{GameConfig, PixelPoint};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn board_with_radius(radius: u32) -> Board {
        let config = GameConfig {
            map_radius: radius,
            ..GameConfig::default()
        };
        Board::generate(&config, &mut ChaCha8Rng::seed_from_u64(7))
    }

    #[test]
    fn generation_is_deterministic_for_equal_seeds() {
        let config = GameConfig::default();
        let first = Board::generate(&config, &mut ChaCha8Rng::seed_from_u64(99));
        let second = Board::generate(&config, &mut ChaCha8Rng::seed_from_u64(99));
        let resources: Vec<_> = first.iter().map(|tile| tile.resource()).collect();
        let other: Vec<_> = second.iter().map(|tile| tile.resource()).collect();
        assert_eq!(resources, other);
    }

    #[test]
    fn origin_point_hits_the_center_tile() {
        let board = board_with_radius(3);
        let tile = board
            .tile_at_pixel(PixelPoint::new(0.0, 0.0))
            .expect("center tile");
        assert_eq!(tile.axial().distance_from_origin(), 0);
    }

    #[test]
    fn far_point_is_a_hard_miss() {
        let board = board_with_radius(2);
        assert!(board.tile_at_pixel(PixelPoint::new(10_000.0, 0.0)).is_none());
    }

    #[test]
    fn structure_mutations_respect_field_ownership() {
        let mut board = board_with_radius(2);
        let coord = board.iter().next().expect("tile").axial();

        assert!(board.place_house(coord));
        assert!(!board.place_house(coord));
        assert!(board.swap_house_for_catapult(coord));
        assert!(!board.swap_house_for_catapult(coord));

        let tile = board.tile(coord).expect("tile");
        assert!(!tile.has_house());
        assert!(tile.has_catapult());

        board.raze(coord);
        let tile = board.tile(coord).expect("tile");
        assert!(!tile.has_structure());
    }
}
