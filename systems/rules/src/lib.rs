#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Jump simulation and landing resolution.
//!
//! Jump simulation is a pure projection from press duration and angle to a
//! landing point; landing resolution settles the player onto the topmost tile
//! containing that point and credits the tile's resource. A landing outside
//! every tile is reported as [`Landing::OutOfMap`] with the player left
//! untouched, and the caller decides whether that ends the run.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use hexhop_board::Board;
use hexhop_core::{Axial, GameConfig, ItemKind, PixelPoint, PlayerState};

/// A jump request: how long the charge was held and in which direction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct JumpIntent {
    /// Held press duration in milliseconds.
    pub press_ms: u32,
    /// Jump direction in radians.
    pub angle_rad: f32,
}

/// Result of settling a landing point against the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Landing {
    /// The player settled on the tile at this coordinate.
    Settled {
        /// Coordinate of the authoritative (topmost) tile.
        axial: Axial,
    },
    /// The point matched no tile; no state was changed.
    OutOfMap,
}

/// Projects a jump to its landing point. Pure; mutates nothing.
///
/// The charge ratio is `min(1, press_ms / press_ms_full)`; the jump length in
/// hex units interpolates between the configured bounds; `hex_pixel` converts
/// hex units to pixels.
#[must_use]
pub fn simulate_jump(
    from: PixelPoint,
    intent: JumpIntent,
    config: &GameConfig,
    hex_pixel: f32,
) -> PixelPoint {
    let full = config.press_ms_full.max(1) as f32;
    let ratio = (intent.press_ms as f32 / full).min(1.0);
    let length_hex = config.jump_min_hex + (config.jump_max_hex - config.jump_min_hex) * ratio;
    let distance = length_hex * hex_pixel;
    PixelPoint::new(
        from.x() + intent.angle_rad.cos() * distance,
        from.y() + intent.angle_rad.sin() * distance,
    )
}

/// Settles a landing point: moves the player and credits the tile resource.
///
/// When several overlapping tiles contain the point the topmost (last) one is
/// authoritative. A house on the landing tile doubles the yield. When no tile
/// contains the point the player is left exactly as it was. Turn counting is
/// not performed here; the turn sequencer owns it.
pub fn settle_landing(player: &mut PlayerState, board: &Board, landing: PixelPoint) -> Landing {
    let Some(tile) = board.tile_at_pixel(landing) else {
        return Landing::OutOfMap;
    };

    player.pos = landing;
    let item = ItemKind::from(tile.resource());
    player.inventory.add(item, 1);
    if tile.has_house() {
        player.inventory.add(item, 1);
    }

    Landing::Settled {
        axial: tile.axial(),
    }
}

/// Phase of the charge/press state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChargePhase {
    /// No press in flight.
    Idle,
    /// A press began at the recorded instant.
    Charging {
        /// Caller-supplied timestamp at which the press began.
        started: Duration,
    },
    /// The press ended after holding for the recorded duration.
    Released {
        /// Time the press was held.
        held: Duration,
    },
}

/// Explicit charge state machine: `Idle → Charging → Released`.
///
/// The held duration is computed once at release from caller-supplied
/// timestamps; no polling is involved. [`ChargeMeter::progress`] exists for
/// display sampling only and never affects the released duration.
#[derive(Clone, Copy, Debug)]
pub struct ChargeMeter {
    phase: ChargePhase,
    full_press: Duration,
}

impl ChargeMeter {
    /// Creates a meter that saturates after the configured full-press time.
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        Self {
            phase: ChargePhase::Idle,
            full_press: Duration::from_millis(u64::from(config.press_ms_full)),
        }
    }

    /// Current phase of the state machine.
    #[must_use]
    pub const fn phase(&self) -> ChargePhase {
        self.phase
    }

    /// Enters the charging phase. Ignored while already charging.
    pub fn begin(&mut self, now: Duration) {
        if let ChargePhase::Charging { .. } = self.phase {
            return;
        }
        self.phase = ChargePhase::Charging { started: now };
    }

    /// Ends the press, computing the held duration once.
    ///
    /// Returns `None` when no charge was in flight.
    pub fn release(&mut self, now: Duration) -> Option<JumpIntentCharge> {
        let ChargePhase::Charging { started } = self.phase else {
            return None;
        };
        let held = now.saturating_sub(started);
        self.phase = ChargePhase::Released { held };
        Some(JumpIntentCharge { held })
    }

    /// Charge fraction in `0..=1` for display purposes.
    #[must_use]
    pub fn progress(&self, now: Duration) -> f32 {
        let held = match self.phase {
            ChargePhase::Idle => return 0.0,
            ChargePhase::Charging { started } => now.saturating_sub(started),
            ChargePhase::Released { held } => held,
        };
        if self.full_press.is_zero() {
            return 1.0;
        }
        (held.as_secs_f32() / self.full_press.as_secs_f32()).min(1.0)
    }

    /// Returns the meter to idle, ready for the next press.
    pub fn reset(&mut self) {
        self.phase = ChargePhase::Idle;
    }
}

/// A completed charge, convertible into a [`JumpIntent`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct JumpIntentCharge {
    held: Duration,
}

impl JumpIntentCharge {
    /// The held duration captured at release.
    #[must_use]
    pub const fn held(&self) -> Duration {
        self.held
    }

    /// Pairs the charge with a direction to form a jump intent.
    #[must_use]
    pub fn with_angle(self, angle_rad: f32) -> JumpIntent {
        let press_ms = u32::try_from(self.held.as_millis()).unwrap_or(u32::MAX);
        JumpIntent {
            press_ms,
            angle_rad,
        }
    }
}
