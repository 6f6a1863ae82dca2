#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Bounded snapshot stack enabling single-step undo.
//!
//! One snapshot captures the full start-of-turn state as deep, independent
//! copies: nothing in a stored snapshot aliases live structures, so
//! restoring can never be corrupted by later mutation. The stack keeps at
//! most [`History::CAPACITY`] entries and evicts the oldest first.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use hexhop_core::PlayerState;
use hexhop_system_enemies::EnemiesState;

/// Deep copy of all turn-relevant state at the start of one turn.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurnSnapshot {
    /// Turn number the snapshot belongs to.
    pub turn_no: u32,
    /// Player state at the turn boundary.
    pub player: PlayerState,
    /// Board house flags over the stable tile order.
    pub house_flags: Vec<bool>,
    /// Board catapult flags over the stable tile order.
    pub catapult_flags: Vec<bool>,
    /// Victory score at the turn boundary.
    pub score: u32,
    /// Enemy-system state at the turn boundary.
    pub enemies: EnemiesState,
}

/// Bounded stack of turn snapshots.
#[derive(Debug, Default)]
pub struct History {
    stack: VecDeque<TurnSnapshot>,
}

impl History {
    /// Maximum number of retained snapshots.
    pub const CAPACITY: usize = 100;

    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes a snapshot, evicting the oldest entry at capacity.
    pub fn push(&mut self, snapshot: TurnSnapshot) {
        self.stack.push_back(snapshot);
        if self.stack.len() > Self::CAPACITY {
            let _ = self.stack.pop_front();
        }
    }

    /// Pops the most recent snapshot, or `None` when empty.
    pub fn pop(&mut self) -> Option<TurnSnapshot> {
        self.stack.pop_back()
    }

    /// Drops every snapshot.
    pub fn clear(&mut self) {
        self.stack.clear();
    }

    /// Number of retained snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// Whether no snapshot is retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{History, TurnSnapshot};
    use hexhop_core::{ItemKind, PlayerState};
    use hexhop_system_enemies::EnemiesState;

    fn snapshot(turn_no: u32) -> TurnSnapshot {
        let mut player = PlayerState::at_origin();
        player.turns = turn_no;
        player.inventory.add(ItemKind::Wood, turn_no);
        TurnSnapshot {
            turn_no,
            player,
            house_flags: vec![false, true],
            catapult_flags: vec![false, false],
            score: turn_no,
            enemies: EnemiesState {
                positions: Vec::new(),
                last_turn_spawned: None,
            },
        }
    }

    #[test]
    fn push_then_pop_returns_an_equal_snapshot() {
        let mut history = History::new();
        let original = snapshot(3);
        history.push(original.clone());
        assert_eq!(history.pop(), Some(original));
        assert!(history.is_empty());
    }

    #[test]
    fn pop_on_empty_history_is_none() {
        let mut history = History::new();
        assert!(history.pop().is_none());
    }

    #[test]
    fn capacity_evicts_the_oldest_snapshot() {
        let mut history = History::new();
        for turn in 0..=(History::CAPACITY as u32) {
            history.push(snapshot(turn));
        }
        assert_eq!(history.len(), History::CAPACITY);

        let mut oldest = None;
        while let Some(entry) = history.pop() {
            oldest = Some(entry.turn_no);
        }
        assert_eq!(oldest, Some(1));
    }
}
