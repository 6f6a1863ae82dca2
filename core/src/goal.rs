//! Boolean goal expressions evaluated against point-in-time game state.

use serde::{Deserialize, Serialize};

use crate::{ItemKind, LoseReason};

/// Leaf predicate over a game-state snapshot.
///
/// The set is closed on purpose: the evaluator matches it exhaustively so a
/// new atom fails to compile rather than silently evaluating to a default.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GoalAtom {
    /// Cumulative score is at least the given value.
    ScoreAtLeast(u32),
    /// Completed turn count is at most the given value.
    TurnsAtMost(u32),
    /// House count is at least the given value.
    HousesAtLeast(u32),
    /// Catapult count is at least the given value.
    CatapultsAtLeast(u32),
    /// Inventory covers every listed item requirement.
    ResourcesAtLeast(Vec<(ItemKind, u32)>),
    /// No loss of any listed kind has occurred.
    NoDeathBy(Vec<LoseReason>),
}

/// Boolean expression tree over [`GoalAtom`] leaves.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GoalExpr {
    /// A single leaf predicate.
    Atom(GoalAtom),
    /// True when every child is true; vacuously true when empty.
    AllOf(Vec<GoalExpr>),
    /// True when any child is true; vacuously false when empty.
    AnyOf(Vec<GoalExpr>),
    /// Negation of the child expression.
    Not(Box<GoalExpr>),
}

impl GoalExpr {
    /// Wraps an atom as an expression.
    #[must_use]
    pub fn atom(atom: GoalAtom) -> Self {
        GoalExpr::Atom(atom)
    }

    /// Negates an expression.
    #[must_use]
    pub fn negate(self) -> Self {
        GoalExpr::Not(Box::new(self))
    }
}

/// Win expression plus optional lose expression for one level.
///
/// When both are satisfied in the same evaluation, lose takes priority.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelGoals {
    /// Expression that must hold to win.
    pub win: GoalExpr,
    /// Expression that, when it holds, loses the run.
    pub lose: Option<GoalExpr>,
}

#[cfg(test)]
mod tests {
    use super::{GoalAtom, GoalExpr, LevelGoals};
    use crate::{ItemKind, LoseReason};

    #[test]
    fn goal_expressions_round_trip_through_bincode() {
        let goals = LevelGoals {
            win: GoalExpr::AllOf(vec![
                GoalExpr::atom(GoalAtom::ScoreAtLeast(3)),
                GoalExpr::AnyOf(vec![
                    GoalExpr::atom(GoalAtom::HousesAtLeast(2)),
                    GoalExpr::atom(GoalAtom::ResourcesAtLeast(vec![(ItemKind::Weapon, 1)])),
                ]),
            ]),
            lose: Some(GoalExpr::atom(GoalAtom::NoDeathBy(vec![LoseReason::Monster])).negate()),
        };

        let bytes = bincode::serialize(&goals).expect("serialize");
        let restored: LevelGoals = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(restored, goals);
    }
}
