#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Score tracking and win/lose evaluation.
//!
//! Two operating modes are selected at construction. Threshold mode wins
//! once the cumulative score reaches a single target and never loses. Goal
//! mode evaluates win and lose expression trees against a point-in-time
//! [`GameState`] snapshot; when both are satisfied in the same evaluation,
//! lose takes priority.

use serde::{Deserialize, Serialize};

use hexhop_core::{GoalAtom, GoalExpr, Inventory, LevelGoals, LoseReason, Outcome};

/// Point-in-time game state a goal expression is evaluated against.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Completed turn count.
    pub turn: u32,
    /// Cumulative score.
    pub score: u32,
    /// Current player inventory.
    pub inventory: Inventory,
    /// Number of standing houses credited to the player.
    pub houses: u32,
    /// Number of standing catapults.
    pub catapults: u32,
    /// How the run was last lost, if it was.
    pub last_lose_reason: Option<LoseReason>,
}

/// One display line of goal progress.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressLine {
    /// Whether the underlying atom is currently satisfied.
    pub satisfied: bool,
    /// Human-readable description of the atom and its progress.
    pub text: String,
}

#[derive(Debug)]
enum Mode {
    Threshold { target: u32 },
    Goals(LevelGoals),
}

/// The victory system: score accumulator plus outcome evaluation.
#[derive(Debug)]
pub struct Victory {
    score: u32,
    mode: Mode,
}

impl Victory {
    /// Creates a threshold-mode system that wins at the given score.
    #[must_use]
    pub fn with_target(target: u32) -> Self {
        Self {
            score: 0,
            mode: Mode::Threshold { target },
        }
    }

    /// Creates a goal-mode system driven by expression trees.
    #[must_use]
    pub fn with_goals(goals: LevelGoals) -> Self {
        Self {
            score: 0,
            mode: Mode::Goals(goals),
        }
    }

    /// Adds to the cumulative score.
    pub fn add_score(&mut self, amount: u32) {
        self.score = self.score.saturating_add(amount);
    }

    /// Replaces the cumulative score, as done when restoring a snapshot.
    pub fn set_score(&mut self, score: u32) {
        self.score = score;
    }

    /// Current cumulative score.
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// Threshold-mode shortcut: whether the score target is reached.
    ///
    /// Always `false` in goal mode, where [`Victory::check`] decides.
    #[must_use]
    pub fn reached(&self) -> bool {
        match &self.mode {
            Mode::Threshold { target } => self.score >= *target,
            Mode::Goals(_) => false,
        }
    }

    /// Evaluates the current outcome against a game-state snapshot.
    pub fn check(&self, state: &GameState) -> Outcome {
        match &self.mode {
            Mode::Threshold { target } => {
                if state.score >= *target {
                    Outcome::Win
                } else {
                    Outcome::Ongoing
                }
            }
            Mode::Goals(goals) => {
                let lost = goals
                    .lose
                    .as_ref()
                    .map_or(false, |expr| eval_expr(expr, state));
                if lost {
                    return Outcome::Lose;
                }
                if eval_expr(&goals.win, state) {
                    return Outcome::Win;
                }
                Outcome::Ongoing
            }
        }
    }

    /// One progress line per leaf atom of the win expression.
    ///
    /// Display-only; has no effect on [`Victory::check`]. Empty in threshold
    /// mode. `Not` subtrees are skipped, matching the display convention.
    #[must_use]
    pub fn progress(&self, state: &GameState) -> Vec<ProgressLine> {
        let Mode::Goals(goals) = &self.mode else {
            return Vec::new();
        };
        let mut atoms = Vec::new();
        collect_atoms(&goals.win, &mut atoms);
        atoms
            .iter()
            .map(|atom| ProgressLine {
                satisfied: eval_atom(atom, state),
                text: describe_atom(atom, state),
            })
            .collect()
    }
}

fn eval_expr(expr: &GoalExpr, state: &GameState) -> bool {
    match expr {
        GoalExpr::Atom(atom) => eval_atom(atom, state),
        GoalExpr::AllOf(children) => children.iter().all(|child| eval_expr(child, state)),
        GoalExpr::AnyOf(children) => children.iter().any(|child| eval_expr(child, state)),
        GoalExpr::Not(child) => !eval_expr(child, state),
    }
}

fn eval_atom(atom: &GoalAtom, state: &GameState) -> bool {
    match atom {
        GoalAtom::ScoreAtLeast(value) => state.score >= *value,
        GoalAtom::TurnsAtMost(value) => state.turn <= *value,
        GoalAtom::HousesAtLeast(value) => state.houses >= *value,
        GoalAtom::CatapultsAtLeast(value) => state.catapults >= *value,
        GoalAtom::ResourcesAtLeast(needs) => needs
            .iter()
            .all(|&(kind, needed)| state.inventory.count(kind) >= needed),
        GoalAtom::NoDeathBy(reasons) => state
            .last_lose_reason
            .map_or(true, |reason| !reasons.contains(&reason)),
    }
}

fn collect_atoms<'a>(expr: &'a GoalExpr, out: &mut Vec<&'a GoalAtom>) {
    match expr {
        GoalExpr::Atom(atom) => out.push(atom),
        GoalExpr::AllOf(children) | GoalExpr::AnyOf(children) => {
            for child in children {
                collect_atoms(child, out);
            }
        }
        GoalExpr::Not(_) => {}
    }
}

fn describe_atom(atom: &GoalAtom, state: &GameState) -> String {
    match atom {
        GoalAtom::ScoreAtLeast(value) => format!("Score {}/{value}", state.score),
        GoalAtom::TurnsAtMost(value) => format!("Turns <= {value} (now {})", state.turn),
        GoalAtom::HousesAtLeast(value) => format!("Houses {}/{value}", state.houses),
        GoalAtom::CatapultsAtLeast(value) => format!("Catapults {}/{value}", state.catapults),
        GoalAtom::ResourcesAtLeast(needs) => {
            let parts: Vec<String> = needs
                .iter()
                .map(|&(kind, needed)| {
                    format!("{kind:?}:{}/{needed}", state.inventory.count(kind))
                })
                .collect();
            format!("Resources {}", parts.join(" "))
        }
        GoalAtom::NoDeathBy(reasons) => format!("Avoid death by {reasons:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::{GameState, Victory};
    use hexhop_core::{GoalAtom, GoalExpr, Inventory, ItemKind, LevelGoals, LoseReason, Outcome};

    fn state() -> GameState {
        GameState {
            turn: 0,
            score: 0,
            inventory: Inventory::new(),
            houses: 0,
            catapults: 0,
            last_lose_reason: None,
        }
    }

    fn goal_system(win: GoalExpr) -> Victory {
        Victory::with_goals(LevelGoals { win, lose: None })
    }

    #[test]
    fn all_of_empty_is_vacuously_true() {
        let victory = goal_system(GoalExpr::AllOf(vec![]));
        assert_eq!(victory.check(&state()), Outcome::Win);
    }

    #[test]
    fn any_of_empty_is_vacuously_false() {
        let victory = goal_system(GoalExpr::AnyOf(vec![]));
        assert_eq!(victory.check(&state()), Outcome::Ongoing);
    }

    #[test]
    fn double_negation_restores_the_atom() {
        for atom in [
            GoalAtom::ScoreAtLeast(0),
            GoalAtom::ScoreAtLeast(10),
            GoalAtom::TurnsAtMost(5),
            GoalAtom::NoDeathBy(vec![LoseReason::Monster]),
        ] {
            let plain = goal_system(GoalExpr::Atom(atom.clone()));
            let doubled = goal_system(GoalExpr::Atom(atom).negate().negate());
            assert_eq!(plain.check(&state()), doubled.check(&state()));
        }
    }

    #[test]
    fn lose_takes_priority_over_win() {
        let victory = Victory::with_goals(LevelGoals {
            win: GoalExpr::Atom(GoalAtom::ScoreAtLeast(0)),
            lose: Some(GoalExpr::Atom(GoalAtom::TurnsAtMost(100))),
        });
        assert_eq!(victory.check(&state()), Outcome::Lose);
    }

    #[test]
    fn threshold_mode_wins_at_the_target_and_never_loses() {
        let mut victory = Victory::with_target(5);
        assert!(!victory.reached());

        victory.add_score(5);
        assert!(victory.reached());

        let mut snapshot = state();
        snapshot.score = victory.score();
        assert_eq!(victory.check(&snapshot), Outcome::Win);
    }

    #[test]
    fn resources_atom_reads_the_inventory() {
        let victory = goal_system(GoalExpr::Atom(GoalAtom::ResourcesAtLeast(vec![
            (ItemKind::Weapon, 1),
            (ItemKind::Stone, 2),
        ])));
        let mut snapshot = state();
        assert_eq!(victory.check(&snapshot), Outcome::Ongoing);

        snapshot.inventory.add(ItemKind::Weapon, 1);
        snapshot.inventory.add(ItemKind::Stone, 2);
        assert_eq!(victory.check(&snapshot), Outcome::Win);
    }

    #[test]
    fn no_death_by_holds_when_no_loss_occurred() {
        let victory = goal_system(GoalExpr::Atom(GoalAtom::NoDeathBy(vec![
            LoseReason::Monster,
            LoseReason::OutOfMap,
        ])));
        let mut snapshot = state();
        assert_eq!(victory.check(&snapshot), Outcome::Win);

        snapshot.last_lose_reason = Some(LoseReason::Monster);
        assert_eq!(victory.check(&snapshot), Outcome::Ongoing);
    }

    #[test]
    fn progress_reports_one_line_per_win_leaf() {
        let victory = goal_system(GoalExpr::AllOf(vec![
            GoalExpr::Atom(GoalAtom::ScoreAtLeast(3)),
            GoalExpr::Atom(GoalAtom::HousesAtLeast(1)),
        ]));
        let mut snapshot = state();
        snapshot.houses = 1;

        let lines = victory.progress(&snapshot);
        assert_eq!(lines.len(), 2);
        assert!(!lines[0].satisfied);
        assert!(lines[1].satisfied);
        assert!(lines[0].text.contains("0/3"));
    }
}
