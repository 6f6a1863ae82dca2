//! Session orchestration: one running game from level start to win or loss.
//!
//! A [`Session`] owns the board, the player, and every system the level's
//! capability record enables, and sequences them through the fixed per-turn
//! order: snapshot, jump, settle, contact, turn increment, level turn
//! effects, victory evaluation, turn limit. Levels differ only through their
//! [`LevelSpec`]; the same routine here runs all of them.

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

pub mod levels;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use hexhop_board::Board;
use hexhop_core::{
    Axial, GameConfig, ItemKind, LevelSpec, LoseReason, Outcome, PlayerState, TurnEffect,
};
use hexhop_system_builder::Builder;
use hexhop_system_catapult::Catapults;
use hexhop_system_enemies::Enemies;
use hexhop_system_history::{History, TurnSnapshot};
use hexhop_system_rules::{settle_landing, simulate_jump, JumpIntent, Landing};
use hexhop_system_victory::{GameState, ProgressLine, Victory};

/// Score credited for killing a monster with a weapon on contact.
const WEAPON_KILL_SCORE: u32 = 1;

/// What one completed jump did to the run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TurnReport {
    /// Where the jump ended up.
    pub landing: Landing,
    /// Run outcome after the full turn sequence.
    pub outcome: Outcome,
    /// Populated when the jump lost the run.
    pub lose_reason: Option<LoseReason>,
}

/// One running game instance.
#[derive(Debug)]
pub struct Session {
    spec: LevelSpec,
    config: GameConfig,
    board: Board,
    player: PlayerState,
    builder: Builder,
    victory: Victory,
    enemies: Option<Enemies>,
    catapults: Option<Catapults>,
    history: History,
    last_snapshot_turn: Option<u32>,
    game_over: bool,
    last_lose_reason: Option<LoseReason>,
}

impl Session {
    /// Starts a fresh run of the given level.
    ///
    /// The seed fixes both the board shuffle and the enemy spawn stream, so
    /// equal level, seed, and action sequences replay identically.
    #[must_use]
    pub fn new(spec: LevelSpec, seed: u64) -> Self {
        let config = spec.config();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let board = Board::generate(&config, &mut rng);

        let enemies = spec
            .rules
            .enemies_enabled
            .then(|| Enemies::new(rng.gen()));
        let catapults = spec.rules.catapults_enabled.then(Catapults::new);

        let victory = match spec.goals.clone() {
            Some(goals) => Victory::with_goals(goals),
            None => Victory::with_target(config.score_to_win),
        };

        let mut session = Self {
            builder: Builder::new(config.clone()),
            spec,
            config,
            board,
            player: PlayerState::at_origin(),
            victory,
            enemies,
            catapults,
            history: History::new(),
            last_snapshot_turn: None,
            game_over: false,
            last_lose_reason: None,
        };
        session.snapshot_if_new_turn();
        session
    }

    /// Discards the run and starts the same level over with a new seed.
    ///
    /// The board is regenerated, so its resource layout reshuffles.
    pub fn restart(&mut self, seed: u64) {
        *self = Self::new(self.spec.clone(), seed);
    }

    /// Performs one jump and runs the full turn sequence it triggers.
    ///
    /// Returns `None` when the run is already over; nothing changes then.
    pub fn jump(&mut self, intent: JumpIntent) -> Option<TurnReport> {
        if self.game_over {
            return None;
        }
        self.snapshot_if_new_turn();

        let hex_pixel = self.config.hex_size * 3.0_f32.sqrt();
        let target = simulate_jump(self.player.pos, intent, &self.config, hex_pixel);
        let landing = settle_landing(&mut self.player, &self.board, target);

        if landing == Landing::OutOfMap {
            self.lose(LoseReason::OutOfMap);
            return Some(self.report(landing));
        }

        // Contact with the tile just landed on resolves before the turn
        // counter moves.
        if !self.resolve_player_contact() {
            return Some(self.report(landing));
        }

        self.player.turns += 1;
        self.run_turn_effects();
        if self.game_over {
            return Some(self.report(landing));
        }

        if self.evaluate_outcome() != Outcome::Ongoing {
            return Some(self.report(landing));
        }

        if self.config.turn_limit > 0 && self.player.turns > self.config.turn_limit {
            self.lose(LoseReason::TurnLimit);
        }
        Some(self.report(landing))
    }

    /// Builds a house on the tile under the player, if affordable and open.
    ///
    /// A completed house credits the level's house score and can win the run
    /// on the spot. Returns whether anything was built.
    pub fn build_house(&mut self) -> bool {
        if self.game_over || !self.builder.can_build_house(&self.player, &self.board) {
            return false;
        }
        self.snapshot_if_new_turn();
        if !self.builder.build_house(&mut self.player, &mut self.board) {
            return false;
        }
        self.victory.add_score(self.spec.rules.house_build_score);
        let _ = self.evaluate_outcome();
        true
    }

    /// Crafts a weapon batch, if the level allows weapons and the cost is
    /// covered. Returns whether anything was crafted.
    pub fn build_weapon(&mut self) -> bool {
        if self.game_over
            || !self.spec.rules.weapons_enabled
            || !self.builder.can_build_weapon(&self.player)
        {
            return false;
        }
        self.snapshot_if_new_turn();
        self.builder.build_weapon(&mut self.player)
    }

    /// Upgrades the house under the player into a catapult, if the level
    /// allows catapults. The new catapult fires its first volley at once.
    /// Returns whether anything was built.
    pub fn build_catapult(&mut self) -> bool {
        if self.game_over || !self.spec.rules.catapults_enabled {
            return false;
        }
        let Some(mut catapults) = self.catapults.take() else {
            return false;
        };
        if !self.builder.can_build_catapult(&self.player, &self.board) {
            self.catapults = Some(catapults);
            return false;
        }
        self.snapshot_if_new_turn();
        let built = self
            .builder
            .build_catapult(&mut self.player, &mut self.board, &mut catapults);
        if built {
            if let Some(enemies) = self.enemies.as_mut() {
                let _ = catapults.attack(&self.board, enemies);
            }
            catapults.sync_from_board(&self.board);
        }
        self.catapults = Some(catapults);
        if built {
            self.victory.add_score(self.spec.rules.catapult_build_score);
            let _ = self.evaluate_outcome();
        }
        built
    }

    /// Rewinds one turn from the snapshot stack.
    ///
    /// Restores player, score, structures, and enemy positions, clears any
    /// game-over state, and re-arms snapshotting for the restored turn.
    /// Returns whether a snapshot was available.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.pop() else {
            return false;
        };

        self.player = snapshot.player;
        self.victory.set_score(snapshot.score);
        self.board.set_house_flags(&snapshot.house_flags);
        self.board.set_catapult_flags(&snapshot.catapult_flags);
        if let Some(enemies) = self.enemies.as_mut() {
            enemies.restore(&snapshot.enemies);
        }
        if let Some(catapults) = self.catapults.as_mut() {
            catapults.sync_from_board(&self.board);
        }

        self.game_over = false;
        self.last_lose_reason = None;
        self.last_snapshot_turn = snapshot.turn_no.checked_sub(1);
        true
    }

    /// The level this session runs.
    #[must_use]
    pub fn level(&self) -> &LevelSpec {
        &self.spec
    }

    /// The effective configuration the session runs with.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The player.
    #[must_use]
    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    /// Current score.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.victory.score()
    }

    /// Completed turn count.
    #[must_use]
    pub fn turns(&self) -> u32 {
        self.player.turns
    }

    /// Whether the run has ended.
    #[must_use]
    pub const fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// How the run was lost, when it was lost for a tracked reason.
    #[must_use]
    pub const fn lose_reason(&self) -> Option<LoseReason> {
        self.last_lose_reason
    }

    /// Enemy coordinates, empty when the level has no enemies.
    #[must_use]
    pub fn enemy_positions(&self) -> Vec<Axial> {
        self.enemies
            .as_ref()
            .map_or_else(Vec::new, |enemies| enemies.positions().to_vec())
    }

    /// The enemy system, when the level enables it.
    ///
    /// Mutable access is for orchestrating adapters and level scripting;
    /// normal play goes through [`Session::jump`].
    pub fn enemies_mut(&mut self) -> Option<&mut Enemies> {
        self.enemies.as_mut()
    }

    /// Number of standing catapults.
    #[must_use]
    pub fn catapult_count(&self) -> u32 {
        self.catapults.as_ref().map_or(0, Catapults::count)
    }

    /// Snapshots currently available to [`Session::undo`].
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Point-in-time state for goal evaluation and display.
    #[must_use]
    pub fn game_state(&self) -> GameState {
        GameState {
            turn: self.player.turns,
            score: self.victory.score(),
            inventory: self.player.inventory.clone(),
            houses: self.player.houses,
            catapults: self.catapult_count(),
            last_lose_reason: self.last_lose_reason,
        }
    }

    /// Goal progress lines for display; empty in threshold mode.
    #[must_use]
    pub fn goal_progress(&self) -> Vec<ProgressLine> {
        self.victory.progress(&self.game_state())
    }

    /// Pushes a snapshot unless this turn already has one.
    fn snapshot_if_new_turn(&mut self) {
        if self.last_snapshot_turn == Some(self.player.turns) {
            return;
        }
        let enemies = self
            .enemies
            .as_ref()
            .map_or_else(Default::default, Enemies::state);
        self.history.push(TurnSnapshot {
            turn_no: self.player.turns,
            player: self.player.clone(),
            house_flags: self.board.house_flags(),
            catapult_flags: self.board.catapult_flags(),
            score: self.victory.score(),
            enemies,
        });
        self.last_snapshot_turn = Some(self.player.turns);
    }

    /// Runs the level's ordered turn effects; stops early on a loss.
    fn run_turn_effects(&mut self) {
        let effects = self.spec.rules.turn_effects.clone();
        for effect in effects {
            match effect {
                TurnEffect::MoveEnemies => {
                    if let Some(enemies) = self.enemies.as_mut() {
                        enemies.advance_all(&mut self.board);
                    }
                    // A kamikaze can raze a catapult tile.
                    if let Some(catapults) = self.catapults.as_mut() {
                        catapults.sync_from_board(&self.board);
                    }
                }
                TurnEffect::SpawnEnemies => {
                    if let Some(enemies) = self.enemies.as_mut() {
                        enemies.try_spawn_by_turns(
                            self.player.turns,
                            self.spec.rules.spawn_rate,
                            self.player.pos,
                            &self.board,
                        );
                    }
                }
                TurnEffect::CatapultVolley => {
                    if let (Some(catapults), Some(enemies)) =
                        (self.catapults.as_ref(), self.enemies.as_mut())
                    {
                        let _ = catapults.attack(&self.board, enemies);
                    }
                }
                TurnEffect::ResolvePlayerContact => {
                    if !self.resolve_player_contact() {
                        return;
                    }
                }
            }
        }
    }

    /// Resolves the player sharing a tile with a monster.
    ///
    /// Armed, the player spends one weapon, the monster dies, and the kill
    /// score is credited. Unarmed, the run is lost. Returns whether the
    /// player survived.
    fn resolve_player_contact(&mut self) -> bool {
        let Some(enemies) = self.enemies.as_mut() else {
            return true;
        };
        let Some(axial) = self.board.tile_at_pixel(self.player.pos).map(|t| t.axial()) else {
            return true;
        };
        if !enemies.enemy_at(axial) {
            return true;
        }

        if self.player.inventory.count(ItemKind::Weapon) > 0 {
            self.player.inventory.remove(ItemKind::Weapon, 1);
            let _ = enemies.remove(axial);
            self.victory.add_score(WEAPON_KILL_SCORE);
            return true;
        }

        self.lose(LoseReason::Monster);
        false
    }

    /// Checks the victory mode; a decided outcome ends the run.
    fn evaluate_outcome(&mut self) -> Outcome {
        let outcome = self.victory.check(&self.game_state());
        if outcome != Outcome::Ongoing {
            self.game_over = true;
        }
        outcome
    }

    fn lose(&mut self, reason: LoseReason) {
        self.game_over = true;
        self.last_lose_reason = Some(reason);
    }

    fn report(&self, landing: Landing) -> TurnReport {
        let outcome = if self.game_over {
            if self.last_lose_reason.is_some() {
                Outcome::Lose
            } else {
                match self.victory.check(&self.game_state()) {
                    Outcome::Ongoing => Outcome::Lose,
                    decided => decided,
                }
            }
        } else {
            Outcome::Ongoing
        };
        TurnReport {
            landing,
            outcome,
            lose_reason: self.last_lose_reason,
        }
    }
}
