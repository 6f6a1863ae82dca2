//! Replay determinism: equal level, seed, and actions give equal runs.

use std::f32::consts::PI;

use hexhop_core::ResourceKind;
use hexhop_session::levels::builtin_level;
use hexhop_session::Session;
use hexhop_system_rules::JumpIntent;

fn board_layout(session: &Session) -> Vec<(i32, i32, ResourceKind)> {
    session
        .board()
        .iter()
        .map(|tile| (tile.axial().q(), tile.axial().r(), tile.resource()))
        .collect()
}

fn observable(session: &Session) -> (u32, u32, bool, Vec<bool>, Vec<bool>) {
    (
        session.turns(),
        session.score(),
        session.is_game_over(),
        session.board().house_flags(),
        session.board().catapult_flags(),
    )
}

#[test]
fn same_seed_same_board() {
    let level = builtin_level(4).expect("level 4 exists");
    let a = Session::new(level.clone(), 7);
    let b = Session::new(level, 7);
    assert_eq!(board_layout(&a), board_layout(&b));
}

#[test]
fn different_seeds_reshuffle() {
    let level = builtin_level(4).expect("level 4 exists");
    let a = Session::new(level.clone(), 7);
    let b = Session::new(level, 8);
    assert_ne!(board_layout(&a), board_layout(&b));
}

#[test]
fn identical_action_scripts_replay_identically() {
    let level = builtin_level(4).expect("level 4 exists");
    let mut a = Session::new(level.clone(), 42);
    let mut b = Session::new(level, 42);

    // Short back-and-forth hops; enough turns to trigger enemy spawns and
    // movement on level 4's cadence.
    let script: Vec<JumpIntent> = (0..8)
        .map(|i| JumpIntent {
            press_ms: 0,
            angle_rad: if i % 2 == 0 { 0.0 } else { PI },
        })
        .collect();

    for intent in script {
        let report_a = a.jump(intent);
        let report_b = b.jump(intent);
        assert_eq!(report_a, report_b);
        assert_eq!(a.enemy_positions(), b.enemy_positions());
        assert_eq!(*a.player(), *b.player());
        assert_eq!(observable(&a), observable(&b));
    }
}

#[test]
fn replay_survives_an_undo_divergence_check() {
    // Undo then redo the identical action; the board and player must match a
    // run that never detoured.
    let level = builtin_level(2).expect("level 2 exists");
    let mut straight = Session::new(level.clone(), 99);
    let mut detour = Session::new(level, 99);

    let intent = JumpIntent {
        press_ms: 0,
        angle_rad: 0.0,
    };
    let _ = straight.jump(intent).expect("run live");

    let _ = detour.jump(intent).expect("run live");
    assert!(detour.undo());
    let _ = detour.jump(intent).expect("run live");

    assert_eq!(*straight.player(), *detour.player());
    assert_eq!(observable(&straight), observable(&detour));
}
