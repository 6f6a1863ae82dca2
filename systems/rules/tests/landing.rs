use hexhop_board::Board;
use hexhop_core::{GameConfig, ItemKind, PixelPoint, PlayerState};
use hexhop_system_rules::{settle_landing, Landing};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn fresh_board(config: &GameConfig) -> Board {
    Board::generate(config, &mut ChaCha8Rng::seed_from_u64(21))
}

#[test]
fn out_of_map_landing_leaves_the_player_untouched() {
    let config = GameConfig::default();
    let board = fresh_board(&config);
    let mut player = PlayerState::at_origin();
    player.inventory.add(ItemKind::Wood, 2);
    let before = player.clone();

    let result = settle_landing(&mut player, &board, PixelPoint::new(50_000.0, 0.0));

    assert_eq!(result, Landing::OutOfMap);
    assert_eq!(player, before);
}

#[test]
fn settling_credits_one_unit_of_the_tile_resource() {
    let config = GameConfig::default();
    let board = fresh_board(&config);
    let mut player = PlayerState::at_origin();

    let target = board.iter().nth(8).expect("tile");
    let landing = target.center();
    let result = settle_landing(&mut player, &board, landing);

    assert_eq!(
        result,
        Landing::Settled {
            axial: target.axial()
        }
    );
    assert_eq!(player.pos, landing);
    assert_eq!(
        player.inventory.count(ItemKind::from(target.resource())),
        1
    );
}

#[test]
fn house_on_the_landing_tile_doubles_the_yield() {
    let config = GameConfig::default();
    let mut board = fresh_board(&config);
    let mut player = PlayerState::at_origin();

    let target = board.iter().nth(3).expect("tile");
    let coord = target.axial();
    let landing = target.center();
    let resource = ItemKind::from(target.resource());
    assert!(board.place_house(coord));

    let result = settle_landing(&mut player, &board, landing);

    assert_eq!(result, Landing::Settled { axial: coord });
    assert_eq!(player.inventory.count(resource), 2);
}

#[test]
fn turns_are_not_advanced_by_landing_resolution() {
    let config = GameConfig::default();
    let board = fresh_board(&config);
    let mut player = PlayerState::at_origin();

    let landing = board.iter().next().expect("tile").center();
    let _ = settle_landing(&mut player, &board, landing);
    assert_eq!(player.turns, 0);
}
