//! N-Player capability verification tests.
//!
//! These tests verify that turn rotation, occupancy and restart have no
//! hidden 2-player assumptions and work for larger tables.

use snakes_ladders::core::{ConfigError, GameConfig, PlayerId, TurnPhase};
use snakes_ladders::dice::LoadedDie;
use snakes_ladders::turn::{TurnController, TurnControllerBuilder};
use snakes_ladders::CellId;

fn scripted(player_count: usize, script: impl IntoIterator<Item = u8>) -> TurnControllerBuilder<LoadedDie> {
    TurnControllerBuilder::new(GameConfig::new(player_count)).face_source(LoadedDie::new(script, 0))
}

fn play_turn(game: &mut TurnController<LoadedDie>) {
    assert!(game.request_roll());
    game.run_until_idle();
}

/// Every supported table size builds with all players in base.
#[test]
fn test_controller_player_counts() {
    for player_count in 2..=8 {
        let game = TurnController::new(GameConfig::new(player_count)).unwrap();
        assert_eq!(game.player_count(), player_count);

        for player in PlayerId::all(player_count) {
            let p = game.player(player);
            assert_eq!(p.step, 0);
            assert!(!p.started);
        }
        assert_eq!(game.snapshot().players.len(), player_count);
    }
}

/// Fewer than two players is rejected at construction.
#[test]
fn test_too_few_players_rejected() {
    for player_count in [0, 1] {
        let err = TurnController::new(GameConfig::new(player_count)).err();
        assert!(matches!(err, Some(ConfigError::PlayerCount(n)) if n == player_count));
    }
}

/// Passing faces visit every player in order and wrap back to the first.
#[test]
fn test_rotation_wraps_for_n_players() {
    for player_count in [2, 3, 5, 8] {
        let mut game = scripted(player_count, std::iter::repeat(3).take(player_count + 1))
            .build()
            .unwrap();

        for expected in 1..=player_count {
            play_turn(&mut game);
            assert_eq!(game.current_player(), PlayerId::new((expected % player_count) as u8));
        }
    }
}

/// A six keeps the turn regardless of table size.
#[test]
fn test_extra_turn_in_four_player_game() {
    let mut game = scripted(4, [6, 6, 2])
        .current_player(PlayerId::new(2))
        .place(PlayerId::new(2), 10, true)
        .build()
        .unwrap();

    play_turn(&mut game);
    assert_eq!(game.current_player(), PlayerId::new(2));
    play_turn(&mut game);
    assert_eq!(game.current_player(), PlayerId::new(2));
    play_turn(&mut game);
    assert_eq!(game.current_player(), PlayerId::new(3));

    assert_eq!(game.player(PlayerId::new(2)).step, 24);
}

/// Only the current player's token moves.
#[test]
fn test_other_players_untouched() {
    let mut game = scripted(4, [5])
        .current_player(PlayerId::new(1))
        .place(PlayerId::new(0), 12, true)
        .place(PlayerId::new(1), 40, true)
        .place(PlayerId::new(3), 60, true)
        .build()
        .unwrap();

    play_turn(&mut game);

    assert_eq!(game.player(PlayerId::new(0)).step, 12);
    assert_eq!(game.player(PlayerId::new(1)).step, 45);
    assert!(!game.player(PlayerId::new(2)).started);
    assert_eq!(game.player(PlayerId::new(3)).step, 60);
    assert_eq!(game.current_player(), PlayerId::new(2));
}

/// Tokens sharing a cell are all reported as occupants.
#[test]
fn test_shared_cell_occupancy() {
    let game = scripted(5, std::iter::empty())
        .place(PlayerId::new(0), 10, true)
        .place(PlayerId::new(2), 10, true)
        .place(PlayerId::new(3), 10, true)
        .place(PlayerId::new(4), 0, true)
        .build()
        .unwrap();

    let ten = game.occupants(CellId::new(10).unwrap());
    assert!(ten.is_shared());
    assert_eq!(
        ten.players.as_slice(),
        &[PlayerId::new(0), PlayerId::new(2), PlayerId::new(3)]
    );

    // entrance players are drawn on cell 1, base players nowhere
    let one = game.occupants(CellId::new(1).unwrap());
    assert_eq!(one.players.as_slice(), &[PlayerId::new(4)]);
    assert!(!one.is_shared());
}

/// Restart clears every player but keeps whose turn it is.
#[test]
fn test_restart_six_players() {
    let mut game = scripted(6, [3])
        .current_player(PlayerId::new(4))
        .place(PlayerId::new(0), 30, true)
        .place(PlayerId::new(4), 68, true)
        .place(PlayerId::new(5), 2, true)
        .build()
        .unwrap();

    game.request_roll();
    game.advance(std::time::Duration::from_millis(2100));
    assert_eq!(game.phase(), TurnPhase::Animating);

    game.request_restart();

    assert_eq!(game.phase(), TurnPhase::Idle);
    assert!(!game.input_locked());
    assert_eq!(game.current_player(), PlayerId::new(4));
    for player in PlayerId::all(6) {
        let p = game.player(player);
        assert_eq!(p.step, 0);
        assert!(!p.started);
    }

    game.run_until_idle();
    assert!(game.history().is_empty());
}

/// Out-of-range placements are rejected by the builder.
#[test]
fn test_builder_rejects_unknown_player() {
    let err = scripted(3, std::iter::empty())
        .place(PlayerId::new(3), 5, true)
        .build()
        .err();
    assert!(matches!(err, Some(ConfigError::UnknownPlayer(3))));

    let err = scripted(3, std::iter::empty()).current_player(PlayerId::new(7)).build().err();
    assert!(matches!(err, Some(ConfigError::UnknownPlayer(7))));
}
