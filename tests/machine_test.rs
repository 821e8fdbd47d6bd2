//! Tests for the game state machine: turns, rejection rules, time travel.

use tictactoe_machine::{
    GameStateMachine, GameStatus, Move, Player, Position, Square, check_winner,
};

/// Cell indices follow the rendering convention: 0-8 row-major.
fn cell(index: usize) -> Position {
    Position::from_index(index).expect("index in range")
}

#[test]
fn test_turn_parity_over_a_full_sequence() {
    let mut game = GameStateMachine::new();

    // Before move n (0-indexed), X moves iff n is even. The sequence
    // ends drawn, so every move is accepted.
    for (n, index) in [0, 1, 2, 3, 4, 6, 5, 8].into_iter().enumerate() {
        let expected = if n % 2 == 0 { Player::X } else { Player::O };
        assert_eq!(game.current_player(), expected, "before move {}", n);
        game.apply_move(cell(index));
    }
}

#[test]
fn test_occupied_cell_changes_nothing() {
    let mut game = GameStateMachine::new();
    game.apply_move(cell(4));

    let board_before = game.current_board().clone();
    let player_before = game.current_player();

    game.apply_move(cell(4));

    assert_eq!(game.current_board(), &board_before);
    assert_eq!(game.current_player(), player_before);
    assert_eq!(game.history_len(), 2);
}

#[test]
fn test_top_row_win_scenario() {
    // Moves at indices 0(X), 3(O), 1(X), 4(O), 2(X) complete the top row.
    let mut game = GameStateMachine::new();
    for index in [0, 3, 1, 4, 2] {
        game.apply_move(cell(index));
    }

    assert_eq!(game.winner(), Some(Player::X));
    assert_eq!(game.status(), GameStatus::Won(Player::X));

    // Further moves are no-ops even though empty cells remain.
    let before = game.clone();
    game.apply_move(cell(5));
    assert_eq!(game, before);
}

#[test]
fn test_no_moves_accepted_after_any_win() {
    let mut game = GameStateMachine::new();
    // O takes the anti-diagonal: X plays 0, 1, 3; O plays 2, 4, 6.
    for index in [0, 2, 1, 4, 3, 6] {
        game.apply_move(cell(index));
    }
    assert_eq!(game.winner(), Some(Player::O));

    let before = game.clone();
    for index in 0..9 {
        game.apply_move(cell(index));
    }
    assert_eq!(game, before);
}

#[test]
fn test_winner_projection_matches_rules() {
    let mut game = GameStateMachine::new();
    for index in [0, 3, 1, 4, 2] {
        game.apply_move(cell(index));
    }
    assert_eq!(game.winner(), check_winner(game.current_board()));
}

#[test]
fn test_divergence_truncation() {
    // apply(0), jump_to(0), apply(4): the future after step 0 is
    // discarded before the new move is appended.
    let mut game = GameStateMachine::new();
    game.apply_move(cell(0));
    assert_eq!(game.history_len(), 2);

    game.jump_to(0).unwrap();
    game.apply_move(cell(4));

    assert_eq!(game.history_len(), 2);
    assert_eq!(game.step(), 1);

    // The new move replaced the old future and belongs to X again.
    assert_eq!(game.current_board().get(cell(0)), Square::Empty);
    assert_eq!(game.current_board().get(cell(4)), Square::Occupied(Player::X));
}

#[test]
fn test_jump_is_pure_and_idempotent() {
    let mut game = GameStateMachine::new();
    for index in [0, 3, 1] {
        game.apply_move(cell(index));
    }

    let history_before: Vec<_> = game.history().to_vec();

    game.jump_to(1).unwrap();
    let after_first = game.clone();
    game.jump_to(1).unwrap();

    assert_eq!(game, after_first);
    assert_eq!(game.history(), history_before.as_slice());
    assert_eq!(game.current_player(), Player::O);
}

#[test]
fn test_jump_back_shows_earlier_board() {
    let mut game = GameStateMachine::new();
    game.apply_move(cell(0));
    game.apply_move(cell(4));

    game.jump_to(1).unwrap();
    assert_eq!(game.current_board().get(cell(0)), Square::Occupied(Player::X));
    assert_eq!(game.current_board().get(cell(4)), Square::Empty);

    // Jumping forward again restores the later view.
    game.jump_to(2).unwrap();
    assert_eq!(game.current_board().get(cell(4)), Square::Occupied(Player::O));
}

#[test]
fn test_draw_status_on_full_board() {
    // X O X / O X X / O X O - full, no line.
    let mut game = GameStateMachine::new();
    for index in [0, 1, 2, 3, 4, 6, 5, 8, 7] {
        game.apply_move(cell(index));
    }

    assert_eq!(game.history_len(), 10);
    assert_eq!(game.winner(), None);
    assert_eq!(game.status(), GameStatus::Draw);
    assert_eq!(game.status_line(), "Draw");
}

#[test]
fn test_history_records_producing_moves() {
    let mut game = GameStateMachine::new();
    game.apply_move(cell(4));
    game.apply_move(cell(0));

    let history = game.history();
    assert_eq!(history[0].last_move(), None);
    assert_eq!(history[1].last_move(), Some(Move::new(Player::X, cell(4))));
    assert_eq!(history[2].last_move(), Some(Move::new(Player::O, cell(0))));
}

#[test]
fn test_machine_survives_serde_round_trip() {
    let mut game = GameStateMachine::new();
    for index in [0, 3, 1] {
        game.apply_move(cell(index));
    }
    game.jump_to(2).unwrap();

    let json = serde_json::to_string(&game).expect("serialize");
    let restored: GameStateMachine = serde_json::from_str(&json).expect("deserialize");

    assert_eq!(restored, game);
    assert_eq!(restored.current_player(), Player::X);
}

#[test]
fn test_restore_rejects_out_of_range_step() {
    let mut saved = serde_json::to_value(GameStateMachine::new()).expect("serialize");
    saved["step"] = 5.into();

    let err = serde_json::from_value::<GameStateMachine>(saved).unwrap_err();
    assert!(err.to_string().contains("out of range"));
}

#[test]
fn test_restore_rejects_empty_history() {
    let err =
        serde_json::from_str::<GameStateMachine>(r#"{"history":[],"step":0}"#).unwrap_err();
    assert!(err.to_string().contains("out of range"));
}

#[test]
fn test_restore_rejects_corrupt_snapshot_chain() {
    let mut game = GameStateMachine::new();
    game.apply_move(cell(4));

    // Tamper with the saved state: the recorded move now claims O made
    // it, contradicting the mark on the board.
    let mut saved = serde_json::to_value(&game).expect("serialize");
    saved["history"][1]["last_move"]["player"] = "O".into();

    let err = serde_json::from_value::<GameStateMachine>(saved).unwrap_err();
    assert!(err.to_string().contains("Restored state is invalid"));
}
