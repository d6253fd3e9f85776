use serde_json::{json, Value};

use tui_2048::core::{Board, GameConfig, GameSnapshot, GameState, ScriptedSource};
use tui_2048::types::{Direction, GameStatus};

#[test]
fn snapshot_serializes_to_flat_json() {
    let board = Board::from_rows(&[[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]).unwrap();
    let mut state = GameState::from_board(
        GameConfig::default(),
        board,
        ScriptedSource::new(vec![0.0]),
    );
    state.handle_move(Direction::Left);

    let value: Value = serde_json::to_value(state.snapshot()).unwrap();
    assert_eq!(
        value,
        json!({
            "size": 4,
            "cells": [4, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
            "score": 4,
            "best_tile": 4,
            "moves": 1,
            "status": "playing",
            "win_tile": 2048,
            "episode_id": 0
        })
    );
}

#[test]
fn snapshot_round_trips_through_json() {
    let mut snap = GameSnapshot::default();
    snap.status = GameStatus::Lost;
    snap.score = 9000;
    snap.cells[5] = 1024;

    let text = serde_json::to_string(&snap).unwrap();
    let back: GameSnapshot = serde_json::from_str(&text).unwrap();
    assert_eq!(back, snap);
    assert!(!back.playable());
    assert_eq!(back.summary(), "I scored 9000 in 2048!");
}

#[test]
fn snapshot_rejects_mismatched_cells() {
    let mut value = serde_json::to_value(GameSnapshot::default()).unwrap();

    value["size"] = json!(9);
    let err = serde_json::from_value::<GameSnapshot>(value.clone()).unwrap_err();
    assert!(err.to_string().contains("unsupported board size 9"), "{err}");

    value["size"] = json!(3);
    let err = serde_json::from_value::<GameSnapshot>(value.clone()).unwrap_err();
    assert!(err.to_string().contains("needs 9 cells, got 16"), "{err}");

    value["size"] = json!(4);
    let back: GameSnapshot = serde_json::from_value(value).unwrap();
    assert_eq!(back, GameSnapshot::default());
}

#[test]
fn direction_uses_lowercase_names() {
    assert_eq!(serde_json::to_string(&Direction::Up).unwrap(), "\"up\"");
    let d: Direction = serde_json::from_str("\"right\"").unwrap();
    assert_eq!(d, Direction::Right);
}
