//! Board engine tests - slide/merge rules, move detection and spawning

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use tui_2048::core::{Board, BoardError, ScriptedSource, SimpleRng};
use tui_2048::types::{Direction, MAX_SIZE, MAX_TILE};

fn board(rows: &[[u32; 4]]) -> Board {
    Board::from_rows(rows).unwrap()
}

fn mirror(b: &Board) -> Board {
    let n = b.size();
    let mut cells = Vec::with_capacity(n * n);
    for row in 0..n {
        let r = b.row(row).unwrap();
        cells.extend(r.iter().rev().copied());
    }
    Board::from_cells(n, &cells).unwrap()
}

#[test]
fn test_initialize_places_two_tiles() {
    let mut rng = SimpleRng::new(7);
    for size in [2, 4, 5, MAX_SIZE] {
        let b = Board::initialize(size, &mut rng).unwrap();
        assert_eq!(b.size(), size);
        assert_eq!(b.cells().len(), size * size);
        assert_eq!(b.empty_count(), size * size - 2);
        assert!(b.cells().iter().all(|&v| v == 0 || v == 2 || v == 4));
    }
}

#[test]
fn test_unsupported_sizes_are_rejected() {
    let mut rng = SimpleRng::new(7);
    assert_eq!(
        Board::initialize(1, &mut rng),
        Err(BoardError::UnsupportedSize(1))
    );
    assert_eq!(
        Board::initialize(MAX_SIZE + 1, &mut rng),
        Err(BoardError::UnsupportedSize(MAX_SIZE + 1))
    );
}

#[test]
fn test_malformed_length_fails_fast() {
    let err = Board::from_cells(4, &[2; 15]).unwrap_err();
    assert_eq!(
        err,
        BoardError::InvalidBoard {
            size: 4,
            expected: 16,
            actual: 15
        }
    );
    assert!(Board::from_cells(4, &[2; 17]).is_err());
    assert!(Board::from_rows(&[vec![2u32, 2], vec![2]]).is_err());
    assert!(err.to_string().contains("16"));
}

#[test]
fn test_single_merge_per_tile() {
    let b = board(&[[2, 2, 2, 2], [0; 4], [0; 4], [0; 4]]);
    let r = b.apply_move(Direction::Left);
    assert_eq!(r.board.row(0).unwrap(), &[4, 4, 0, 0]);
    assert!(r.moved);
    assert_eq!(r.score_delta, 8);
}

#[test]
fn test_compaction_only() {
    let b = board(&[[2, 0, 0, 4], [0; 4], [0; 4], [0; 4]]);
    let r = b.apply_move(Direction::Left);
    assert_eq!(r.board.row(0).unwrap(), &[2, 4, 0, 0]);
    assert!(r.moved);
    assert_eq!(r.score_delta, 0);
}

#[test]
fn test_merge_prefers_the_leading_edge() {
    let b = board(&[[2, 2, 2, 0], [0; 4], [0; 4], [0; 4]]);
    assert_eq!(
        b.apply_move(Direction::Left).board.row(0).unwrap(),
        &[4, 2, 0, 0]
    );
    assert_eq!(
        b.apply_move(Direction::Right).board.row(0).unwrap(),
        &[0, 0, 2, 4]
    );
}

#[test]
fn test_vertical_moves() {
    let b = board(&[[2, 0, 0, 0], [2, 0, 0, 0], [4, 0, 0, 0], [0, 0, 0, 8]]);

    let up = b.apply_move(Direction::Up).board;
    assert_eq!(up.cells(), &[4, 0, 0, 8, 4, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);

    let down = b.apply_move(Direction::Down).board;
    assert_eq!(down.get(3, 0), Some(4));
    assert_eq!(down.get(2, 0), Some(4));
    assert_eq!(down.get(3, 3), Some(8));
    assert_eq!(down.empty_count(), 13);
}

#[test]
fn test_apply_move_leaves_input_untouched() {
    let b = board(&[[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
    let before = b.clone();
    let _ = b.apply_move(Direction::Right);
    assert_eq!(b, before);
}

#[test]
fn test_blocked_line_does_not_move() {
    let b = board(&[[2, 4, 8, 16], [0; 4], [0; 4], [0; 4]]);
    let r = b.apply_move(Direction::Left);
    assert!(!r.moved);
    assert_eq!(r.board, b);
    assert_eq!(r.score_delta, 0);

    // Same input, same answer.
    let again = r.board.apply_move(Direction::Left);
    assert!(!again.moved);
    assert!(b.can_move(Direction::Down));
    assert!(!b.can_move(Direction::Up));
}

#[test]
fn test_has_moves_terminal_detection() {
    let stuck = board(&[[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
    assert!(!stuck.has_moves());
    assert_eq!(stuck.legal_moves(), [false; 4]);

    let horizontal_pair = board(&[[2, 2, 8, 4], [4, 8, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
    assert!(horizontal_pair.has_moves());

    let vertical_pair = board(&[[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 4]]);
    assert!(vertical_pair.has_moves());

    let hole = board(&[[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 0, 4], [4, 2, 4, 2]]);
    assert!(hole.has_moves());
}

#[test]
fn test_spawn_distribution_is_ninety_ten() {
    let full = board(&[[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 0]]);
    let mut rng = StdRng::seed_from_u64(2048);
    let trials = 20_000;
    let mut fours = 0;

    for _ in 0..trials {
        let mut b = full.clone();
        let spawned = b.spawn(&mut rng).unwrap();
        assert_eq!(spawned.index, 15);
        match spawned.value {
            2 => {}
            4 => fours += 1,
            other => panic!("unexpected spawn value {other}"),
        }
    }

    let ratio = fours as f64 / trials as f64;
    assert!((0.08..0.12).contains(&ratio), "four ratio {ratio}");
}

#[test]
fn test_spawn_cell_is_uniform() {
    let empty = Board::from_cells(4, &[0; 16]).unwrap();
    let mut rng = StdRng::seed_from_u64(11);
    let mut hits = [0u32; 16];
    let trials = 32_000;
    for _ in 0..trials {
        let mut b = empty.clone();
        hits[b.spawn(&mut rng).unwrap().index] += 1;
    }
    let expected = trials as f64 / 16.0;
    for (i, &h) in hits.iter().enumerate() {
        let dev = (h as f64 - expected).abs() / expected;
        assert!(dev < 0.15, "cell {i} hit {h} times");
    }
}

#[test]
fn test_with_spawn_matches_in_place_spawn() {
    let b = board(&[[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
    let mut in_place = b.clone();
    in_place.spawn(&mut ScriptedSource::new(vec![0.42]));
    let by_value = b.with_spawn(&mut ScriptedSource::new(vec![0.42]));
    assert_eq!(in_place, by_value);
}

#[test]
fn test_tiles_above_the_largest_are_rejected() {
    let err = Board::from_cells(2, &[2, MAX_TILE + 1, 0, 0]).unwrap_err();
    assert_eq!(
        err,
        BoardError::TileTooLarge {
            index: 1,
            value: MAX_TILE + 1
        }
    );
    assert!(Board::from_rows(&[[0, 0], [0, u32::MAX]]).is_err());
}

#[test]
fn test_largest_tiles_compact_without_overflow() {
    let top = Board::from_cells(2, &[MAX_TILE, MAX_TILE, 0, 0]).unwrap();
    let r = top.apply_move(Direction::Left);
    assert!(!r.moved);
    assert_eq!(r.score_delta, 0);
    assert!(top.can_move(Direction::Down));

    let stuck = Board::from_cells(2, &[MAX_TILE; 4]).unwrap();
    assert!(!stuck.has_moves());
    assert_eq!(stuck.legal_moves(), [false; 4]);

    // Four merges into 2^31 on one board overflow a u32 score; it saturates.
    let half = 1u32 << 30;
    let b = Board::from_rows(&[[half; 4], [half; 4], [0; 4], [0; 4]]).unwrap();
    let r = b.apply_move(Direction::Left);
    assert_eq!(r.board.row(0).unwrap(), &[MAX_TILE, MAX_TILE, 0, 0]);
    assert_eq!(r.board.row(1).unwrap(), &[MAX_TILE, MAX_TILE, 0, 0]);
    assert_eq!(r.score_delta, u32::MAX);
    assert_eq!(r.board.sum(), b.sum());
}

#[test]
fn test_queries() {
    let b = board(&[[2, 0, 0, 0], [0, 2048, 0, 0], [0; 4], [0, 0, 0, 4]]);
    assert_eq!(b.max_tile(), 2048);
    assert!(b.contains(2048));
    assert!(!b.contains(1024));
    assert_eq!(b.sum(), 2054);
    assert_eq!(b.get(1, 1), Some(2048));
    assert_eq!(b.get(4, 0), None);
    assert_eq!(b.row(4), None);
}

/// Tile counts by exponent: `counts[e]` is the number of `2^e` tiles.
fn tile_counts(cells: &[u32]) -> [i64; 33] {
    let mut counts = [0i64; 33];
    for &v in cells.iter().filter(|&&v| v != 0) {
        counts[v.trailing_zeros() as usize] += 1;
    }
    counts
}

fn arb_board() -> impl Strategy<Value = Board> {
    prop::collection::vec(0u32..=11, 16).prop_map(|exps| {
        let cells: Vec<u32> = exps
            .into_iter()
            .map(|e| if e == 0 { 0 } else { 1 << e })
            .collect();
        Board::from_cells(4, &cells).unwrap()
    })
}

fn arb_direction() -> impl Strategy<Value = Direction> {
    prop::sample::select(Direction::ALL.to_vec())
}

proptest! {
    #[test]
    fn slides_conserve_the_board_sum(b in arb_board(), dir in arb_direction()) {
        let r = b.apply_move(dir);
        prop_assert_eq!(r.board.sum(), b.sum());
    }

    #[test]
    fn score_is_the_total_of_merged_pairs(b in arb_board(), dir in arb_direction()) {
        let r = b.apply_move(dir);
        let old = tile_counts(b.cells());
        let new = tile_counts(r.board.cells());

        // Walking up the exponents, tiles of 2^e that disappeared (after adding
        // the ones produced by merges one level down) went into pairs.
        let mut produced = 0i64;
        let mut merged_total = 0u64;
        for e in 1..32 {
            let consumed = old[e] + produced - new[e];
            prop_assert!(consumed >= 0 && consumed % 2 == 0, "2^{}: {}", e, consumed);
            produced = consumed / 2;
            merged_total += produced as u64 * (2u64 << e);
        }
        prop_assert_eq!(produced, 0);
        prop_assert_eq!(merged_total, r.score_delta as u64);
    }

    #[test]
    fn merges_only_produce_doubles_of_existing_tiles(b in arb_board(), dir in arb_direction()) {
        let r = b.apply_move(dir);
        let old = b.cells();
        for &v in r.board.cells().iter().filter(|&&v| v != 0) {
            prop_assert!(old.contains(&v) || old.contains(&(v / 2)));
        }
        let old_tiles = old.iter().filter(|&&v| v != 0).count();
        let new_tiles = r.board.cells().iter().filter(|&&v| v != 0).count();
        prop_assert!(new_tiles <= old_tiles);
        // Every merge removes one tile and adds its value to the score.
        prop_assert_eq!(new_tiles == old_tiles, r.score_delta == 0);
    }

    #[test]
    fn moved_flag_matches_board_change(b in arb_board(), dir in arb_direction()) {
        let r = b.apply_move(dir);
        prop_assert_eq!(r.moved, r.board != b);
        if !r.moved {
            prop_assert!(!b.apply_move(dir).moved);
        }
    }

    #[test]
    fn has_moves_iff_some_direction_is_legal(b in arb_board()) {
        prop_assert_eq!(b.has_moves(), b.legal_moves().iter().any(|&legal| legal));
    }

    #[test]
    fn left_and_right_are_mirror_images(b in arb_board()) {
        let right = b.apply_move(Direction::Right);
        let left_of_mirror = mirror(&b).apply_move(Direction::Left);
        prop_assert_eq!(mirror(&right.board), left_of_mirror.board);
        prop_assert_eq!(right.score_delta, left_of_mirror.score_delta);
    }
}
