//! End-to-end behaviour of the public API.

use hex::eval::{connection_cost, min_moves_to_win};
use hex::rules::{check_win, connected_by_union_find, outcome, winner};
use hex::{
    choose_automated_move, has_won, is_draw, AIEngine, Board, Cost, Game, GameMode, GameOutcome,
    Pos, Side, StrategyKind,
};
use proptest::prelude::*;

fn side_of(flag: bool) -> Side {
    if flag {
        Side::Red
    } else {
        Side::Blue
    }
}

/// Board of the given size with stones dropped in the listed cells (repeats
/// are skipped).
fn board_from(size: usize, stones: &[(usize, bool)]) -> Board {
    let mut board = Board::new(size).unwrap();
    for &(i, red) in stones {
        let pos = board.pos_at(i % board.cell_count());
        board.make_move(pos, side_of(red));
    }
    board
}

fn arbitrary_board() -> impl Strategy<Value = Board> {
    (2usize..=9).prop_flat_map(|size| {
        prop::collection::vec((0usize..size * size, any::<bool>()), 0..size * size)
            .prop_map(move |stones| board_from(size, &stones))
    })
}

fn arbitrary_full_board() -> impl Strategy<Value = Board> {
    (2usize..=8).prop_flat_map(|size| {
        prop::collection::vec(any::<bool>(), size * size).prop_map(move |sides| {
            let stones: Vec<(usize, bool)> = sides.into_iter().enumerate().collect();
            board_from(size, &stones)
        })
    })
}

proptest! {
    #[test]
    fn prop_extra_stone_never_hurts_its_side(
        board in arbitrary_board(),
        pick in any::<prop::sample::Index>(),
        red in any::<bool>(),
    ) {
        let mut board = board;
        let empties = board.empty_cells();
        prop_assume!(!empties.is_empty());
        let pos = empties[pick.index(empties.len())];
        let side = side_of(red);

        let own_before = connection_cost(&board, side);
        let opp_before = connection_cost(&board, side.opponent());
        board.make_move(pos, side);
        prop_assert!(connection_cost(&board, side) <= own_before);
        prop_assert!(connection_cost(&board, side.opponent()) >= opp_before);
    }

    #[test]
    fn prop_zero_cost_iff_connected(board in arbitrary_board(), red in any::<bool>()) {
        let side = side_of(red);
        prop_assert_eq!(
            connection_cost(&board, side) == Cost::Finite(0),
            check_win(&board, side)
        );
    }

    #[test]
    fn prop_bfs_and_union_find_agree(board in arbitrary_board(), red in any::<bool>()) {
        let side = side_of(red);
        prop_assert_eq!(check_win(&board, side), connected_by_union_find(&board, side));
    }

    #[test]
    fn prop_move_then_undo_restores_board(
        board in arbitrary_board(),
        pick in any::<prop::sample::Index>(),
        red in any::<bool>(),
    ) {
        let mut board = board;
        let empties = board.empty_cells();
        prop_assume!(!empties.is_empty());
        let pos = empties[pick.index(empties.len())];
        let before = board.clone();

        prop_assert!(board.make_move(pos, side_of(red)));
        board.undo_move(pos);
        prop_assert_eq!(board, before);
    }

    #[test]
    fn prop_full_board_has_exactly_one_winner(board in arbitrary_full_board()) {
        prop_assert!(board.is_full());
        prop_assert!(has_won(&board, Side::Red) != has_won(&board, Side::Blue));
        prop_assert!(!is_draw(&board));
        prop_assert!(outcome(&board).is_over());
    }

    #[test]
    fn prop_path_cells_are_empty(board in arbitrary_board(), red in any::<bool>()) {
        let side = side_of(red);
        let connection = min_moves_to_win(&board, side);
        prop_assert!(connection.path.iter().all(|&p| board.is_cell_empty(p)));
        if let Cost::Finite(cost) = connection.cost {
            prop_assert_eq!(connection.path.len(), cost as usize);
        } else {
            prop_assert!(connection.path.is_empty());
        }
    }
}

#[test]
fn straight_line_and_single_gap() {
    let mut board = Board::new(5).unwrap();
    for col in [0, 1, 3, 4] {
        board.make_move(Pos::new(2, col), Side::Red);
    }
    let connection = min_moves_to_win(&board, Side::Red);
    assert_eq!(connection.cost, Cost::Finite(1));
    assert_eq!(connection.path, vec![Pos::new(2, 2)]);
    assert!(!has_won(&board, Side::Red));

    board.make_move(Pos::new(2, 2), Side::Red);
    assert!(has_won(&board, Side::Red));
    assert_eq!(winner(&board), Some(Side::Red));
    assert_eq!(hex::min_moves_to_win(&board, Side::Red), Cost::Finite(0));
}

#[test]
fn chain_through_a_diagonal_link() {
    // (1, 1) and (0, 2) touch through the (-1, +1) neighbour only
    let mut board = Board::new(3).unwrap();
    for pos in [Pos::new(1, 0), Pos::new(1, 1), Pos::new(0, 2)] {
        board.make_move(pos, Side::Red);
    }
    assert!(has_won(&board, Side::Red));

    // The other diagonal is not adjacent on a hex grid
    let mut board = Board::new(3).unwrap();
    for pos in [Pos::new(1, 0), Pos::new(1, 1), Pos::new(2, 2)] {
        board.make_move(pos, Side::Red);
    }
    assert!(!has_won(&board, Side::Red));
}

#[test]
fn engine_blocks_every_interior_gap() {
    for size in 3..=9usize {
        for row in 0..size as u8 {
            for gap in 1..size as u8 - 1 {
                let mut board = Board::new(size).unwrap();
                for col in (0..size as u8).filter(|&c| c != gap) {
                    board.make_move(Pos::new(row, col), Side::Red);
                }
                assert_eq!(connection_cost(&board, Side::Red), Cost::Finite(1));

                let chosen = choose_automated_move(&mut board, Side::Blue, None, false);
                assert_eq!(chosen, Some(Pos::new(row, gap)), "size {size} row {row}");

                board.make_move(Pos::new(row, gap), Side::Blue);
                assert!(connection_cost(&board, Side::Red) > Cost::Finite(1));
            }
        }
    }
}

#[test]
fn blocking_leaves_board_untouched_until_played() {
    let mut board = Board::new(7).unwrap();
    for row in [0, 1, 2, 4, 5, 6] {
        board.make_move(Pos::new(row, 3), Side::Blue);
    }
    let before = board.clone();
    let mut engine = AIEngine::new();
    let result = engine.get_move_with_stats(&mut board, Side::Red, Some(Pos::new(6, 3)), false);
    assert_eq!(result.best_move, Some(Pos::new(3, 3)));
    assert!(result.is_defensive());
    assert_eq!(board, before);
}

#[test]
fn minimax_is_deterministic() {
    let mut board = Board::new(5).unwrap();
    board.make_move(Pos::new(2, 2), Side::Red);
    board.make_move(Pos::new(1, 3), Side::Blue);
    board.make_move(Pos::new(3, 1), Side::Red);

    let mut engine = AIEngine::with_strategy(StrategyKind::Minimax);
    let first = engine.choose_automated_move(&mut board, Side::Blue, Some(Pos::new(3, 1)), false);
    for _ in 0..3 {
        let again = engine.choose_automated_move(&mut board, Side::Blue, Some(Pos::new(3, 1)), false);
        assert_eq!(again, first);
    }
    let fresh = AIEngine::with_strategy(StrategyKind::Minimax)
        .choose_automated_move(&mut board, Side::Blue, Some(Pos::new(3, 1)), false);
    assert_eq!(fresh, first);
}

#[test]
fn every_strategy_finishes_a_game() {
    for (red, blue) in [
        (StrategyKind::Heuristic, StrategyKind::Minimax),
        (StrategyKind::Minimax, StrategyKind::Heuristic),
        (StrategyKind::Heuristic, StrategyKind::Heuristic),
    ] {
        let mut engines = [AIEngine::with_strategy(red), AIEngine::with_strategy(blue)];
        let mut game = Game::new(6, GameMode::TwoPlayer).unwrap();

        while !game.is_over() {
            let ctx = game.turn_context();
            let engine = &mut engines[usize::from(ctx.side == Side::Blue)];
            let mut scratch = game.board().clone();
            let pos = engine
                .choose_automated_move(&mut scratch, ctx.side, ctx.last_opponent_move, false)
                .expect("a move while the game is open");
            assert_eq!(&scratch, game.board());
            game.apply_move(pos).unwrap();
        }

        let GameOutcome::Win(side) = game.outcome() else {
            panic!("a Hex game cannot end drawn");
        };
        assert!(has_won(game.board(), side));
        assert!(game.moves_played() <= 36);
    }
}

#[test]
fn monte_carlo_engine_moves_on_an_empty_cell() {
    let mut config = hex::config::EngineConfig::default();
    config.strategy = StrategyKind::MonteCarlo;
    config.mcts_iterations = 200;
    config.seed = 5;

    let mut board = Board::new(5).unwrap();
    board.make_move(Pos::new(2, 2), Side::Red);
    let a = AIEngine::from_config(&config).choose_automated_move(&mut board, Side::Blue, None, false);
    let b = AIEngine::from_config(&config).choose_automated_move(&mut board, Side::Blue, None, false);
    assert_eq!(a, b);
    assert!(a.is_some_and(|p| board.is_cell_empty(p)));
}

#[test]
fn full_board_reports_no_move() {
    let mut board = Board::new(3).unwrap();
    for (i, pos) in board.empty_cells().into_iter().enumerate() {
        board.make_move(pos, side_of(i % 2 == 0));
    }
    assert!(board.is_full());
    assert_eq!(choose_automated_move(&mut board, Side::Red, None, false), None);
    assert!(!is_draw(&board));
    assert!(outcome(&board).is_over());
}
