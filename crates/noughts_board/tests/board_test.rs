//! Tests for the board model and game rules.

use noughts_board::{
    AlternatingTurnInvariant, Board, CellState, Coordinate, Game, GameInvariants, Invariant,
    InvariantSet, LineKind, Marker, MonotonicBoardInvariant, Outcome, PlaceError, StandardBoard,
    StandardGame, is_full, winning_line,
};

fn play_all(game: &mut StandardGame, moves: &[(i64, i64)]) {
    for (row, col) in moves {
        game.play(Coordinate::new(*row, *col)).expect("Valid move");
    }
}

/// Whether `marker` holds a complete row, column or diagonal, checked cell by
/// cell without the rules module.
fn holds_line(board: &StandardBoard, marker: Marker) -> bool {
    let at = |row: usize, col: usize| board.get(row, col) == Some(CellState::Marked(marker));
    (0..3).any(|i| (0..3).all(|j| at(i, j)))
        || (0..3).any(|j| (0..3).all(|i| at(i, j)))
        || (0..3).all(|i| at(i, i))
        || (0..3).all(|i| at(i, 2 - i))
}

#[test]
fn test_row_win_after_fifth_placement() {
    let mut game = StandardGame::new();
    play_all(&mut game, &[(0, 0), (1, 0), (0, 1), (1, 1)]);
    assert_eq!(game.evaluate(), Outcome::InProgress);

    play_all(&mut game, &[(0, 2)]);
    assert_eq!(game.evaluate(), Outcome::Winner(Marker::X));

    let line = game.board().winning_line().expect("Complete line");
    assert_eq!(line.kind, LineKind::Row(0));
}

#[test]
fn test_full_board_without_line_is_draw() {
    let mut game = StandardGame::new();
    play_all(
        &mut game,
        &[
            (0, 0),
            (0, 1),
            (0, 2),
            (1, 1),
            (1, 0),
            (1, 2),
            (2, 1),
            (2, 0),
            (2, 2),
        ],
    );

    assert!(game.board().is_full());
    assert_eq!(game.board().winning_line(), None);
    assert_eq!(game.evaluate(), Outcome::Draw);
}

#[test]
fn test_game_stops_at_first_completed_line() {
    // 0 completes column 1 on the sixth placement; later moves are refused.
    let mut game = StandardGame::new();
    play_all(&mut game, &[(0, 0), (0, 1), (0, 2), (1, 1), (1, 0), (2, 1)]);

    assert_eq!(game.evaluate(), Outcome::Winner(Marker::Nought));
    let line = game.board().winning_line().expect("Complete line");
    assert_eq!(line.kind, LineKind::Column(1));

    assert_eq!(game.play(Coordinate::new(1, 2)), Err(PlaceError::GameOver));
    assert_eq!(game.history().len(), 6);
}

#[test]
fn test_occupied_cell_rejected_then_next_move_accepted() {
    let mut game = StandardGame::new();
    play_all(&mut game, &[(0, 0)]);
    let board_before = game.board().clone();

    let result = game.play(Coordinate::new(0, 0));
    assert_eq!(result, Err(PlaceError::Occupied(Coordinate::new(0, 0))));
    assert_eq!(game.board(), &board_before);
    assert_eq!(game.to_move(), Marker::Nought);

    let placement = game.play(Coordinate::new(2, 2)).expect("Empty cell");
    assert_eq!(placement.marker, Marker::Nought);
    assert_eq!(game.to_move(), Marker::X);
}

#[test]
fn test_kth_placement_alternates_markers() {
    let mut game = StandardGame::new();
    play_all(&mut game, &[(1, 1), (0, 0), (0, 1), (2, 1), (1, 0), (1, 2)]);

    for (index, placement) in game.history().iter().enumerate() {
        let k = index + 1;
        let expected = if k % 2 == 1 { Marker::X } else { Marker::Nought };
        assert_eq!(placement.marker, expected, "placement {k}");
    }
}

#[test]
fn test_invalid_input_never_advances_turn() {
    let mut game = StandardGame::new();
    play_all(&mut game, &[(1, 1)]);

    for coordinate in [
        Coordinate::new(1, 1),
        Coordinate::new(-1, 0),
        Coordinate::new(0, 3),
        Coordinate::new(3, 3),
    ] {
        let before = game.clone();
        assert!(game.play(coordinate).is_err());
        assert_eq!(game, before);
    }
}

#[test]
fn test_replay_reports_first_rejection() {
    let result = Game::<3>::replay(&[
        Coordinate::new(0, 0),
        Coordinate::new(1, 1),
        Coordinate::new(1, 1),
    ]);
    assert_eq!(result, Err(PlaceError::Occupied(Coordinate::new(1, 1))));
}

#[test]
fn test_evaluate_matches_line_definition_on_every_board() {
    const CELLS: u32 = 9;
    let mut checked = 0;

    for code in 0..3u32.pow(CELLS) {
        let mut board = Board::<3>::new();
        let mut digits = code;
        for index in 0..CELLS as i64 {
            let marker = match digits % 3 {
                1 => Some(Marker::X),
                2 => Some(Marker::Nought),
                _ => None,
            };
            digits /= 3;
            if let Some(marker) = marker {
                board
                    .place(Coordinate::new(index / 3, index % 3), marker)
                    .expect("Fresh cell");
            }
        }

        let x_line = holds_line(&board, Marker::X);
        let nought_line = holds_line(&board, Marker::Nought);
        if x_line && nought_line {
            // Unreachable with alternating single placements.
            continue;
        }

        let expected = if x_line {
            Outcome::Winner(Marker::X)
        } else if nought_line {
            Outcome::Winner(Marker::Nought)
        } else if board.is_full() {
            Outcome::Draw
        } else {
            Outcome::InProgress
        };

        assert_eq!(board.evaluate(), expected, "board code {code}");
        checked += 1;
    }

    assert!(checked > 19_000);
}

#[test]
fn test_invariants_hold_through_a_full_game() {
    let mut game = StandardGame::new();
    for (row, col) in [(0, 0), (0, 1), (0, 2), (1, 1), (1, 0), (1, 2), (2, 1), (2, 0), (2, 2)] {
        game.play(Coordinate::new(row, col)).expect("Valid move");
        assert!(GameInvariants::check_all(&game).is_ok());
        assert!(AlternatingTurnInvariant::holds(&game));
        assert!(MonotonicBoardInvariant::holds(&game));
    }

    assert!(is_full(game.board()));
    assert_eq!(winning_line(game.board()), None);
}
