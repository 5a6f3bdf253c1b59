//! Monotonic board invariant: cells never change once marked.

use super::Invariant;
use crate::{Board, Game};

/// Invariant: replaying the history onto an empty board never hits an
/// occupied cell and reproduces the current board exactly.
pub struct MonotonicBoardInvariant;

impl<const N: usize> Invariant<Game<N>> for MonotonicBoardInvariant {
    fn holds(game: &Game<N>) -> bool {
        let mut reconstructed = Board::<N>::new();

        for placement in game.history() {
            if reconstructed
                .place(placement.coordinate, placement.marker)
                .is_err()
            {
                return false;
            }
        }

        reconstructed == *game.board()
    }

    fn description() -> &'static str {
        "Board cells are monotonic (never overwritten)"
    }
}
