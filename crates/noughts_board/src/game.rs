//! A board together with whose turn it is.

use crate::invariants::{GameInvariants, InvariantSet};
use crate::{Board, Coordinate, Marker, Outcome, PlaceError};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// One accepted placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[display("{marker} -> {coordinate}")]
pub struct Placement {
    /// Marker that was placed.
    pub marker: Marker,
    /// Where it was placed.
    pub coordinate: Coordinate,
}

/// X-0 game: a board, the side to move and the placement history.
///
/// Callers never choose the marker of a placement. [`Game::play`] always
/// places for the side to move and swaps sides only on success, so X and 0
/// strictly alternate starting with X.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game<const N: usize> {
    pub(crate) board: Board<N>,
    pub(crate) to_move: Marker,
    pub(crate) history: Vec<Placement>,
}

impl<const N: usize> Game<N> {
    /// Creates a game on an empty board with X to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            to_move: Marker::X,
            history: Vec::new(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board<N> {
        &self.board
    }

    /// Marker whose turn it is.
    pub fn to_move(&self) -> Marker {
        self.to_move
    }

    /// Accepted placements, oldest first.
    pub fn history(&self) -> &[Placement] {
        &self.history
    }

    /// Evaluates the board.
    pub fn evaluate(&self) -> Outcome {
        self.board.evaluate()
    }

    /// Places the side to move at `coordinate`.
    ///
    /// On success the turn passes to the opponent. On failure nothing
    /// changes and the same side is still to move.
    ///
    /// # Errors
    ///
    /// - [`PlaceError::GameOver`] if the board already has a terminal outcome
    /// - [`PlaceError::OutOfBounds`] / [`PlaceError::Occupied`] from
    ///   [`Board::place`]
    #[instrument(skip(self), fields(marker = %self.to_move))]
    pub fn play(&mut self, coordinate: Coordinate) -> Result<Placement, PlaceError> {
        if self.evaluate().is_terminal() {
            return Err(PlaceError::GameOver);
        }

        let marker = self.to_move;
        self.board.place(coordinate, marker)?;

        let placement = Placement { marker, coordinate };
        self.history.push(placement);
        self.to_move = marker.opponent();

        debug_assert!(
            GameInvariants::check_all(self).is_ok(),
            "game invariants violated after {placement}"
        );

        debug!(%placement, moves = self.history.len(), "Placement accepted");
        Ok(placement)
    }

    /// Replays placements from an empty board.
    ///
    /// # Errors
    ///
    /// Returns the first rejected placement's error.
    #[instrument]
    pub fn replay(coordinates: &[Coordinate]) -> Result<Self, PlaceError> {
        let mut game = Self::new();
        for coordinate in coordinates {
            game.play(*coordinate)?;
        }
        Ok(game)
    }
}

impl<const N: usize> Default for Game<N> {
    fn default() -> Self {
        Self::new()
    }
}
