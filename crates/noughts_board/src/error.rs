//! Placement errors.

use crate::Coordinate;

/// Error returned when a placement is rejected.
///
/// The board is never modified when one of these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum PlaceError {
    /// Row or column lies outside `[0, N)`.
    #[display("Coordinate {_0} is out of bounds")]
    OutOfBounds(Coordinate),

    /// The target cell already holds a marker.
    #[display("Coordinate {_0} is already occupied")]
    Occupied(Coordinate),

    /// The game has already reached a terminal outcome.
    #[display("Game is already over")]
    GameOver,
}

impl std::error::Error for PlaceError {}
