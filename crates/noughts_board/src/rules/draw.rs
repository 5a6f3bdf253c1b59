//! Draw detection.

use crate::Board;

/// Checks whether every cell holds a marker.
///
/// A full board with no complete line is a draw.
pub fn is_full<const N: usize>(board: &Board<N>) -> bool {
    board.cells().iter().flatten().all(|cell| !cell.is_empty())
}
