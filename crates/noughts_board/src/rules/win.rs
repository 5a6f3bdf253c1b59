//! Win detection.

use crate::{Board, CellState, Marker};
use tracing::instrument;

/// A straight line of `N` cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum LineKind {
    /// Row with the given index.
    #[display("row {_0}")]
    Row(usize),
    /// Column with the given index.
    #[display("column {_0}")]
    Column(usize),
    /// Top-left to bottom-right.
    #[display("diagonal")]
    Diagonal,
    /// Top-right to bottom-left.
    #[display("anti-diagonal")]
    AntiDiagonal,
}

impl LineKind {
    /// Grid indices `(row, col)` covered by this line.
    pub fn cells<const N: usize>(self) -> [(usize, usize); N] {
        std::array::from_fn(|i| match self {
            LineKind::Row(row) => (row, i),
            LineKind::Column(col) => (i, col),
            LineKind::Diagonal => (i, i),
            LineKind::AntiDiagonal => (i, N - 1 - i),
        })
    }
}

/// A line entirely held by one marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[display("{marker} holds {kind}")]
pub struct WinningLine {
    /// Marker occupying every cell of the line.
    pub marker: Marker,
    /// Which line it is.
    pub kind: LineKind,
}

/// Every line of an `N`×`N` board in scan order: rows, columns, diagonal,
/// anti-diagonal.
pub fn lines<const N: usize>() -> impl Iterator<Item = LineKind> {
    (0..N)
        .map(LineKind::Row)
        .chain((0..N).map(LineKind::Column))
        .chain([LineKind::Diagonal, LineKind::AntiDiagonal])
}

/// Returns the first complete line in scan order.
///
/// With one placement per turn and alternating markers at most one marker
/// can ever hold a complete line, so the order only matters for reporting
/// which line was found.
#[instrument(skip(board))]
pub fn winning_line<const N: usize>(board: &Board<N>) -> Option<WinningLine> {
    let cells = board.cells();

    for kind in lines::<N>() {
        let mut line = kind.cells::<N>().into_iter().map(|(row, col)| cells[row][col]);

        let Some(CellState::Marked(marker)) = line.next() else {
            continue;
        };

        if line.all(|cell| cell == CellState::Marked(marker)) {
            return Some(WinningLine { marker, kind });
        }
    }

    None
}
