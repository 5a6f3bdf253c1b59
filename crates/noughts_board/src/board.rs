//! The `N`×`N` grid.

use crate::rules::{self, WinningLine};
use crate::{CellState, Coordinate, Marker, Outcome, PlaceError};
use tracing::instrument;

/// Square grid of cells, row-major.
///
/// Cells are changed only by [`Board::place`], which never overwrites a
/// marked cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board<const N: usize> {
    pub(crate) cells: [[CellState; N]; N],
}

impl<const N: usize> Board<N> {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self {
            cells: [[CellState::Empty; N]; N],
        }
    }

    /// Side length of the board.
    pub const fn dimension(&self) -> usize {
        N
    }

    /// Returns the cell at `row`, `col`, or `None` outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<CellState> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// All rows of the grid.
    pub fn cells(&self) -> &[[CellState; N]; N] {
        &self.cells
    }

    /// Converts a requested coordinate into grid indices.
    pub fn index_of(coordinate: Coordinate) -> Option<(usize, usize)> {
        let row = usize::try_from(coordinate.row).ok().filter(|r| *r < N)?;
        let col = usize::try_from(coordinate.col).ok().filter(|c| *c < N)?;
        Some((row, col))
    }

    /// Marks the cell at `coordinate` with `marker`.
    ///
    /// # Errors
    ///
    /// - [`PlaceError::OutOfBounds`] if either component is outside `[0, N)`
    /// - [`PlaceError::Occupied`] if the cell already holds a marker
    #[instrument(skip(self))]
    pub fn place(&mut self, coordinate: Coordinate, marker: Marker) -> Result<(), PlaceError> {
        let (row, col) =
            Self::index_of(coordinate).ok_or(PlaceError::OutOfBounds(coordinate))?;

        let cell = &mut self.cells[row][col];
        if !cell.is_empty() {
            return Err(PlaceError::Occupied(coordinate));
        }

        *cell = CellState::Marked(marker);
        Ok(())
    }

    /// Evaluates the board.
    ///
    /// Lines are scanned rows first, then columns, then the main diagonal and
    /// the anti-diagonal; the first complete line decides the winner.
    pub fn evaluate(&self) -> Outcome {
        if let Some(line) = self.winning_line() {
            return Outcome::Winner(line.marker);
        }

        if rules::is_full(self) {
            Outcome::Draw
        } else {
            Outcome::InProgress
        }
    }

    /// First complete line in scan order.
    pub fn winning_line(&self) -> Option<WinningLine> {
        rules::winning_line(self)
    }

    /// True when no empty cell remains.
    pub fn is_full(&self) -> bool {
        rules::is_full(self)
    }

    /// Number of cells holding `marker`.
    pub fn marked_count(&self, marker: Marker) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| **cell == CellState::Marked(marker))
            .count()
    }
}

impl<const N: usize> Default for Board<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::<3>::new();
        assert!(board.cells().iter().flatten().all(|c| c.is_empty()));
        assert_eq!(board.evaluate(), Outcome::InProgress);
    }

    #[test]
    fn test_place_marks_cell() {
        let mut board = Board::<3>::new();
        board.place(Coordinate::new(1, 2), Marker::X).unwrap();
        assert_eq!(board.get(1, 2), Some(CellState::Marked(Marker::X)));
        assert_eq!(board.marked_count(Marker::X), 1);
    }

    #[test]
    fn test_out_of_bounds_leaves_board_untouched() {
        let mut board = Board::<3>::new();
        board.place(Coordinate::new(0, 0), Marker::X).unwrap();
        let before = board.clone();

        for coordinate in [
            Coordinate::new(3, 0),
            Coordinate::new(0, 3),
            Coordinate::new(-1, 1),
            Coordinate::new(1, -1),
            Coordinate::new(i64::MAX, i64::MIN),
        ] {
            assert_eq!(
                board.place(coordinate, Marker::Nought),
                Err(PlaceError::OutOfBounds(coordinate))
            );
        }
        assert_eq!(board, before);
    }

    #[test]
    fn test_occupied_leaves_board_untouched() {
        let mut board = Board::<3>::new();
        board.place(Coordinate::new(0, 0), Marker::X).unwrap();
        let before = board.clone();

        let result = board.place(Coordinate::new(0, 0), Marker::Nought);
        assert_eq!(result, Err(PlaceError::Occupied(Coordinate::new(0, 0))));
        assert_eq!(board, before);

        // Same marker is rejected too.
        assert!(board.place(Coordinate::new(0, 0), Marker::X).is_err());
        assert_eq!(board, before);
    }

    #[test]
    fn test_other_dimensions() {
        let mut board = Board::<4>::new();
        assert_eq!(board.dimension(), 4);
        for i in 0..4 {
            board.place(Coordinate::new(i, 3 - i), Marker::Nought).unwrap();
        }
        assert_eq!(board.evaluate(), Outcome::Winner(Marker::Nought));
    }
}
