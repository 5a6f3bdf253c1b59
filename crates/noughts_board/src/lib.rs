//! Board model for the X-0 session service.
//!
//! This crate contains no I/O. It owns the grid, validates placements and
//! evaluates terminal conditions.
//!
//! # Architecture
//!
//! - **Types**: markers, cells, coordinates and outcomes
//! - **Board**: an `N`×`N` grid mutated only through validated placements
//! - **Rules**: line scanning (win) and fullness (draw)
//! - **Game**: a board plus the side to move, enforcing alternation
//! - **Invariants**: properties checked after every placement in debug builds
//!
//! # Example
//!
//! ```
//! use noughts_board::{Coordinate, Game, Marker, Outcome};
//!
//! let mut game = Game::<3>::new();
//! for (row, col) in [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)] {
//!     game.play(Coordinate::new(row, col)).unwrap();
//! }
//! assert_eq!(game.evaluate(), Outcome::Winner(Marker::X));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod board;
mod error;
mod game;
mod invariants;
mod rules;
mod types;

// Crate-level exports
pub use board::Board;
pub use error::PlaceError;
pub use game::{Game, Placement};
pub use invariants::{
    AlternatingTurnInvariant, GameInvariants, Invariant, InvariantSet, InvariantViolation,
    MonotonicBoardInvariant,
};
pub use rules::{LineKind, WinningLine, is_full, lines, winning_line};
pub use types::{CellState, Coordinate, Marker, Outcome};

/// Side length of the board used by the service.
pub const DIMENSION: usize = 3;

/// The board played by the service.
pub type StandardBoard = Board<DIMENSION>;

/// The game played by the service.
pub type StandardGame = Game<DIMENSION>;
