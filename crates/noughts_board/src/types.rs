//! Core domain types for the X-0 board.

use serde::{Deserialize, Serialize};

/// Marker a participant places into board cells.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
pub enum Marker {
    /// Crosses, always moves first.
    #[display("X")]
    X,
    /// Noughts, written `0` on the wire.
    #[display("0")]
    Nought,
}

impl Marker {
    /// Returns the opposing marker.
    pub fn opponent(self) -> Self {
        match self {
            Marker::X => Marker::Nought,
            Marker::Nought => Marker::X,
        }
    }

    /// Character used when rendering this marker.
    pub fn symbol(self) -> char {
        match self {
            Marker::X => 'X',
            Marker::Nought => '0',
        }
    }
}

/// State of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CellState {
    /// Nobody has marked this cell.
    #[default]
    Empty,
    /// Cell holds a marker. Never reverts.
    Marked(Marker),
}

impl CellState {
    /// Returns the marker, if any.
    pub fn marker(self) -> Option<Marker> {
        match self {
            CellState::Empty => None,
            CellState::Marked(marker) => Some(marker),
        }
    }

    /// True when no marker has been placed.
    pub fn is_empty(self) -> bool {
        self == CellState::Empty
    }
}

/// A row/column pair as requested by a participant.
///
/// Components are signed because the wire accepts any integer; bounds are
/// checked by [`Board::place`](crate::Board::place).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_new::new,
)]
#[display("({row}, {col})")]
pub struct Coordinate {
    /// Zero-based row.
    pub row: i64,
    /// Zero-based column.
    pub col: i64,
}

/// State of a game, as evaluated from its board or forced by a broken
/// connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Outcome {
    /// Moves are still possible.
    #[display("in progress")]
    InProgress,
    /// A marker completed a line.
    #[display("{_0}-player wins")]
    Winner(Marker),
    /// Board is full and nobody completed a line.
    #[display("dead heat")]
    Draw,
    /// A participant's connection broke before the game was decided.
    #[display("aborted")]
    Aborted,
}

impl Outcome {
    /// True for every value that ends a session.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    /// Returns the winning marker, if any.
    pub fn winner(self) -> Option<Marker> {
        match self {
            Outcome::Winner(marker) => Some(marker),
            _ => None,
        }
    }
}
