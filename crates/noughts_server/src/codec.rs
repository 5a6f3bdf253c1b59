//! Text protocol spoken with participants.
//!
//! Everything a participant sees is produced here and everything a
//! participant types is parsed here. The session engine never formats text
//! itself.

use crate::participant::ParticipantId;
use noughts_board::{Board, CellState, Coordinate, Marker, PlaceError};
use tracing::instrument;

/// Character shown for an empty cell.
pub const EMPTY_CELL: char = '.';

/// Fixed outbound messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Notice {
    /// Usage hint, sent once to both participants when a game starts.
    #[display("fire: ROW COL")]
    Help,
    /// Sent on connection, naming the assigned marker.
    #[display("You are {_0}-player (ID={_1})")]
    Greeting(Marker, ParticipantId),
    /// Sent to a participant parked in the pairing slot.
    #[display("Please, wait your opponent ...")]
    AwaitingOpponent,
    /// Asks the active participant for a move. Not newline-terminated.
    #[display("{_0}-fire coordinate> ")]
    Prompt(Marker),
    /// Sent to the inactive participant at the start of each turn.
    #[display("Please, wait. Your opponent is thinking ...")]
    OpponentThinking,
    /// The move line could not be parsed.
    #[display("Bad coordinate")]
    BadCoordinate,
    /// The move lies outside the board.
    #[display("Coordinate out of bound!")]
    OutOfBound,
    /// The move targets a marked cell.
    #[display("Coordinate already in use!")]
    AlreadyInUse,
    /// Sent to the participant who completed a line.
    #[display("You are winner!")]
    Winner,
    /// Sent to the other participant.
    #[display("You are loser!")]
    Loser,
    /// Sent to both participants on a full board with no line.
    #[display("Dead heat!")]
    DeadHeat,
}

impl Notice {
    /// Text exactly as written to the stream.
    pub fn to_wire(&self) -> String {
        match self {
            Notice::Prompt(_) => self.to_string(),
            _ => format!("{self}\n"),
        }
    }

    /// Notice explaining why a placement was refused.
    ///
    /// Returns `None` for [`PlaceError::GameOver`], which a running session
    /// never produces.
    pub fn for_rejection(error: &PlaceError) -> Option<Self> {
        match error {
            PlaceError::OutOfBounds(_) => Some(Notice::OutOfBound),
            PlaceError::Occupied(_) => Some(Notice::AlreadyInUse),
            PlaceError::GameOver => None,
        }
    }
}

/// A move line that is not exactly two integers.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ParseError {
    /// The line did not contain exactly two tokens.
    #[display("expected two integers, found {_0} tokens")]
    WrongTokenCount(usize),
    /// A token is not a (signed) integer.
    #[display("{_0:?} is not an integer")]
    NotAnInteger(String),
}

impl std::error::Error for ParseError {}

/// Parses a move line into a coordinate.
///
/// The line is split on whitespace and must hold exactly two integer tokens,
/// row then column. Bounds are not checked here.
///
/// # Errors
///
/// Returns [`ParseError`] for any other shape.
#[instrument]
pub fn parse_move(line: &str) -> Result<Coordinate, ParseError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    let [row, col] = tokens.as_slice() else {
        return Err(ParseError::WrongTokenCount(tokens.len()));
    };

    let parse = |token: &str| {
        token
            .parse::<i64>()
            .map_err(|_| ParseError::NotAnInteger(token.to_string()))
    };

    Ok(Coordinate::new(parse(*row)?, parse(*col)?))
}

/// Renders a board.
///
/// ```text
///   012
///  +---
/// 0|X..
/// 1|.0.
/// 2|...
/// ```
pub fn render_board<const N: usize>(board: &Board<N>) -> String {
    let header: String = (0..N).map(|col| col.to_string()).collect();
    let mut out = format!("  {header}\n +{}\n", "-".repeat(N));

    for (index, row) in board.cells().iter().enumerate() {
        out.push_str(&format!("{index}|"));
        out.extend(row.iter().map(|cell| render_cell(*cell)));
        out.push('\n');
    }

    out
}

fn render_cell(cell: CellState) -> char {
    cell.marker().map_or(EMPTY_CELL, Marker::symbol)
}
