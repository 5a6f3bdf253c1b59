//! Game rules for X-0.
//!
//! Pure functions over a [`Board`](crate::Board). Rules are kept apart from
//! board storage so they can be tested on hand-built positions.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{LineKind, WinningLine, lines, winning_line};
