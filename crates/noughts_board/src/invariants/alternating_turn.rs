//! Alternating turn invariant: markers alternate X, 0, X, 0, ...

use super::Invariant;
use crate::{Game, Marker};

/// Invariant: markers alternate, starting with X.
///
/// The side to move must also match the parity of the history.
pub struct AlternatingTurnInvariant;

impl<const N: usize> Invariant<Game<N>> for AlternatingTurnInvariant {
    fn holds(game: &Game<N>) -> bool {
        let history = game.history();

        if let Some(first) = history.first() {
            if first.marker != Marker::X {
                return false;
            }
        }

        if history.windows(2).any(|pair| pair[0].marker == pair[1].marker) {
            return false;
        }

        let expected_next = if history.len() % 2 == 0 {
            Marker::X
        } else {
            Marker::Nought
        };

        game.to_move() == expected_next
    }

    fn description() -> &'static str {
        "Markers alternate turns (X, 0, X, 0, ...)"
    }
}
