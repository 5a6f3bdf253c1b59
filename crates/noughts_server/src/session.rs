//! One running game between two paired participants.
//!
//! A session is a small state machine:
//!
//! ```text
//! WaitingTurn(X) ──accepted move──▶ WaitingTurn(0) ──accepted move──▶ ...
//!       │                                 │
//!       └──── win / draw / broken stream ─┴──▶ Terminal(outcome)
//! ```
//!
//! Every path ends in `Terminal`, after which both participants are closed
//! exactly once.

use crate::codec::{self, Notice};
use crate::error::{ConnectionError, ConnectionErrorKind};
use crate::participant::{Duplex, Participant, ParticipantId};
use derive_getters::Getters;
use noughts_board::{Marker, Outcome, StandardGame};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Session number, counted over every pairing.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    derive_more::Display,
    derive_new::new,
)]
#[display("{_0}")]
pub struct SessionId(u64);

/// State of the turn machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the given marker to make an acceptable move.
    WaitingTurn(Marker),
    /// The game is over.
    Terminal(Outcome),
}

/// Summary returned when a session ends.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct SessionReport {
    /// Session number.
    session: SessionId,
    /// Participant playing X.
    crosses: ParticipantId,
    /// Participant playing 0.
    noughts: ParticipantId,
    /// Final outcome. Never `InProgress`.
    outcome: Outcome,
    /// Number of accepted placements.
    placements: usize,
}

/// A game between two participants.
#[derive(Debug)]
pub struct Session<S> {
    id: SessionId,
    crosses: Participant<S>,
    noughts: Participant<S>,
    game: StandardGame,
    read_timeout: Option<Duration>,
}

impl<S: Duplex> Session<S> {
    /// Creates a session. `crosses` moves first.
    pub fn new(
        id: SessionId,
        crosses: Participant<S>,
        noughts: Participant<S>,
        read_timeout: Option<Duration>,
    ) -> Self {
        debug_assert_eq!(crosses.marker(), Marker::X);
        debug_assert_eq!(noughts.marker(), Marker::Nought);
        Self {
            id,
            crosses,
            noughts,
            game: StandardGame::new(),
            read_timeout,
        }
    }

    /// Session number.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Plays the game to a terminal outcome and releases both participants.
    #[instrument(skip(self), fields(session = %self.id, crosses = %self.crosses.id(), noughts = %self.noughts.id()))]
    pub async fn run(mut self) -> SessionReport {
        info!("Session started");

        let mut phase = match self.broadcast(Notice::Help).await {
            Ok(()) => Phase::WaitingTurn(Marker::X),
            Err(err) => abort(err),
        };

        let outcome = loop {
            phase = match phase {
                Phase::WaitingTurn(active) => match self.turn(active).await {
                    Ok(next) => next,
                    Err(err) => abort(err),
                },
                Phase::Terminal(outcome) => break outcome,
            };
        };

        let report = SessionReport {
            session: self.id,
            crosses: self.crosses.id(),
            noughts: self.noughts.id(),
            outcome,
            placements: self.game.history().len(),
        };

        self.close().await;
        info!(%outcome, placements = report.placements, "Game over");
        report
    }

    /// Runs one `WaitingTurn` phase and returns the next phase.
    #[instrument(skip(self), fields(session = %self.id))]
    async fn turn(&mut self, active: Marker) -> Result<Phase, ConnectionError> {
        let outcome = self.game.evaluate();
        if outcome.is_terminal() {
            self.announce(outcome).await;
            return Ok(Phase::Terminal(outcome));
        }

        // Either side may have hung up while the other was thinking.
        if !self.crosses.probe() || !self.noughts.probe() {
            return Err(ConnectionError::new(ConnectionErrorKind::Closed));
        }

        let Self {
            crosses,
            noughts,
            game,
            read_timeout,
            ..
        } = self;

        crosses.send_board(game.board()).await?;
        noughts.send_board(game.board()).await?;

        let (player, opponent) = match active {
            Marker::X => (crosses, noughts),
            Marker::Nought => (noughts, crosses),
        };

        opponent.send(Notice::OpponentThinking).await?;

        loop {
            player.send(Notice::Prompt(active)).await?;
            let line = player.read_line(*read_timeout).await?;

            let coordinate = match codec::parse_move(&line) {
                Ok(coordinate) => coordinate,
                Err(err) => {
                    debug!(error = %err, "Unparseable move");
                    player.send(Notice::BadCoordinate).await?;
                    continue;
                }
            };

            match game.play(coordinate) {
                Ok(placement) => {
                    info!(%placement, "Move accepted");
                    return Ok(Phase::WaitingTurn(active.opponent()));
                }
                Err(err) => match Notice::for_rejection(&err) {
                    Some(notice) => {
                        debug!(error = %err, "Move rejected");
                        player.send(notice).await?;
                    }
                    None => return Ok(Phase::WaitingTurn(active)),
                },
            }
        }
    }

    /// Shows the final board and tells each side how the game ended.
    ///
    /// The outcome is already decided, so delivery failures are only logged.
    async fn announce(&mut self, outcome: Outcome) {
        let Some((crosses_notice, noughts_notice)) = result_notices(outcome) else {
            warn!(%outcome, "No result to announce");
            return;
        };

        for (participant, notice) in [
            (&mut self.crosses, crosses_notice),
            (&mut self.noughts, noughts_notice),
        ] {
            let delivered = match participant.send_board(self.game.board()).await {
                Ok(()) => participant.send(notice).await,
                Err(err) => Err(err),
            };
            if let Err(err) = delivered {
                warn!(participant = %participant.id(), error = %err, "Could not deliver result");
            }
        }

        if let Some(line) = self.game.board().winning_line() {
            info!(%line, "Line completed");
        }
    }

    async fn broadcast(&mut self, notice: Notice) -> Result<(), ConnectionError> {
        self.crosses.send(notice).await?;
        self.noughts.send(notice).await
    }

    async fn close(self) {
        let Self {
            crosses, noughts, ..
        } = self;
        tokio::join!(crosses.close(), noughts.close());
    }
}

fn abort(err: ConnectionError) -> Phase {
    warn!(error = %err, "Session aborted");
    Phase::Terminal(Outcome::Aborted)
}

/// Result notices for X and 0, or `None` when the board decided nothing.
fn result_notices(outcome: Outcome) -> Option<(Notice, Notice)> {
    match outcome {
        Outcome::Winner(Marker::X) => Some((Notice::Winner, Notice::Loser)),
        Outcome::Winner(Marker::Nought) => Some((Notice::Loser, Notice::Winner)),
        Outcome::Draw => Some((Notice::DeadHeat, Notice::DeadHeat)),
        Outcome::InProgress | Outcome::Aborted => None,
    }
}
