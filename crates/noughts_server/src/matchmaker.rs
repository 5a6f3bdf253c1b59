//! Pairs arriving participants and starts a session for every pair.

use crate::codec::Notice;
use crate::error::PairingError;
use crate::participant::{Duplex, Participant, ParticipantId};
use crate::session::{Session, SessionId, SessionReport};
use noughts_board::Marker;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{info, instrument, warn};

/// What [`Matchmaker::intake`] did with an arrival.
#[derive(Debug)]
pub enum Intake {
    /// The arrival is now waiting in the pairing slot.
    Pending(ParticipantId),
    /// The arrival completed a pair and a session was spawned.
    Paired {
        /// Number of the new session.
        session: SessionId,
        /// Resolves to the session's report when the game ends.
        handle: JoinHandle<SessionReport>,
    },
    /// The arrival could not be greeted and was dropped.
    Discarded(ParticipantId),
}

/// Holds at most one participant waiting for a partner.
///
/// `intake` takes `&mut self`, so the pairing slot only ever has one writer.
/// Once a pair is dispatched the matchmaker keeps no reference to either
/// participant.
#[derive(Debug)]
pub struct Matchmaker<S> {
    pending: Option<Participant<S>>,
    next_participant: u64,
    next_session: u64,
    read_timeout: Option<Duration>,
}

impl<S: Duplex> Matchmaker<S> {
    /// Creates a matchmaker whose sessions use `read_timeout` for moves.
    pub fn new(read_timeout: Option<Duration>) -> Self {
        Self {
            pending: None,
            next_participant: 0,
            next_session: 0,
            read_timeout,
        }
    }

    /// The participant waiting in the pairing slot, if any.
    pub fn pending(&self) -> Option<ParticipantId> {
        self.pending.as_ref().map(Participant::id)
    }

    /// Accepts a newly connected participant.
    ///
    /// The first of a pair plays X and waits; the second plays 0 and starts
    /// the session on its own task. A waiting participant that has gone away
    /// is dropped first, so it never consumes a pairing.
    #[instrument(skip(self, stream))]
    pub async fn intake(&mut self, stream: S) -> Intake {
        let id = ParticipantId::new(self.next_participant);
        self.next_participant += 1;

        self.evict_dead_pending().await;

        let Some(waiting) = self.pending.take() else {
            let mut participant = Participant::new(id, Marker::X, stream);
            return match greet(&mut participant).await {
                Ok(()) => {
                    info!(participant = %id, "Waiting for an opponent");
                    self.pending = Some(participant);
                    Intake::Pending(id)
                }
                Err(err) => {
                    discard(participant, err).await;
                    Intake::Discarded(id)
                }
            };
        };

        let mut participant = Participant::new(id, Marker::Nought, stream);
        if let Err(err) = greet(&mut participant).await {
            self.pending = Some(waiting);
            discard(participant, err).await;
            return Intake::Discarded(id);
        }

        let session = SessionId::new(self.next_session);
        self.next_session += 1;

        info!(
            %session,
            crosses = %waiting.id(),
            noughts = %id,
            "Starting game"
        );

        let game = Session::new(session, waiting, participant, self.read_timeout);
        let handle = tokio::spawn(game.run());
        Intake::Paired { session, handle }
    }

    async fn evict_dead_pending(&mut self) {
        let dead = self
            .pending
            .as_mut()
            .is_some_and(|waiting| !waiting.probe());

        if dead {
            if let Some(waiting) = self.pending.take() {
                discard(waiting, PairingError::Disconnected).await;
            }
        }
    }
}

async fn greet<S: Duplex>(participant: &mut Participant<S>) -> Result<(), PairingError> {
    let greeting = Notice::Greeting(participant.marker(), participant.id());
    participant.send(greeting).await?;

    if participant.marker() == Marker::X {
        participant.send(Notice::AwaitingOpponent).await?;
    }

    Ok(())
}

async fn discard<S: Duplex>(participant: Participant<S>, reason: PairingError) {
    warn!(participant = %participant.id(), %reason, "Dropping participant before pairing");
    participant.close().await;
}

impl<S: Duplex> Default for Matchmaker<S> {
    fn default() -> Self {
        Self::new(None)
    }
}
