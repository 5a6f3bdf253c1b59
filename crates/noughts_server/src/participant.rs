//! A connected participant: one duplex line stream plus its marker.

use crate::codec::{self, Notice};
use crate::error::{ConnectionError, ConnectionErrorKind};
use futures::FutureExt;
use noughts_board::{Board, Marker};
use std::fmt;
use std::time::Duration;
use tokio::io::{
    AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader, ReadHalf,
    WriteHalf,
};
use tracing::{debug, instrument};

/// Longest move line accepted, newline included. A longer line ends the
/// session instead of growing the read buffer.
pub const MAX_LINE_BYTES: usize = 256;

/// Any bidirectional byte stream a participant can be served over.
///
/// Implemented for TCP sockets and for in-memory pipes alike.
pub trait Duplex: AsyncRead + AsyncWrite + Unpin + Send + 'static {}

impl<T> Duplex for T where T: AsyncRead + AsyncWrite + Unpin + Send + 'static {}

/// Connection number, counted over every accepted connection.
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
pub struct ParticipantId(u64);

impl ParticipantId {
    /// Raw connection number.
    pub fn value(self) -> u64 {
        self.0
    }
}

/// A participant handle.
///
/// Owns both halves of the stream. Once a read hits end-of-stream or any
/// read or write fails, the handle is marked dead and every further write
/// is refused without touching the stream. [`Participant::close`] consumes
/// the handle, so it can only be released once.
pub struct Participant<S> {
    id: ParticipantId,
    marker: Marker,
    reader: BufReader<ReadHalf<S>>,
    writer: WriteHalf<S>,
    alive: bool,
}

impl<S: Duplex> Participant<S> {
    /// Wraps a connected stream.
    pub fn new(id: ParticipantId, marker: Marker, stream: S) -> Self {
        let (read_half, writer) = tokio::io::split(stream);
        Self {
            id,
            marker,
            reader: BufReader::new(read_half),
            writer,
            alive: true,
        }
    }

    /// Connection number.
    pub fn id(&self) -> ParticipantId {
        self.id
    }

    /// Marker this participant plays.
    pub fn marker(&self) -> Marker {
        self.marker
    }

    /// False once the stream has closed or failed.
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Writes a notice and flushes.
    #[instrument(skip(self), fields(participant = %self.id))]
    pub async fn send(&mut self, notice: Notice) -> Result<(), ConnectionError> {
        self.write_text(&notice.to_wire()).await
    }

    /// Writes the rendered board and flushes.
    pub async fn send_board<const N: usize>(
        &mut self,
        board: &Board<N>,
    ) -> Result<(), ConnectionError> {
        self.write_text(&codec::render_board(board)).await
    }

    async fn write_text(&mut self, text: &str) -> Result<(), ConnectionError> {
        if !self.alive {
            return Err(ConnectionError::new(ConnectionErrorKind::Closed));
        }

        if let Err(err) = write_flushed(&mut self.writer, text).await {
            self.alive = false;
            return Err(err.into());
        }

        Ok(())
    }

    /// Reads one line, waiting at most `timeout` when given.
    ///
    /// Input that was buffered before this call is thrown away first, so a
    /// line typed ahead of the prompt never reaches the parser.
    ///
    /// # Errors
    ///
    /// End-of-stream, an I/O failure, the timeout elapsing, or a line longer
    /// than [`MAX_LINE_BYTES`]; each leaves the handle dead.
    #[instrument(skip(self), fields(participant = %self.id))]
    pub async fn read_line(&mut self, timeout: Option<Duration>) -> Result<String, ConnectionError> {
        if !self.alive {
            return Err(ConnectionError::new(ConnectionErrorKind::Closed));
        }

        let discarded = self.discard_buffered();
        if discarded > 0 {
            debug!(discarded, "Dropped input typed ahead of the prompt");
        }

        let mut line = Vec::new();
        let mut limited = (&mut self.reader).take(MAX_LINE_BYTES as u64);
        let read = limited.read_until(b'\n', &mut line);
        let result = match timeout {
            Some(limit) => match tokio::time::timeout(limit, read).await {
                Ok(result) => result,
                Err(_) => {
                    self.alive = false;
                    return Err(ConnectionError::new(ConnectionErrorKind::TimedOut(limit)));
                }
            },
            None => read.await,
        };

        match result {
            Ok(0) => {
                self.alive = false;
                Err(ConnectionError::new(ConnectionErrorKind::Closed))
            }
            Ok(n) if n >= MAX_LINE_BYTES && line.last() != Some(&b'\n') => {
                self.alive = false;
                Err(ConnectionError::new(ConnectionErrorKind::LineTooLong(
                    MAX_LINE_BYTES,
                )))
            }
            Ok(_) => Ok(String::from_utf8_lossy(&line).into_owned()),
            Err(err) => {
                self.alive = false;
                Err(err.into())
            }
        }
    }

    /// Drops whatever is sitting in the read buffer. Returns the byte count.
    pub fn discard_buffered(&mut self) -> usize {
        let pending = self.reader.buffer().len();
        self.reader.consume(pending);
        pending
    }

    /// Checks, without waiting, whether the peer is still connected.
    ///
    /// Whatever is already readable is drained and dropped, so a peer that
    /// typed ahead and then hung up is seen as gone. Nothing is lost: the
    /// next [`Participant::read_line`] would discard that input anyway.
    #[instrument(skip(self), fields(participant = %self.id))]
    pub fn probe(&mut self) -> bool {
        if !self.alive {
            return false;
        }

        let mut discarded = 0;
        let connected = loop {
            let available = match self.reader.fill_buf().now_or_never() {
                None => break true,
                Some(Ok(buffered)) => buffered.len(),
                Some(Err(err)) => {
                    debug!(error = %err, "Probe failed");
                    break false;
                }
            };

            if available == 0 {
                break false;
            }
            self.reader.consume(available);
            discarded += available;
        };

        if discarded > 0 {
            debug!(discarded, "Dropped input typed while not prompted");
        }
        if !connected {
            self.alive = false;
        }
        connected
    }

    /// Shuts the stream down and releases it.
    #[instrument(skip(self), fields(participant = %self.id, alive = self.alive))]
    pub async fn close(mut self) {
        if let Err(err) = self.writer.shutdown().await {
            debug!(error = %err, "Shutdown failed");
        }
        debug!("Participant released");
    }
}

impl<S> fmt::Debug for Participant<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Participant")
            .field("id", &self.id)
            .field("marker", &self.marker)
            .field("alive", &self.alive)
            .finish_non_exhaustive()
    }
}

async fn write_flushed<W: AsyncWrite + Unpin>(writer: &mut W, text: &str) -> std::io::Result<()> {
    writer.write_all(text.as_bytes()).await?;
    writer.flush().await
}
