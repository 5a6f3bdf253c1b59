//! Error types for sessions, pairing and configuration.

use derive_more::{Display, Error};
use std::time::Duration;
use tracing::instrument;

/// Why a participant's stream became unusable.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ConnectionErrorKind {
    /// The peer closed its side of the stream.
    #[display("stream closed")]
    Closed,
    /// No line arrived within the configured read timeout.
    #[display("no move within {_0:?}")]
    TimedOut(Duration),
    /// A line ran past the length limit without a newline.
    #[display("line longer than {_0} bytes")]
    LineTooLong(usize),
    /// Reading or writing failed.
    #[display("{_0}")]
    Io(String),
}

/// A participant's stream broke. Fatal to the session it belongs to.
#[derive(Debug, Clone, Display, Error)]
#[display("Connection error: {} at {}:{}", kind, file, line)]
pub struct ConnectionError {
    /// What went wrong.
    pub kind: ConnectionErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConnectionError {
    /// Creates a new connection error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: ConnectionErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// True when the peer hung up rather than the stream failing.
    pub fn is_closed(&self) -> bool {
        self.kind == ConnectionErrorKind::Closed
    }
}

impl From<std::io::Error> for ConnectionError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(ConnectionErrorKind::Io(err.to_string()))
    }
}

/// Why a pairing attempt was dropped.
#[derive(Debug, Clone, Display)]
pub enum PairingError {
    /// The pending participant went away before a partner arrived.
    #[display("pending participant disconnected")]
    Disconnected,
    /// The greeting could not be delivered.
    #[display("greeting failed: {_0}")]
    Greeting(ConnectionError),
}

impl std::error::Error for PairingError {}

impl From<ConnectionError> for PairingError {
    fn from(err: ConnectionError) -> Self {
        PairingError::Greeting(err)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
