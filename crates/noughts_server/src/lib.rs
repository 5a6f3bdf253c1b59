//! X-0 game server.
//!
//! Participants connect over a line-oriented text protocol, are paired in
//! arrival order, and each pair plays one game of X-0 on its own task.
//!
//! # Architecture
//!
//! - **Codec**: every outbound message and the move parser
//! - **Participant**: a duplex line stream with a marker and liveness flag
//! - **Session**: the per-game turn state machine
//! - **Matchmaker**: the single-slot pairing buffer that spawns sessions
//! - **Server**: the TCP accept loop feeding the matchmaker
//!
//! # Example
//!
//! ```no_run
//! use noughts_server::{GameServer, ServerConfig};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ServerConfig::load(None)?;
//! let server = GameServer::bind(&config).await?;
//! server.run().await;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod codec;
mod config;
mod error;
mod matchmaker;
mod participant;
mod server;
mod session;

// Crate-level exports
pub use codec::{EMPTY_CELL, Notice, ParseError, parse_move, render_board};
pub use config::{HOST_VAR, PORT_VAR, READ_TIMEOUT_VAR, ServerConfig};
pub use error::{ConfigError, ConnectionError, ConnectionErrorKind, PairingError};
pub use matchmaker::{Intake, Matchmaker};
pub use participant::{Duplex, MAX_LINE_BYTES, Participant, ParticipantId};
pub use server::GameServer;
pub use session::{Phase, Session, SessionId, SessionReport};
