//! Shared helpers for server integration tests.

#![allow(dead_code)]

use noughts_board::Marker;
use noughts_server::{Participant, ParticipantId, Session, SessionId, SessionReport};
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, DuplexStream, duplex};
use tokio::task::JoinHandle;

/// Longest a test waits for the server to say something.
const PATIENCE: Duration = Duration::from_secs(5);

/// Board as rendered before any move.
pub const EMPTY_BOARD: &str = "  012\n +---\n0|...\n1|...\n2|...\n";

/// The participant side of a connection.
pub struct TestClient<S = DuplexStream> {
    stream: S,
    unread: String,
}

impl TestClient<DuplexStream> {
    /// Creates a client and the server end of its pipe.
    pub fn pipe() -> (Self, DuplexStream) {
        let (client, server) = duplex(4096);
        (Self::new(client), server)
    }
}

impl<S: AsyncRead + AsyncWrite + Unpin> TestClient<S> {
    /// Wraps an already connected stream.
    pub fn new(stream: S) -> Self {
        Self {
            stream,
            unread: String::new(),
        }
    }

    /// Reads until `needle` has been received and returns everything up to
    /// and including it.
    pub async fn read_until(&mut self, needle: &str) -> String {
        loop {
            if let Some(pos) = self.unread.find(needle) {
                return self.unread.drain(..pos + needle.len()).collect();
            }

            let mut buf = [0u8; 512];
            let n = tokio::time::timeout(PATIENCE, self.stream.read(&mut buf))
                .await
                .expect("Timed out waiting for server")
                .expect("Read failed");
            assert!(
                n > 0,
                "Stream closed while waiting for {needle:?}; unread: {:?}",
                self.unread
            );
            self.unread.push_str(std::str::from_utf8(&buf[..n]).expect("ASCII protocol"));
        }
    }

    /// Reads up to and including the next move prompt.
    pub async fn prompt(&mut self) -> String {
        self.read_until("coordinate> ").await
    }

    /// Sends one line.
    pub async fn send(&mut self, line: &str) {
        self.stream
            .write_all(format!("{line}\n").as_bytes())
            .await
            .expect("Write failed");
    }

    /// Waits for the next prompt, then answers it.
    pub async fn play(&mut self, line: &str) -> String {
        let seen = self.prompt().await;
        self.send(line).await;
        seen
    }

    /// Reads until the server closes the stream.
    pub async fn read_to_end(&mut self) -> String {
        let mut rest = Vec::new();
        tokio::time::timeout(PATIENCE, self.stream.read_to_end(&mut rest))
            .await
            .expect("Timed out waiting for close")
            .expect("Read failed");
        let mut out = std::mem::take(&mut self.unread);
        out.push_str(std::str::from_utf8(&rest).expect("ASCII protocol"));
        out
    }
}

/// Spawns a session between two fresh pipe clients, X first.
pub fn start_session(
    read_timeout: Option<Duration>,
) -> (TestClient, TestClient, JoinHandle<SessionReport>) {
    let (crosses, crosses_end) = TestClient::pipe();
    let (noughts, noughts_end) = TestClient::pipe();

    let session = Session::new(
        SessionId::new(0),
        Participant::new(ParticipantId::new(0), Marker::X, crosses_end),
        Participant::new(ParticipantId::new(1), Marker::Nought, noughts_end),
        read_timeout,
    );

    (crosses, noughts, tokio::spawn(session.run()))
}

/// Plays `moves` alternately, X first, each after its prompt.
pub async fn play_moves(crosses: &mut TestClient, noughts: &mut TestClient, moves: &[&str]) {
    for (index, line) in moves.iter().enumerate() {
        let client = if index % 2 == 0 {
            &mut *crosses
        } else {
            &mut *noughts
        };
        client.play(line).await;
    }
}
