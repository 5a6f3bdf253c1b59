//! TCP front end: accepts connections and hands them to the matchmaker.

use crate::config::ServerConfig;
use crate::matchmaker::{Intake, Matchmaker};
use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, info, instrument, warn};

/// Pause after a failed `accept`, so a persistent failure such as running
/// out of file descriptors does not spin.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// Listening socket plus the matchmaker it feeds.
#[derive(Debug)]
pub struct GameServer {
    listener: TcpListener,
    matchmaker: Matchmaker<TcpStream>,
}

impl GameServer {
    /// Binds the configured address.
    #[instrument(skip(config), fields(address = %config.bind_address()))]
    pub async fn bind(config: &ServerConfig) -> std::io::Result<Self> {
        let listener = TcpListener::bind(config.bind_address()).await?;
        info!(address = %listener.local_addr()?, "Listening");

        Ok(Self {
            listener,
            matchmaker: Matchmaker::new(config.read_timeout()),
        })
    }

    /// Address actually bound (useful with port 0).
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accepts connections until `shutdown` resolves.
    ///
    /// Individual accept failures and broken sessions never end the loop.
    #[instrument(skip_all)]
    pub async fn run_until(mut self, shutdown: impl Future<Output = ()>) {
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Shutting down");
                    break;
                }
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        info!(%peer, "Participant connected");
                        match self.matchmaker.intake(stream).await {
                            Intake::Pending(id) => debug!(participant = %id, "Parked"),
                            Intake::Paired { session, .. } => debug!(%session, "Dispatched"),
                            Intake::Discarded(id) => debug!(participant = %id, "Discarded"),
                        }
                    }
                    Err(err) => {
                        warn!(error = %err, "Accept failed");
                        tokio::time::sleep(ACCEPT_BACKOFF).await;
                    }
                },
            }
        }
    }

    /// Accepts connections until Ctrl+C.
    pub async fn run(self) {
        self.run_until(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                warn!(error = %err, "Could not listen for Ctrl+C");
                std::future::pending::<()>().await;
            }
        })
        .await;
    }
}
