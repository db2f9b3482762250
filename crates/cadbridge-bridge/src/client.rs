//! Connection lifecycle and command dispatch for one CAD host.
//!
//! A [`BridgeClient`] owns at most one TCP connection. Every operation that
//! touches it — connect, disconnect, and the whole send/receive round trip —
//! runs under a single async mutex, so concurrent callers queue and the
//! half-duplex wire never sees interleaved frames. There is no correlation
//! ID in the protocol; serializing the full call is what keeps responses
//! matched to their requests.

use serde_json::{Map, Value};
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use cadbridge_core::{BridgeError, Command, ConnectionConfig, Response, Result};

use crate::transport;

/// Client for one host connection: lifecycle manager plus dispatcher.
///
/// The connection handle's presence is the connected flag: `Some` iff the
/// socket is open and the last I/O on it did not fail fatally. The flag is
/// advisory — only [`check_connection`](Self::check_connection) verifies
/// liveness with an actual round trip.
pub struct BridgeClient {
    config: ConnectionConfig,
    conn: Mutex<Option<TcpStream>>,
}

impl BridgeClient {
    /// Create a disconnected client for the given endpoint.
    pub fn new(config: ConnectionConfig) -> Self {
        Self {
            config,
            conn: Mutex::new(None),
        }
    }

    /// The connection configuration.
    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// Open the connection if it is not already open.
    pub async fn connect(&self) -> Result<()> {
        let mut guard = self.conn.lock().await;
        if guard.is_some() {
            return Ok(());
        }
        *guard = Some(Self::open(&self.config).await?);
        Ok(())
    }

    /// Close the connection. Best-effort and idempotent: close-time errors
    /// are logged and swallowed, and the state always ends disconnected.
    pub async fn disconnect(&self) {
        let mut guard = self.conn.lock().await;
        if let Some(mut stream) = guard.take() {
            use tokio::io::AsyncWriteExt;
            if let Err(e) = stream.shutdown().await {
                debug!(endpoint = %self.config.endpoint(), error = %e, "error closing socket");
            }
            info!(endpoint = %self.config.endpoint(), "disconnected");
        }
    }

    /// Advisory connected flag. Not verified; see
    /// [`check_connection`](Self::check_connection) for confirmed truth.
    pub async fn is_connected(&self) -> bool {
        self.conn.lock().await.is_some()
    }

    /// Verify the connection with a `ping` round trip.
    ///
    /// Returns `false` immediately when disconnected. On any ping failure the
    /// state flips to disconnected.
    pub async fn check_connection(&self) -> bool {
        if !self.is_connected().await {
            return false;
        }
        match self.send_command("ping", None).await {
            Ok(_) => true,
            Err(e) => {
                debug!(endpoint = %self.config.endpoint(), error = %e, "ping failed");
                self.disconnect().await;
                false
            }
        }
    }

    /// Send one command and await its response.
    ///
    /// Connects first if needed (failing with a connection error without
    /// sending). On a fatal transport failure the connection is torn down
    /// and, with `auto_reconnect`, exactly one reconnect is attempted — the
    /// original error is returned either way. The failed command is never
    /// retried; a successful reconnect only primes the next call.
    pub async fn send_command(
        &self,
        command_type: &str,
        params: Option<Map<String, Value>>,
    ) -> Result<Value> {
        let command = Command::new(command_type, params);
        let mut guard = self.conn.lock().await;

        if guard.is_none() {
            *guard = Some(Self::open(&self.config).await?);
        }

        let result = match guard.as_mut() {
            Some(stream) => Self::round_trip(stream, &self.config, &command).await,
            // Unreachable: populated above while holding the lock.
            None => Err(BridgeError::connection(
                &self.config.host,
                self.config.port,
                "not connected",
            )),
        };

        match result {
            Err(e) if e.is_fatal() => {
                warn!(
                    endpoint = %self.config.endpoint(),
                    command = command_type,
                    error = %e,
                    "command failed"
                );
                *guard = None;
                if self.config.auto_reconnect {
                    match Self::open(&self.config).await {
                        Ok(stream) => {
                            debug!(endpoint = %self.config.endpoint(), "reconnected after failure");
                            *guard = Some(stream);
                        }
                        Err(reconnect_err) => {
                            debug!(
                                endpoint = %self.config.endpoint(),
                                error = %reconnect_err,
                                "reconnect attempt failed"
                            );
                        }
                    }
                }
                Err(e)
            }
            other => other,
        }
    }

    async fn round_trip(
        stream: &mut TcpStream,
        config: &ConnectionConfig,
        command: &Command,
    ) -> Result<Value> {
        transport::write_frame(stream, config, command).await?;
        debug!(command = %command.command_type, "sent command");
        let raw = transport::read_one_message(stream, config).await?;
        Response::from_value(raw)?.into_result()
    }

    async fn open(config: &ConnectionConfig) -> Result<TcpStream> {
        let attempt = tokio::time::timeout(
            config.timeout(),
            TcpStream::connect((config.host.as_str(), config.port)),
        )
        .await;
        match attempt {
            Ok(Ok(stream)) => {
                info!(endpoint = %config.endpoint(), "connected");
                Ok(stream)
            }
            Ok(Err(e)) => Err(BridgeError::connection(
                &config.host,
                config.port,
                e.to_string(),
            )),
            Err(_) => Err(BridgeError::connection(
                &config.host,
                config.port,
                "connect timed out",
            )),
        }
    }
}

impl std::fmt::Debug for BridgeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BridgeClient")
            .field("endpoint", &self.config.endpoint())
            .finish_non_exhaustive()
    }
}
