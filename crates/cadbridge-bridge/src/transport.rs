//! Framed transport: one JSON value per request and per response.
//!
//! Requests are newline-terminated. Responses carry no length prefix or
//! delimiter; the reader accumulates 8 KiB chunks and re-attempts a full
//! JSON parse after each one, returning on the first success. Trailing
//! bytes past the parsed value are discarded — acceptable because the
//! protocol is strictly one response per request. The quadratic re-parse
//! is fine at the small response sizes the hosts produce; swapping in a
//! length-prefixed codec would only touch this module.

use serde_json::Value;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::timeout;

use cadbridge_core::{BridgeError, Command, ConnectionConfig, Result};

/// Read buffer size, matching the hosts' expected message granularity.
const READ_CHUNK: usize = 8192;

/// Serialize a command and write it with a single trailing newline.
pub async fn write_frame<W>(writer: &mut W, config: &ConnectionConfig, command: &Command) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut frame = command.to_wire()?;
    frame.push(b'\n');
    writer
        .write_all(&frame)
        .await
        .map_err(|e| BridgeError::connection(&config.host, config.port, format!("write: {e}")))?;
    writer
        .flush()
        .await
        .map_err(|e| BridgeError::connection(&config.host, config.port, format!("flush: {e}")))?;
    Ok(())
}

/// Read exactly one JSON value from the stream.
///
/// Each chunk read is bounded by the configured timeout. Fails with
/// [`BridgeError::Protocol`] if the peer closes before a full value parses
/// and [`BridgeError::Timeout`] if no bytes arrive in time.
pub async fn read_one_message<R>(reader: &mut R, config: &ConnectionConfig) -> Result<Value>
where
    R: AsyncRead + Unpin,
{
    let mut buf: Vec<u8> = Vec::with_capacity(READ_CHUNK);
    let mut chunk = [0u8; READ_CHUNK];

    loop {
        let n = timeout(config.timeout(), reader.read(&mut chunk))
            .await
            .map_err(|_| BridgeError::Timeout {
                timeout_ms: config.timeout().as_millis() as u64,
                context: "response".to_owned(),
            })?
            .map_err(|e| {
                BridgeError::connection(&config.host, config.port, format!("read: {e}"))
            })?;

        if n == 0 {
            return Err(BridgeError::Protocol("incomplete response".to_owned()));
        }
        buf.extend_from_slice(&chunk[..n]);

        // Parse retry: the response is complete as soon as the buffer is
        // one valid JSON value.
        if let Ok(value) = serde_json::from_slice::<Value>(&buf) {
            return Ok(value);
        }
    }
}
