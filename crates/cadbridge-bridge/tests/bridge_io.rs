//! End-to-end bridge tests against real TCP listeners standing in for the
//! CAD hosts.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use serde_json::{Map, Value, json};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

use cadbridge_bridge::{Bridge, BridgeClient, RhinoBridge};
use cadbridge_core::{BridgeError, ConnectionConfig};

const TIMEOUT: Duration = Duration::from_millis(500);

fn config_for(addr: SocketAddr, auto_reconnect: bool) -> ConnectionConfig {
    ConnectionConfig::new(addr.ip().to_string(), addr.port(), TIMEOUT, auto_reconnect).unwrap()
}

/// Bind a listener and serve every accepted connection with `serve`.
async fn spawn_host<F, Fut>(serve: F) -> SocketAddr
where
    F: Fn(TcpStream) -> Fut + Send + Sync + 'static,
    Fut: std::future::Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let serve = Arc::new(serve);
    let _accept_loop = tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let serve = serve.clone();
            let _conn = tokio::spawn(async move { serve(stream).await });
        }
    });
    addr
}

/// Reply to every request line with a fixed body.
async fn reply_fixed(stream: TcpStream, body: &'static str) {
    let (read, mut write) = stream.into_split();
    let mut lines = BufReader::new(read).lines();
    while let Ok(Some(_request)) = lines.next_line().await {
        write.write_all(body.as_bytes()).await.unwrap();
        write.write_all(b"\n").await.unwrap();
    }
}

// ── Happy path ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn ok_round_trip_returns_empty_result() {
    let addr = spawn_host(|s| reply_fixed(s, r#"{"status":"ok","result":{}}"#)).await;
    let client = BridgeClient::new(config_for(addr, false));

    let result = client.send_command("ping", None).await.unwrap();
    assert_eq!(result, json!({}));
    assert!(client.is_connected().await);
}

#[tokio::test]
async fn request_frame_shape_on_the_wire() {
    // Echo the parsed request back as the result to verify framing end to end.
    let addr = spawn_host(|stream| async move {
        let (read, mut write) = stream.into_split();
        let mut lines = BufReader::new(read).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            let request: Value = serde_json::from_str(&line).unwrap();
            let reply = json!({"status": "ok", "result": request});
            write
                .write_all(serde_json::to_string(&reply).unwrap().as_bytes())
                .await
                .unwrap();
            write.write_all(b"\n").await.unwrap();
        }
    })
    .await;
    let client = BridgeClient::new(config_for(addr, false));

    let mut params = Map::new();
    let _ = params.insert(
        "payload".to_owned(),
        json!({"points": [[0, 0, 0], [1.5, 2.5, -3.5]], "tags": {"a": [true, null]}}),
    );
    let echoed = client
        .send_command("create_object", Some(params.clone()))
        .await
        .unwrap();

    // One request object per round trip, with type and params intact.
    assert_eq!(echoed["type"], "create_object");
    assert_eq!(echoed["params"], Value::Object(params));
}

#[tokio::test]
async fn remote_error_carries_message_and_keeps_connection() {
    let addr = spawn_host(|s| reply_fixed(s, r#"{"status":"error","message":"X"}"#)).await;
    let client = BridgeClient::new(config_for(addr, true));

    let err = client.send_command("create_object", None).await.unwrap_err();
    assert!(matches!(err, BridgeError::Remote(ref m) if m == "X"));

    // Not a transport failure: the same connection answers the next call.
    assert!(client.is_connected().await);
    let err = client.send_command("create_object", None).await.unwrap_err();
    assert!(matches!(err, BridgeError::Remote(_)));
}

#[tokio::test]
async fn response_without_status_is_success() {
    let addr = spawn_host(|s| reply_fixed(s, r#"{"result":{"name":"Box 1"}}"#)).await;
    let client = BridgeClient::new(config_for(addr, false));

    let result = client.send_command("get_document_info", None).await.unwrap();
    assert_eq!(result["name"], "Box 1");
}

// ── Connection failures ─────────────────────────────────────────────────────

#[tokio::test]
async fn connect_failure_is_connection_error_within_timeout() {
    // Bind then drop to get a port nothing listens on.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = BridgeClient::new(config_for(addr, false));
    let start = Instant::now();
    let err = client.connect().await.unwrap_err();
    assert!(matches!(err, BridgeError::Connection { .. }));
    assert!(start.elapsed() < TIMEOUT + Duration::from_millis(500));
    assert!(!client.is_connected().await);
}

#[tokio::test]
async fn send_without_listener_fails_without_sending() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = BridgeClient::new(config_for(addr, true));
    let err = client.send_command("ping", None).await.unwrap_err();
    assert!(matches!(err, BridgeError::Connection { .. }));
}

#[tokio::test]
async fn silent_host_times_out() {
    let addr = spawn_host(|stream| async move {
        // Accept, read, never answer.
        let (read, _write) = stream.into_split();
        let mut lines = BufReader::new(read).lines();
        while let Ok(Some(_)) = lines.next_line().await {}
    })
    .await;
    let client = BridgeClient::new(config_for(addr, false));

    let start = Instant::now();
    let err = client.send_command("ping", None).await.unwrap_err();
    assert!(matches!(err, BridgeError::Timeout { .. }));
    assert!(start.elapsed() < TIMEOUT + Duration::from_millis(500));
}

#[tokio::test]
async fn close_after_request_is_protocol_error() {
    // Consume the request so the client's write completes, then close
    // without replying: the read must observe a clean EOF.
    let addr = spawn_host(|stream| async move {
        let (read, write) = stream.into_split();
        let mut lines = BufReader::new(read).lines();
        let _ = lines.next_line().await;
        drop(write);
    })
    .await;
    let client = BridgeClient::new(config_for(addr, false));

    let err = client.send_command("ping", None).await.unwrap_err();
    assert!(matches!(err, BridgeError::Protocol(ref m) if m == "incomplete response"));
}

#[tokio::test]
async fn disconnect_twice_is_noop() {
    let addr = spawn_host(|s| reply_fixed(s, r#"{"status":"ok","result":{}}"#)).await;
    let client = BridgeClient::new(config_for(addr, false));
    client.connect().await.unwrap();

    client.disconnect().await;
    assert!(!client.is_connected().await);
    client.disconnect().await;
    assert!(!client.is_connected().await);
}

// ── Reconnect policy ────────────────────────────────────────────────────────

#[tokio::test]
async fn failed_send_primes_reconnect_for_next_call() {
    // Each connection serves exactly one request, then closes.
    let addr = spawn_host(|stream| async move {
        let (read, mut write) = stream.into_split();
        let mut lines = BufReader::new(read).lines();
        if let Ok(Some(_request)) = lines.next_line().await {
            write
                .write_all(b"{\"status\":\"ok\",\"result\":{}}\n")
                .await
                .unwrap();
        }
    })
    .await;
    let client = BridgeClient::new(config_for(addr, true));

    // First call served, then the host closes the connection.
    client.send_command("ping", None).await.unwrap();

    // Second call hits the dead connection: the original failure surfaces,
    // but the reconnect primes a live connection for the call after it.
    let err = client.send_command("ping", None).await.unwrap_err();
    assert!(err.is_fatal(), "expected a transport failure, got {err}");

    // No explicit connect: the primed connection serves this call.
    client.send_command("ping", None).await.unwrap();
}

#[tokio::test]
async fn no_reconnect_when_disabled() {
    let addr = spawn_host(|stream| async move {
        let (read, mut write) = stream.into_split();
        let mut lines = BufReader::new(read).lines();
        if let Ok(Some(_request)) = lines.next_line().await {
            write
                .write_all(b"{\"status\":\"ok\",\"result\":{}}\n")
                .await
                .unwrap();
        }
    })
    .await;
    let client = BridgeClient::new(config_for(addr, false));

    client.send_command("ping", None).await.unwrap();
    let _err = client.send_command("ping", None).await.unwrap_err();
    assert!(!client.is_connected().await);
}

// ── Concurrency ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn concurrent_senders_never_interleave_frames() {
    // The host reads complete lines; a torn frame would fail to parse. Each
    // accepted request gets a unique sequence number.
    let seq = Arc::new(AtomicUsize::new(0));
    let addr = {
        let seq = seq.clone();
        spawn_host(move |stream| {
            let seq = seq.clone();
            async move {
                let (read, mut write) = stream.into_split();
                let mut lines = BufReader::new(read).lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    // Torn or interleaved frames would break this parse.
                    let _request: Value = serde_json::from_str(&line).unwrap();
                    let n = seq.fetch_add(1, Ordering::SeqCst);
                    let reply = json!({"status": "ok", "result": {"seq": n}});
                    write
                        .write_all(serde_json::to_string(&reply).unwrap().as_bytes())
                        .await
                        .unwrap();
                    write.write_all(b"\n").await.unwrap();
                }
            }
        })
        .await
    };
    let client = Arc::new(BridgeClient::new(config_for(addr, false)));

    let mut tasks = Vec::new();
    for _ in 0..8 {
        let client = client.clone();
        tasks.push(tokio::spawn(async move {
            client.send_command("ping", None).await.unwrap()
        }));
    }

    let mut seen: Vec<u64> = Vec::new();
    for task in tasks {
        let result = task.await.unwrap();
        seen.push(result["seq"].as_u64().unwrap());
    }
    seen.sort_unstable();
    assert_eq!(seen, (0..8).collect::<Vec<u64>>());
    assert_eq!(seq.load(Ordering::SeqCst), 8);
}

// ── Liveness checks and façades ─────────────────────────────────────────────

#[tokio::test]
async fn check_connection_false_when_disconnected() {
    let addr = spawn_host(|s| reply_fixed(s, r#"{"status":"ok","result":{}}"#)).await;
    let client = BridgeClient::new(config_for(addr, false));
    assert!(!client.check_connection().await);

    client.connect().await.unwrap();
    assert!(client.check_connection().await);
}

#[tokio::test]
async fn check_connection_flips_state_on_failure() {
    let addr = spawn_host(|stream| async move {
        drop(stream);
    })
    .await;
    let client = BridgeClient::new(config_for(addr, false));
    client.connect().await.unwrap();

    assert!(!client.check_connection().await);
    assert!(!client.is_connected().await);
}

#[tokio::test]
async fn ping_downgrades_failure_to_error_value() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let bridge = RhinoBridge::new(config_for(addr, false));
    let pong = bridge.ping().await;
    assert_eq!(pong["status"], "error");
    assert!(pong["message"].is_string());
}

#[tokio::test]
async fn facade_sends_mapped_command() {
    let addr = spawn_host(|stream| async move {
        let (read, mut write) = stream.into_split();
        let mut lines = BufReader::new(read).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            let request: Value = serde_json::from_str(&line).unwrap();
            assert_eq!(request["type"], "get_object_info");
            assert_eq!(request["params"]["object_id"], "obj-7");
            write
                .write_all(b"{\"status\":\"ok\",\"result\":{\"layer\":\"Default\"}}\n")
                .await
                .unwrap();
        }
    })
    .await;

    let bridge = RhinoBridge::new(config_for(addr, false));
    assert!(bridge.initialize().await);
    let info = bridge.get_object_info("obj-7").await.unwrap();
    assert_eq!(info["layer"], "Default");
    bridge.cleanup().await;
    assert!(!bridge.client().is_connected().await);
}
