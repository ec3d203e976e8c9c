// Shared primitives for one-time stub-backend bootstrapping across
// integration tests. The stub speaks just enough of the game server's wire
// protocol to exercise the channel client: it accepts or rejects joins and
// echoes every post-join frame back, so tests can observe exactly what the
// client forwarded.

use std::{
    sync::{Arc, OnceLock},
    time::Duration,
};

use axum::{
    Router,
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    response::IntoResponse,
    routing::get,
};

// Session tokens the stub refuses, with the reason it reports.
pub const DENIED_TOKEN: &str = "expired-token";
pub const DENIED_REASON: &str = "session expired";

// Global ws URL used by all tests after the stub publishes its bound address.
static SERVER_URL: OnceLock<String> = OnceLock::new();
// One-time guard that ensures the stub bootstrap path runs only once.
static SERVER_READY: OnceLock<()> = OnceLock::new();

async fn ws_handler(ws: WebSocketUpgrade) -> impl IntoResponse {
    ws.on_upgrade(handle_socket)
}

async fn handle_socket(mut socket: WebSocket) {
    // Join handshake: the first text frame must be a join.
    let join = loop {
        match socket.recv().await {
            Some(Ok(Message::Text(text))) => {
                break serde_json::from_str::<serde_json::Value>(text.as_str()).ok();
            }
            Some(Ok(Message::Ping(_))) | Some(Ok(Message::Pong(_))) => continue,
            _ => return,
        }
    };

    let Some(join) = join else { return };
    if join["type"] != "join" {
        let reply = r#"{"type":"join_rejected","data":{"reason":"join required"}}"#;
        let _ = socket.send(Message::Text(reply.into())).await;
        return;
    }

    let token = join["data"]["session_token"].as_str().unwrap_or_default();
    if token == DENIED_TOKEN {
        let reply = format!(
            r#"{{"type":"join_rejected","data":{{"reason":"{DENIED_REASON}"}}}}"#
        );
        let _ = socket.send(Message::Text(reply.into())).await;
        return;
    }

    // Accept, handing the guest id back as the player id.
    let guest_id = join["data"]["guest_id"].as_str().unwrap_or("0");
    let reply = format!(r#"{{"type":"joined","data":{{"player_id":"{guest_id}"}}}}"#);
    if socket.send(Message::Text(reply.into())).await.is_err() {
        return;
    }

    // Echo loop: reflect client pushes so tests can observe forwarding order.
    while let Some(Ok(msg)) = socket.recv().await {
        match msg {
            Message::Text(text) => {
                if socket.send(Message::Text(text)).await.is_err() {
                    break;
                }
            }
            Message::Close(_) => break,
            _ => {}
        }
    }
}

// Ensure the stub backend is running and return the shared ws URL.
pub fn ensure_server() -> &'static str {
    SERVER_READY.get_or_init(|| {
        // Local one-time slot where the server thread publishes its URL.
        let published_url = Arc::new(OnceLock::<String>::new());
        let published_url_thread = Arc::clone(&published_url);
        // Spawn an OS thread so the stub outlives individual `#[tokio::test]`
        // runtimes.
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("test runtime");
            runtime.block_on(async move {
                // Bind to an ephemeral port to avoid collisions.
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("bind ephemeral test port");
                let addr = listener.local_addr().expect("get local addr");
                let _ = published_url_thread.set(format!("ws://{}/ws", addr));

                let app = Router::new().route("/ws", get(ws_handler));
                axum::serve(listener, app).await.expect("stub server failed");
            });
        });
        wait_for_server_url_and_readiness(published_url);
    });

    SERVER_URL
        .get()
        .expect("server url should be initialized")
        .as_str()
}

// Wait for URL publication, then for the socket to accept TCP connections.
fn wait_for_server_url_and_readiness(published_url: Arc<OnceLock<String>>) {
    let base_url = loop {
        if let Some(url) = published_url.get() {
            break url.clone();
        }
        std::thread::sleep(Duration::from_millis(10));
    };

    let _ = SERVER_URL.set(base_url.clone());

    // Strip scheme and path for raw TCP readiness checks.
    let addr = base_url
        .strip_prefix("ws://")
        .and_then(|rest| rest.strip_suffix("/ws"))
        .expect("base url should use ws://.../ws");

    for _ in 0..100 {
        if std::net::TcpStream::connect(addr).is_ok() {
            return;
        }
        std::thread::sleep(Duration::from_millis(20));
    }

    panic!("stub server did not become ready in time");
}
