// WebSocket channel client: join handshake and the forward loop between the
// input controller and the game backend. Forwarding is fire-and-forget; a
// transport failure flips the status watch and ends the task, retry policy
// belongs to whoever owns the process.

use crate::frameworks::config;
use crate::interface_adapters::protocol::{ClientMessage, JoinPayload, ServerMessage};
use crate::use_cases::{ClientEvent, ConnectionStatus, Throttle};

use futures::{SinkExt, StreamExt};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::sync::{broadcast, mpsc, watch};
use tokio::time::{interval, timeout};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, info, warn};

pub type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

#[derive(Debug)]
pub enum ChannelError {
    // Categorizes connection lifecycle failures so callers can decide policy.
    Ws(tokio_tungstenite::tungstenite::Error),
    Serialization(serde_json::Error),
    JoinRejected { reason: String },
    JoinTimeout,
    ClosedBeforeJoin,
}

const LOG_THROTTLE: Duration = Duration::from_secs(2);

/// A connected, joined channel plus traffic counters for the forward loop.
pub struct ChannelSession {
    socket: WsStream,
    pub player_id: String,
    msgs_in: u64,
    msgs_out: u64,
    bytes_in: u64,
    bytes_out: u64,
}

/// Why the forward loop ended without a transport error.
#[derive(Debug, PartialEq, Eq)]
enum CloseReason {
    // Every event sender was dropped; the client is shutting down.
    LocalShutdown,
    ServerClosed,
}

async fn send_message(socket: &mut WsStream, msg: &ClientMessage) -> Result<usize, ChannelError> {
    let txt = serde_json::to_string(msg).map_err(ChannelError::Serialization)?;
    let bytes = txt.len();
    socket
        .send(Message::Text(txt))
        .await
        .map_err(ChannelError::Ws)?;
    Ok(bytes)
}

/// Connects to the game backend and performs the join handshake. The status
/// watch reflects the outcome; forwarding must not start before this
/// returns.
pub async fn connect_and_join(
    url: &str,
    join: JoinPayload,
    status_tx: &watch::Sender<ConnectionStatus>,
) -> Result<ChannelSession, ChannelError> {
    let _ = status_tx.send(ConnectionStatus::Connecting);
    let (mut socket, _response) = connect_async(url).await.map_err(ChannelError::Ws)?;

    send_message(&mut socket, &ClientMessage::Join(join)).await?;

    let handshake = timeout(config::JOIN_HANDSHAKE_TIMEOUT, read_join_reply(&mut socket)).await;
    let player_id = match handshake {
        Ok(result) => result?,
        Err(_) => {
            let _ = socket.close(None).await;
            return Err(ChannelError::JoinTimeout);
        }
    };

    let _ = status_tx.send(ConnectionStatus::Joined {
        player_id: player_id.clone(),
    });
    info!(player_id = %player_id, "channel joined");

    Ok(ChannelSession {
        socket,
        player_id,
        msgs_in: 0,
        msgs_out: 0,
        bytes_in: 0,
        bytes_out: 0,
    })
}

async fn read_join_reply(socket: &mut WsStream) -> Result<String, ChannelError> {
    loop {
        let Some(incoming) = socket.next().await else {
            return Err(ChannelError::ClosedBeforeJoin);
        };
        match incoming.map_err(ChannelError::Ws)? {
            Message::Text(text) => match serde_json::from_str::<ServerMessage>(&text) {
                Ok(ServerMessage::Joined { player_id }) => return Ok(player_id),
                Ok(ServerMessage::JoinRejected { reason }) => {
                    let _ = socket.close(None).await;
                    return Err(ChannelError::JoinRejected { reason });
                }
                // Game frames can land before the reply; they are not ours
                // to interpret, skip them until the channel answers.
                Err(_) => debug!("skipping frame received before join reply"),
            },
            Message::Close(_) => return Err(ChannelError::ClosedBeforeJoin),
            Message::Ping(_) | Message::Pong(_) => {}
            other => debug!(?other, "ignoring non-text frame before join"),
        }
    }
}

/// Drives the joined channel until shutdown or failure: forwards controller
/// events out, fans engine-bound frames to subscribers, keeps intermediaries
/// from idling the connection out.
pub async fn channel_task(
    mut session: ChannelSession,
    mut event_rx: mpsc::Receiver<ClientEvent>,
    status_tx: watch::Sender<ConnectionStatus>,
    frame_tx: broadcast::Sender<String>,
) {
    let result = run_channel_loop(&mut session, &mut event_rx, &frame_tx).await;

    let reason = match &result {
        Ok(CloseReason::LocalShutdown) => "client shutdown".to_string(),
        Ok(CloseReason::ServerClosed) => "server closed the connection".to_string(),
        Err(ChannelError::JoinRejected { reason }) => format!("join rejected: {reason}"),
        Err(e) => format!("transport failure: {e:?}"),
    };
    let _ = status_tx.send(ConnectionStatus::Disconnected {
        reason: reason.clone(),
    });

    info!(
        player_id = %session.player_id,
        msgs_out = session.msgs_out,
        bytes_out = session.bytes_out,
        msgs_in = session.msgs_in,
        bytes_in = session.bytes_in,
        reason = %reason,
        "channel closed"
    );
}

async fn run_channel_loop(
    session: &mut ChannelSession,
    event_rx: &mut mpsc::Receiver<ClientEvent>,
    frame_tx: &broadcast::Sender<String>,
) -> Result<CloseReason, ChannelError> {
    let mut heartbeat = interval(config::HEARTBEAT_INTERVAL);
    let mut stray_reply_log = Throttle::new(LOG_THROTTLE);

    loop {
        tokio::select! {
            // Controller events flowing out to the backend.
            outgoing = event_rx.recv() => {
                match outgoing {
                    Some(event) => {
                        let msg = ClientMessage::from(event);
                        let bytes = send_message(&mut session.socket, &msg).await?;
                        session.msgs_out += 1;
                        session.bytes_out += bytes as u64;
                    }
                    None => {
                        // Every sender dropped: orderly shutdown.
                        let _ = session.socket.close(None).await;
                        return Ok(CloseReason::LocalShutdown);
                    }
                }
            }

            // Frames flowing in from the backend.
            incoming = session.socket.next() => {
                match incoming {
                    Some(Ok(Message::Text(text))) => {
                        session.msgs_in += 1;
                        session.bytes_in += text.len() as u64;
                        match serde_json::from_str::<ServerMessage>(&text) {
                            Ok(ServerMessage::Joined { .. }) => {
                                if stray_reply_log.ready() {
                                    debug!("duplicate join reply; ignoring");
                                }
                            }
                            Ok(ServerMessage::JoinRejected { reason }) => {
                                warn!(reason = %reason, "server revoked the join");
                                return Err(ChannelError::JoinRejected { reason });
                            }
                            // Not a channel reply: engine-bound game frame.
                            Err(_) => {
                                let _ = frame_tx.send(text);
                            }
                        }
                    }
                    Some(Ok(Message::Close(frame))) => {
                        debug!(?frame, "server sent close");
                        return Ok(CloseReason::ServerClosed);
                    }
                    // The transport answers pings on its own; pongs ack our
                    // heartbeat.
                    Some(Ok(Message::Ping(_))) | Some(Ok(Message::Pong(_))) => {}
                    Some(Ok(other)) => {
                        if stray_reply_log.ready() {
                            debug!(?other, "ignoring unsupported frame");
                        }
                    }
                    Some(Err(e)) => return Err(ChannelError::Ws(e)),
                    None => return Ok(CloseReason::ServerClosed),
                }
            }

            _ = heartbeat.tick() => {
                session
                    .socket
                    .send(Message::Ping(Vec::new()))
                    .await
                    .map_err(ChannelError::Ws)?;
            }
        }
    }
}
