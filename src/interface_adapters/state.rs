use crate::use_cases::{ClientEvent, ConnectionStatus};
use tokio::sync::{broadcast, mpsc, watch};

#[derive(Clone)]
pub struct ClientState {
    // Controller events flowing into the channel task.
    pub event_tx: mpsc::Sender<ClientEvent>,
    // Connection state for disconnected-indicator UIs.
    pub status_rx: watch::Receiver<ConnectionStatus>,
    // Engine-bound frames from the server, passed through uninterpreted.
    pub frame_tx: broadcast::Sender<String>,
}
