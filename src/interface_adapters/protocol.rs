// Wire protocol DTOs and conversions for the game channel.
// The backend owns these shapes; keep names and fields in sync with it.

use crate::domain::Direction;
use crate::use_cases::ClientEvent;
use serde::{Deserialize, Serialize};

/// Messages the client pushes to the server over the WebSocket.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ClientMessage {
    // Initial handshake message with identity metadata.
    Join(JoinPayload),
    // Edge-triggered direction updates, one per transition.
    DirectionSet { direction: DirectionDto },
    DirectionCleared { direction: DirectionDto },
    // One shot gesture with the origin-relative aim vector.
    Shoot { dx: f32, dy: f32 },
    ClearShooting,
}

/// Payload for the join handshake.
#[derive(Debug, Clone, Serialize)]
pub struct JoinPayload {
    pub guest_id: String,
    pub display_name: String,
    pub session_token: String,
}

/// Wire form of a direction token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectionDto {
    Up,
    Down,
    Left,
    Right,
}

impl From<Direction> for DirectionDto {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => DirectionDto::Up,
            Direction::Down => DirectionDto::Down,
            Direction::Left => DirectionDto::Left,
            Direction::Right => DirectionDto::Right,
        }
    }
}

impl From<ClientEvent> for ClientMessage {
    fn from(event: ClientEvent) -> Self {
        match event {
            ClientEvent::DirectionSet(direction) => ClientMessage::DirectionSet {
                direction: direction.into(),
            },
            ClientEvent::DirectionCleared(direction) => ClientMessage::DirectionCleared {
                direction: direction.into(),
            },
            ClientEvent::Shoot(vector) => ClientMessage::Shoot {
                dx: vector.dx,
                dy: vector.dy,
            },
            ClientEvent::ClearShooting => ClientMessage::ClearShooting,
        }
    }
}

/// Channel replies the server sends back. Frames that do not parse as one
/// of these are engine-bound game frames and pass through uninterpreted.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ServerMessage {
    // Join accepted; carries the assigned identity.
    Joined { player_id: String },
    // Join refused; the reason is surfaced to the user, no retry.
    JoinRejected { reason: String },
}
