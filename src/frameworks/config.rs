use std::{env, time::Duration};

// Runtime/client constants (not gameplay tuning).

pub fn game_server_ws_url() -> String {
    env::var("GAME_SERVER_WS_URL").unwrap_or_else(|_| "ws://127.0.0.1:3001/ws".to_string())
}

pub fn auth_service_url() -> String {
    env::var("AUTH_SERVICE_URL").unwrap_or_else(|_| "http://127.0.0.1:3002".to_string())
}

pub fn auth_login_timeout() -> Duration {
    let millis = env::var("AUTH_LOGIN_TIMEOUT_MS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(1500);
    Duration::from_millis(millis)
}

pub fn display_name() -> String {
    env::var("PLAYER_DISPLAY_NAME").unwrap_or_else(|_| "guest".to_string())
}

pub const EVENT_CHANNEL_CAPACITY: usize = 256;
pub const FRAME_BROADCAST_CAPACITY: usize = 128;

pub const INPUT_TICK_INTERVAL: Duration = Duration::from_millis(1000 / 60);
pub const JOIN_HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(5);
pub const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(30);
// Above the initial auto-repeat delay of common terminals, so a held arrow
// key never flickers between repeats.
pub const KEY_HOLD_WINDOW: Duration = Duration::from_millis(650);
