// Use cases layer: application workflows for the game client.

pub mod controller;
pub mod throttle;
pub mod types;

pub use controller::InputController;
pub use throttle::Throttle;
pub use types::{ClientEvent, ConnectionStatus};
