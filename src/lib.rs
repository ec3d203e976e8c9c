pub mod domain;
pub mod frameworks;
pub mod interface_adapters;
pub mod use_cases;

pub use frameworks::client::{run, run_with_config};
pub use frameworks::config::game_server_ws_url;
