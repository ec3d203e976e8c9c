// Clients for sibling services the game client talks to.

pub mod auth;
