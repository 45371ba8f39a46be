//! # chat-gateway
//!
//! WebSocket gateway that names connections and relays chat and presence
//! events between them.

pub mod broadcast;
pub mod connection;
pub mod events;
pub mod handlers;
pub mod protocol;
pub mod server;

pub use server::{create_app, run, run_server, GatewayState};
