//! HTTP Handlers

mod channel;
mod ping;
mod player;
mod websocket;

pub use channel::*;
pub use ping::*;
pub use player::*;
pub use websocket::*;
