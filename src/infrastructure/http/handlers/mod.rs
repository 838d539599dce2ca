//! HTTP Handlers

mod game;
mod ping;
mod settings;
mod websocket;

pub use game::*;
pub use ping::*;
pub use settings::*;
pub use websocket::*;
