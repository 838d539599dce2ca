//! Query Handlers 实现
//!
//! 所有 QueryHandler 的具体实现

mod game_handlers;

pub use game_handlers::*;
