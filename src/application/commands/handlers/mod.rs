//! Command Handlers 实现
//!
//! 所有 CommandHandler 的具体实现

mod game_command_handlers;
mod settings_handlers;

pub use game_command_handlers::*;
pub use settings_handlers::*;
