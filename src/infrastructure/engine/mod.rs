//! Engine Layer - 游戏会话引擎
//!
//! 实现 GameEnginePort，驱动定时 tick 循环

mod session_engine;

pub use session_engine::{SessionEngine, SessionEngineConfig};
