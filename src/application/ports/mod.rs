//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod game_engine;
mod preferences;

pub use game_engine::{GameEngineError, GameEnginePort};
pub use preferences::{
    load_high_score_or_default, load_settings_or_default, PreferencesError, PreferencesPort,
};
