//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（GameEngine、Preferences）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    // Game commands
    CheckMatchCommand,
    CheckMatchResponse,
    StartGameCommand,
    StartGameResponse,
    StopGameCommand,
    StopGameResponse,
    // Settings commands
    SaveSettingsCommand,
    SaveSettingsResponse,
    // Handlers
    handlers::{CheckMatchHandler, SaveSettingsHandler, StartGameHandler, StopGameHandler},
};

pub use error::ApplicationError;

pub use ports::{
    load_high_score_or_default, load_settings_or_default, GameEngineError, GameEnginePort,
    PreferencesError, PreferencesPort,
};

pub use queries::{
    GetGameState,
    GetHighScore,
    GetSettings,
    // Handlers
    handlers::{GetGameStateHandler, GetHighScoreHandler, GetSettingsHandler},
};
