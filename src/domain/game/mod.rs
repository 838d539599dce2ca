//! Game Context - N-back 游戏限界上下文
//!
//! 职责:
//! - 单局游戏会话聚合（tick 推进、匹配登记、结束）
//! - 用户设置与校验
//! - 游戏类型、模态、匹配状态等值对象

mod aggregate;
mod errors;
mod settings;
mod value_objects;

pub use aggregate::{GameSession, MatchReport, SessionState, Tick};
pub use errors::SettingsError;
pub use settings::{
    Settings, DEFAULT_AUDIO_COMBINATIONS, DEFAULT_EVENT_INTERVAL_MS, DEFAULT_N_BACK, DEFAULT_SIZE,
    DEFAULT_VISUAL_COMBINATIONS, MAX_AUDIO_COMBINATIONS, MAX_EVENT_INTERVAL_MS, MAX_N_BACK,
    MAX_SIZE, MAX_VISUAL_COMBINATIONS, MIN_COMBINATIONS, MIN_EVENT_INTERVAL_MS, MIN_N_BACK,
    MIN_SIZE,
};
pub use value_objects::{letter_for, GameType, MatchOutcome, MatchStatus, Modality};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 会话唯一标识
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
