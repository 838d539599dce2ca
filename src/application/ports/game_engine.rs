//! Game Engine Port - 游戏会话引擎
//!
//! 定义会话引擎的抽象接口，具体实现在 infrastructure/engine 层

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::watch;

use crate::domain::game::{
    GameSession, GameType, MatchOutcome, MatchReport, Modality, SessionState,
};

/// Game Engine 错误
#[derive(Debug, Error)]
pub enum GameEngineError {
    #[error("Cannot start a game of type {0}")]
    InvalidGameType(GameType),
}

/// Game Engine Port
///
/// 同一时间只有一个会话；开始新游戏会先取消正在运行的 tick 循环
#[async_trait]
pub trait GameEnginePort: Send + Sync {
    /// 开始新游戏，`game_type` 为 None 时使用设置中的类型
    async fn start_game(&self, game_type: Option<GameType>) -> Result<SessionState, GameEngineError>;

    /// 停止正在运行的游戏，返回是否确实停止了一局
    async fn stop_game(&self) -> bool;

    /// 在一次状态修改中登记按键，`modality` 为 None 时检查所有启用的模态
    fn register_match(&self, modality: Option<Modality>) -> MatchReport;

    /// 检查单个模态
    fn check_match(&self, modality: Modality) -> MatchOutcome {
        self.register_match(Some(modality)).outcome(modality)
    }

    fn check_visual_match(&self) -> MatchOutcome {
        self.check_match(Modality::Visual)
    }

    fn check_audio_match(&self) -> MatchOutcome {
        self.check_match(Modality::Audio)
    }

    /// 检查当前游戏的所有模态
    fn check_all(&self) -> Vec<(Modality, MatchOutcome)> {
        self.register_match(None).outcomes
    }

    /// 当前状态快照
    fn state(&self) -> SessionState;

    /// 订阅会话变化
    fn subscribe(&self) -> watch::Receiver<GameSession>;
}
