//! Game Commands - 游戏相关命令

use crate::domain::game::{GameType, MatchOutcome, Modality, SessionId};

/// 开始游戏命令 - 取消正在运行的游戏并开始新的一局
#[derive(Debug, Clone, Default)]
pub struct StartGameCommand {
    /// 覆盖设置中的游戏类型
    pub game_type: Option<GameType>,
}

/// 开始游戏响应
#[derive(Debug, Clone)]
pub struct StartGameResponse {
    pub session_id: SessionId,
    pub game_type: GameType,
    pub n_back: usize,
    pub sequence_length: usize,
}

/// 停止游戏命令
#[derive(Debug, Clone, Default)]
pub struct StopGameCommand;

/// 停止游戏响应
#[derive(Debug, Clone)]
pub struct StopGameResponse {
    pub stopped: bool,
}

/// 匹配命令 - 用户按下匹配按钮
#[derive(Debug, Clone, Default)]
pub struct CheckMatchCommand {
    /// None 表示检查当前游戏的所有模态
    pub modality: Option<Modality>,
}

/// 匹配响应
#[derive(Debug, Clone)]
pub struct CheckMatchResponse {
    pub outcomes: Vec<(Modality, MatchOutcome)>,
    pub score: u32,
    pub event_index: usize,
}
