//! Game Queries - 游戏状态查询

/// 获取当前会话状态
#[derive(Debug, Clone)]
pub struct GetGameState;

/// 获取当前设置
#[derive(Debug, Clone)]
pub struct GetSettings;

/// 获取最高分
#[derive(Debug, Clone)]
pub struct GetHighScore;
