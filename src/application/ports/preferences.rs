//! Preferences Port - 设置与最高分存储
//!
//! 定义用户偏好持久化的抽象接口，具体实现在 infrastructure/persistence (Sled)
//! 与 infrastructure/memory 层

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::watch;

use crate::domain::game::Settings;

/// Preferences 错误
#[derive(Debug, Error)]
pub enum PreferencesError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Preferences store unavailable: {0}")]
    Unavailable(String),
}

/// Preferences Port
///
/// 简单的键值存储：
/// - 设置整体原子保存
/// - 最高分单独保存
/// - 两者都可通过 watch 通道观察
#[async_trait]
pub trait PreferencesPort: Send + Sync {
    /// 读取当前设置，缺失字段使用默认值
    async fn load_settings(&self) -> Result<Settings, PreferencesError>;

    /// 原子保存全部设置
    async fn save_settings(&self, settings: Settings) -> Result<(), PreferencesError>;

    /// 读取最高分，缺失时为 0
    async fn load_high_score(&self) -> Result<u32, PreferencesError>;

    /// 保存最高分
    async fn save_high_score(&self, score: u32) -> Result<(), PreferencesError>;

    /// 观察设置变化
    fn watch_settings(&self) -> watch::Receiver<Settings>;

    /// 观察最高分变化
    fn watch_high_score(&self) -> watch::Receiver<u32>;
}

/// 读取设置，失败时回退到默认值
pub async fn load_settings_or_default(preferences: &dyn PreferencesPort) -> Settings {
    match preferences.load_settings().await {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load settings, falling back to defaults");
            Settings::default()
        }
    }
}

/// 读取最高分，失败时回退到 0
pub async fn load_high_score_or_default(preferences: &dyn PreferencesPort) -> u32 {
    match preferences.load_high_score().await {
        Ok(score) => score,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load high score, falling back to 0");
            0
        }
    }
}
