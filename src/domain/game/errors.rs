//! Game Context - Errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("序列长度必须在 {min} 到 {max} 之间: {value}")]
    InvalidLength { value: u32, min: u32, max: u32 },

    #[error("事件间隔必须在 {min} 到 {max} 毫秒之间: {value}")]
    InvalidInterval { value: u64, min: u64, max: u64 },

    #[error("N-back 必须在 {min} 到 {max} 之间: {value}")]
    InvalidNBack { value: u32, min: u32, max: u32 },

    #[error("视觉组合数必须在 {min} 到 {max} 之间: {value}")]
    InvalidVisualCombinations { value: u32, min: u32, max: u32 },

    #[error("音频组合数必须在 {min} 到 {max} 之间: {value}")]
    InvalidAudioCombinations { value: u32, min: u32, max: u32 },

    #[error("游戏类型不能为 None")]
    InvalidGameType,
}
