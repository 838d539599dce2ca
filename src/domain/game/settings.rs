//! Game Context - Settings

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{GameType, SettingsError};

pub const DEFAULT_SIZE: u32 = 10;
pub const DEFAULT_EVENT_INTERVAL_MS: u64 = 2000;
pub const DEFAULT_N_BACK: u32 = 2;
pub const DEFAULT_VISUAL_COMBINATIONS: u32 = 9;
pub const DEFAULT_AUDIO_COMBINATIONS: u32 = 9;

pub const MIN_SIZE: u32 = 1;
pub const MAX_SIZE: u32 = 100;
pub const MIN_EVENT_INTERVAL_MS: u64 = 500;
pub const MAX_EVENT_INTERVAL_MS: u64 = 3000;
pub const MIN_N_BACK: u32 = 1;
pub const MAX_N_BACK: u32 = 10;

pub const MIN_COMBINATIONS: u32 = 2;
pub const MAX_VISUAL_COMBINATIONS: u32 = 100;
/// 音频刺激映射到 A-Z
pub const MAX_AUDIO_COMBINATIONS: u32 = 26;

/// 用户设置
///
/// 游戏开始时做快照，运行中的修改只影响下一局
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// 每局刺激数量
    pub size: u32,
    /// 刺激间隔（毫秒）
    pub event_interval_ms: u64,
    pub n_back: u32,
    pub visual_combinations: u32,
    pub audio_combinations: u32,
    pub game_type: GameType,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            event_interval_ms: DEFAULT_EVENT_INTERVAL_MS,
            n_back: DEFAULT_N_BACK,
            visual_combinations: DEFAULT_VISUAL_COMBINATIONS,
            audio_combinations: DEFAULT_AUDIO_COMBINATIONS,
            game_type: GameType::Visual,
        }
    }
}

impl Settings {
    pub fn event_interval(&self) -> Duration {
        Duration::from_millis(self.event_interval_ms)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&self.size) {
            return Err(SettingsError::InvalidLength {
                value: self.size,
                min: MIN_SIZE,
                max: MAX_SIZE,
            });
        }
        if !(MIN_EVENT_INTERVAL_MS..=MAX_EVENT_INTERVAL_MS).contains(&self.event_interval_ms) {
            return Err(SettingsError::InvalidInterval {
                value: self.event_interval_ms,
                min: MIN_EVENT_INTERVAL_MS,
                max: MAX_EVENT_INTERVAL_MS,
            });
        }
        if !(MIN_N_BACK..=MAX_N_BACK).contains(&self.n_back) {
            return Err(SettingsError::InvalidNBack {
                value: self.n_back,
                min: MIN_N_BACK,
                max: MAX_N_BACK,
            });
        }
        if !(MIN_COMBINATIONS..=MAX_VISUAL_COMBINATIONS).contains(&self.visual_combinations) {
            return Err(SettingsError::InvalidVisualCombinations {
                value: self.visual_combinations,
                min: MIN_COMBINATIONS,
                max: MAX_VISUAL_COMBINATIONS,
            });
        }
        if !(MIN_COMBINATIONS..=MAX_AUDIO_COMBINATIONS).contains(&self.audio_combinations) {
            return Err(SettingsError::InvalidAudioCombinations {
                value: self.audio_combinations,
                min: MIN_COMBINATIONS,
                max: MAX_AUDIO_COMBINATIONS,
            });
        }
        if self.game_type == GameType::None {
            return Err(SettingsError::InvalidGameType);
        }
        Ok(())
    }
}
