//! Game Context - Value Objects

use serde::{Deserialize, Serialize};

/// 游戏类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum GameType {
    Audio,
    #[default]
    Visual,
    AudioVisual,
    /// 空闲或已结束
    None,
}

impl GameType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameType::Audio => "Audio",
            GameType::Visual => "Visual",
            GameType::AudioVisual => "AudioVisual",
            GameType::None => "None",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Audio" => Some(GameType::Audio),
            "Visual" => Some(GameType::Visual),
            "AudioVisual" => Some(GameType::AudioVisual),
            "None" => Some(GameType::None),
            _ => None,
        }
    }

    pub fn has_visual(&self) -> bool {
        matches!(self, GameType::Visual | GameType::AudioVisual)
    }

    pub fn has_audio(&self) -> bool {
        matches!(self, GameType::Audio | GameType::AudioVisual)
    }

    pub fn includes(&self, modality: Modality) -> bool {
        match modality {
            Modality::Visual => self.has_visual(),
            Modality::Audio => self.has_audio(),
        }
    }

    /// 当前游戏类型包含的模态
    pub fn modalities(&self) -> Vec<Modality> {
        Modality::ALL
            .into_iter()
            .filter(|m| self.includes(*m))
            .collect()
    }
}

impl std::fmt::Display for GameType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 刺激通道
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modality {
    /// 网格位置
    Visual,
    /// 朗读字母
    Audio,
}

impl Modality {
    pub const ALL: [Modality; 2] = [Modality::Visual, Modality::Audio];

    pub fn as_str(&self) -> &'static str {
        match self {
            Modality::Visual => "visual",
            Modality::Audio => "audio",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "visual" => Some(Modality::Visual),
            "audio" => Some(Modality::Audio),
            _ => None,
        }
    }
}

impl std::fmt::Display for Modality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 单个模态在当前 tick 的匹配状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MatchStatus {
    #[default]
    None,
    Correct,
    Wrong,
}

/// 一次匹配检查的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "status", rename_all = "snake_case")]
pub enum MatchOutcome {
    /// 已登记 Correct 或 Wrong
    Registered(MatchStatus),
    /// N-back 窗口尚未填满
    TooEarly,
    /// 本 tick 已登记过
    AlreadyRegistered,
    /// 无进行中的游戏或该模态未启用
    Inactive,
}

impl MatchOutcome {
    pub fn is_registered(&self) -> bool {
        matches!(self, MatchOutcome::Registered(_))
    }
}

/// 字母序号转字母，1 -> 'A'
pub fn letter_for(value: u32) -> Option<char> {
    if (1..=26).contains(&value) {
        char::from_u32('A' as u32 + value - 1)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_type_roundtrip_str() {
        for t in [GameType::Audio, GameType::Visual, GameType::AudioVisual, GameType::None] {
            assert_eq!(GameType::from_str(t.as_str()), Some(t));
        }
        assert_eq!(GameType::from_str("visual"), None);
    }

    #[test]
    fn test_game_type_modalities() {
        assert_eq!(GameType::Visual.modalities(), vec![Modality::Visual]);
        assert_eq!(GameType::Audio.modalities(), vec![Modality::Audio]);
        assert_eq!(
            GameType::AudioVisual.modalities(),
            vec![Modality::Visual, Modality::Audio]
        );
        assert!(GameType::None.modalities().is_empty());
    }

    #[test]
    fn test_modality_from_str() {
        assert_eq!(Modality::from_str(" Visual "), Some(Modality::Visual));
        assert_eq!(Modality::from_str("audio"), Some(Modality::Audio));
        assert_eq!(Modality::from_str("smell"), None);
    }

    #[test]
    fn test_letter_for() {
        assert_eq!(letter_for(1), Some('A'));
        assert_eq!(letter_for(9), Some('I'));
        assert_eq!(letter_for(26), Some('Z'));
        assert_eq!(letter_for(0), None);
        assert_eq!(letter_for(27), None);
    }
}
