//! Game Context - Aggregate Root

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{letter_for, GameType, MatchOutcome, MatchStatus, Modality, SessionId};

/// 一次 tick 发布的刺激
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// 发布后的 event_index（从 1 开始）
    pub event_index: usize,
    pub visual: Option<u32>,
    pub audio: Option<u32>,
}

/// 一次匹配按键的结果
///
/// score 与 event_index 与各模态的 outcome 取自同一次状态修改
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchReport {
    pub session_id: SessionId,
    pub outcomes: Vec<(Modality, MatchOutcome)>,
    pub score: u32,
    pub event_index: usize,
}

impl MatchReport {
    /// 是否至少登记了一个模态
    pub fn any_registered(&self) -> bool {
        self.outcomes.iter().any(|(_, outcome)| outcome.is_registered())
    }

    /// 某个模态的结果，未检查该模态时为 Inactive
    pub fn outcome(&self, modality: Modality) -> MatchOutcome {
        self.outcomes
            .iter()
            .find(|(m, _)| *m == modality)
            .map_or(MatchOutcome::Inactive, |(_, outcome)| *outcome)
    }
}

/// 对外发布的会话状态快照
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub session_id: SessionId,
    pub game_type: GameType,
    pub current_visual_value: Option<u32>,
    pub current_audio_value: Option<u32>,
    pub current_audio_letter: Option<char>,
    pub event_index: usize,
    pub visual_match_status: MatchStatus,
    pub audio_match_status: MatchStatus,
    pub score: u32,
    pub finished: bool,
    pub n_back: usize,
    pub sequence_length: usize,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

/// GameSession 聚合根
///
/// 不变量:
/// - 序列在创建后不可变，仅属于本会话
/// - 每个 tick 每个模态最多登记一次匹配
/// - event_index - n_back - 1 < 0 时匹配检查不产生任何效果
/// - game_type == None 表示空闲或已结束，此时不再接受 tick 与匹配
#[derive(Debug, Clone)]
pub struct GameSession {
    id: SessionId,
    game_type: GameType,
    n_back: usize,
    visual_sequence: Option<Vec<u32>>,
    audio_sequence: Option<Vec<u32>>,
    event_index: usize,
    current_visual: Option<u32>,
    current_audio: Option<u32>,
    visual_status: MatchStatus,
    audio_status: MatchStatus,
    score: u32,
    finished: bool,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
}

impl GameSession {
    /// 空闲会话（尚未开始任何游戏）
    pub fn idle() -> Self {
        Self {
            id: SessionId::new(),
            game_type: GameType::None,
            n_back: 0,
            visual_sequence: None,
            audio_sequence: None,
            event_index: 0,
            current_visual: None,
            current_audio: None,
            visual_status: MatchStatus::None,
            audio_status: MatchStatus::None,
            score: 0,
            finished: false,
            started_at: None,
            finished_at: None,
        }
    }

    /// 创建运行中的会话
    ///
    /// 未被 game_type 启用的模态的序列会被丢弃
    pub fn start(
        game_type: GameType,
        n_back: usize,
        visual_sequence: Option<Vec<u32>>,
        audio_sequence: Option<Vec<u32>>,
    ) -> Self {
        Self {
            game_type,
            n_back,
            visual_sequence: visual_sequence.filter(|_| game_type.has_visual()),
            audio_sequence: audio_sequence.filter(|_| game_type.has_audio()),
            started_at: Some(Utc::now()),
            ..Self::idle()
        }
    }

    pub fn is_running(&self) -> bool {
        self.game_type != GameType::None && !self.finished
    }

    /// 最长序列的长度
    pub fn total_ticks(&self) -> usize {
        let visual = self.visual_sequence.as_ref().map_or(0, Vec::len);
        let audio = self.audio_sequence.as_ref().map_or(0, Vec::len);
        visual.max(audio)
    }

    /// 发布下一个刺激并重置两个模态的匹配状态
    ///
    /// 序列已播完或会话不在运行时返回 None
    pub fn tick(&mut self) -> Option<Tick> {
        if !self.is_running() || self.event_index >= self.total_ticks() {
            return None;
        }

        let i = self.event_index;
        self.current_visual = self.visual_sequence.as_ref().and_then(|s| s.get(i).copied());
        self.current_audio = self.audio_sequence.as_ref().and_then(|s| s.get(i).copied());
        self.event_index += 1;
        self.visual_status = MatchStatus::None;
        self.audio_status = MatchStatus::None;

        Some(Tick {
            event_index: self.event_index,
            visual: self.current_visual,
            audio: self.current_audio,
        })
    }

    /// 检查某个模态的当前刺激是否与 n_back 步之前的刺激相同
    pub fn check_match(&mut self, modality: Modality) -> MatchOutcome {
        if !self.is_running() || !self.game_type.includes(modality) {
            return MatchOutcome::Inactive;
        }
        if self.status(modality) != MatchStatus::None {
            return MatchOutcome::AlreadyRegistered;
        }

        let Some(lag_index) = self.event_index.checked_sub(self.n_back + 1) else {
            return MatchOutcome::TooEarly;
        };

        let expected = self.sequence(modality).and_then(|s| s.get(lag_index).copied());
        let (Some(current), Some(expected)) = (self.current(modality), expected) else {
            return MatchOutcome::Inactive;
        };

        let status = if current == expected {
            self.score += 1;
            MatchStatus::Correct
        } else {
            MatchStatus::Wrong
        };
        match modality {
            Modality::Visual => self.visual_status = status,
            Modality::Audio => self.audio_status = status,
        }

        MatchOutcome::Registered(status)
    }

    /// 对当前游戏启用的每个模态分别检查
    ///
    /// 空闲或已结束时返回空列表
    pub fn check_all(&mut self) -> Vec<(Modality, MatchOutcome)> {
        self.game_type
            .modalities()
            .into_iter()
            .map(|m| (m, self.check_match(m)))
            .collect()
    }

    /// 登记一次按键：指定模态时只检查该模态，否则检查所有启用的模态
    pub fn register(&mut self, modality: Option<Modality>) -> MatchReport {
        let outcomes = match modality {
            Some(m) => vec![(m, self.check_match(m))],
            None => self.check_all(),
        };
        MatchReport {
            session_id: self.id.clone(),
            outcomes,
            score: self.score,
            event_index: self.event_index,
        }
    }

    /// 正常结束：标记 finished 并将 game_type 置为 None
    pub fn finish(&mut self) {
        self.finished = true;
        self.game_type = GameType::None;
        self.finished_at = Some(Utc::now());
    }

    /// 中途停止，不计为完成
    pub fn stop(&mut self) {
        self.game_type = GameType::None;
        self.finished_at = Some(Utc::now());
    }

    pub fn state(&self) -> SessionState {
        SessionState {
            session_id: self.id.clone(),
            game_type: self.game_type,
            current_visual_value: self.current_visual,
            current_audio_value: self.current_audio,
            current_audio_letter: self.current_audio.and_then(letter_for),
            event_index: self.event_index,
            visual_match_status: self.visual_status,
            audio_match_status: self.audio_status,
            score: self.score,
            finished: self.finished,
            n_back: self.n_back,
            sequence_length: self.total_ticks(),
            started_at: self.started_at,
            finished_at: self.finished_at,
        }
    }

    // Getters
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn game_type(&self) -> GameType {
        self.game_type
    }

    pub fn n_back(&self) -> usize {
        self.n_back
    }

    pub fn event_index(&self) -> usize {
        self.event_index
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn sequence(&self, modality: Modality) -> Option<&[u32]> {
        match modality {
            Modality::Visual => self.visual_sequence.as_deref(),
            Modality::Audio => self.audio_sequence.as_deref(),
        }
    }

    pub fn current(&self, modality: Modality) -> Option<u32> {
        match modality {
            Modality::Visual => self.current_visual,
            Modality::Audio => self.current_audio,
        }
    }

    pub fn status(&self, modality: Modality) -> MatchStatus {
        match modality {
            Modality::Visual => self.visual_status,
            Modality::Audio => self.audio_status,
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::idle()
    }
}
