//! Event Publisher Implementation
//!
//! WebSocket 游戏事件推送实现

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::domain::game::{GameType, MatchStatus, Modality, SessionId, Settings, Tick};

/// 广播通道容量
const CHANNEL_CAPACITY: usize = 256;

/// WebSocket 事件类型
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum GameEvent {
    /// 新的一局开始
    GameStarted {
        session_id: SessionId,
        game_type: GameType,
        n_back: usize,
        sequence_length: usize,
        event_interval_ms: u64,
    },
    /// 发布新刺激
    StimulusPresented {
        session_id: SessionId,
        event_index: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        visual: Option<u32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        audio: Option<u32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        audio_letter: Option<char>,
    },
    /// 匹配已登记
    MatchRegistered {
        session_id: SessionId,
        modality: Modality,
        status: MatchStatus,
        score: u32,
        event_index: usize,
    },
    /// 一局正常结束
    GameFinished {
        session_id: SessionId,
        score: u32,
        high_score: u32,
        new_high_score: bool,
    },
    /// 一局被中途停止
    GameStopped {
        session_id: SessionId,
        reason: String,
    },
    /// 设置已更新
    SettingsChanged { settings: Settings },
}

/// 事件发布器
pub struct EventPublisher {
    channel: broadcast::Sender<GameEvent>,
}

impl EventPublisher {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { channel: tx }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 订阅游戏事件
    pub fn subscribe(&self) -> broadcast::Receiver<GameEvent> {
        self.channel.subscribe()
    }

    pub fn publish_game_started(
        &self,
        session_id: &SessionId,
        game_type: GameType,
        n_back: usize,
        sequence_length: usize,
        event_interval_ms: u64,
    ) {
        self.publish(GameEvent::GameStarted {
            session_id: session_id.clone(),
            game_type,
            n_back,
            sequence_length,
            event_interval_ms,
        });
    }

    pub fn publish_stimulus(&self, session_id: &SessionId, tick: &Tick) {
        self.publish(GameEvent::StimulusPresented {
            session_id: session_id.clone(),
            event_index: tick.event_index,
            visual: tick.visual,
            audio: tick.audio,
            audio_letter: tick.audio.and_then(crate::domain::game::letter_for),
        });
    }

    pub fn publish_match_registered(
        &self,
        session_id: &SessionId,
        modality: Modality,
        status: MatchStatus,
        score: u32,
        event_index: usize,
    ) {
        self.publish(GameEvent::MatchRegistered {
            session_id: session_id.clone(),
            modality,
            status,
            score,
            event_index,
        });
    }

    pub fn publish_game_finished(
        &self,
        session_id: &SessionId,
        score: u32,
        high_score: u32,
        new_high_score: bool,
    ) {
        self.publish(GameEvent::GameFinished {
            session_id: session_id.clone(),
            score,
            high_score,
            new_high_score,
        });
    }

    pub fn publish_game_stopped(&self, session_id: &SessionId, reason: &str) {
        self.publish(GameEvent::GameStopped {
            session_id: session_id.clone(),
            reason: reason.to_string(),
        });
    }

    pub fn publish_settings_changed(&self, settings: Settings) {
        self.publish(GameEvent::SettingsChanged { settings });
    }

    fn publish(&self, event: GameEvent) {
        if let Err(e) = self.channel.send(event) {
            tracing::trace!(error = %e, "Failed to publish event (no receivers)");
        }
    }
}

impl Default for EventPublisher {
    fn default() -> Self {
        Self::new()
    }
}
