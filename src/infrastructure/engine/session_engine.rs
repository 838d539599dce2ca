//! Session Engine - 定时 tick 循环与会话状态持有者
//!
//! 会话状态保存在一个 watch 通道中：
//! - tick 与匹配检查都通过 send_if_modified 原子修改
//! - 每个 tick 携带 session id，旧循环的 tick 不会作用到新会话
//! - 开始新游戏前先取消旧循环并等待其退出

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::application::ports::{
    load_high_score_or_default, load_settings_or_default, GameEngineError, GameEnginePort,
    PreferencesPort,
};
use crate::domain::game::{
    GameSession, GameType, MatchOutcome, MatchReport, Modality, SessionId, SessionState,
    Settings,
};
use crate::domain::{SequenceConfig, SequenceGenerator, DEFAULT_MATCH_PERCENTAGE};
use crate::infrastructure::events::EventPublisher;

/// Engine 配置
#[derive(Debug, Clone)]
pub struct SessionEngineConfig {
    /// 每条序列中强制匹配的比例 (0 - 100)
    pub match_percentage: u32,
    /// 固定随机种子，用于复现
    pub seed: Option<u64>,
}

impl Default for SessionEngineConfig {
    fn default() -> Self {
        Self {
            match_percentage: DEFAULT_MATCH_PERCENTAGE,
            seed: None,
        }
    }
}

/// 正在运行的 tick 循环
struct RunningLoop {
    session_id: SessionId,
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

/// 会话引擎
pub struct SessionEngine {
    config: SessionEngineConfig,
    generator: SequenceGenerator,
    session: Arc<watch::Sender<GameSession>>,
    running: Mutex<Option<RunningLoop>>,
    preferences: Arc<dyn PreferencesPort>,
    event_publisher: Arc<EventPublisher>,
}

impl SessionEngine {
    pub fn new(
        config: SessionEngineConfig,
        preferences: Arc<dyn PreferencesPort>,
        event_publisher: Arc<EventPublisher>,
    ) -> Self {
        let generator = match config.seed {
            Some(seed) => SequenceGenerator::seeded(seed),
            None => SequenceGenerator::new(),
        };
        let (session, _) = watch::channel(GameSession::idle());

        Self {
            config,
            generator,
            session: Arc::new(session),
            running: Mutex::new(None),
            preferences,
            event_publisher,
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 取消正在运行的循环并等待退出，然后把该会话标记为停止
    ///
    /// 返回是否确实停止了一局未结束的游戏
    async fn cancel_running(&self, running: &mut Option<RunningLoop>, reason: &str) -> bool {
        let Some(previous) = running.take() else {
            return false;
        };

        previous.cancel.cancel();
        if let Err(e) = previous.handle.await {
            tracing::error!(session_id = %previous.session_id, error = %e, "Tick loop panicked");
        }

        let stopped = self.session.send_if_modified(|session| {
            if session.id() != &previous.session_id || !session.is_running() {
                return false;
            }
            session.stop();
            true
        });

        if stopped {
            self.event_publisher
                .publish_game_stopped(&previous.session_id, reason);
            tracing::info!(session_id = %previous.session_id, reason = %reason, "Game stopped");
        }
        stopped
    }

    /// 读取设置，非法值回退到默认
    async fn current_settings(&self) -> Settings {
        let settings = load_settings_or_default(self.preferences.as_ref()).await;
        match settings.validate() {
            Ok(()) => settings,
            Err(e) => {
                tracing::warn!(error = %e, "Stored settings are invalid, using defaults");
                Settings::default()
            }
        }
    }

    /// 为启用的模态生成序列
    fn generate_sequences(
        &self,
        settings: &Settings,
        game_type: GameType,
    ) -> (Option<Vec<u32>>, Option<Vec<u32>>) {
        let modalities = game_type.modalities();
        let configs: Vec<SequenceConfig> = modalities
            .iter()
            .map(|modality| SequenceConfig {
                length: settings.size as usize,
                alphabet_size: match modality {
                    Modality::Visual => settings.visual_combinations,
                    Modality::Audio => settings.audio_combinations,
                },
                match_percentage: self.config.match_percentage,
                n_back: settings.n_back as usize,
            })
            .collect();

        let mut visual = None;
        let mut audio = None;
        for (modality, sequence) in modalities.into_iter().zip(self.generator.generate_many(&configs)) {
            match modality {
                Modality::Visual => visual = Some(sequence),
                Modality::Audio => audio = Some(sequence),
            }
        }
        (visual, audio)
    }

    /// tick 循环
    ///
    /// 先发布一个刺激，再等待一个间隔；序列播完后的那个间隔结束时结算
    async fn run_ticks(
        session_id: SessionId,
        interval: Duration,
        cancel: CancellationToken,
        session: Arc<watch::Sender<GameSession>>,
        preferences: Arc<dyn PreferencesPort>,
        event_publisher: Arc<EventPublisher>,
    ) {
        loop {
            let mut tick = None;
            session.send_if_modified(|s| {
                if cancel.is_cancelled() || s.id() != &session_id {
                    return false;
                }
                tick = s.tick();
                tick.is_some()
            });

            let Some(tick) = tick else {
                break;
            };
            event_publisher.publish_stimulus(&session_id, &tick);
            tracing::trace!(
                session_id = %session_id,
                event_index = tick.event_index,
                visual = ?tick.visual,
                audio = ?tick.audio,
                "Stimulus presented"
            );

            // 计时器与取消同时就绪时取消优先
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::debug!(session_id = %session_id, "Tick loop cancelled");
                    return;
                }
                _ = tokio::time::sleep(interval) => {}
            }
        }

        if cancel.is_cancelled() {
            return;
        }

        let mut final_score = None;
        session.send_if_modified(|s| {
            if s.id() != &session_id || !s.is_running() {
                return false;
            }
            s.finish();
            final_score = Some(s.score());
            true
        });

        let Some(score) = final_score else {
            return;
        };
        Self::record_score(&session_id, score, preferences.as_ref(), &event_publisher).await;
    }

    /// 与已存最高分比较，超过时保存一次
    async fn record_score(
        session_id: &SessionId,
        score: u32,
        preferences: &dyn PreferencesPort,
        event_publisher: &EventPublisher,
    ) {
        let previous = load_high_score_or_default(preferences).await;
        let new_high_score = score > previous;

        if new_high_score {
            if let Err(e) = preferences.save_high_score(score).await {
                tracing::error!(session_id = %session_id, score = score, error = %e, "Failed to save high score");
            }
        }

        let high_score = score.max(previous);
        event_publisher.publish_game_finished(session_id, score, high_score, new_high_score);
        tracing::info!(
            session_id = %session_id,
            score = score,
            high_score = high_score,
            new_high_score = new_high_score,
            "Game finished"
        );
    }
}

#[async_trait]
impl GameEnginePort for SessionEngine {
    async fn start_game(&self, game_type: Option<GameType>) -> Result<SessionState, GameEngineError> {
        let settings = self.current_settings().await;
        let game_type = game_type.unwrap_or(settings.game_type);
        if game_type == GameType::None {
            return Err(GameEngineError::InvalidGameType(game_type));
        }

        let mut running = self.running.lock().await;
        self.cancel_running(&mut running, "restarted").await;

        let (visual, audio) = self.generate_sequences(&settings, game_type);
        let session = GameSession::start(game_type, settings.n_back as usize, visual, audio);
        let session_id = session.id().clone();
        let state = session.state();
        self.session.send_replace(session);

        self.event_publisher.publish_game_started(
            &session_id,
            game_type,
            state.n_back,
            state.sequence_length,
            settings.event_interval_ms,
        );

        let cancel = CancellationToken::new();
        let handle = tokio::spawn(Self::run_ticks(
            session_id.clone(),
            settings.event_interval(),
            cancel.clone(),
            self.session.clone(),
            self.preferences.clone(),
            self.event_publisher.clone(),
        ));
        *running = Some(RunningLoop {
            session_id,
            cancel,
            handle,
        });

        Ok(state)
    }

    async fn stop_game(&self) -> bool {
        let mut running = self.running.lock().await;
        self.cancel_running(&mut running, "stopped").await
    }

    fn register_match(&self, modality: Option<Modality>) -> MatchReport {
        let mut report = MatchReport::default();
        self.session.send_if_modified(|s| {
            report = s.register(modality);
            report.any_registered()
        });

        for (modality, outcome) in &report.outcomes {
            let MatchOutcome::Registered(status) = outcome else {
                continue;
            };
            self.event_publisher.publish_match_registered(
                &report.session_id,
                *modality,
                *status,
                report.score,
                report.event_index,
            );
            tracing::debug!(
                session_id = %report.session_id,
                modality = %modality,
                status = ?status,
                score = report.score,
                event_index = report.event_index,
                "Match registered"
            );
        }
        report
    }

    fn state(&self) -> SessionState {
        self.session.borrow().state()
    }

    fn subscribe(&self) -> watch::Receiver<GameSession> {
        self.session.subscribe()
    }
}
