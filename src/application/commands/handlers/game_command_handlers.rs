//! Game Command Handlers

use std::sync::Arc;

use crate::application::commands::game_commands::*;
use crate::application::error::ApplicationError;
use crate::application::ports::GameEnginePort;

/// StartGame Handler - 开始新的一局
pub struct StartGameHandler {
    engine: Arc<dyn GameEnginePort>,
}

impl StartGameHandler {
    pub fn new(engine: Arc<dyn GameEnginePort>) -> Self {
        Self { engine }
    }

    pub async fn handle(&self, cmd: StartGameCommand) -> Result<StartGameResponse, ApplicationError> {
        let state = self.engine.start_game(cmd.game_type).await?;

        tracing::info!(
            session_id = %state.session_id,
            game_type = %state.game_type,
            n_back = state.n_back,
            sequence_length = state.sequence_length,
            "Game started"
        );

        Ok(StartGameResponse {
            session_id: state.session_id,
            game_type: state.game_type,
            n_back: state.n_back,
            sequence_length: state.sequence_length,
        })
    }
}

/// StopGame Handler - 停止正在运行的游戏
pub struct StopGameHandler {
    engine: Arc<dyn GameEnginePort>,
}

impl StopGameHandler {
    pub fn new(engine: Arc<dyn GameEnginePort>) -> Self {
        Self { engine }
    }

    pub async fn handle(&self, _cmd: StopGameCommand) -> Result<StopGameResponse, ApplicationError> {
        let stopped = self.engine.stop_game().await;
        Ok(StopGameResponse { stopped })
    }
}

/// CheckMatch Handler - 登记用户的匹配按键
///
/// 游戏未运行、窗口未开或重复按键都不是错误，只体现在 outcome 中
pub struct CheckMatchHandler {
    engine: Arc<dyn GameEnginePort>,
}

impl CheckMatchHandler {
    pub fn new(engine: Arc<dyn GameEnginePort>) -> Self {
        Self { engine }
    }

    pub fn handle(&self, cmd: CheckMatchCommand) -> Result<CheckMatchResponse, ApplicationError> {
        let report = self.engine.register_match(cmd.modality);

        Ok(CheckMatchResponse {
            outcomes: report.outcomes,
            score: report.score,
            event_index: report.event_index,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::GameEngineError;
    use crate::domain::game::{
        GameSession, GameType, MatchOutcome, MatchReport, MatchStatus, Modality, SessionId,
        SessionState, Settings,
    };
    use crate::infrastructure::engine::{SessionEngine, SessionEngineConfig};
    use crate::infrastructure::events::EventPublisher;
    use crate::infrastructure::memory::InMemoryPreferencesStore;

    fn engine_with(settings: Settings) -> Arc<SessionEngine> {
        let preferences = Arc::new(InMemoryPreferencesStore::with_settings(settings));
        Arc::new(SessionEngine::new(
            SessionEngineConfig::default(),
            preferences,
            Arc::new(EventPublisher::new()),
        ))
    }

    /// 按键登记后状态立即前进到下一个 tick 的引擎
    struct AdvancingEngine {
        session_id: SessionId,
    }

    #[async_trait::async_trait]
    impl GameEnginePort for AdvancingEngine {
        async fn start_game(
            &self,
            game_type: Option<GameType>,
        ) -> Result<SessionState, GameEngineError> {
            Err(GameEngineError::InvalidGameType(game_type.unwrap_or(GameType::None)))
        }

        async fn stop_game(&self) -> bool {
            false
        }

        fn register_match(&self, modality: Option<Modality>) -> MatchReport {
            MatchReport {
                session_id: self.session_id.clone(),
                outcomes: vec![(
                    modality.unwrap_or(Modality::Visual),
                    MatchOutcome::Registered(MatchStatus::Correct),
                )],
                score: 3,
                event_index: 5,
            }
        }

        fn state(&self) -> SessionState {
            let mut session = GameSession::start(GameType::Visual, 1, Some(vec![1; 10]), None);
            for _ in 0..6 {
                session.tick();
            }
            session.state()
        }

        fn subscribe(&self) -> tokio::sync::watch::Receiver<GameSession> {
            tokio::sync::watch::channel(GameSession::idle()).1
        }
    }

    #[test]
    fn test_check_match_reports_snapshot_of_the_press() {
        let engine = Arc::new(AdvancingEngine {
            session_id: SessionId::new(),
        });
        assert_eq!(engine.state().event_index, 6);

        let resp = CheckMatchHandler::new(engine)
            .handle(CheckMatchCommand {
                modality: Some(Modality::Visual),
            })
            .unwrap();
        assert_eq!(resp.score, 3);
        assert_eq!(resp.event_index, 5);
        assert_eq!(
            resp.outcomes,
            vec![(Modality::Visual, MatchOutcome::Registered(MatchStatus::Correct))]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_and_stop() {
        let engine = engine_with(Settings::default());
        let start = StartGameHandler::new(engine.clone());
        let stop = StopGameHandler::new(engine.clone());

        let resp = start
            .handle(StartGameCommand {
                game_type: Some(GameType::Audio),
            })
            .await
            .unwrap();
        assert_eq!(resp.game_type, GameType::Audio);
        assert_eq!(resp.n_back, 2);
        assert_eq!(resp.sequence_length, 10);

        assert!(stop.handle(StopGameCommand).await.unwrap().stopped);
        assert!(!stop.handle(StopGameCommand).await.unwrap().stopped);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_with_none_type_is_rejected() {
        let engine = engine_with(Settings::default());
        let start = StartGameHandler::new(engine);

        let result = start
            .handle(StartGameCommand {
                game_type: Some(GameType::None),
            })
            .await;
        assert!(matches!(result, Err(ApplicationError::InvalidState(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_check_match_without_game() {
        let engine = engine_with(Settings::default());
        let check = CheckMatchHandler::new(engine);

        let resp = check
            .handle(CheckMatchCommand {
                modality: Some(Modality::Visual),
            })
            .unwrap();
        assert_eq!(resp.outcomes, vec![(Modality::Visual, MatchOutcome::Inactive)]);
        assert_eq!(resp.score, 0);

        let resp = check.handle(CheckMatchCommand::default()).unwrap();
        assert!(resp.outcomes.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_check_match_too_early() {
        let engine = engine_with(Settings::default());
        StartGameHandler::new(engine.clone())
            .handle(StartGameCommand::default())
            .await
            .unwrap();
        tokio::task::yield_now().await;

        let resp = CheckMatchHandler::new(engine)
            .handle(CheckMatchCommand::default())
            .unwrap();
        assert_eq!(resp.outcomes, vec![(Modality::Visual, MatchOutcome::TooEarly)]);
    }
}
