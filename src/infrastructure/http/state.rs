//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::{
    // Command handlers
    CheckMatchHandler, SaveSettingsHandler, StartGameHandler, StopGameHandler,
    // Query handlers
    GetGameStateHandler, GetHighScoreHandler, GetSettingsHandler,
    // Ports
    GameEnginePort, PreferencesPort,
};
use crate::infrastructure::events::EventPublisher;

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub engine: Arc<dyn GameEnginePort>,
    pub preferences: Arc<dyn PreferencesPort>,
    pub event_publisher: Arc<EventPublisher>,

    // ========== Command Handlers ==========
    pub start_game_handler: StartGameHandler,
    pub stop_game_handler: StopGameHandler,
    pub check_match_handler: CheckMatchHandler,
    pub save_settings_handler: SaveSettingsHandler,

    // ========== Query Handlers ==========
    pub get_game_state_handler: GetGameStateHandler,
    pub get_settings_handler: GetSettingsHandler,
    pub get_high_score_handler: GetHighScoreHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        engine: Arc<dyn GameEnginePort>,
        preferences: Arc<dyn PreferencesPort>,
        event_publisher: Arc<EventPublisher>,
    ) -> Self {
        Self {
            engine: engine.clone(),
            preferences: preferences.clone(),
            event_publisher: event_publisher.clone(),

            start_game_handler: StartGameHandler::new(engine.clone()),
            stop_game_handler: StopGameHandler::new(engine.clone()),
            check_match_handler: CheckMatchHandler::new(engine.clone()),
            save_settings_handler: SaveSettingsHandler::new(
                preferences.clone(),
                event_publisher.clone(),
            ),

            get_game_state_handler: GetGameStateHandler::new(engine.clone()),
            get_settings_handler: GetSettingsHandler::new(preferences.clone()),
            get_high_score_handler: GetHighScoreHandler::new(preferences.clone()),
        }
    }
}
