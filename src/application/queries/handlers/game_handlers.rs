//! Game Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{
    load_high_score_or_default, load_settings_or_default, GameEnginePort, PreferencesPort,
};
use crate::application::queries::{GetGameState, GetHighScore, GetSettings};
use crate::domain::game::{SessionState, Settings};

/// GetGameState Handler
pub struct GetGameStateHandler {
    engine: Arc<dyn GameEnginePort>,
}

impl GetGameStateHandler {
    pub fn new(engine: Arc<dyn GameEnginePort>) -> Self {
        Self { engine }
    }

    pub fn handle(&self, _query: GetGameState) -> Result<SessionState, ApplicationError> {
        Ok(self.engine.state())
    }
}

/// GetSettings Handler
///
/// 存储不可用时返回默认设置
pub struct GetSettingsHandler {
    preferences: Arc<dyn PreferencesPort>,
}

impl GetSettingsHandler {
    pub fn new(preferences: Arc<dyn PreferencesPort>) -> Self {
        Self { preferences }
    }

    pub async fn handle(&self, _query: GetSettings) -> Result<Settings, ApplicationError> {
        Ok(load_settings_or_default(self.preferences.as_ref()).await)
    }
}

/// GetHighScore Handler
pub struct GetHighScoreHandler {
    preferences: Arc<dyn PreferencesPort>,
}

impl GetHighScoreHandler {
    pub fn new(preferences: Arc<dyn PreferencesPort>) -> Self {
        Self { preferences }
    }

    pub async fn handle(&self, _query: GetHighScore) -> Result<u32, ApplicationError> {
        Ok(load_high_score_or_default(self.preferences.as_ref()).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::game::GameType;
    use crate::infrastructure::memory::InMemoryPreferencesStore;

    #[tokio::test]
    async fn test_get_settings_and_high_score() {
        let preferences = Arc::new(InMemoryPreferencesStore::new());
        preferences.save_high_score(12).await.unwrap();

        let settings = GetSettingsHandler::new(preferences.clone())
            .handle(GetSettings)
            .await
            .unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.game_type, GameType::Visual);

        let high_score = GetHighScoreHandler::new(preferences)
            .handle(GetHighScore)
            .await
            .unwrap();
        assert_eq!(high_score, 12);
    }
}
