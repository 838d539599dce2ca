//! Settings Command Handlers

use std::sync::Arc;

use crate::application::commands::settings_commands::*;
use crate::application::error::ApplicationError;
use crate::application::ports::PreferencesPort;
use crate::infrastructure::events::EventPublisher;

/// SaveSettings Handler - 校验并持久化设置
///
/// 已在运行的游戏不受影响，新设置从下一局开始生效
pub struct SaveSettingsHandler {
    preferences: Arc<dyn PreferencesPort>,
    event_publisher: Arc<EventPublisher>,
}

impl SaveSettingsHandler {
    pub fn new(preferences: Arc<dyn PreferencesPort>, event_publisher: Arc<EventPublisher>) -> Self {
        Self {
            preferences,
            event_publisher,
        }
    }

    pub async fn handle(&self, cmd: SaveSettingsCommand) -> Result<SaveSettingsResponse, ApplicationError> {
        cmd.settings.validate()?;

        self.preferences.save_settings(cmd.settings).await?;
        self.event_publisher.publish_settings_changed(cmd.settings);

        tracing::info!(
            size = cmd.settings.size,
            event_interval_ms = cmd.settings.event_interval_ms,
            n_back = cmd.settings.n_back,
            visual_combinations = cmd.settings.visual_combinations,
            audio_combinations = cmd.settings.audio_combinations,
            game_type = %cmd.settings.game_type,
            "Settings saved"
        );

        Ok(SaveSettingsResponse {
            settings: cmd.settings,
        })
    }
}
