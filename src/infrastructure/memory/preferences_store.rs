//! In-Memory Preferences Store Implementation

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::watch;

use crate::application::ports::{PreferencesError, PreferencesPort};
use crate::domain::game::Settings;

/// 内存偏好存储
///
/// 进程退出后数据丢失，用于测试和 `storage.backend = "memory"`
pub struct InMemoryPreferencesStore {
    settings: watch::Sender<Settings>,
    high_score: watch::Sender<u32>,
}

impl InMemoryPreferencesStore {
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        let (settings, _) = watch::channel(settings);
        let (high_score, _) = watch::channel(0);
        Self {
            settings,
            high_score,
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl Default for InMemoryPreferencesStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PreferencesPort for InMemoryPreferencesStore {
    async fn load_settings(&self) -> Result<Settings, PreferencesError> {
        Ok(*self.settings.borrow())
    }

    async fn save_settings(&self, settings: Settings) -> Result<(), PreferencesError> {
        self.settings.send_replace(settings);
        tracing::debug!("Settings stored in memory");
        Ok(())
    }

    async fn load_high_score(&self) -> Result<u32, PreferencesError> {
        Ok(*self.high_score.borrow())
    }

    async fn save_high_score(&self, score: u32) -> Result<(), PreferencesError> {
        self.high_score.send_replace(score);
        tracing::debug!(high_score = score, "High score stored in memory");
        Ok(())
    }

    fn watch_settings(&self) -> watch::Receiver<Settings> {
        self.settings.subscribe()
    }

    fn watch_high_score(&self) -> watch::Receiver<u32> {
        self.high_score.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::game::GameType;

    #[tokio::test]
    async fn test_preferences_lifecycle() {
        let store = InMemoryPreferencesStore::new();
        let mut settings_rx = store.watch_settings();
        let mut high_score_rx = store.watch_high_score();

        assert_eq!(store.load_settings().await.unwrap(), Settings::default());
        assert_eq!(store.load_high_score().await.unwrap(), 0);

        let settings = Settings {
            game_type: GameType::Audio,
            ..Settings::default()
        };
        store.save_settings(settings).await.unwrap();
        assert!(settings_rx.has_changed().unwrap());
        assert_eq!(*settings_rx.borrow_and_update(), settings);

        store.save_high_score(9).await.unwrap();
        assert!(high_score_rx.has_changed().unwrap());
        assert_eq!(*high_score_rx.borrow_and_update(), 9);
        assert_eq!(store.load_high_score().await.unwrap(), 9);
    }
}
