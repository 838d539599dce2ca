//! Sled-based Preferences Store Implementation
//!
//! 每个设置项单独存一个 key，值用 bincode 编码

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sled::Db;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::watch;

use crate::application::ports::{PreferencesError, PreferencesPort};
use crate::domain::game::{GameType, Settings};

const KEY_HIGHSCORE: &str = "highscore";
const KEY_GAME_TYPE: &str = "gameType";
const KEY_SIZE: &str = "size";
const KEY_EVENT_INTERVAL: &str = "eventInterval";
const KEY_N_BACK: &str = "nBack";
const KEY_VISUAL_COMBINATIONS: &str = "visualCombinations";
const KEY_AUDIO_COMBINATIONS: &str = "audioCombinations";

/// Sled 存储配置
#[derive(Debug, Clone)]
pub struct SledPreferencesConfig {
    /// 数据库路径
    pub db_path: String,
}

impl Default for SledPreferencesConfig {
    fn default() -> Self {
        Self {
            db_path: "data/preferences.sled".to_string(),
        }
    }
}

/// Sled 偏好存储
pub struct SledPreferencesStore {
    db: Db,
    settings: watch::Sender<Settings>,
    high_score: watch::Sender<u32>,
}

impl SledPreferencesStore {
    /// 打开存储并加载当前值到 watch 通道
    pub fn new(config: &SledPreferencesConfig) -> Result<Self, PreferencesError> {
        let db = sled::open(&config.db_path)
            .map_err(|e| PreferencesError::DatabaseError(e.to_string()))?;

        let settings = read_settings(&db)?;
        let high_score = read_or_default(&db, KEY_HIGHSCORE, 0u32)?;

        tracing::info!(
            db_path = %config.db_path,
            high_score = high_score,
            "SledPreferencesStore initialized"
        );

        let (settings, _) = watch::channel(settings);
        let (high_score, _) = watch::channel(high_score);
        Ok(Self {
            db,
            settings,
            high_score,
        })
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, PreferencesError> {
        let config = SledPreferencesConfig {
            db_path: path.as_ref().to_string_lossy().to_string(),
        };
        Self::new(&config)
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 刷新数据库
    pub async fn flush(&self) -> Result<(), PreferencesError> {
        self.db
            .flush_async()
            .await
            .map_err(|e| PreferencesError::DatabaseError(e.to_string()))?;
        Ok(())
    }
}

fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, PreferencesError> {
    bincode::serialize(value).map_err(|e| PreferencesError::SerializationError(e.to_string()))
}

/// 读取单个 key；缺失或无法解码时返回默认值
fn read_or_default<T: DeserializeOwned>(db: &Db, key: &str, default: T) -> Result<T, PreferencesError> {
    let Some(bytes) = db
        .get(key)
        .map_err(|e| PreferencesError::DatabaseError(e.to_string()))?
    else {
        return Ok(default);
    };

    match bincode::deserialize::<T>(&bytes) {
        Ok(value) => Ok(value),
        Err(e) => {
            tracing::warn!(key = %key, error = %e, "Corrupt preference value, using default");
            Ok(default)
        }
    }
}

fn read_settings(db: &Db) -> Result<Settings, PreferencesError> {
    let defaults = Settings::default();

    let game_type_name: String = read_or_default(db, KEY_GAME_TYPE, defaults.game_type.to_string())?;
    let game_type = GameType::from_str(&game_type_name).unwrap_or_else(|| {
        tracing::warn!(game_type = %game_type_name, "Unknown game type, using default");
        defaults.game_type
    });

    Ok(Settings {
        size: read_or_default(db, KEY_SIZE, defaults.size)?,
        event_interval_ms: read_or_default(db, KEY_EVENT_INTERVAL, defaults.event_interval_ms)?,
        n_back: read_or_default(db, KEY_N_BACK, defaults.n_back)?,
        visual_combinations: read_or_default(db, KEY_VISUAL_COMBINATIONS, defaults.visual_combinations)?,
        audio_combinations: read_or_default(db, KEY_AUDIO_COMBINATIONS, defaults.audio_combinations)?,
        game_type,
    })
}

#[async_trait]
impl PreferencesPort for SledPreferencesStore {
    async fn load_settings(&self) -> Result<Settings, PreferencesError> {
        read_settings(&self.db)
    }

    async fn save_settings(&self, settings: Settings) -> Result<(), PreferencesError> {
        let mut batch = sled::Batch::default();
        batch.insert(KEY_GAME_TYPE, encode(&settings.game_type.to_string())?);
        batch.insert(KEY_SIZE, encode(&settings.size)?);
        batch.insert(KEY_EVENT_INTERVAL, encode(&settings.event_interval_ms)?);
        batch.insert(KEY_N_BACK, encode(&settings.n_back)?);
        batch.insert(KEY_VISUAL_COMBINATIONS, encode(&settings.visual_combinations)?);
        batch.insert(KEY_AUDIO_COMBINATIONS, encode(&settings.audio_combinations)?);

        self.db
            .apply_batch(batch)
            .map_err(|e| PreferencesError::DatabaseError(e.to_string()))?;
        self.flush().await?;

        self.settings.send_replace(settings);
        tracing::debug!("Settings persisted");
        Ok(())
    }

    async fn load_high_score(&self) -> Result<u32, PreferencesError> {
        read_or_default(&self.db, KEY_HIGHSCORE, 0u32)
    }

    async fn save_high_score(&self, score: u32) -> Result<(), PreferencesError> {
        self.db
            .insert(KEY_HIGHSCORE, encode(&score)?)
            .map_err(|e| PreferencesError::DatabaseError(e.to_string()))?;
        self.flush().await?;

        self.high_score.send_replace(score);
        tracing::debug!(high_score = score, "High score persisted");
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
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_defaults_on_empty_store() {
        let dir = tempdir().unwrap();
        let store = SledPreferencesStore::open(dir.path().join("prefs.sled")).unwrap();

        assert_eq!(store.load_settings().await.unwrap(), Settings::default());
        assert_eq!(store.load_high_score().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_settings_persist_across_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prefs.sled");

        let settings = Settings {
            size: 25,
            event_interval_ms: 1500,
            n_back: 3,
            visual_combinations: 16,
            audio_combinations: 12,
            game_type: GameType::AudioVisual,
        };

        {
            let store = SledPreferencesStore::open(&path).unwrap();
            store.save_settings(settings).await.unwrap();
            store.save_high_score(7).await.unwrap();
        }

        let store = SledPreferencesStore::open(&path).unwrap();
        assert_eq!(store.load_settings().await.unwrap(), settings);
        assert_eq!(store.load_high_score().await.unwrap(), 7);
        assert_eq!(*store.watch_settings().borrow(), settings);
        assert_eq!(*store.watch_high_score().borrow(), 7);
    }

    #[tokio::test]
    async fn test_corrupt_values_fall_back_to_defaults() {
        let dir = tempdir().unwrap();
        let store = SledPreferencesStore::open(dir.path().join("prefs.sled")).unwrap();

        store.db.insert(KEY_N_BACK, vec![1u8]).unwrap();
        store
            .db
            .insert(KEY_GAME_TYPE, encode(&"Chess".to_string()).unwrap())
            .unwrap();
        store.db.insert(KEY_HIGHSCORE, vec![0xffu8]).unwrap();

        let settings = store.load_settings().await.unwrap();
        assert_eq!(settings.n_back, Settings::default().n_back);
        assert_eq!(settings.game_type, GameType::Visual);
        assert_eq!(store.load_high_score().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_watch_notified_on_save() {
        let dir = tempdir().unwrap();
        let store = SledPreferencesStore::open(dir.path().join("prefs.sled")).unwrap();
        let mut rx = store.watch_high_score();

        store.save_high_score(3).await.unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), 3);
    }
}
