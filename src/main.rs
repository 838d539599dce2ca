//! N-back 训练服务
//!
//! - Domain: game/ (会话聚合、设置), 序列生成
//! - Application: commands, queries, ports
//! - Infrastructure: engine, http, persistence, memory, events

use std::sync::Arc;

use nback::application::{GameEnginePort, PreferencesPort};
use nback::config::{load_config, print_config, LogConfig, StorageBackend, StorageConfig};
use nback::infrastructure::engine::{SessionEngine, SessionEngineConfig};
use nback::infrastructure::events::EventPublisher;
use nback::infrastructure::http::{AppState, HttpServer};
use nback::infrastructure::memory::InMemoryPreferencesStore;
use nback::infrastructure::persistence::SledPreferencesStore;

fn init_tracing(log: &LogConfig) {
    let log_filter = format!("{},nback={},tower_http=debug", log.level, log.level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if log.json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// 按配置创建偏好存储
async fn open_preferences(storage: &StorageConfig) -> anyhow::Result<Arc<dyn PreferencesPort>> {
    match storage.backend {
        StorageBackend::Sled => {
            if let Some(parent) = storage.path.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            Ok(Arc::new(SledPreferencesStore::open(&storage.path)?))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory preferences, settings and high score will not persist");
            Ok(Arc::new(InMemoryPreferencesStore::new()))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for ctrl-c");
        return;
    }
    tracing::info!("Received shutdown signal");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config.log);
    tracing::info!("N-back training server");
    print_config(&config);

    let preferences = open_preferences(&config.storage).await?;
    let event_publisher = Arc::new(EventPublisher::new());

    let engine = Arc::new(SessionEngine::new(
        SessionEngineConfig {
            match_percentage: config.game.match_percentage,
            seed: config.game.seed,
        },
        preferences.clone(),
        event_publisher.clone(),
    ));

    let state = AppState::new(engine.clone(), preferences, event_publisher);
    let server = HttpServer::new(&config.server, state);

    server.run_with_shutdown(shutdown_signal()).await?;

    // 退出前停止正在运行的游戏，不计分
    if engine.stop_game().await {
        tracing::info!("Running game stopped on shutdown");
    }

    tracing::info!("Server shutdown complete");
    Ok(())
}
