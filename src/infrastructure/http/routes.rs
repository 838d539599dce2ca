//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping              GET   健康检查
//! - /api/game/start        POST  开始新游戏（可覆盖游戏类型）
//! - /api/game/stop         POST  停止当前游戏，不计分
//! - /api/game/match        POST  登记匹配按键
//! - /api/game/state        GET   当前会话状态
//! - /api/settings          GET   当前设置
//! - /api/settings/save     POST  校验并保存设置
//! - /api/highscore         GET   最高分
//! - /ws/game               WS    游戏事件推送 + 匹配按键

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .nest("/api", api_routes())
        .route("/ws/game", get(handlers::game_websocket_handler))
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .nest("/game", game_routes())
        .route("/settings", get(handlers::get_settings))
        .route("/settings/save", post(handlers::save_settings))
        .route("/highscore", get(handlers::get_high_score))
}

/// Game 路由
fn game_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/start", post(handlers::start_game))
        .route("/stop", post(handlers::stop_game))
        .route("/match", post(handlers::check_match))
        .route("/state", get(handlers::get_game_state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header::CONTENT_TYPE, Request, StatusCode},
    };
    use serde_json::Value;
    use tower::util::ServiceExt;

    use crate::application::PreferencesPort;
    use crate::infrastructure::engine::{SessionEngine, SessionEngineConfig};
    use crate::infrastructure::events::EventPublisher;
    use crate::infrastructure::memory::InMemoryPreferencesStore;

    fn test_app() -> (Router, Arc<InMemoryPreferencesStore>) {
        let preferences = Arc::new(InMemoryPreferencesStore::new());
        let publisher = Arc::new(EventPublisher::new());
        let engine = Arc::new(SessionEngine::new(
            SessionEngineConfig::default(),
            preferences.clone(),
            publisher.clone(),
        ));
        let state = AppState::new(engine, preferences.clone(), publisher);
        (create_routes().with_state(Arc::new(state)), preferences)
    }

    async fn send(app: &Router, request: Request<Body>) -> Value {
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn post_empty(uri: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_ping() {
        let (app, _) = test_app();
        let json = send(&app, get_request("/api/ping")).await;
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn test_settings_roundtrip() {
        let (app, preferences) = test_app();

        let json = send(&app, get_request("/api/settings")).await;
        assert_eq!(json["errno"], 0);
        assert_eq!(json["data"]["n_back"], 2);
        assert_eq!(json["data"]["game_type"], "Visual");

        let json = send(
            &app,
            post_json(
                "/api/settings/save",
                serde_json::json!({ "n_back": 3, "game_type": "AudioVisual" }),
            ),
        )
        .await;
        assert_eq!(json["errno"], 0);
        assert_eq!(json["data"]["n_back"], 3);
        assert_eq!(json["data"]["size"], 10);

        let stored = preferences.load_settings().await.unwrap();
        assert_eq!(stored.n_back, 3);
    }

    #[tokio::test]
    async fn test_invalid_settings_rejected() {
        let (app, _) = test_app();
        let json = send(
            &app,
            post_json(
                "/api/settings/save",
                serde_json::json!({ "audio_combinations": 27 }),
            ),
        )
        .await;
        assert_eq!(json["errno"], 400);
        assert!(json["data"].is_null());
    }

    #[tokio::test]
    async fn test_high_score() {
        let (app, preferences) = test_app();
        preferences.save_high_score(9).await.unwrap();

        let json = send(&app, get_request("/api/highscore")).await;
        assert_eq!(json["data"]["high_score"], 9);
    }

    #[tokio::test(start_paused = true)]
    async fn test_game_lifecycle() {
        let (app, _) = test_app();

        let json = send(&app, post_empty("/api/game/start")).await;
        assert_eq!(json["errno"], 0);
        assert_eq!(json["data"]["game_type"], "Visual");
        assert_eq!(json["data"]["sequence_length"], 10);

        let json = send(&app, post_empty("/api/game/match")).await;
        assert_eq!(json["data"]["results"][0]["modality"], "visual");
        assert_eq!(json["data"]["results"][0]["outcome"], "too_early");

        let json = send(&app, get_request("/api/game/state")).await;
        assert_eq!(json["data"]["game_type"], "Visual");
        assert_eq!(json["data"]["score"], 0);

        let json = send(&app, post_empty("/api/game/stop")).await;
        assert_eq!(json["data"]["stopped"], true);

        let json = send(
            &app,
            post_json("/api/game/match", serde_json::json!({ "modality": "audio" })),
        )
        .await;
        assert_eq!(json["data"]["results"][0]["outcome"], "inactive");
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_with_none_type() {
        let (app, _) = test_app();
        let json = send(
            &app,
            post_json("/api/game/start", serde_json::json!({ "game_type": "None" })),
        )
        .await;
        assert_eq!(json["errno"], 409);
    }

    #[tokio::test]
    async fn test_oversized_settings_rejected() {
        let (app, preferences) = test_app();
        let json = send(
            &app,
            post_json("/api/settings/save", serde_json::json!({ "size": 4_000_000_000u64 })),
        )
        .await;
        assert_eq!(json["errno"], 400);
        assert_eq!(preferences.load_settings().await.unwrap().size, 10);

        let json = send(
            &app,
            post_json("/api/settings/save", serde_json::json!({ "n_back": 11 })),
        )
        .await;
        assert_eq!(json["errno"], 400);
    }

    #[tokio::test(start_paused = true)]
    async fn test_malformed_game_bodies_rejected() {
        let (app, _) = test_app();

        let json = send(
            &app,
            post_json("/api/game/start", serde_json::json!({ "game_type": "Audoi" })),
        )
        .await;
        assert_eq!(json["errno"], 400);
        let json = send(&app, get_request("/api/game/state")).await;
        assert_eq!(json["data"]["game_type"], "None");

        let json = send(&app, post_empty("/api/game/start")).await;
        assert_eq!(json["errno"], 0);

        let json = send(
            &app,
            post_json("/api/game/match", serde_json::json!({ "modality": "visul" })),
        )
        .await;
        assert_eq!(json["errno"], 400);
        assert!(json["data"].is_null());

        let json = send(
            &app,
            post_json("/api/game/match", serde_json::json!({ "modality": "visual" })),
        )
        .await;
        assert_eq!(json["errno"], 0);
        assert_eq!(json["data"]["results"][0]["outcome"], "too_early");
    }
}
