//! WebSocket Handler
//!
//! 推送 GameEvent，并接受 "visual" / "audio" / "match" 文本作为匹配按键

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;

use crate::application::CheckMatchCommand;
use crate::domain::game::Modality;
use crate::infrastructure::http::state::AppState;

/// 游戏 WebSocket 连接处理
pub async fn game_websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_game_socket(socket, state))
}

/// 解析客户端按键文本
///
/// "match" 检查当前游戏所有模态；无法识别时返回 None
fn parse_match_input(text: &str) -> Option<CheckMatchCommand> {
    let text = text.trim();
    if text.eq_ignore_ascii_case("match") {
        return Some(CheckMatchCommand { modality: None });
    }
    Modality::from_str(text).map(|modality| CheckMatchCommand {
        modality: Some(modality),
    })
}

async fn handle_game_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();
    let mut event_rx = state.event_publisher.subscribe();

    tracing::info!("Game WebSocket connected");

    // 事件转发任务
    let mut forward_task = tokio::spawn(async move {
        loop {
            let event = match event_rx.recv().await {
                Ok(event) => event,
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped = skipped, "Game WebSocket lagged behind events");
                    continue;
                }
                Err(RecvError::Closed) => break,
            };

            let msg = match serde_json::to_string(&event) {
                Ok(json) => Message::Text(json),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to serialize event");
                    continue;
                }
            };

            if let Err(e) = sender.send(msg).await {
                tracing::debug!(error = %e, "Failed to send WebSocket message");
                break;
            }
        }
    });

    // 接收客户端按键，结果通过 MatchRegistered 事件推送
    let receive_state = state.clone();
    let mut receive_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    let Some(cmd) = parse_match_input(&text) else {
                        tracing::debug!(input = %text, "Ignoring unknown WebSocket input");
                        continue;
                    };
                    match receive_state.check_match_handler.handle(cmd) {
                        Ok(resp) => tracing::debug!(
                            outcomes = ?resp.outcomes,
                            score = resp.score,
                            "Match input handled"
                        ),
                        Err(e) => tracing::warn!(error = %e, "Match input failed"),
                    }
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Game WebSocket closed by client");
                    break;
                }
                Err(e) => {
                    tracing::debug!(error = %e, "Game WebSocket error");
                    break;
                }
                _ => {}
            }
        }
    });

    // 任一任务结束即关闭另一个
    tokio::select! {
        _ = &mut forward_task => receive_task.abort(),
        _ = &mut receive_task => forward_task.abort(),
    }

    tracing::info!("Game WebSocket disconnected");
}
