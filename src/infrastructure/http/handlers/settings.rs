//! Settings & High Score Handlers

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::{GetHighScore, GetSettings, SaveSettingsCommand};
use crate::domain::game::Settings;
use crate::infrastructure::http::dto::{ApiResponse, HighScoreResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

pub async fn get_settings(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Settings>>, ApiError> {
    let settings = state.get_settings_handler.handle(GetSettings).await?;
    Ok(Json(ApiResponse::success(settings)))
}

/// 保存设置，缺失字段取默认值
pub async fn save_settings(
    State(state): State<Arc<AppState>>,
    Json(settings): Json<Settings>,
) -> Result<Json<ApiResponse<Settings>>, ApiError> {
    let result = state
        .save_settings_handler
        .handle(SaveSettingsCommand { settings })
        .await?;
    Ok(Json(ApiResponse::success(result.settings)))
}

pub async fn get_high_score(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<HighScoreResponse>>, ApiError> {
    let high_score = state.get_high_score_handler.handle(GetHighScore).await?;
    Ok(Json(ApiResponse::success(HighScoreResponse { high_score })))
}
