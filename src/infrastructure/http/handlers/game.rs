//! Game Handlers

use axum::{body::Bytes, extract::State, Json};
use std::sync::Arc;

use crate::application::{CheckMatchCommand, GetGameState, StartGameCommand, StopGameCommand};
use crate::domain::game::SessionState;
use crate::infrastructure::http::dto::{
    parse_optional_body, ApiResponse, CheckMatchRequest, CheckMatchResponseDto, MatchResultDto,
    StartGameRequest, StartGameResponseDto, StopGameResponseDto,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// Start / Stop
// ============================================================================

/// 请求体可省略
pub async fn start_game(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ApiResponse<StartGameResponseDto>>, ApiError> {
    let req: StartGameRequest = parse_optional_body(&body)?;

    let result = state
        .start_game_handler
        .handle(StartGameCommand {
            game_type: req.game_type,
        })
        .await?;

    Ok(Json(ApiResponse::success(StartGameResponseDto {
        session_id: result.session_id,
        game_type: result.game_type,
        n_back: result.n_back,
        sequence_length: result.sequence_length,
    })))
}

pub async fn stop_game(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<StopGameResponseDto>>, ApiError> {
    let result = state.stop_game_handler.handle(StopGameCommand).await?;
    Ok(Json(ApiResponse::success(StopGameResponseDto {
        stopped: result.stopped,
    })))
}

// ============================================================================
// Match
// ============================================================================

/// 请求体可省略，省略时检查所有模态
pub async fn check_match(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ApiResponse<CheckMatchResponseDto>>, ApiError> {
    let req: CheckMatchRequest = parse_optional_body(&body)?;

    let result = state.check_match_handler.handle(CheckMatchCommand {
        modality: req.modality,
    })?;

    Ok(Json(ApiResponse::success(CheckMatchResponseDto {
        results: result
            .outcomes
            .into_iter()
            .map(|(modality, outcome)| MatchResultDto { modality, outcome })
            .collect(),
        score: result.score,
        event_index: result.event_index,
    })))
}

// ============================================================================
// State
// ============================================================================

pub async fn get_game_state(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<SessionState>>, ApiError> {
    let session = state.get_game_state_handler.handle(GetGameState)?;
    Ok(Json(ApiResponse::success(session)))
}
