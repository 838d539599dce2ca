//! Data Transfer Objects

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::domain::game::{GameType, MatchOutcome, Modality, SessionId};
use crate::infrastructure::http::error::ApiError;

/// 解析可省略的 JSON 请求体
///
/// 空请求体取默认值；无法解析的请求体返回 BadRequest，不回退到默认值
pub fn parse_optional_body<T: DeserializeOwned + Default>(body: &[u8]) -> Result<T, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid request body: {}", e)))
}

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

// ============================================================================
// Game DTOs
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct StartGameRequest {
    /// 不填时使用设置中的游戏类型
    #[serde(default)]
    pub game_type: Option<GameType>,
}

#[derive(Debug, Serialize)]
pub struct StartGameResponseDto {
    pub session_id: SessionId,
    pub game_type: GameType,
    pub n_back: usize,
    pub sequence_length: usize,
}

#[derive(Debug, Serialize)]
pub struct StopGameResponseDto {
    pub stopped: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct CheckMatchRequest {
    /// 不填时检查当前游戏的所有模态
    #[serde(default)]
    pub modality: Option<Modality>,
}

/// 单个模态的检查结果
#[derive(Debug, Serialize)]
pub struct MatchResultDto {
    pub modality: Modality,
    #[serde(flatten)]
    pub outcome: MatchOutcome,
}

#[derive(Debug, Serialize)]
pub struct CheckMatchResponseDto {
    pub results: Vec<MatchResultDto>,
    pub score: u32,
    pub event_index: usize,
}

// ============================================================================
// Preferences DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HighScoreResponse {
    pub high_score: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_body_is_default() {
        let req: CheckMatchRequest = parse_optional_body(b"").unwrap();
        assert_eq!(req.modality, None);
        let req: StartGameRequest = parse_optional_body(b"  \n").unwrap();
        assert_eq!(req.game_type, None);
        let req: CheckMatchRequest = parse_optional_body(b"{}").unwrap();
        assert_eq!(req.modality, None);
    }

    #[test]
    fn test_misspelled_values_rejected() {
        let result = parse_optional_body::<CheckMatchRequest>(br#"{"modality":"visul"}"#);
        assert!(matches!(result, Err(ApiError::BadRequest(_))));

        let result = parse_optional_body::<StartGameRequest>(br#"{"game_type":"Audoi"}"#);
        assert!(matches!(result, Err(ApiError::BadRequest(_))));

        let result = parse_optional_body::<StartGameRequest>(b"{not json");
        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn test_valid_body() {
        let req: CheckMatchRequest = parse_optional_body(br#"{"modality":"audio"}"#).unwrap();
        assert_eq!(req.modality, Some(Modality::Audio));
        let req: StartGameRequest =
            parse_optional_body(br#"{"game_type":"AudioVisual"}"#).unwrap();
        assert_eq!(req.game_type, Some(GameType::AudioVisual));
    }
}
