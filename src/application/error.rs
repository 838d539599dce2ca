//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 状态无效
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// 存储错误
    #[error("Storage error: {0}")]
    StorageError(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 创建状态无效错误
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState(message.into())
    }

    /// 创建内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }
}

impl From<crate::application::ports::PreferencesError> for ApplicationError {
    fn from(err: crate::application::ports::PreferencesError) -> Self {
        Self::StorageError(err.to_string())
    }
}

impl From<crate::application::ports::GameEngineError> for ApplicationError {
    fn from(err: crate::application::ports::GameEngineError) -> Self {
        Self::InvalidState(err.to_string())
    }
}

impl From<crate::domain::game::SettingsError> for ApplicationError {
    fn from(err: crate::domain::game::SettingsError) -> Self {
        Self::ValidationError(err.to_string())
    }
}
