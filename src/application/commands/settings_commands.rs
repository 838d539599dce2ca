//! Settings Commands - 设置相关命令

use crate::domain::game::Settings;

/// 保存设置命令
#[derive(Debug, Clone)]
pub struct SaveSettingsCommand {
    pub settings: Settings,
}

/// 保存设置响应
#[derive(Debug, Clone)]
pub struct SaveSettingsResponse {
    pub settings: Settings,
}
