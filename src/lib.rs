//! N-back - 双通道 N-back 认知训练引擎
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Game Context: 游戏会话聚合、设置、匹配判定
//! - 刺激序列生成器
//!
//! 应用层 (application/):
//! - Ports: 端口定义（GameEngine, Preferences）
//! - Commands: CQRS 命令处理器
//! - Queries: CQRS 查询处理器
//!
//! 基础设施层 (infrastructure/):
//! - Engine: 定时 tick 循环与会话状态
//! - HTTP: RESTful API + WebSocket
//! - Persistence: Sled 偏好存储
//! - Memory: 内存偏好存储
//! - Events: WebSocket 事件发布

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
