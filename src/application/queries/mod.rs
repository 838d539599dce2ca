//! 应用层 - 查询（读操作）
//!
//! CQRS 查询侧：处理所有读操作

mod game_queries;

pub mod handlers;

pub use game_queries::*;
