//! Domain Layer - 领域层
//!
//! 包含:
//! - Game Context: N-back 游戏会话、设置
//! - 刺激序列生成器

pub mod game;

mod sequence_generator;

pub use sequence_generator::{
    count_matches, generate_sequence, SequenceConfig, SequenceGenerator, DEFAULT_MATCH_PERCENTAGE,
};
