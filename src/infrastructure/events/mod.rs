//! Events - 游戏事件广播

mod publisher;

pub use publisher::{EventPublisher, GameEvent};
