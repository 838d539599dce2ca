//! Infrastructure Layer - 基础设施层
//!
//! 提供所有端口的具体实现

pub mod engine;
pub mod events;
pub mod http;
pub mod memory;
pub mod persistence;

pub use engine::{SessionEngine, SessionEngineConfig};
pub use events::EventPublisher;
pub use memory::InMemoryPreferencesStore;
pub use persistence::SledPreferencesStore;
