//! Memory Layer - In-Memory State Management
//!
//! 内存版偏好存储

mod preferences_store;

pub use preferences_store::InMemoryPreferencesStore;
