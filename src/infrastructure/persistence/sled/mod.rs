mod preferences_store;

pub use preferences_store::{SledPreferencesConfig, SledPreferencesStore};
