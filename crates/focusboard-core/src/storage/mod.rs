mod config;
pub mod database;
mod memory;

pub use config::{Config, GoalsConfig, TimerConfig};
pub use database::Database;
pub use memory::MemoryStore;

use std::path::PathBuf;

use crate::error::StoreError;

/// Key holding the JSON-encoded goal sequence.
pub const GOALS_KEY: &str = "goals";
/// Key holding the theme preference (`"true"` = dark).
pub const THEME_KEY: &str = "darkMode";

/// Named-value persistence used by the goal list and theme preference.
pub trait PersistentStore {
    /// Read the value stored under `key`, or `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Returns `~/.config/focusboard[-dev]/`.
///
/// `FOCUSBOARD_DATA_DIR` overrides the location entirely; otherwise
/// `FOCUSBOARD_ENV=dev` selects the development directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StoreError> {
    let dir = match std::env::var_os("FOCUSBOARD_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("FOCUSBOARD_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("focusboard-dev")
            } else {
                base_dir.join("focusboard")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(StoreError::DataDir)?;
    Ok(dir)
}
