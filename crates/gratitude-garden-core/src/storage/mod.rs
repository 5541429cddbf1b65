//! Persistence for the garden.
//!
//! The engines never touch storage. The service reads and writes through
//! [`GardenStore`], which maps the typed records onto any [`KeyValueStore`]
//! backend holding JSON values.

mod config;
pub mod database;
pub mod memory;
pub mod repository;

pub use config::{Config, DisplayConfig, ProfileConfig};
pub use database::SqliteStore;
pub use memory::MemoryStore;
pub use repository::{keys, GardenExport, GardenStore};

use std::path::PathBuf;

use serde_json::Value;

use crate::error::StorageError;

/// Opaque key-value persistence of JSON values.
///
/// No transactional guarantees: each call stands alone.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError>;
    fn set(&mut self, key: &str, value: Value) -> Result<(), StorageError>;
    fn delete(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Returns the data directory, creating it if needed.
///
/// `GRATITUDE_GARDEN_DATA_DIR` overrides the location outright. Otherwise it
/// is `~/.config/gratitude-garden[-dev]/`, with the `-dev` suffix selected by
/// `GRATITUDE_GARDEN_ENV=dev`.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = match std::env::var_os("GRATITUDE_GARDEN_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("GRATITUDE_GARDEN_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("gratitude-garden-dev")
            } else {
                base_dir.join("gratitude-garden")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| StorageError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
