//! Core error types for gratitude-garden-core.
//!
//! Every failure in the core is recoverable: callers report the message and
//! let the user retry the action. Not-found lookups are not errors at all and
//! surface as `None` from the service layer.

use std::path::PathBuf;
use thiserror::Error;

use crate::garden::{GridPosition, WaterError};

/// Core error type for gratitude-garden-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Persistence backend errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Invalid user input
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A garden action was refused
    #[error("{0}")]
    Garden(#[from] GardenError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Persistence backend errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the backing database
    #[error("Failed to open store at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// A stored value is not valid JSON for its key
    #[error("Malformed value under '{key}': {message}")]
    Malformed { key: String, message: String },

    /// The data directory could not be determined or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown dotted key
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Validation errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// Entry text was empty after trimming
    #[error("Please write something you're grateful for!")]
    EmptyEntry,

    /// Grid coordinates outside the garden
    #[error("Position ({x}, {y}) is outside the {size}x{size} garden")]
    OutOfBounds { x: i64, y: i64, size: u8 },

    /// Friend code failed to parse
    #[error("Invalid friend code '{code}': {message}")]
    InvalidFriendCode { code: String, message: String },
}

/// Garden actions refused because of the garden's current state.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum GardenError {
    /// Cooldown since the last watering has not elapsed
    #[error(transparent)]
    Water(#[from] WaterError),

    /// Target cell already holds a plant
    #[error("This spot is already occupied! ({0})")]
    CellOccupied(GridPosition),

    /// Entry already grew into a plant
    #[error("Entry '{entry_id}' is already planted as '{plant_id}'")]
    AlreadyPlanted { entry_id: String, plant_id: String },
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError::QueryFailed(err.to_string())
    }
}

impl From<WaterError> for CoreError {
    fn from(err: WaterError) -> Self {
        CoreError::Garden(GardenError::Water(err))
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
