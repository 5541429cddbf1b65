//! # Gratitude Garden Core Library
//!
//! Business logic for Gratitude Garden, a journal where each gratitude entry
//! becomes a seed that can be planted and grown in a small grid garden.
//! The CLI is a thin layer over this library.
//!
//! ## Architecture
//!
//! - **Engines**: pure functions over explicit inputs, always given `now`
//!   by the caller: [`streak`], [`weather`], [`unlocks`] and the growth
//!   rules in [`garden`]
//! - **Storage**: a key-value contract of JSON values with in-memory and
//!   SQLite backends, plus TOML-based configuration
//! - **Service**: [`GardenService`] wires user actions to the engines and the
//!   store and reports [`Event`]s for notification
//!
//! ## Key Components
//!
//! - [`GardenService`]: entry submission, planting, watering, growth sweeps
//! - [`GardenStore`]: typed records over any [`KeyValueStore`]
//! - [`Config`]: application configuration management

pub mod error;
pub mod events;
pub mod garden;
pub mod journal;
pub mod profile;
pub mod service;
pub mod storage;
pub mod streak;
pub mod unlocks;
pub mod weather;

pub use error::{ConfigError, CoreError, GardenError, StorageError, ValidationError};
pub use events::Event;
pub use garden::{
    apply_growth, derive_stage, water, GridPosition, GrowthConfig, GrowthEngine, Plant,
    PlantType, Stage, StageChange, WaterError, WaterReceipt, GRID_SIZE,
};
pub use journal::Entry;
pub use profile::{FriendCode, Profile};
pub use service::{DayBoundary, GardenOverview, GardenService, Outcome, Submission};
pub use storage::{Config, GardenExport, GardenStore, KeyValueStore, MemoryStore, SqliteStore};
pub use streak::{calculate_streak, check_streak_break, streak_bonus, update_streak_state, StreakBreak};
pub use unlocks::{evaluate_unlocks, Unlock};
pub use weather::{calculate_weather, weather_bonus, Weather};
