//! The planting grid and the plants growing in it.

mod grid;
mod growth;
mod plant;

pub use grid::{choose_plant_type, ensure_free, plant_at, render_grid, EMPTY_CELL};
pub use growth::{
    apply_growth, derive_stage, growth_score, water, GrowthConfig, GrowthEngine, StageChange,
    WaterError, WaterReceipt,
};
pub use plant::{GridPosition, Plant, PlantType, Stage, GRID_SIZE};
