use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::journal::Entry;

/// Width and height of the garden grid.
pub const GRID_SIZE: u8 = 10;

/// Growth stages, in the order a plant passes through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Seed,
    Sprout,
    Bud,
    Flower,
    Mature,
}

impl Stage {
    pub const ALL: [Stage; 5] = [
        Stage::Seed,
        Stage::Sprout,
        Stage::Bud,
        Stage::Flower,
        Stage::Mature,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Stage::Seed => "Seed",
            Stage::Sprout => "Sprout",
            Stage::Bud => "Bud",
            Stage::Flower => "Flower",
            Stage::Mature => "Mature",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Cosmetic plant palette. Everything but `Basic` is gated by an unlock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlantType {
    #[serde(rename = "basic")]
    Basic,
    #[serde(rename = "flower_1")]
    Flower1,
    #[serde(rename = "flower_2")]
    Flower2,
    #[serde(rename = "flower_3")]
    Flower3,
    #[serde(rename = "tree")]
    Tree,
    #[serde(rename = "fruit")]
    Fruit,
}

impl PlantType {
    pub fn id(&self) -> &'static str {
        match self {
            PlantType::Basic => "basic",
            PlantType::Flower1 => "flower_1",
            PlantType::Flower2 => "flower_2",
            PlantType::Flower3 => "flower_3",
            PlantType::Tree => "tree",
            PlantType::Fruit => "fruit",
        }
    }

    /// Glyph shown for each stage, seed first.
    pub fn stage_glyphs(&self) -> [&'static str; 5] {
        match self {
            PlantType::Basic => ["🌱", "🌿", "🍀", "🌻", "🌺"],
            PlantType::Flower1 => ["🌱", "🌿", "🌼", "🌸", "🌺"],
            PlantType::Flower2 => ["🌱", "🌿", "🌷", "🌹", "💐"],
            PlantType::Flower3 => ["🌱", "🌿", "🌻", "🌞", "☀️"],
            PlantType::Tree => ["🌱", "🌿", "🌲", "🌳", "🌴"],
            PlantType::Fruit => ["🌱", "🌿", "🌼", "🍓", "🍇"],
        }
    }

    pub fn glyph(&self, stage: Stage) -> &'static str {
        self.stage_glyphs()[stage.index()]
    }
}

/// A cell in the garden grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPosition {
    pub x: u8,
    pub y: u8,
}

impl GridPosition {
    /// Build a position without bounds checking. Use [`GridPosition::checked`]
    /// for user input.
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    pub fn checked(x: i64, y: i64) -> Result<Self, ValidationError> {
        let size = i64::from(GRID_SIZE);
        if !(0..size).contains(&x) || !(0..size).contains(&y) {
            return Err(ValidationError::OutOfBounds {
                x,
                y,
                size: GRID_SIZE,
            });
        }
        Ok(Self::new(x as u8, y as u8))
    }

    pub fn in_bounds(&self) -> bool {
        self.x < GRID_SIZE && self.y < GRID_SIZE
    }
}

impl fmt::Display for GridPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.x, self.y)
    }
}

/// A planted entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plant {
    pub id: String,
    pub entry_id: String,
    pub plant_type: PlantType,
    pub position: GridPosition,
    pub stage: Stage,
    pub planted_at: DateTime<Utc>,
    pub last_watered_at: DateTime<Utc>,
    /// Starts at 1: planting counts as the first watering.
    pub water_count: u32,
    /// Cosmetic progress bar, 0..=100.
    #[serde(default)]
    pub growth_progress: u8,
}

impl Plant {
    pub fn new(entry: &Entry, plant_type: PlantType, position: GridPosition, now: DateTime<Utc>) -> Self {
        Self {
            id: format!("plant-{}", Uuid::new_v4()),
            entry_id: entry.id.clone(),
            plant_type,
            position,
            stage: Stage::Seed,
            planted_at: now,
            last_watered_at: now,
            water_count: 1,
            growth_progress: 0,
        }
    }

    pub fn glyph(&self) -> &'static str {
        self.plant_type.glyph(self.stage)
    }

    /// Whole days since planting.
    pub fn age_days(&self, now: DateTime<Utc>) -> i64 {
        (now - self.planted_at).num_days()
    }

    /// Multi-line summary used for hover details.
    pub fn describe(&self, now: DateTime<Utc>) -> String {
        let days = self.age_days(now);
        format!(
            "{} {}\nPlanted: {} day{} ago\nWatered: {} time{}",
            self.glyph(),
            self.stage,
            days,
            if days == 1 { "" } else { "s" },
            self.water_count,
            if self.water_count == 1 { "" } else { "s" },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_are_ordered() {
        assert!(Stage::Seed < Stage::Sprout);
        assert!(Stage::Flower < Stage::Mature);
        assert_eq!(Stage::ALL.iter().max(), Some(&Stage::Mature));
    }

    #[test]
    fn checked_position_rejects_out_of_grid() {
        assert!(GridPosition::checked(9, 9).is_ok());
        assert_eq!(
            GridPosition::checked(10, 0).unwrap_err(),
            ValidationError::OutOfBounds { x: 10, y: 0, size: 10 }
        );
        assert!(GridPosition::checked(0, -1).is_err());
    }

    #[test]
    fn plant_type_serializes_with_palette_ids() {
        assert_eq!(serde_json::to_string(&PlantType::Flower2).unwrap(), "\"flower_2\"");
        let parsed: PlantType = serde_json::from_str("\"fruit\"").unwrap();
        assert_eq!(parsed, PlantType::Fruit);
    }

    #[test]
    fn glyph_follows_stage() {
        assert_eq!(PlantType::Tree.glyph(Stage::Seed), "🌱");
        assert_eq!(PlantType::Tree.glyph(Stage::Flower), "🌳");
    }

    #[test]
    fn describe_pluralises() {
        let now = Utc::now();
        let entry = Entry::new("rain", now).unwrap();
        let plant = Plant::new(&entry, PlantType::Basic, GridPosition::new(1, 1), now);
        let text = plant.describe(now);
        assert!(text.contains("0 days ago"));
        assert!(text.ends_with("Watered: 1 time"));
    }
}
