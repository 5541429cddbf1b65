//! Plant growth model.
//!
//! A plant's stage follows from a growth score: fractional days since
//! planting plus one point for every two waterings. Stages only move forward;
//! a stored stage is never lowered even if the derived one would be.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::plant::{Plant, Stage};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Score thresholds, highest first.
const STAGE_THRESHOLDS: [(f64, Stage); 4] = [
    (5.0, Stage::Mature),
    (3.0, Stage::Flower),
    (2.0, Stage::Bud),
    (1.0, Stage::Sprout),
];

/// Growth timing configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthConfig {
    /// Minimum hours between two waterings of the same plant
    #[serde(default = "default_water_cooldown_hours")]
    pub water_cooldown_hours: u32,
    /// Seconds between periodic growth sweeps
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

fn default_water_cooldown_hours() -> u32 {
    6
}
fn default_sweep_interval_secs() -> u64 {
    60
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self {
            water_cooldown_hours: default_water_cooldown_hours(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

impl GrowthConfig {
    pub fn water_cooldown(&self) -> Duration {
        Duration::hours(i64::from(self.water_cooldown_hours))
    }
}

/// Watering refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WaterError {
    #[error("Plant needs time before watering again! ({} left)", format_remaining(.remaining))]
    TooSoon { remaining: Duration },
}

fn format_remaining(remaining: &Duration) -> String {
    let minutes = remaining.num_minutes().max(1);
    if minutes >= 60 {
        format!("{}h {}m", minutes / 60, minutes % 60)
    } else {
        format!("{minutes}m")
    }
}

/// A forward stage transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageChange {
    pub plant_id: String,
    pub from: Stage,
    pub to: Stage,
}

/// Result of a successful watering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaterReceipt {
    pub plant_id: String,
    pub water_count: u32,
    pub growth: Option<StageChange>,
}

/// Growth score for a plant at `now`.
pub fn growth_score(plant: &Plant, now: DateTime<Utc>) -> f64 {
    let days_old = (now - plant.planted_at).num_milliseconds() as f64 / MILLIS_PER_DAY;
    let water_bonus = f64::from(plant.water_count / 2);
    days_old + water_bonus
}

/// Stage the plant has earned at `now`, regardless of its stored stage.
pub fn derive_stage(plant: &Plant, now: DateTime<Utc>) -> Stage {
    let score = growth_score(plant, now);
    STAGE_THRESHOLDS
        .iter()
        .find(|(threshold, _)| score >= *threshold)
        .map(|(_, stage)| *stage)
        .unwrap_or(Stage::Seed)
}

/// Advance the stored stage if the plant has earned a later one.
pub fn apply_growth(plant: &mut Plant, now: DateTime<Utc>) -> Option<StageChange> {
    let target = derive_stage(plant, now);
    if target <= plant.stage {
        return None;
    }
    let change = StageChange {
        plant_id: plant.id.clone(),
        from: plant.stage,
        to: target,
    };
    debug!(plant = %plant.id, from = %change.from, to = %change.to, "plant grew");
    plant.stage = target;
    Some(change)
}

/// Water with the default cooldown.
pub fn water(plant: &mut Plant, now: DateTime<Utc>) -> Result<WaterReceipt, WaterError> {
    GrowthEngine::new().water(plant, now)
}

/// Applies growth rules with a configurable watering cooldown.
#[derive(Debug, Clone, Default)]
pub struct GrowthEngine {
    config: GrowthConfig,
}

impl GrowthEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: GrowthConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GrowthConfig {
        &self.config
    }

    /// Water a plant.
    ///
    /// Fails without touching the plant when the cooldown since the last
    /// watering has not elapsed.
    pub fn water(&self, plant: &mut Plant, now: DateTime<Utc>) -> Result<WaterReceipt, WaterError> {
        let since = now - plant.last_watered_at;
        let cooldown = self.config.water_cooldown();
        if since < cooldown {
            return Err(WaterError::TooSoon {
                remaining: cooldown - since,
            });
        }

        plant.last_watered_at = now;
        plant.water_count += 1;
        plant.growth_progress = plant.growth_progress.saturating_add(10).min(100);

        let growth = apply_growth(plant, now);
        Ok(WaterReceipt {
            plant_id: plant.id.clone(),
            water_count: plant.water_count,
            growth,
        })
    }

    /// Re-evaluate every plant; returns the transitions that happened.
    pub fn sweep(&self, plants: &mut [Plant], now: DateTime<Utc>) -> Vec<StageChange> {
        plants
            .iter_mut()
            .filter_map(|plant| apply_growth(plant, now))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::garden::{GridPosition, PlantType};
    use crate::journal::Entry;
    use proptest::prelude::*;

    fn plant_at(now: DateTime<Utc>) -> Plant {
        let entry = Entry::new("friends", now).unwrap();
        Plant::new(&entry, PlantType::Basic, GridPosition::new(2, 3), now)
    }

    #[test]
    fn fresh_plant_is_a_seed() {
        let now = Utc::now();
        let plant = plant_at(now);
        assert_eq!(derive_stage(&plant, now), Stage::Seed);
    }

    #[test]
    fn water_bonus_sprouts_same_day() {
        let now = Utc::now();
        let mut plant = plant_at(now);
        plant.water_count = 3;
        assert_eq!(derive_stage(&plant, now), Stage::Sprout);
    }

    #[test]
    fn age_thresholds() {
        let planted = Utc::now();
        let plant = plant_at(planted);
        // water_count 1 gives no bonus
        assert_eq!(derive_stage(&plant, planted + Duration::hours(23)), Stage::Seed);
        assert_eq!(derive_stage(&plant, planted + Duration::days(1)), Stage::Sprout);
        assert_eq!(derive_stage(&plant, planted + Duration::days(2)), Stage::Bud);
        assert_eq!(derive_stage(&plant, planted + Duration::days(3)), Stage::Flower);
        assert_eq!(derive_stage(&plant, planted + Duration::days(5)), Stage::Mature);
    }

    #[test]
    fn fractional_days_count() {
        let planted = Utc::now();
        let mut plant = plant_at(planted);
        plant.water_count = 2;
        // 0.5 days + bonus 1 -> sprout; 1.5 days + 1 -> bud
        assert_eq!(derive_stage(&plant, planted + Duration::hours(12)), Stage::Sprout);
        assert_eq!(derive_stage(&plant, planted + Duration::hours(36)), Stage::Bud);
    }

    #[test]
    fn apply_growth_never_downgrades() {
        let now = Utc::now();
        let mut plant = plant_at(now);
        plant.stage = Stage::Flower;
        assert_eq!(apply_growth(&mut plant, now), None);
        assert_eq!(plant.stage, Stage::Flower);
    }

    #[test]
    fn apply_growth_reports_transition() {
        let planted = Utc::now();
        let mut plant = plant_at(planted);
        let change = apply_growth(&mut plant, planted + Duration::days(2)).unwrap();
        assert_eq!(change.from, Stage::Seed);
        assert_eq!(change.to, Stage::Bud);
        assert_eq!(plant.stage, Stage::Bud);
    }

    #[test]
    fn watering_too_soon_leaves_plant_untouched() {
        let planted = Utc::now();
        let mut plant = plant_at(planted);
        let before = plant.clone();

        let err = water(&mut plant, planted + Duration::hours(5)).unwrap_err();
        assert_eq!(
            err,
            WaterError::TooSoon {
                remaining: Duration::hours(1)
            }
        );
        assert_eq!(plant, before);
        assert!(err.to_string().contains("1h 0m left"));
    }

    #[test]
    fn watering_after_cooldown_increments_once() {
        let planted = Utc::now();
        let mut plant = plant_at(planted);
        let now = planted + Duration::hours(6);

        let receipt = water(&mut plant, now).unwrap();
        assert_eq!(receipt.water_count, 2);
        assert_eq!(plant.water_count, 2);
        assert_eq!(plant.last_watered_at, now);
        assert_eq!(plant.growth_progress, 10);
        // 0.25 days + bonus 1
        assert_eq!(receipt.growth.map(|g| g.to), Some(Stage::Sprout));
    }

    #[test]
    fn custom_cooldown_is_respected() {
        let engine = GrowthEngine::with_config(GrowthConfig {
            water_cooldown_hours: 1,
            ..Default::default()
        });
        let planted = Utc::now();
        let mut plant = plant_at(planted);
        assert!(engine.water(&mut plant, planted + Duration::minutes(59)).is_err());
        assert!(engine.water(&mut plant, planted + Duration::minutes(60)).is_ok());
    }

    #[test]
    fn growth_progress_caps_at_100() {
        let planted = Utc::now();
        let mut plant = plant_at(planted);
        plant.growth_progress = 95;
        water(&mut plant, planted + Duration::hours(7)).unwrap();
        assert_eq!(plant.growth_progress, 100);
    }

    #[test]
    fn sweep_collects_only_changes() {
        let planted = Utc::now();
        let mut plants = vec![plant_at(planted), plant_at(planted)];
        plants[1].stage = Stage::Mature;

        let changes = GrowthEngine::new().sweep(&mut plants, planted + Duration::days(1));
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].plant_id, plants[0].id);
        assert_eq!(plants[0].stage, Stage::Sprout);
    }

    proptest! {
        #[test]
        fn stage_is_monotonic(
            water_count in 1u32..20,
            offsets in proptest::collection::vec(-48i64..24 * 14, 1..12),
        ) {
            let mut offsets = offsets;
            offsets.sort_unstable();
            let planted = Utc::now();
            let mut plant = plant_at(planted);
            plant.water_count = water_count;

            let mut previous = plant.stage;
            for hours in offsets {
                apply_growth(&mut plant, planted + Duration::hours(hours));
                prop_assert!(plant.stage >= previous);
                previous = plant.stage;
            }
        }
    }
}
