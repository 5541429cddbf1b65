//! Application service wiring user actions to the engines and the store.
//!
//! Every operation reads what it needs from the store, runs the pure engines,
//! writes the results back and returns the [`Event`]s the presentation layer
//! should announce. Nothing here keeps state between calls apart from the
//! store itself.

use chrono::{DateTime, Local, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{GardenError, Result, ValidationError};
use crate::events::Event;
use crate::garden::{choose_plant_type, ensure_free, GridPosition, GrowthEngine, Plant, WaterReceipt};
use crate::journal::{unplanted_seeds, Entry};
use crate::profile::Profile;
use crate::storage::{Config, GardenStore, KeyValueStore};
use crate::streak::{self, StreakBreak};
use crate::unlocks::{evaluate_unlocks, Unlock};
use crate::weather::{calculate_weather, Weather};

/// Which calendar the streak counts days in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayBoundary {
    Local,
    Utc,
}

/// A value produced by an action plus the events it raised.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome<T> {
    pub value: T,
    pub events: Vec<Event>,
}

/// Result of recording a new entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub entry: Entry,
    pub streak: u32,
    pub weather: Weather,
    pub unlocks: Vec<Unlock>,
    pub events: Vec<Event>,
}

/// Everything a garden view needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GardenOverview {
    pub profile: Profile,
    pub weather: Weather,
    pub seeds: Vec<Entry>,
    pub plants: Vec<Plant>,
    pub events: Vec<Event>,
}

pub struct GardenService<S> {
    store: GardenStore<S>,
    growth: GrowthEngine,
    day_boundary: DayBoundary,
    default_username: Option<String>,
}

impl<S: KeyValueStore> GardenService<S> {
    /// Service with default growth rules and local-time day boundaries.
    pub fn new(store: S) -> Self {
        Self {
            store: GardenStore::new(store),
            growth: GrowthEngine::new(),
            day_boundary: DayBoundary::Local,
            default_username: None,
        }
    }

    /// Service using the configured growth rules and day boundary.
    ///
    /// A non-empty `profile.username` names a profile that has no name yet.
    pub fn with_config(store: S, config: &Config) -> Self {
        let day_boundary = if config.display.use_local_time {
            DayBoundary::Local
        } else {
            DayBoundary::Utc
        };
        Self {
            store: GardenStore::new(store),
            growth: GrowthEngine::with_config(config.growth.clone()),
            day_boundary,
            default_username: Some(config.profile.username.trim().to_string())
                .filter(|name| !name.is_empty()),
        }
    }

    pub fn with_day_boundary(mut self, day_boundary: DayBoundary) -> Self {
        self.day_boundary = day_boundary;
        self
    }

    pub fn store(&self) -> &GardenStore<S> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut GardenStore<S> {
        &mut self.store
    }

    pub fn growth_engine(&self) -> &GrowthEngine {
        &self.growth
    }

    fn profile(&mut self) -> Result<Profile> {
        let mut profile = self.store.profile()?;
        if profile.username.is_empty() {
            if let Some(name) = &self.default_username {
                profile.username = name.clone();
                self.store.save_profile(&profile)?;
            }
        }
        Ok(profile)
    }

    fn calculate_streak(&self, entries: &[Entry], now: DateTime<Utc>) -> u32 {
        match self.day_boundary {
            DayBoundary::Local => streak::calculate_streak(entries, now.with_timezone(&Local)),
            DayBoundary::Utc => streak::calculate_streak(entries, now),
        }
    }

    fn apply_streak(&self, profile: &mut Profile, entries: &[Entry], now: DateTime<Utc>) -> u32 {
        match self.day_boundary {
            DayBoundary::Local => {
                streak::update_streak_state(profile, entries, now.with_timezone(&Local))
            }
            DayBoundary::Utc => streak::update_streak_state(profile, entries, now),
        }
    }

    fn streak_break(&self, profile: &Profile, entries: &[Entry], now: DateTime<Utc>) -> Option<StreakBreak> {
        match self.day_boundary {
            DayBoundary::Local => {
                streak::check_streak_break(profile, entries, now.with_timezone(&Local))
            }
            DayBoundary::Utc => streak::check_streak_break(profile, entries, now),
        }
    }

    /// Streak computed from stored entries, without touching the profile.
    pub fn current_streak(&self, now: DateTime<Utc>) -> Result<u32> {
        let entries = self.store.entries()?;
        Ok(self.calculate_streak(&entries, now))
    }

    /// Recompute and persist the profile's streak counters.
    pub fn update_streak_state(&mut self, now: DateTime<Utc>) -> Result<u32> {
        let entries = self.store.entries()?;
        let mut profile = self.profile()?;
        let current = self.apply_streak(&mut profile, &entries, now);
        self.store.save_profile(&profile)?;
        Ok(current)
    }

    /// Grant unlocks the stored profile qualifies for, keeping the unlocks
    /// list and the profile in sync.
    pub fn evaluate_unlocks(&mut self) -> Result<Vec<Unlock>> {
        let mut profile = self.profile()?;
        self.grant_unlocks(&mut profile)
    }

    /// Evaluate after merging the stored unlocks list into the profile, so
    /// an unlock held by either copy is never reported as new. Both copies
    /// end up holding the union.
    fn grant_unlocks(&mut self, profile: &mut Profile) -> Result<Vec<Unlock>> {
        let listed = self.store.unlocks()?;
        profile.unlocked_items.extend(listed.iter().copied());

        let granted = evaluate_unlocks(profile);
        self.store.save_profile(profile)?;

        let unlisted: Vec<Unlock> = profile
            .unlocked_items
            .iter()
            .copied()
            .filter(|u| !listed.contains(u) && !granted.contains(u))
            .collect();
        if !unlisted.is_empty() {
            debug!(count = unlisted.len(), "re-syncing unlocks list");
        }
        for unlock in unlisted.into_iter().chain(granted.iter().copied()) {
            self.store.add_unlock(unlock)?;
        }
        Ok(granted)
    }

    fn unlock_events(granted: &[Unlock], now: DateTime<Utc>) -> impl Iterator<Item = Event> + '_ {
        granted.iter().map(move |unlock| Event::UnlockGranted {
            unlock: *unlock,
            message: unlock.message().to_string(),
            at: now,
        })
    }

    /// Current weather from stored entries and the stored streak.
    pub fn weather(&mut self, now: DateTime<Utc>) -> Result<Weather> {
        let entries = self.store.entries()?;
        let profile = self.profile()?;
        Ok(calculate_weather(&entries, profile.current_streak, now))
    }

    /// Record a gratitude entry and update everything that depends on it.
    pub fn submit_entry(&mut self, text: &str, now: DateTime<Utc>) -> Result<Submission> {
        let entry = Entry::new(text, now)?;
        let weather_before = self.weather(now)?;

        self.store.add_entry(&entry)?;
        let entries = self.store.entries()?;

        let mut profile = self.profile()?;
        profile.last_entry_date = Some(now);
        let streak = self.apply_streak(&mut profile, &entries, now);
        let unlocks = self.grant_unlocks(&mut profile)?;
        let weather = calculate_weather(&entries, streak, now);

        let mut events = vec![Event::EntryRecorded {
            entry_id: entry.id.clone(),
            at: now,
        }];
        events.extend(Self::unlock_events(&unlocks, now));
        if weather != weather_before {
            events.push(Event::WeatherChanged {
                from: weather_before,
                to: weather,
                at: now,
            });
        }

        info!(entry = %entry.id, streak, weather = %weather, "entry recorded");
        Ok(Submission {
            entry,
            streak,
            weather,
            unlocks,
            events,
        })
    }

    /// Refresh derived profile state and collect the garden view.
    pub fn refresh(&mut self, now: DateTime<Utc>) -> Result<GardenOverview> {
        let entries = self.store.entries()?;
        let plants = self.store.plants()?;
        let mut profile = self.profile()?;

        let mut events = Vec::new();
        if let Some(lapsed) = self.streak_break(&profile, &entries, now) {
            events.push(Event::StreakBroken {
                previous_streak: lapsed.previous_streak,
                at: now,
            });
        }

        let streak = self.apply_streak(&mut profile, &entries, now);
        let unlocks = self.grant_unlocks(&mut profile)?;
        events.extend(Self::unlock_events(&unlocks, now));

        let weather = calculate_weather(&entries, streak, now);
        let seeds = unplanted_seeds(&entries, &plants).into_iter().cloned().collect();
        Ok(GardenOverview {
            profile,
            weather,
            seeds,
            plants,
            events,
        })
    }

    /// Entries not yet planted.
    pub fn seeds(&self) -> Result<Vec<Entry>> {
        let entries = self.store.entries()?;
        let plants = self.store.plants()?;
        Ok(unplanted_seeds(&entries, &plants).into_iter().cloned().collect())
    }

    /// Plant a seed on an empty cell.
    ///
    /// Returns `None` when the entry does not exist.
    pub fn plant_seed<R: Rng + ?Sized>(
        &mut self,
        entry_id: &str,
        position: GridPosition,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<Option<Outcome<Plant>>> {
        if !position.in_bounds() {
            return Err(ValidationError::OutOfBounds {
                x: i64::from(position.x),
                y: i64::from(position.y),
                size: crate::garden::GRID_SIZE,
            }
            .into());
        }
        let Some(entry) = self.store.entry(entry_id)? else {
            debug!(entry = entry_id, "seed not found");
            return Ok(None);
        };

        let plants = self.store.plants()?;
        if let Some(existing) = plants.iter().find(|p| p.entry_id == entry.id) {
            return Err(GardenError::AlreadyPlanted {
                entry_id: entry.id.clone(),
                plant_id: existing.id.clone(),
            }
            .into());
        }
        ensure_free(&plants, position)?;

        let profile = self.profile()?;
        let plant_type = choose_plant_type(&profile.unlocked_items, rng);
        let plant = Plant::new(&entry, plant_type, position, now);
        self.store.add_plant(&plant)?;

        info!(plant = %plant.id, entry = %entry.id, %position, "seed planted");
        let events = vec![Event::SeedPlanted {
            entry_id: entry.id,
            plant_id: plant.id.clone(),
            plant_type,
            position,
            at: now,
        }];
        Ok(Some(Outcome {
            value: plant,
            events,
        }))
    }

    /// Water a plant. Returns `None` when the plant does not exist.
    ///
    /// # Errors
    /// Fails with [`GardenError::Water`] while the cooldown is running; the
    /// plant is left unchanged.
    pub fn water_plant(&mut self, plant_id: &str, now: DateTime<Utc>) -> Result<Option<Outcome<WaterReceipt>>> {
        let Some(mut plant) = self.store.plant(plant_id)? else {
            return Ok(None);
        };

        let receipt = self.growth.water(&mut plant, now)?;
        self.store.update_plant(&plant)?;

        let mut events = vec![Event::PlantWatered {
            plant_id: plant.id.clone(),
            water_count: receipt.water_count,
            at: now,
        }];
        if let Some(change) = &receipt.growth {
            events.push(Event::PlantGrew {
                plant_id: change.plant_id.clone(),
                from: change.from,
                to: change.to,
                at: now,
            });
        }
        Ok(Some(Outcome {
            value: receipt,
            events,
        }))
    }

    /// Dig up a plant, freeing its cell. Returns `None` when it does not exist.
    pub fn remove_plant(&mut self, plant_id: &str, now: DateTime<Utc>) -> Result<Option<Outcome<Plant>>> {
        let Some(plant) = self.store.delete_plant(plant_id)? else {
            return Ok(None);
        };
        info!(plant = %plant.id, "plant removed");
        let events = vec![Event::PlantRemoved {
            plant_id: plant.id.clone(),
            position: plant.position,
            at: now,
        }];
        Ok(Some(Outcome {
            value: plant,
            events,
        }))
    }

    /// Advance every plant that has grown since the last sweep.
    pub fn growth_sweep(&mut self, now: DateTime<Utc>) -> Result<Vec<Event>> {
        let mut plants = self.store.plants()?;
        let changes = self.growth.sweep(&mut plants, now);
        if changes.is_empty() {
            return Ok(Vec::new());
        }
        self.store.save_plants(&plants)?;
        debug!(grown = changes.len(), "growth sweep");
        Ok(changes
            .into_iter()
            .map(|change| Event::PlantGrew {
                plant_id: change.plant_id,
                from: change.from,
                to: change.to,
                at: now,
            })
            .collect())
    }

    pub fn rename(&mut self, username: &str) -> Result<Profile> {
        let mut profile = self.profile()?;
        profile.username = username.trim().to_string();
        self.store.save_profile(&profile)?;
        Ok(profile)
    }
}
