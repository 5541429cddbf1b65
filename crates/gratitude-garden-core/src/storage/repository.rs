//! Typed access to the garden records held in a [`KeyValueStore`].

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::KeyValueStore;
use crate::error::{Result, StorageError};
use crate::garden::Plant;
use crate::journal::Entry;
use crate::profile::Profile;
use crate::unlocks::Unlock;

/// Storage keys.
pub mod keys {
    pub const ENTRIES: &str = "gratitude_entries";
    pub const PLANTS: &str = "garden_plants";
    pub const PROFILE: &str = "user_profile";
    pub const UNLOCKS: &str = "unlocked_items";

    pub const ALL: [&str; 4] = [ENTRIES, PLANTS, PROFILE, UNLOCKS];
}

/// Snapshot of everything in the garden, for backup and restore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GardenExport {
    #[serde(default)]
    pub entries: Option<Vec<Entry>>,
    #[serde(default)]
    pub plants: Option<Vec<Plant>>,
    #[serde(default)]
    pub profile: Option<Profile>,
    #[serde(default)]
    pub unlocks: Option<Vec<Unlock>>,
    #[serde(default)]
    pub export_date: Option<DateTime<Utc>>,
}

pub struct GardenStore<S> {
    store: S,
}

impl<S: KeyValueStore> GardenStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn inner(&self) -> &S {
        &self.store
    }

    fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.store.get(key)? {
            Some(value) => {
                let parsed = serde_json::from_value(value).map_err(|e| StorageError::Malformed {
                    key: key.to_string(),
                    message: e.to_string(),
                })?;
                Ok(Some(parsed))
            }
            None => Ok(None),
        }
    }

    fn save<T: Serialize>(&mut self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_value(value)?;
        self.store.set(key, json)?;
        Ok(())
    }

    // === Entries ===

    pub fn entries(&self) -> Result<Vec<Entry>> {
        Ok(self.load(keys::ENTRIES)?.unwrap_or_default())
    }

    pub fn entry(&self, id: &str) -> Result<Option<Entry>> {
        Ok(self.entries()?.into_iter().find(|e| e.id == id))
    }

    pub fn add_entry(&mut self, entry: &Entry) -> Result<()> {
        let mut entries = self.entries()?;
        entries.push(entry.clone());
        self.save(keys::ENTRIES, &entries)?;
        debug!(entry = %entry.id, total = entries.len(), "entry saved");
        Ok(())
    }

    /// Entries recorded within `[start, end]`.
    pub fn entries_between(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<Entry>> {
        Ok(self
            .entries()?
            .into_iter()
            .filter(|e| e.created_at >= start && e.created_at <= end)
            .collect())
    }

    // === Plants ===

    pub fn plants(&self) -> Result<Vec<Plant>> {
        Ok(self.load(keys::PLANTS)?.unwrap_or_default())
    }

    pub fn plant(&self, id: &str) -> Result<Option<Plant>> {
        Ok(self.plants()?.into_iter().find(|p| p.id == id))
    }

    pub fn save_plants(&mut self, plants: &[Plant]) -> Result<()> {
        self.save(keys::PLANTS, &plants)
    }

    pub fn add_plant(&mut self, plant: &Plant) -> Result<()> {
        let mut plants = self.plants()?;
        plants.push(plant.clone());
        self.save_plants(&plants)
    }

    /// Replace the stored plant with the same id. Returns false when absent.
    pub fn update_plant(&mut self, plant: &Plant) -> Result<bool> {
        let mut plants = self.plants()?;
        match plants.iter_mut().find(|p| p.id == plant.id) {
            Some(slot) => {
                *slot = plant.clone();
                self.save_plants(&plants)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove a plant, returning it if it existed.
    pub fn delete_plant(&mut self, id: &str) -> Result<Option<Plant>> {
        let mut plants = self.plants()?;
        let Some(index) = plants.iter().position(|p| p.id == id) else {
            return Ok(None);
        };
        let removed = plants.remove(index);
        self.save_plants(&plants)?;
        Ok(Some(removed))
    }

    // === Profile ===

    /// Load the profile, creating and persisting a fresh one if none exists.
    pub fn profile(&mut self) -> Result<Profile> {
        if let Some(profile) = self.load(keys::PROFILE)? {
            return Ok(profile);
        }
        let profile = Profile::new(&mut rand::thread_rng());
        info!(friend_code = %profile.friend_code, "created new profile");
        self.save_profile(&profile)?;
        Ok(profile)
    }

    pub fn save_profile(&mut self, profile: &Profile) -> Result<()> {
        self.save(keys::PROFILE, profile)
    }

    // === Unlocks ===

    pub fn unlocks(&self) -> Result<Vec<Unlock>> {
        Ok(self.load(keys::UNLOCKS)?.unwrap_or_default())
    }

    /// Record an unlock in both the unlocks list and the profile.
    ///
    /// Returns false if it was already in the unlocks list.
    pub fn add_unlock(&mut self, unlock: Unlock) -> Result<bool> {
        let mut unlocks = self.unlocks()?;
        if unlocks.contains(&unlock) {
            return Ok(false);
        }
        unlocks.push(unlock);
        self.save(keys::UNLOCKS, &unlocks)?;

        let mut profile = self.profile()?;
        profile.unlocked_items.extend(unlocks.iter().copied());
        self.save_profile(&profile)?;
        Ok(true)
    }

    // === Bulk ===

    pub fn export(&mut self, now: DateTime<Utc>) -> Result<GardenExport> {
        Ok(GardenExport {
            entries: Some(self.entries()?),
            plants: Some(self.plants()?),
            profile: Some(self.profile()?),
            unlocks: Some(self.unlocks()?),
            export_date: Some(now),
        })
    }

    /// Overwrite the sections present in `data`; absent sections are kept.
    pub fn import(&mut self, data: &GardenExport) -> Result<()> {
        if let Some(entries) = &data.entries {
            self.save(keys::ENTRIES, entries)?;
        }
        if let Some(plants) = &data.plants {
            self.save(keys::PLANTS, plants)?;
        }
        if let Some(profile) = &data.profile {
            self.save(keys::PROFILE, profile)?;
        }
        if let Some(unlocks) = &data.unlocks {
            self.save(keys::UNLOCKS, unlocks)?;
        }
        info!("garden data imported");
        Ok(())
    }

    pub fn clear_all(&mut self) -> Result<()> {
        for key in keys::ALL {
            self.store.delete(key)?;
        }
        info!("garden data cleared");
        Ok(())
    }
}
