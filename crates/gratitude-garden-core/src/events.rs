use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::garden::{GridPosition, PlantType, Stage};
use crate::unlocks::Unlock;
use crate::weather::Weather;

/// Every state change the service makes produces an Event.
/// The presentation layer turns them into notifications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    EntryRecorded {
        entry_id: String,
        at: DateTime<Utc>,
    },
    SeedPlanted {
        entry_id: String,
        plant_id: String,
        plant_type: PlantType,
        position: GridPosition,
        at: DateTime<Utc>,
    },
    PlantWatered {
        plant_id: String,
        water_count: u32,
        at: DateTime<Utc>,
    },
    PlantGrew {
        plant_id: String,
        from: Stage,
        to: Stage,
        at: DateTime<Utc>,
    },
    PlantRemoved {
        plant_id: String,
        position: GridPosition,
        at: DateTime<Utc>,
    },
    UnlockGranted {
        unlock: Unlock,
        message: String,
        at: DateTime<Utc>,
    },
    /// A streak that was alive at the previous refresh has lapsed.
    StreakBroken {
        previous_streak: u32,
        at: DateTime<Utc>,
    },
    WeatherChanged {
        from: Weather,
        to: Weather,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// One-line notification text.
    pub fn message(&self) -> String {
        match self {
            Event::EntryRecorded { .. } => "Gratitude entry saved! 🌱".to_string(),
            Event::SeedPlanted { position, .. } => format!("Seed planted at ({position})! 🌱"),
            Event::PlantWatered { .. } => "Plant watered! 💧".to_string(),
            Event::PlantGrew { to, .. } => format!("A plant grew into a {to}!"),
            Event::PlantRemoved { position, .. } => format!("Plant removed from ({position})"),
            Event::UnlockGranted { message, .. } => message.clone(),
            Event::StreakBroken {
                previous_streak, ..
            } => format!("Your {previous_streak}-day streak has ended. Start a new one today!"),
            Event::WeatherChanged { to, .. } => {
                format!("The weather turned {} {}", to.label().to_lowercase(), to.glyph())
            }
        }
    }
}
