pub mod config;
pub mod data;
pub mod entry;
pub mod garden;
pub mod profile;
pub mod seed;
pub mod unlocks;
pub mod weather;

use gratitude_garden_core::{Config, Event, GardenService, SqliteStore};

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Open the garden in the data directory with the user's configuration.
pub fn open_service() -> Result<GardenService<SqliteStore>, Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let store = SqliteStore::open()?;
    Ok(GardenService::with_config(store, &config))
}

/// Print event notifications, one per line.
pub fn announce(events: &[Event]) {
    for event in events {
        println!("{}", event.message());
    }
}
