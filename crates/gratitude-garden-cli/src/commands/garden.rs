use std::time::Duration;

use chrono::Utc;
use clap::Subcommand;
use gratitude_garden_core::garden::render_grid;
use gratitude_garden_core::{GardenService, GridPosition, SqliteStore};

use super::{announce, open_service, CmdResult};

#[derive(Subcommand)]
pub enum GardenAction {
    /// Draw the garden grid
    Show {
        /// Print plants as JSON instead
        #[arg(long)]
        json: bool,
    },
    /// Plant a seed on an empty cell
    Plant {
        /// Entry ID of the seed
        entry_id: String,
        /// Column, 0-9
        x: i64,
        /// Row, 0-9
        y: i64,
    },
    /// Water a plant (once every few hours)
    Water {
        /// Plant ID
        plant_id: String,
    },
    /// Dig up a plant and free its cell
    Remove {
        /// Plant ID
        plant_id: String,
    },
    /// Re-evaluate growth for every plant once
    Sweep,
    /// Keep re-evaluating growth on the configured interval until Ctrl-C
    Watch {
        /// Override the sweep interval in seconds
        #[arg(long)]
        interval: Option<u64>,
        /// Stop after this many sweeps
        #[arg(long)]
        max_sweeps: Option<u64>,
    },
}

pub fn run(action: GardenAction) -> CmdResult {
    let mut service = open_service()?;
    let now = Utc::now();

    match action {
        GardenAction::Show { json } => {
            let grown = service.growth_sweep(now)?;
            let overview = service.refresh(now)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&overview.plants)?);
                return Ok(());
            }
            announce(&grown);
            announce(&overview.events);
            println!(
                "{} {}  |  {} plant(s)  |  {} seed(s)",
                overview.weather.glyph(),
                overview.weather,
                overview.plants.len(),
                overview.seeds.len()
            );
            println!();
            print!("{}", render_grid(&overview.plants));
            if !overview.plants.is_empty() {
                println!();
                for plant in &overview.plants {
                    println!("({}) {}", plant.position, plant.id);
                    for line in plant.describe(now).lines() {
                        println!("    {line}");
                    }
                }
            }
        }
        GardenAction::Plant { entry_id, x, y } => {
            let position = GridPosition::checked(x, y)?;
            match service.plant_seed(&entry_id, position, now, &mut rand::thread_rng())? {
                Some(outcome) => {
                    announce(&outcome.events);
                    println!("Plant: {} ({})", outcome.value.id, outcome.value.plant_type.id());
                }
                None => return Err(format!("Seed not found: {entry_id}").into()),
            }
        }
        GardenAction::Water { plant_id } => match service.water_plant(&plant_id, now)? {
            Some(outcome) => announce(&outcome.events),
            None => return Err(format!("Plant not found: {plant_id}").into()),
        },
        GardenAction::Remove { plant_id } => match service.remove_plant(&plant_id, now)? {
            Some(outcome) => announce(&outcome.events),
            None => return Err(format!("Plant not found: {plant_id}").into()),
        },
        GardenAction::Sweep => {
            let events = service.growth_sweep(now)?;
            if events.is_empty() {
                println!("Nothing grew.");
            }
            announce(&events);
        }
        GardenAction::Watch {
            interval,
            max_sweeps,
        } => {
            let secs = interval.unwrap_or(service.growth_engine().config().sweep_interval_secs);
            watch(&mut service, Duration::from_secs(secs.max(1)), max_sweeps)?;
        }
    }
    Ok(())
}

/// Sweep on a fixed interval. Each sweep finishes before the next tick.
fn watch(
    service: &mut GardenService<SqliteStore>,
    period: Duration,
    max_sweeps: Option<u64>,
) -> CmdResult {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        let mut ticker = tokio::time::interval(period);
        let mut sweeps = 0u64;
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    announce(&service.growth_sweep(Utc::now())?);
                    sweeps += 1;
                    if max_sweeps.is_some_and(|max| sweeps >= max) {
                        break;
                    }
                }
                _ = tokio::signal::ctrl_c() => break,
            }
        }
        tracing::debug!(sweeps, "watch stopped");
        Ok(())
    })
}
