use std::path::PathBuf;

use chrono::Utc;
use clap::Subcommand;
use gratitude_garden_core::GardenExport;

use super::{open_service, CmdResult};

#[derive(Subcommand)]
pub enum DataAction {
    /// Write all garden data as JSON
    Export {
        /// Output file (stdout if omitted)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Restore garden data from an export file
    Import {
        /// Export file
        file: PathBuf,
    },
    /// Delete all garden data
    Clear {
        /// Required confirmation
        #[arg(long)]
        yes: bool,
    },
}

pub fn run(action: DataAction) -> CmdResult {
    let mut service = open_service()?;

    match action {
        DataAction::Export { output } => {
            let export = service.store_mut().export(Utc::now())?;
            let json = serde_json::to_string_pretty(&export)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    println!("exported to {}", path.display());
                }
                None => println!("{json}"),
            }
        }
        DataAction::Import { file } => {
            let content = std::fs::read_to_string(&file)?;
            let data: GardenExport = serde_json::from_str(&content)?;
            service.store_mut().import(&data)?;
            println!("imported {}", file.display());
        }
        DataAction::Clear { yes } => {
            if !yes {
                return Err("refusing to clear without --yes".into());
            }
            service.store_mut().clear_all()?;
            println!("garden data cleared");
        }
    }
    Ok(())
}
