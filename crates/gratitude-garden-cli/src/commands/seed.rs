use clap::Subcommand;

use super::{open_service, CmdResult};

#[derive(Subcommand)]
pub enum SeedAction {
    /// List seeds ready for planting
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: SeedAction) -> CmdResult {
    let service = open_service()?;

    match action {
        SeedAction::List { json } => {
            let seeds = service.seeds()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&seeds)?);
            } else if seeds.is_empty() {
                println!("No seeds. Write an entry to get one!");
            } else {
                for seed in seeds {
                    println!(
                        "🌱 {}  \"{}\"  {}",
                        seed.id,
                        seed.preview(),
                        seed.created_at.format("%Y-%m-%d")
                    );
                }
            }
        }
    }
    Ok(())
}
