use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "garden", version, about = "Gratitude Garden CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Gratitude entries
    Entry {
        #[command(subcommand)]
        action: commands::entry::EntryAction,
    },
    /// Seed inventory (entries not yet planted)
    Seed {
        #[command(subcommand)]
        action: commands::seed::SeedAction,
    },
    /// Planting, watering and growing
    Garden {
        #[command(subcommand)]
        action: commands::garden::GardenAction,
    },
    /// Profile, streaks and friend code
    Profile {
        #[command(subcommand)]
        action: commands::profile::ProfileAction,
    },
    /// Show the current garden weather
    Weather {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show unlock progress
    Unlocks {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Export, import or clear garden data
    Data {
        #[command(subcommand)]
        action: commands::data::DataAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Entry { action } => commands::entry::run(action),
        Commands::Seed { action } => commands::seed::run(action),
        Commands::Garden { action } => commands::garden::run(action),
        Commands::Profile { action } => commands::profile::run(action),
        Commands::Weather { json } => commands::weather::run(json),
        Commands::Unlocks { json } => commands::unlocks::run(json),
        Commands::Config { action } => commands::config::run(action),
        Commands::Data { action } => commands::data::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
