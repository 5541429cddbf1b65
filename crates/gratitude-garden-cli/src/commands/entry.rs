use chrono::Utc;
use clap::Subcommand;

use super::{announce, open_service, CmdResult};

#[derive(Subcommand)]
pub enum EntryAction {
    /// Record something you're grateful for
    Add {
        /// Entry text
        text: Vec<String>,
        /// Print the submission as JSON
        #[arg(long)]
        json: bool,
    },
    /// List all entries, oldest first
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: EntryAction) -> CmdResult {
    let mut service = open_service()?;

    match action {
        EntryAction::Add { text, json } => {
            let submission = service.submit_entry(&text.join(" "), Utc::now())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&submission)?);
            } else {
                announce(&submission.events);
                println!("Entry: {}", submission.entry.id);
                println!("Streak: {} day(s)", submission.streak);
            }
        }
        EntryAction::List { json } => {
            let entries = service.store().entries()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else if entries.is_empty() {
                println!("No entries yet.");
            } else {
                for entry in entries {
                    println!(
                        "{}  {}  {}",
                        entry.created_at.format("%Y-%m-%d %H:%M"),
                        entry.id,
                        entry.preview()
                    );
                }
            }
        }
    }
    Ok(())
}
