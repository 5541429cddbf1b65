use chrono::Utc;
use clap::Subcommand;
use gratitude_garden_core::streak_bonus;

use super::{announce, open_service, CmdResult};

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show streaks, totals and friend code
    Show {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set the display name
    Rename {
        /// New name
        name: String,
    },
}

pub fn run(action: ProfileAction) -> CmdResult {
    let mut service = open_service()?;

    match action {
        ProfileAction::Show { json } => {
            let overview = service.refresh(Utc::now())?;
            let profile = &overview.profile;
            if json {
                println!("{}", serde_json::to_string_pretty(profile)?);
                return Ok(());
            }
            announce(&overview.events);
            let name = if profile.username.is_empty() {
                "(unnamed gardener)"
            } else {
                profile.username.as_str()
            };
            println!("{name}");
            println!("Friend code:    {}", profile.friend_code);
            println!(
                "Current streak: {} day(s) (x{:.1} bonus)",
                profile.current_streak,
                streak_bonus(profile.current_streak)
            );
            println!("Longest streak: {} day(s)", profile.longest_streak);
            println!("Total entries:  {}", profile.total_entries);
            if let Some(last) = profile.last_entry_date {
                println!("Last entry:     {}", last.format("%Y-%m-%d %H:%M"));
            }
        }
        ProfileAction::Rename { name } => {
            let profile = service.rename(&name)?;
            println!("Renamed to {}", profile.username);
        }
    }
    Ok(())
}
