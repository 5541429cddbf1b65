use chrono::Utc;
use gratitude_garden_core::unlocks::Requirement;
use gratitude_garden_core::Unlock;

use super::{announce, open_service, CmdResult};

pub fn run(json: bool) -> CmdResult {
    let mut service = open_service()?;
    let overview = service.refresh(Utc::now())?;
    let profile = &overview.profile;

    if json {
        let items: Vec<_> = Unlock::ALL
            .iter()
            .map(|u| serde_json::json!({ "id": u, "unlocked": profile.has_unlock(*u) }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    announce(&overview.events);
    for unlock in Unlock::ALL {
        let requirement = match unlock.requirement() {
            Requirement::TotalEntries(n) => format!("{n} entries"),
            Requirement::CurrentStreak(n) => format!("{n}-day streak"),
        };
        if profile.has_unlock(unlock) {
            println!("{} {:<16} unlocked", unlock.glyph(), unlock.name());
        } else {
            println!("🔒 {:<16} locked ({requirement})", unlock.name());
        }
    }
    Ok(())
}
