use chrono::Utc;

use super::{open_service, CmdResult};

pub fn run(json: bool) -> CmdResult {
    let mut service = open_service()?;
    let weather = service.refresh(Utc::now())?.weather;

    if json {
        println!(
            "{}",
            serde_json::json!({ "weather": weather, "bonus": weather.bonus() })
        );
    } else {
        println!("{} {} (x{:.1})", weather.glyph(), weather, weather.bonus());
    }
    Ok(())
}
