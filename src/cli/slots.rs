use anyhow::Result;
use chrono::Utc;
use serde_json::json;

use crate::core::AppConfig;
use crate::twin::{MockSlotSource, SlotSource, format_slot};

pub fn run(config: AppConfig) -> Result<()> {
    let timezone = config.owner.timezone;
    let slots: Vec<_> = MockSlotSource::new(timezone)
        .candidate_slots(Utc::now())
        .into_iter()
        .map(|slot| {
            json!({
                "display": format_slot(&slot, timezone),
                "start_iso": slot.start_iso,
                "end_iso": slot.end_iso,
            })
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&slots)?);
    Ok(())
}
