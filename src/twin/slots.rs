//! Candidate meeting slots offered to the model. The mock source
//! stands in for a real calendar lookup.

use chrono::{DateTime, Days, NaiveTime, SecondsFormat, TimeZone, Utc};
use chrono_tz::Tz;

use super::models::CandidateSlot;

pub const SLOT_MINUTES: i64 = 25;

/// Anything that can propose meeting windows relative to `now`.
pub trait SlotSource: Send + Sync {
    fn candidate_slots(&self, now: DateTime<Utc>) -> Vec<CandidateSlot>;
}

/// (days from today, hour, minute) in the owner's timezone.
const MOCK_SLOT_STARTS: [(u64, u32, u32); 3] = [(1, 10, 0), (1, 14, 0), (2, 11, 30)];

/// Three fixed slots: tomorrow 10:00, tomorrow 14:00 and the day
/// after at 11:30, all in the owner's local time.
#[derive(Clone, Debug)]
pub struct MockSlotSource {
    timezone: Tz,
}

impl MockSlotSource {
    pub fn new(timezone: Tz) -> Self {
        Self { timezone }
    }

    fn local_start(&self, now: DateTime<Utc>, days: u64, hour: u32, minute: u32) -> DateTime<Tz> {
        let today = now.with_timezone(&self.timezone).date_naive();
        let date = today + Days::new(days);
        let time = NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN);
        let naive = date.and_time(time);
        // A start inside a DST gap moves forward past the gap, keeping
        // the local date
        self.timezone
            .from_local_datetime(&naive)
            .earliest()
            .or_else(|| {
                self.timezone
                    .from_local_datetime(&(naive + chrono::Duration::hours(1)))
                    .earliest()
            })
            .unwrap_or_else(|| Utc.from_utc_datetime(&naive).with_timezone(&self.timezone))
    }
}

impl SlotSource for MockSlotSource {
    fn candidate_slots(&self, now: DateTime<Utc>) -> Vec<CandidateSlot> {
        MOCK_SLOT_STARTS
            .iter()
            .map(|(days, hour, minute)| {
                let start = self.local_start(now, *days, *hour, *minute);
                let end = start + chrono::Duration::minutes(SLOT_MINUTES);
                CandidateSlot {
                    start_iso: to_iso(&start),
                    end_iso: to_iso(&end),
                }
            })
            .collect()
    }
}

fn to_iso(dt: &DateTime<Tz>) -> String {
    dt.with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Human readable form of a slot in `timezone`, e.g. "Tue, 2 Dec
/// 10:00–10:25 IST". Returns `None` if either end isn't RFC 3339.
pub fn format_slot(slot: &CandidateSlot, timezone: Tz) -> Option<String> {
    let start = DateTime::parse_from_rfc3339(&slot.start_iso)
        .ok()?
        .with_timezone(&timezone);
    let end = DateTime::parse_from_rfc3339(&slot.end_iso)
        .ok()?
        .with_timezone(&timezone);
    Some(format!(
        "{}–{} {}",
        start.format("%a, %-d %b %H:%M"),
        end.format("%H:%M"),
        start.format("%Z")
    ))
}
