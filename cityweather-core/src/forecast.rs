use chrono::{NaiveDate, NaiveDateTime, Timelike};
use tracing::debug;

use crate::{
    date::format_forecast_date,
    icon::map_condition_to_icon,
    model::{ForecastEntry, RawForecastPoint},
};

/// Time of day (hour, minute, second) sampled for each forecast day.
pub const REFERENCE_TIME: (u32, u32, u32) = (12, 0, 0);

fn at_reference_time(ts: &NaiveDateTime) -> bool {
    (ts.hour(), ts.minute(), ts.second()) == REFERENCE_TIME
}

/// Keeps one point per future day: the one stamped exactly at noon.
///
/// Points dated `today` are skipped and feed order is preserved. A day with no
/// noon sample simply produces no entry.
pub fn select_daily_entries(feed: &[RawForecastPoint], today: NaiveDate) -> Vec<ForecastEntry> {
    let entries: Vec<ForecastEntry> = feed
        .iter()
        .filter(|p| at_reference_time(&p.timestamp) && p.timestamp.date() != today)
        .map(|p| ForecastEntry {
            date_label: format_forecast_date(&p.timestamp),
            condition_id: p.condition_id,
            icon: map_condition_to_icon(p.condition_id),
            temperature_c: p.temperature_c,
        })
        .collect();

    debug!(points = feed.len(), selected = entries.len(), %today, "selected daily forecast entries");
    entries
}
