//! Fixed en-US date labels, independent of the runtime locale.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use std::fmt::Display;

const TODAY_FORMAT: &str = "%a, %b %d";
const FORECAST_FORMAT: &str = "%b %d";

/// Label for the current local day, e.g. `"Fri, Oct 16"`.
pub fn format_today() -> String {
    format_today_at(Local::now())
}

/// Label for the calendar day of `now` in its own time zone.
pub fn format_today_at<Tz: TimeZone>(now: DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    now.format(TODAY_FORMAT).to_string()
}

/// Label for a forecast point, day and month only, e.g. `"Oct 17"`.
pub fn format_forecast_date(timestamp: &NaiveDateTime) -> String {
    timestamp.format(FORECAST_FORMAT).to_string()
}

/// Parses a forecast timestamp as sent in `dt_txt` (`2024-01-15 12:00:00`),
/// also accepting the ISO `T` separator.
pub fn parse_forecast_timestamp(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
        .ok()
}
