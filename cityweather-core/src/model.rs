use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{error::ErrorKind, FetchFailure, IconId};

/// A city name typed by the user, trimmed and known to be non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherQuery(String);

impl WeatherQuery {
    /// Returns `None` for blank input, which the search box ignores.
    pub fn parse(input: &str) -> Option<Self> {
        let city = input.trim();
        if city.is_empty() { None } else { Some(Self(city.to_string())) }
    }

    pub fn city(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for WeatherQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Current conditions for a city, metric units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub city_name: String,
    pub country_code: String,
    pub temperature_c: f64,
    pub condition_id: u16,
    pub condition_description: String,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
}

pub type WeatherResult = Result<CurrentConditions, FetchFailure>;

/// One timestamped point of the provider's forecast feed.
#[derive(Debug, Clone, PartialEq)]
pub struct RawForecastPoint {
    pub timestamp: NaiveDateTime,
    pub condition_id: u16,
    pub temperature_c: f64,
}

/// Forecast points in the provider's chronological order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForecastFeed {
    pub points: Vec<RawForecastPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub date_label: String,
    pub condition_id: u16,
    pub icon: IconId,
    pub temperature_c: f64,
}

impl ForecastEntry {
    pub fn temperature_label(&self) -> String {
        format_temperature(self.temperature_c)
    }
}

/// Display-ready projection of a successful lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSummary {
    pub location: String,
    pub temperature: String,
    pub condition: String,
    pub humidity: String,
    pub wind: String,
    pub icon: IconId,
    pub date_label: String,
    pub forecast: Vec<ForecastEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorView {
    pub kind: ErrorKind,
    pub message: String,
}

/// What the UI draws for one query: a full result or an error, never both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RenderModel {
    Weather(WeatherSummary),
    Error(ErrorView),
}

impl RenderModel {
    pub fn is_error(&self) -> bool {
        matches!(self, RenderModel::Error(_))
    }
}

/// Whole degrees Celsius, e.g. `18°C` for 18.4. Halves round up, so -2.5
/// shows as `-2°C`.
pub fn format_temperature(celsius: f64) -> String {
    format!("{}°C", (celsius + 0.5).floor() as i64)
}
