use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};
use tracing::{debug, instrument, warn};

use crate::{
    FetchFailure,
    config::DEFAULT_BASE_URL,
    date::parse_forecast_timestamp,
    model::{CurrentConditions, ForecastFeed, RawForecastPoint},
};

use super::WeatherClient;

const FALLBACK_ERROR_MESSAGE: &str = "Failed to fetch data";

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Issues one GET to `endpoint` and decodes the body as `T`.
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        city: &str,
    ) -> Result<T, FetchFailure> {
        let url = format!("{}/{endpoint}", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(|e| {
                warn!(endpoint, error = %e, "request to OpenWeather failed");
                FetchFailure::network(e.to_string())
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            warn!(endpoint, error = %e, "failed to read OpenWeather response body");
            FetchFailure::network(e.to_string())
        })?;
        debug!(endpoint, %status, bytes = body.len(), "OpenWeather responded");

        if !status.is_success() {
            let failure = error_from_body(status, &body);
            warn!(endpoint, %status, body = %truncate_body(&body), kind = %failure.kind, "OpenWeather returned an error");
            return Err(failure);
        }

        serde_json::from_str(&body).map_err(|e| {
            warn!(endpoint, error = %e, body = %truncate_body(&body), "failed to parse OpenWeather JSON");
            FetchFailure::unreadable()
        })
    }
}

#[async_trait]
impl WeatherClient for OpenWeatherClient {
    #[instrument(skip(self))]
    async fn fetch_current(&self, city: &str) -> Result<CurrentConditions, FetchFailure> {
        let parsed: OwCurrentResponse = self.get_json("weather", city).await?;
        parsed.try_into()
    }

    #[instrument(skip(self))]
    async fn fetch_forecast(&self, city: &str) -> Result<ForecastFeed, FetchFailure> {
        let parsed: OwForecastResponse = self.get_json("forecast", city).await?;
        parsed.try_into()
    }
}

/// Recovers the provider's message from an error body such as
/// `{"cod":"404","message":"city not found"}`.
fn error_from_body(status: StatusCode, body: &str) -> FetchFailure {
    match serde_json::from_str::<OwErrorBody>(body) {
        Ok(err) => {
            let message = err
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string());
            FetchFailure::from_response(status, message)
        }
        Err(_) => FetchFailure::unreadable(),
    }
}

#[derive(Debug, Deserialize)]
struct OwErrorBody {
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwForecastMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    id: u16,
    // Only used as a caption; the condition id drives everything else.
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    sys: OwSys,
    main: OwCurrentMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt_txt: String,
    main: OwForecastMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

impl TryFrom<OwCurrentResponse> for CurrentConditions {
    type Error = FetchFailure;

    fn try_from(parsed: OwCurrentResponse) -> Result<Self, Self::Error> {
        let weather = parsed.weather.into_iter().next().ok_or_else(|| {
            warn!("OpenWeather current response has no weather entry");
            FetchFailure::unreadable()
        })?;

        Ok(CurrentConditions {
            city_name: parsed.name,
            country_code: parsed.sys.country,
            temperature_c: parsed.main.temp,
            condition_id: weather.id,
            condition_description: weather.description,
            humidity_pct: parsed.main.humidity,
            wind_speed_mps: parsed.wind.speed,
        })
    }
}

impl TryFrom<OwForecastResponse> for ForecastFeed {
    type Error = FetchFailure;

    fn try_from(parsed: OwForecastResponse) -> Result<Self, Self::Error> {
        let points = parsed
            .list
            .into_iter()
            .map(|entry| {
                let timestamp = parse_forecast_timestamp(&entry.dt_txt).ok_or_else(|| {
                    warn!(dt_txt = %entry.dt_txt, "unparseable forecast timestamp");
                    FetchFailure::unreadable()
                })?;
                let condition_id = entry.weather.first().map(|w| w.id).ok_or_else(|| {
                    warn!(dt_txt = %entry.dt_txt, "forecast point has no weather entry");
                    FetchFailure::unreadable()
                })?;

                Ok(RawForecastPoint { timestamp, condition_id, temperature_c: entry.main.temp })
            })
            .collect::<Result<Vec<_>, FetchFailure>>()?;

        Ok(ForecastFeed { points })
    }
}

fn truncate_body(body: &str) -> &str {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
