use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    Config, FetchFailure,
    model::{CurrentConditions, ForecastFeed},
};

pub mod openweather;

pub use openweather::OpenWeatherClient;

/// Outbound calls to the weather provider.
///
/// Every failure, including transport errors, comes back as a
/// [`FetchFailure`]; implementations never retry and never cache.
#[async_trait]
pub trait WeatherClient: Send + Sync + Debug {
    async fn fetch_current(&self, city: &str) -> Result<CurrentConditions, FetchFailure>;

    async fn fetch_forecast(&self, city: &str) -> Result<ForecastFeed, FetchFailure>;
}

/// Construct the OpenWeather client from config.
pub fn client_from_config(config: &Config) -> anyhow::Result<OpenWeatherClient> {
    let api_key = config.api_key()?;
    Ok(OpenWeatherClient::with_base_url(api_key.to_owned(), config.base_url.clone()))
}
