//! Core library for the `cityweather` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeatherMap client and its error normalization
//! - Icon mapping, date labels and daily forecast selection
//! - The presenter that turns a city name into a render model for a UI
//!
//! It is used by `cityweather-cli`, but any front-end implementing
//! [`WeatherView`] can drive it.

pub mod config;
pub mod date;
pub mod display;
pub mod error;
pub mod forecast;
pub mod icon;
pub mod model;
pub mod presenter;
pub mod provider;

pub use config::Config;
pub use display::{DisplayState, ViewEvent};
pub use error::{ErrorKind, FetchFailure, classify_failure};
pub use forecast::select_daily_entries;
pub use icon::{IconId, map_condition_to_icon};
pub use model::{
    CurrentConditions, ErrorView, ForecastEntry, ForecastFeed, RawForecastPoint, RenderModel,
    WeatherQuery, WeatherResult, WeatherSummary,
};
pub use presenter::{WeatherPresenter, WeatherView};
pub use provider::{OpenWeatherClient, WeatherClient, client_from_config};
