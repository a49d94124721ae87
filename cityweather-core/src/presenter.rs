use chrono::{DateTime, FixedOffset, Local};
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};
use tracing::{debug, info, instrument, warn};

use crate::{
    ErrorKind, FetchFailure, WeatherClient,
    date::format_today_at,
    forecast::select_daily_entries,
    icon::map_condition_to_icon,
    model::{CurrentConditions, ErrorView, ForecastFeed, RenderModel, WeatherSummary, format_temperature},
};

pub const PROVIDER_ERROR_FALLBACK: &str = "Failed to fetch weather data. Please try again later.";
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check your connection and try again.";

/// The UI side of the pipeline: draws render models and the busy indicator.
pub trait WeatherView: Send + Sync {
    fn show_busy(&self);
    fn clear_busy(&self);
    fn render(&self, model: &RenderModel);
}

/// Shows the busy indicator for as long as it lives.
struct BusyGuard<'a> {
    view: &'a dyn WeatherView,
}

impl<'a> BusyGuard<'a> {
    fn acquire(view: &'a dyn WeatherView) -> Self {
        view.show_busy();
        Self { view }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.view.clear_busy();
    }
}

/// Drives one lookup from city name to render model.
pub struct WeatherPresenter {
    client: Arc<dyn WeatherClient>,
    view: Arc<dyn WeatherView>,
    clock: fn() -> DateTime<FixedOffset>,
    latest_request: AtomicU64,
}

impl std::fmt::Debug for WeatherPresenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherPresenter")
            .field("client", &self.client)
            .field("latest_request", &self.latest_request.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

impl WeatherPresenter {
    pub fn new(client: Arc<dyn WeatherClient>, view: Arc<dyn WeatherView>) -> Self {
        Self { client, view, clock: local_now, latest_request: AtomicU64::new(0) }
    }

    /// Replaces the clock used for the "today" label and forecast day cut-off.
    ///
    /// The label follows the clock's offset; the cut-off uses its UTC date,
    /// matching the provider's UTC forecast timestamps.
    pub fn with_clock(mut self, clock: fn() -> DateTime<FixedOffset>) -> Self {
        self.clock = clock;
        self
    }

    /// Looks up `city` and hands the resulting model to the view.
    ///
    /// `city` is expected to be trimmed and non-empty. The busy indicator is
    /// shown once and cleared once whatever happens. If another call started
    /// after this one, the model is returned but not rendered.
    #[instrument(skip(self))]
    pub async fn present_weather(&self, city: &str) -> RenderModel {
        let token = self.latest_request.fetch_add(1, Ordering::SeqCst) + 1;
        let _busy = BusyGuard::acquire(self.view.as_ref());

        let model = match self.run_pipeline(city).await {
            Ok(summary) => RenderModel::Weather(summary),
            Err(failure) => {
                warn!(kind = %failure.kind, message = ?failure.message, "weather lookup failed");
                RenderModel::Error(error_view(city, &failure))
            }
        };

        if self.latest_request.load(Ordering::SeqCst) == token {
            self.view.render(&model);
        } else {
            debug!(token, "newer lookup in flight, not rendering");
        }

        model
    }

    async fn run_pipeline(&self, city: &str) -> Result<WeatherSummary, FetchFailure> {
        let current = self.client.fetch_current(city).await?;
        let feed = self.client.fetch_forecast(city).await?;

        let summary = build_summary(&current, &feed, (self.clock)());
        info!(location = %summary.location, days = summary.forecast.len(), "weather lookup succeeded");
        Ok(summary)
    }
}

fn local_now() -> DateTime<FixedOffset> {
    Local::now().into()
}

fn build_summary(
    current: &CurrentConditions,
    feed: &ForecastFeed,
    now: DateTime<FixedOffset>,
) -> WeatherSummary {
    WeatherSummary {
        location: format!("{}, {}", current.city_name, current.country_code),
        temperature: format_temperature(current.temperature_c),
        condition: current.condition_description.clone(),
        humidity: format!("{}%", current.humidity_pct),
        wind: format!("{} m/s", current.wind_speed_mps),
        icon: map_condition_to_icon(current.condition_id),
        date_label: format_today_at(now),
        forecast: select_daily_entries(&feed.points, now.naive_utc().date()),
    }
}

/// Picks the user-facing message for a failed lookup.
pub fn error_view(city: &str, failure: &FetchFailure) -> ErrorView {
    let message = match failure.kind {
        ErrorKind::NotFound => {
            format!("\"{city}\" not found. Check spelling or try a nearby city.")
        }
        ErrorKind::ProviderError => failure
            .message
            .clone()
            .unwrap_or_else(|| PROVIDER_ERROR_FALLBACK.to_string()),
        ErrorKind::NetworkError => NETWORK_ERROR_MESSAGE.to_string(),
    };

    ErrorView { kind: failure.kind, message }
}
