use std::{
    io::{self, Stderr, Stdout, Write},
    sync::{Mutex, PoisonError},
};

use cityweather_core::{DisplayState, RenderModel, ViewEvent, WeatherSummary, WeatherView};

use crate::cli::OutputFormat;

const BUSY_TEXT: &str = "Searching...";
const ERASE_LINE: &str = "\r\x1b[2K";

/// Terminal rendering of the lookup results.
///
/// Results go to `out`, the busy indicator to `err`. The busy line is erased
/// as soon as the view leaves [`DisplayState::Busy`], so it never stays above
/// a rendered result.
#[derive(Debug)]
pub struct TerminalView<O = Stdout, E = Stderr> {
    format: OutputFormat,
    state: Mutex<DisplayState>,
    out: Mutex<O>,
    err: Mutex<E>,
}

impl TerminalView {
    pub fn new(format: OutputFormat) -> Self {
        Self::with_writers(format, io::stdout(), io::stderr())
    }
}

impl<O: Write, E: Write> TerminalView<O, E> {
    pub fn with_writers(format: OutputFormat, out: O, err: E) -> Self {
        Self {
            format,
            state: Mutex::new(DisplayState::default()),
            out: Mutex::new(out),
            err: Mutex::new(err),
        }
    }

    /// Applies `event` and reports whether the busy line was showing before.
    fn transition(&self, event: ViewEvent) -> bool {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let was_busy = state.is_busy();
        *state = std::mem::take(&mut *state).apply(event);
        was_busy
    }

    fn busy_line_shown(&self) -> bool {
        self.format == OutputFormat::Text
    }

    fn write_err(&self, text: &str) {
        let mut err = self.err.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = err.write_all(text.as_bytes()).and_then(|()| err.flush()) {
            tracing::debug!(error = %e, "failed to update busy indicator");
        }
    }

    fn write_out(&self, text: &str) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = out.write_all(text.as_bytes()).and_then(|()| out.flush()) {
            tracing::error!(error = %e, "failed to write weather output");
        }
    }
}

impl<O: Write + Send, E: Write + Send> WeatherView for TerminalView<O, E> {
    fn show_busy(&self) {
        let was_busy = self.transition(ViewEvent::BusyRequested);
        if self.busy_line_shown() && !was_busy {
            self.write_err(BUSY_TEXT);
        }
    }

    fn clear_busy(&self) {
        let was_busy = self.transition(ViewEvent::BusyCleared);
        if self.busy_line_shown() && was_busy {
            self.write_err(ERASE_LINE);
        }
    }

    fn render(&self, model: &RenderModel) {
        let was_busy = self.transition(ViewEvent::Rendered(model.clone()));
        if self.busy_line_shown() && was_busy {
            self.write_err(ERASE_LINE);
        }

        match self.format {
            OutputFormat::Text => self.write_out(&render_text(model)),
            OutputFormat::Json => match serde_json::to_string_pretty(model) {
                Ok(json) => self.write_out(&format!("{json}\n")),
                Err(e) => tracing::error!(error = %e, "failed to serialize render model"),
            },
        }
    }
}

pub fn render_text(model: &RenderModel) -> String {
    match model {
        RenderModel::Weather(summary) => render_summary(summary),
        RenderModel::Error(error) => format!("\n  {}\n\n", error.message),
    }
}

fn render_summary(summary: &WeatherSummary) -> String {
    let header = format!(
        "\n  {}  ·  {}\n  [{}] {}  {}\n  Humidity {}   Wind {}\n",
        summary.location,
        summary.date_label,
        summary.icon,
        summary.temperature,
        summary.condition,
        summary.humidity,
        summary.wind,
    );

    let forecast: String = summary
        .forecast
        .iter()
        .map(|entry| {
            format!(
                "  {:<8}{:<14}{:>6}\n",
                entry.date_label,
                format!("[{}]", entry.icon),
                entry.temperature_label()
            )
        })
        .collect();

    if forecast.is_empty() { format!("{header}\n") } else { format!("{header}\n{forecast}\n") }
}
