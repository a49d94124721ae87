use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use inquire::{InquireError, Password, PasswordDisplayMode, Text, validator::Validation};
use std::{process::ExitCode, sync::Arc};
use tracing::debug;

use cityweather_core::{Config, WeatherPresenter, WeatherQuery, client_from_config};

use crate::terminal::TerminalView;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "cityweather", version, about = "Current weather and a 5-day forecast for a city")]
pub struct Cli {
    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key.
    Configure,

    /// Show weather for a single city.
    Show {
        /// City name, e.g. "Paris" or "New York".
        city: String,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Prompt for cities until cancelled (the default).
    Search,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        match self.command.unwrap_or(Command::Search) {
            Command::Configure => configure(),
            Command::Show { city, format } => show(&city, format).await,
            Command::Search => search().await,
        }
    }
}

fn configure() -> anyhow::Result<ExitCode> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_validator(|key: &str| {
            Ok(if key.trim().is_empty() {
                Validation::Invalid("API key must not be empty".into())
            } else {
                Validation::Valid
            })
        })
        .prompt()
        .context("Failed to read API key")?;

    config.set_api_key(api_key.trim().to_string());
    config.save()?;

    println!("Saved API key to {}", Config::config_file_path()?.display());
    Ok(ExitCode::SUCCESS)
}

fn build_presenter(format: OutputFormat) -> anyhow::Result<WeatherPresenter> {
    let config = Config::load()?;
    let client = client_from_config(&config)?;
    debug!(base_url = %config.base_url, "using OpenWeather client");

    Ok(WeatherPresenter::new(Arc::new(client), Arc::new(TerminalView::new(format))))
}

async fn show(city: &str, format: OutputFormat) -> anyhow::Result<ExitCode> {
    let Some(query) = WeatherQuery::parse(city) else {
        bail!("City name must not be empty");
    };

    let presenter = build_presenter(format)?;
    let model = presenter.present_weather(query.city()).await;

    Ok(if model.is_error() { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}

async fn search() -> anyhow::Result<ExitCode> {
    let presenter = build_presenter(OutputFormat::Text)?;

    loop {
        let input = Text::new("City:")
            .with_help_message("Esc or Ctrl-C to quit")
            .with_validator(|input: &str| {
                Ok(match WeatherQuery::parse(input) {
                    Some(_) => Validation::Valid,
                    None => Validation::Invalid("Enter a city name".into()),
                })
            })
            .prompt();

        let input = match input {
            Ok(input) => input,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e).context("Failed to read city name"),
        };

        if let Some(query) = WeatherQuery::parse(&input) {
            presenter.present_weather(query.city()).await;
        }
    }

    Ok(ExitCode::SUCCESS)
}
