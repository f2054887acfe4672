use anyhow::{Context, Result, anyhow};
use cityweather_core::{Config, FetchState, WeatherController, provider_from_config};
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, PasswordDisplayMode, Text};
use tokio::runtime::Handle;

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "cityweather", version, about = "Current weather for a city")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and the default city.
    Configure,

    /// Show current weather once and exit.
    Show {
        /// City name; falls back to the configured default city.
        city: Option<String>,
    },

    /// Search repeatedly; submit an empty line or press Esc to quit.
    Interactive,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city } => show(city).await,
            Command::Interactive => interactive().await,
        }
    }
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    config.set_api_key(api_key.trim().to_string());

    let city = Text::new("Default city:")
        .with_default(&config.default_city)
        .prompt()
        .context("Failed to read default city")?;
    config.default_city = city.trim().to_string();

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}

fn controller() -> Result<WeatherController> {
    let config = Config::load()?.with_env_overrides();
    let provider = provider_from_config(&config)?;
    Ok(WeatherController::with_query(provider, Handle::current(), config.default_city))
}

async fn show(city: Option<String>) -> Result<()> {
    let mut controller = controller()?;
    if let Some(city) = city {
        controller.set_query(city);
    }

    match run_cycle(&controller).await? {
        FetchState::Error(message) => Err(anyhow!(message)),
        state => {
            println!("{}", render::render_state(&state, controller.current_query()));
            Ok(())
        }
    }
}

async fn interactive() -> Result<()> {
    let mut controller = controller()?;
    println!("{}", render::render_state(&controller.current_state(), controller.current_query()));

    loop {
        let prompt = Text::new("City:").with_initial_value(controller.current_query());
        let input = match prompt.prompt_skippable() {
            Ok(Some(input)) if !input.trim().is_empty() => input,
            Ok(_) | Err(InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err).context("Failed to read city"),
        };

        controller.set_query(input.trim());
        let state = run_cycle(&controller).await?;
        println!("{}", render::render_state(&state, controller.current_query()));
    }

    Ok(())
}

/// Submit the current query and follow the published states until the cycle ends.
async fn run_cycle(controller: &WeatherController) -> Result<FetchState> {
    let mut rx = controller.subscribe();
    let _task = controller.submit_query();

    loop {
        let state = rx.borrow_and_update().clone();
        match state {
            FetchState::Loading => {
                eprintln!("{}", render::render_state(&state, controller.current_query()))
            }
            FetchState::Success(_) | FetchState::Error(_) => return Ok(state),
            FetchState::Initial => {}
        }

        rx.changed().await.context("Weather state is no longer published")?;
    }
}
