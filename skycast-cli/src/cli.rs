use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, PasswordDisplayMode, Text};
use skycast_core::{Config, OpenWeatherProvider, QueryOrchestrator};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "City weather in your terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key in the config file.
    Configure,

    /// Show current conditions and a 3-day forecast for a city.
    Show {
        /// City name, e.g. "London" or "Kyiv".
        city: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Command::Configure) => configure(),
            Some(Command::Show { city }) => {
                let mut orchestrator = orchestrator()?;
                orchestrator.submit(&city).await;
                render::render_state(orchestrator.state());
                Ok(())
            }
            None => interactive().await,
        }
    }
}

fn orchestrator() -> anyhow::Result<QueryOrchestrator> {
    let config = Config::load()?;
    let provider = OpenWeatherProvider::new(config.resolved_api_key());
    Ok(QueryOrchestrator::new(Box::new(provider)))
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("API key entry was cancelled")?;

    config.set_api_key(api_key);
    config.save()?;

    println!("Saved to {}", Config::config_file_path()?.display());
    Ok(())
}

/// Prompt-submit-render loop. Esc or Ctrl-C leaves the loop; empty input
/// re-prompts without issuing a request.
async fn interactive() -> anyhow::Result<()> {
    let mut orchestrator = orchestrator()?;

    loop {
        let city = match Text::new("City:").prompt() {
            Ok(city) => city,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err.into()),
        };

        if city.trim().is_empty() {
            continue;
        }

        orchestrator.submit(&city).await;
        render::render_state(orchestrator.state());
    }

    Ok(())
}
