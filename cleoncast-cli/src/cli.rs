use std::{process::ExitCode, sync::Arc};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use cleoncast_core::{
    ChainedCredentials, Config, EnvCredentials, ForecastSnapshot, Render, ScreenRuntime,
    ScreenView, ShareableAddress, Snapshot, WeatherProvider, WeatherSnapshot, provider_from_config,
};
use inquire::{InquireError, Password, PasswordDisplayMode, Text};
use serde::Serialize;
use tracing::debug;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "cleoncast", version, about = "CleonCast - foremost weather checks")]
pub struct Cli {
    /// Log lookups and state transitions to stderr.
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the RapidAPI key in the config file.
    Configure,

    /// Current conditions for a city.
    Current {
        #[command(flatten)]
        lookup: Lookup,

        /// Shareable link to restore, e.g. "http://localhost:3000/?city=Paris".
        #[arg(long)]
        link: Option<String>,
    },

    /// Three-day forecast for a city.
    Forecast {
        #[command(flatten)]
        lookup: Lookup,
    },
}

#[derive(Debug, Args)]
pub struct Lookup {
    /// City name. Without it an interactive prompt asks for one.
    pub city: Option<String>,

    /// Print the result as JSON.
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        match self.command {
            Command::Configure => configure(),
            Command::Current { lookup, link } => {
                let config = Config::load()?;
                let address = ShareableAddress::parse(link.as_deref().unwrap_or(&config.share_url))
                    .context("Failed to read --link")?;

                let mut screen =
                    ScreenRuntime::<WeatherSnapshot>::new(provider(&config)?).with_address(address);

                // An explicit city beats whatever the link carries.
                if lookup.city.is_none() && screen.mount().is_some() {
                    let ok = show(&mut screen, lookup.json).await?;
                    return Ok(exit_code(ok));
                }
                lookup_loop(&mut screen, lookup).await
            }
            Command::Forecast { lookup } => {
                let config = Config::load()?;
                let mut screen = ScreenRuntime::<ForecastSnapshot>::new(provider(&config)?);
                lookup_loop(&mut screen, lookup).await
            }
        }
    }
}

fn provider(config: &Config) -> anyhow::Result<Arc<dyn WeatherProvider>> {
    let credentials = ChainedCredentials::new()
        .with(EnvCredentials::default())
        .with(config.credentials());
    debug!(base_url = %config.base_url, forecast_days = config.forecast_days, "provider configured");

    provider_from_config(config, Arc::new(credentials))
}

fn configure() -> anyhow::Result<ExitCode> {
    let mut config = Config::load()?;

    let key = Password::new("RapidAPI key:")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .with_help_message("Leave empty to remove the stored key")
        .prompt()
        .context("Failed to read API key")?;

    config.set_api_key(key);
    config.save()?;

    let path = Config::config_file_path()?;
    if config.has_api_key() {
        println!("API key saved to {}", path.display());
    } else {
        println!("API key removed from {}", path.display());
    }
    Ok(ExitCode::SUCCESS)
}

/// One lookup for `lookup.city`, or the interactive form when it is absent.
async fn lookup_loop<T>(screen: &mut ScreenRuntime<T>, lookup: Lookup) -> anyhow::Result<ExitCode>
where
    T: Snapshot + Render + Serialize,
{
    if let Some(city) = lookup.city {
        screen.submit(city);
        let ok = show(screen, lookup.json).await?;
        return Ok(exit_code(ok));
    }

    loop {
        let city = Text::new("City:")
            .with_placeholder("Enter a city name")
            .with_initial_value(screen.state().query.as_str())
            .with_help_message("Esc or an empty city to quit")
            .prompt();

        match city {
            Ok(city) if ends_session(&city) => return Ok(ExitCode::SUCCESS),
            Ok(city) => {
                screen.submit(city);
                show(screen, lookup.json).await?;
            }
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                return Ok(ExitCode::SUCCESS);
            }
            Err(err) => return Err(err).context("Failed to read city"),
        }
    }
}

/// Wait for outstanding lookups and print the screen. Returns whether the
/// latest lookup succeeded.
async fn show<T>(screen: &mut ScreenRuntime<T>, json: bool) -> anyhow::Result<bool>
where
    T: Snapshot + Render + Serialize,
{
    if screen.state().view.is_loading() && !json {
        eprintln!("Loading...");
    }
    screen.settle_all().await;

    let view = &screen.state().view;
    let ok = view.error().is_none();

    if json {
        let value = match view.error() {
            Some(error) => serde_json::json!({
                "error": { "kind": error.kind(), "message": error.to_string() }
            }),
            None => serde_json::to_value(view.snapshot())?,
        };
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(ok);
    }

    let rendered: ScreenView<T::View> = ScreenView::from(view);
    println!("{rendered}");

    if let Some(address) = screen.address().filter(|_| ok) {
        println!("\nShare: {address}");
    }
    Ok(ok)
}

/// A cleared form field ends the interactive session.
fn ends_session(input: &str) -> bool {
    input.trim().is_empty()
}

fn exit_code(ok: bool) -> ExitCode {
    if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}
