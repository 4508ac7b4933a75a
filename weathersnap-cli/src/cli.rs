use std::process::ExitCode;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use inquire::{CustomType, InquireError, Password, PasswordDisplayMode, Select, Text};
use weathersnap_core::{
    Config, Coordinates, GeolocationConfig, GeolocationMode, QueryState, WeatherQueryController,
    geolocation::geolocator_from_config,
    notice::{self, NoticeReceiver},
    provider::provider_from_config,
};

use crate::render;

/// Input that asks for the device location in interactive mode.
const LOCATE_INPUT: &str = "@";
const QUIT_INPUT: &str = ":q";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weathersnap", version, about = "Instant weather for any city")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// OpenWeather API key (overrides WEATHERSNAP_API_KEY and the config file).
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Current-weather endpoint (overrides WEATHERSNAP_BASE_URL and the config file).
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Latitude to use as "my location".
    #[arg(long, global = true, allow_hyphen_values = true, requires = "lon")]
    pub lat: Option<f64>,

    /// Longitude to use as "my location".
    #[arg(long, global = true, allow_hyphen_values = true, requires = "lat")]
    pub lon: Option<f64>,

    /// More log output on stderr (-v, -vv, -vvv).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show weather for a city.
    Show {
        /// City name; several words are joined with spaces.
        #[arg(required = true)]
        city: Vec<String>,
    },

    /// Show weather for the current location.
    Here,

    /// Prompt for cities until you quit (the default).
    Interactive,

    /// Store the API key, endpoint and geolocation settings.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        match &self.command {
            Some(Command::Configure) => {
                configure()?;
                Ok(ExitCode::SUCCESS)
            }
            Some(Command::Show { city }) => {
                let (mut controller, mut notices) = self.controller()?;
                let query = controller.submit_by_name(&city.join(" ")).await.clone();
                Ok(finish(&controller, &mut notices, &query))
            }
            Some(Command::Here) => {
                let (mut controller, mut notices) = self.controller()?;
                let query = controller.submit_by_location().await.clone();
                Ok(finish(&controller, &mut notices, &query))
            }
            Some(Command::Interactive) | None => {
                let (mut controller, mut notices) = self.controller()?;
                interactive(&mut controller, &mut notices).await?;
                Ok(ExitCode::SUCCESS)
            }
        }
    }

    /// Resolve configuration (flag > env > file) and build the controller.
    fn controller(&self) -> anyhow::Result<(WeatherQueryController, NoticeReceiver)> {
        let mut config = Config::resolve()?;

        if let Some(key) = &self.api_key {
            config.api_key = Some(key.clone());
        }
        if let Some(url) = &self.base_url {
            config.base_url = Some(url.clone());
        }
        if let (Some(latitude), Some(longitude)) = (self.lat, self.lon) {
            config.geolocation = GeolocationConfig::fixed(Coordinates {
                latitude,
                longitude,
            });
        }

        let provider = provider_from_config(&config)?;
        let geolocator = geolocator_from_config(&config.geolocation);
        tracing::info!(
            base_url = config.base_url(),
            geolocation = %config.geolocation.mode,
            "configuration resolved"
        );

        let (tx, rx) = notice::channel();
        Ok((WeatherQueryController::new(provider, geolocator, tx), rx))
    }
}

fn print_notices(notices: &mut NoticeReceiver) {
    while let Ok(n) = notices.try_recv() {
        println!("{}", render::notice_line(&n));
    }
}

fn print_query(controller: &WeatherQueryController, query: &QueryState) {
    if let QueryState::Success(obs) = query {
        println!();
        println!("{}", render::observation_card(obs, controller.state().theme));
    }
}

fn finish(
    controller: &WeatherQueryController,
    notices: &mut NoticeReceiver,
    query: &QueryState,
) -> ExitCode {
    print_notices(notices);
    print_query(controller, query);

    if query.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

async fn interactive(
    controller: &mut WeatherQueryController,
    notices: &mut NoticeReceiver,
) -> anyhow::Result<()> {
    let help = format!("{LOCATE_INPUT} uses your location, {QUIT_INPUT} or Esc quits");

    loop {
        let current = controller.state().city.clone();
        let answer = Text::new("City:")
            .with_initial_value(&current)
            .with_help_message(&help)
            .prompt();

        let input = match answer {
            Ok(input) => input,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                return Ok(());
            }
            Err(e) => return Err(e).context("Failed to read city name"),
        };

        let query = match input.trim() {
            QUIT_INPUT => return Ok(()),
            LOCATE_INPUT => {
                println!("Getting weather data...");
                controller.submit_by_location().await.clone()
            }
            _ => {
                controller.set_city(input.clone());
                if !input.trim().is_empty() {
                    println!("Searching...");
                }
                controller.submit_by_name(&input).await.clone()
            }
        };

        print_notices(notices);
        print_query(controller, &query);
        println!();
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let key = Password::new("OpenWeather API key (leave empty to keep the current one):")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .prompt()
        .context("Failed to read API key")?;
    if !key.trim().is_empty() {
        config.api_key = Some(key.trim().to_string());
    }

    let base_url = Text::new("Weather endpoint:")
        .with_default(config.base_url())
        .prompt()
        .context("Failed to read endpoint")?;
    config.base_url = Some(base_url.trim().to_string());

    let modes = GeolocationMode::all().to_vec();
    let cursor = modes
        .iter()
        .position(|m| *m == config.geolocation.mode)
        .unwrap_or(0);
    let mode = Select::new("Geolocation:", modes)
        .with_starting_cursor(cursor)
        .prompt()
        .context("Failed to read geolocation mode")?;

    config.geolocation = match mode {
        GeolocationMode::Fixed => {
            let latitude = CustomType::<f64>::new("Latitude:")
                .with_error_message("Please type a number, e.g. 59.91")
                .prompt()
                .context("Failed to read latitude")?;
            let longitude = CustomType::<f64>::new("Longitude:")
                .with_error_message("Please type a number, e.g. 10.75")
                .prompt()
                .context("Failed to read longitude")?;
            GeolocationConfig::fixed(Coordinates {
                latitude,
                longitude,
            })
        }
        other => GeolocationConfig {
            mode: other,
            ..GeolocationConfig::default()
        },
    };

    let path = config.save()?;
    println!("Configuration saved to {}", path.display());
    Ok(())
}
