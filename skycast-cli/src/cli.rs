use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use skycast_core::{
    Config, Dashboard, FavoritesStore, JsonFileStorage, gateway_from_config,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Weather dashboard CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the weather provider API key.
    Configure,

    /// Full dashboard for a location: current conditions, forecast,
    /// air quality and alerts.
    Show {
        /// Place name or "lat,lon" pair.
        query: String,
    },

    /// Seven-day forecast with hourly detail for today.
    Forecast {
        query: String,

        /// Number of days to print (1-7).
        #[arg(long, default_value_t = 7)]
        days: usize,
    },

    /// Observed weather for one past day.
    History {
        query: String,

        /// Calendar date, e.g. 2024-03-15.
        #[arg(long)]
        date: String,
    },

    /// Compare current conditions across 2-5 locations.
    Compare {
        /// Location queries.
        #[arg(num_args = 2..)]
        queries: Vec<String>,
    },

    /// Manage saved locations.
    #[command(subcommand)]
    Favorites(FavoritesCommand),
}

#[derive(Debug, Subcommand)]
pub enum FavoritesCommand {
    /// Resolve a query and save the location.
    Add { query: String },

    /// Remove a saved location by id.
    Remove { id: String },

    /// List saved locations in the order they were added.
    List,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { query } => {
                let dash = dashboard()?;
                let result = dash.refresh(&query).await?;
                render::dashboard(&result);
                Ok(())
            }
            Command::Forecast { query, days } => {
                let dash = dashboard()?;
                let result = dash.refresh(&query).await?;
                let forecast = result
                    .forecast
                    .context("forecast data is unavailable for this location")?;
                render::forecast(&forecast, days.clamp(1, 7));
                Ok(())
            }
            Command::History { query, date } => {
                let date: NaiveDate = date
                    .parse()
                    .with_context(|| format!("'{date}' is not a valid date (expected YYYY-MM-DD)"))?;
                let dash = dashboard()?;
                let record = dash.historical(&query, date).await?;
                render::historical(&record);
                Ok(())
            }
            Command::Compare { queries } => {
                let dash = dashboard()?;
                let result = dash.compare(&queries).await?;
                render::comparison(&result);
                Ok(())
            }
            Command::Favorites(cmd) => favorites(cmd).await,
        }
    }
}

fn dashboard() -> anyhow::Result<Dashboard> {
    let config = Config::load()?;
    let gateway = gateway_from_config(&config)?;
    Ok(Dashboard::new(gateway))
}

fn open_favorites() -> anyhow::Result<FavoritesStore> {
    let storage = JsonFileStorage::default_location()?;
    Ok(FavoritesStore::open(Box::new(storage))?)
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = inquire::Password::new("Weatherstack API key:")
        .with_display_mode(inquire::PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    config.set_api_key(api_key);
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn favorites(cmd: FavoritesCommand) -> anyhow::Result<()> {
    let mut store = open_favorites()?;

    match cmd {
        FavoritesCommand::Add { query } => {
            // Resolve first so the saved entry carries the canonical
            // name and country.
            let dash = dashboard()?;
            let current = dash.resolve(&query).await?;
            let saved = store.add(&current, &query)?;
            println!("Saved {} ({}) as {}", saved.name, saved.country, saved.id);
        }
        FavoritesCommand::Remove { id } => {
            store.remove(&id)?;
            println!("Removed {id} (if it existed)");
        }
        FavoritesCommand::List => render::favorites(store.list()),
    }

    Ok(())
}
