use std::fmt;

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Confirm, CustomType, InquireError, MultiSelect, Select, Text};
use tracing::debug;
use weatherdash_core::{
    Config, CurrentWeather, GeocoderId, Geolocator, Location, PositionOptions, Session,
    WeatherService, geolocation::geolocator_from_config, http,
};

use crate::render::{self, Dashboard};

const NOT_FOUND: &str =
    "Location not found. Please try a different search term or check the spelling.";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherdash", version, about = "Weather dashboard for the terminal")]
pub struct Cli {
    /// Log provider calls and fallbacks to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show weather for a place name or "lat, lon" coordinates.
    Show {
        query: String,

        /// Print the record as JSON instead of a dashboard.
        #[arg(long)]
        json: bool,
    },

    /// List up to five matching places.
    Search { query: String },

    /// Show weather for your current location.
    Here {
        #[arg(long)]
        json: bool,
    },

    /// Search repeatedly, keeping recent searches and favorites for the session.
    Interactive,

    /// Choose geocoding services, search bias and home position.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?;

        match self.command {
            Command::Configure => configure(config),
            Command::Show { query, json } => {
                let service = WeatherService::from_config(&config, &http::client()?)?;
                match service.resolve_one(&query).await {
                    Some(location) => print_weather(&service.weather_for(&location).await, json),
                    None => {
                        eprintln!("{NOT_FOUND}");
                        Ok(())
                    }
                }
            }
            Command::Search { query } => {
                let service = WeatherService::from_config(&config, &http::client()?)?;
                let found = service.search(&query).await;
                if found.is_empty() {
                    eprintln!("{NOT_FOUND}");
                } else {
                    print!("{}", render::suggestions(&found));
                }
                Ok(())
            }
            Command::Here { json } => {
                let http = http::client()?;
                let service = WeatherService::from_config(&config, &http)?;
                let geolocator = geolocator_from_config(&config, &http);
                match locate(&service, geolocator.as_ref(), &config.position_options()).await {
                    Some(weather) => print_weather(&weather, json),
                    None => Ok(()),
                }
            }
            Command::Interactive => {
                let http = http::client()?;
                let service = WeatherService::from_config(&config, &http)?;
                let geolocator = geolocator_from_config(&config, &http);
                interactive(&service, geolocator.as_ref(), &config.position_options()).await
            }
        }
    }
}

fn print_weather(weather: &CurrentWeather, json: bool) -> anyhow::Result<()> {
    if json {
        let text = serde_json::to_string_pretty(weather).context("Failed to serialize weather")?;
        println!("{text}");
    } else {
        print!("{}", Dashboard(weather));
    }
    Ok(())
}

/// Weather at the current position, or `None` after telling the user why not.
async fn locate(
    service: &WeatherService,
    geolocator: &dyn Geolocator,
    options: &PositionOptions,
) -> Option<CurrentWeather> {
    match geolocator.current_position(options).await {
        Ok(position) => {
            let here = Location::current(position.latitude, position.longitude);
            Some(service.weather_for(&here).await)
        }
        Err(err) => {
            debug!("Geolocation failed: {err}");
            eprintln!("{}", err.user_message());
            None
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum MenuItem {
    Search,
    Here,
    Recent,
    Favorites,
    Quit,
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MenuItem::Search => "Search for a place",
            MenuItem::Here => "Use my current location",
            MenuItem::Recent => "Recent searches",
            MenuItem::Favorites => "Favorite places",
            MenuItem::Quit => "Quit",
        })
    }
}

/// Location as shown in a picker.
#[derive(Debug, Clone)]
struct Choice(Location);

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.display_name())
    }
}

/// Escape and Ctrl-C end the prompt without being an error.
fn cancelled<T>(result: Result<T, InquireError>) -> anyhow::Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

async fn interactive(
    service: &WeatherService,
    geolocator: &dyn Geolocator,
    options: &PositionOptions,
) -> anyhow::Result<()> {
    let mut session = Session::new();

    loop {
        let mut menu = vec![MenuItem::Search, MenuItem::Here];
        if !session.history.is_empty() {
            menu.push(MenuItem::Recent);
        }
        if !session.favorites.is_empty() {
            menu.push(MenuItem::Favorites);
        }
        menu.push(MenuItem::Quit);

        let Some(item) = cancelled(Select::new("What next?", menu).prompt())? else {
            break;
        };

        match item {
            MenuItem::Search => {
                if let Some(term) = cancelled(Text::new("Place or \"lat, lon\":").prompt())? {
                    lookup(service, &mut session, &term).await?;
                }
            }
            MenuItem::Recent => {
                let recent: Vec<String> = session.history.iter().map(str::to_string).collect();
                if let Some(term) = cancelled(Select::new("Recent searches:", recent).prompt())? {
                    lookup(service, &mut session, &term).await?;
                }
            }
            MenuItem::Favorites => {
                let favorites: Vec<Choice> = session.favorites.iter().cloned().map(Choice).collect();
                if let Some(Choice(location)) =
                    cancelled(Select::new("Favorite places:", favorites).prompt())?
                {
                    let weather = service.weather_for(&location).await;
                    print!("{}", Dashboard(&weather));
                    session.record_selection(&location, weather);
                }
            }
            MenuItem::Here => {
                if let Some(weather) = locate(service, geolocator, options).await {
                    print!("{}", Dashboard(&weather));
                    session.record_current_location(weather);
                }
            }
            MenuItem::Quit => break,
        }
    }

    Ok(())
}

/// How a search settled on its location.
#[derive(Debug, Clone, PartialEq)]
enum Match {
    /// The search had exactly one result.
    Only(Location),
    /// The user picked one of several suggestions.
    Picked(Location),
}

impl Match {
    fn location(&self) -> &Location {
        match self {
            Match::Only(location) | Match::Picked(location) => location,
        }
    }
}

/// Only a search that settled on its own goes into history; a picked
/// suggestion is a selection.
fn remember(session: &mut Session, term: &str, found: &Match, weather: CurrentWeather) {
    match found {
        Match::Only(location) => session.record_lookup(term, location, weather),
        Match::Picked(location) => session.record_selection(location, weather),
    }
}

/// Search for `term`, let the user pick among several matches, then show and
/// remember the result. A miss leaves the session untouched.
async fn lookup(service: &WeatherService, session: &mut Session, term: &str) -> anyhow::Result<()> {
    let mut found = service.search(term).await;

    let found = match found.len() {
        0 => {
            eprintln!("{NOT_FOUND}");
            return Ok(());
        }
        1 => Match::Only(found.remove(0)),
        _ => {
            let choices: Vec<Choice> = found.into_iter().map(Choice).collect();
            match cancelled(Select::new("Which one?", choices).prompt())? {
                Some(Choice(location)) => Match::Picked(location),
                None => return Ok(()),
            }
        }
    };

    let location = found.location();
    let weather = service.weather_for(location).await;
    print!("{}", Dashboard(&weather));
    println!("Weather data found for {}!", location.name);
    remember(session, term, &found, weather);

    Ok(())
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let current = config.geocoder_ids().unwrap_or_default();
    let all = GeocoderId::all().to_vec();
    let defaults: Vec<usize> = all
        .iter()
        .enumerate()
        .filter(|(_, id)| current.contains(id))
        .map(|(i, _)| i)
        .collect();

    let mut picked = MultiSelect::new("Geocoding services to fall back on:", all)
        .with_default(&defaults)
        .prompt()?;

    if picked.len() > 1 {
        let first = Select::new("Which should be tried first?", picked.clone()).prompt()?;
        picked.retain(|id| *id != first);
        picked.insert(0, first);
    }
    config.set_geocoder_order(&picked);

    let code = Text::new("Country code to bias searches (blank for none):")
        .with_default(config.country_code().unwrap_or(""))
        .prompt()?;
    config.set_country_code(&code);

    let use_home = Confirm::new("Use a fixed home position instead of IP lookup?")
        .with_default(config.geolocation.home.is_some())
        .prompt()?;

    if use_home {
        let latitude = CustomType::<f64>::new("Home latitude:").prompt()?;
        let longitude = CustomType::<f64>::new("Home longitude:").prompt()?;
        config.set_home(latitude, longitude)?;
    } else {
        config.geolocation.home = None;
    }

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());

    Ok(())
}
