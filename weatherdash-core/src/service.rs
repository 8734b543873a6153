use anyhow::Result;
use chrono::Local;
use rand::{SeedableRng, rngs::StdRng};
use reqwest::Client;
use tracing::{debug, warn};

use crate::{
    Config,
    forecast::synthetic_weather,
    geocode::{geocoders_from_config, reverse_geocoder_from_config},
    model::{CurrentWeather, Location},
    normalize::normalize,
    provider::{WeatherProvider, provider_from_config},
    resolver::LocationResolver,
};

/// Location lookup plus weather fetching, with every failure path ending in
/// usable data.
#[derive(Debug)]
pub struct WeatherService {
    resolver: LocationResolver,
    provider: Box<dyn WeatherProvider>,
}

impl WeatherService {
    pub fn new(resolver: LocationResolver, provider: Box<dyn WeatherProvider>) -> Self {
        Self { resolver, provider }
    }

    /// Wire geocoders, reverse geocoding and the weather provider from config,
    /// all sharing the caller's HTTP client.
    pub fn from_config(config: &Config, http: &Client) -> Result<Self> {
        let resolver = LocationResolver::new(geocoders_from_config(config, http)?)
            .with_reverse(reverse_geocoder_from_config(config, http));

        Ok(Self::new(resolver, provider_from_config(config, http)))
    }

    pub async fn search(&self, query: &str) -> Vec<Location> {
        self.resolver.search(query).await
    }

    pub async fn resolve_one(&self, query: &str) -> Option<Location> {
        self.resolver.resolve_one(query).await
    }

    pub async fn locate(&self, latitude: f64, longitude: f64) -> Location {
        self.resolver.locate(latitude, longitude).await
    }

    /// Weather for `location`. A geolocation placeholder is named by reverse
    /// geocoding first. If the provider fails, synthetic weather is returned.
    pub async fn weather_for(&self, location: &Location) -> CurrentWeather {
        let location = if location.is_current() {
            self.locate(location.latitude, location.longitude).await
        } else {
            location.clone()
        };

        let fetched = self.provider.fetch(&location).await;
        let mut rng = StdRng::from_entropy();

        match fetched {
            Ok(raw) => {
                debug!("Normalizing provider weather for {}", location.name);
                normalize(&raw, &location, &mut rng)
            }
            Err(err) => {
                warn!("Weather fetch for {} failed, using synthetic data: {err:#}", location.name);
                synthetic_weather(&location, Local::now().naive_local(), &mut rng)
            }
        }
    }
}
