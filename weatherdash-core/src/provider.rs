use crate::{Config, Location, normalize::RawWeather, provider::open_meteo::OpenMeteoProvider};
use async_trait::async_trait;
use reqwest::Client;
use std::fmt::Debug;

pub mod open_meteo;

/// Source of live conditions for a coordinate pair.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch(&self, location: &Location) -> anyhow::Result<RawWeather>;
}

/// Construct the weather provider from config.
pub fn provider_from_config(config: &Config, http: &Client) -> Box<dyn WeatherProvider> {
    Box::new(OpenMeteoProvider::new(http.clone(), &config.endpoints.weather))
}
