use crate::{
    Config, Location,
    geocode::{
        bigdatacloud::BigDataCloudGeocoder, nominatim::NominatimGeocoder,
        open_meteo::OpenMeteoGeocoder,
    },
};
use async_trait::async_trait;
use reqwest::Client;
use std::{convert::TryFrom, fmt::Debug};

pub mod bigdatacloud;
pub mod nominatim;
pub mod open_meteo;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeocoderId {
    BigDataCloud,
    OpenMeteo,
    Nominatim,
}

impl GeocoderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            GeocoderId::BigDataCloud => "bigdatacloud",
            GeocoderId::OpenMeteo => "open-meteo",
            GeocoderId::Nominatim => "nominatim",
        }
    }

    pub const fn all() -> &'static [GeocoderId] {
        &[GeocoderId::BigDataCloud, GeocoderId::OpenMeteo, GeocoderId::Nominatim]
    }
}

impl std::fmt::Display for GeocoderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for GeocoderId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.trim().to_lowercase();

        match lower.as_str() {
            "bigdatacloud" => Ok(GeocoderId::BigDataCloud),
            "open-meteo" | "openmeteo" => Ok(GeocoderId::OpenMeteo),
            "nominatim" => Ok(GeocoderId::Nominatim),
            _ => Err(anyhow::anyhow!(
                "Unknown geocoder '{value}'. Supported geocoders: bigdatacloud, open-meteo, nominatim."
            )),
        }
    }
}

/// Forward geocoding: free text to candidate places.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    fn id(&self) -> GeocoderId;

    /// At most `limit` candidates, best first. An empty list means "no match".
    async fn search(&self, query: &str, limit: usize) -> anyhow::Result<Vec<Location>>;
}

/// Reverse geocoding: coordinates to a place name.
#[async_trait]
pub trait ReverseGeocoder: Send + Sync + Debug {
    async fn locality(&self, latitude: f64, longitude: f64) -> anyhow::Result<Option<String>>;
}

/// Construct a geocoder for `id` using the endpoints from config.
pub fn geocoder_from_config(id: GeocoderId, config: &Config, http: &Client) -> Box<dyn Geocoder> {
    let endpoints = &config.endpoints;

    match id {
        GeocoderId::BigDataCloud => Box::new(
            BigDataCloudGeocoder::new(http.clone(), &endpoints.bigdatacloud)
                .with_country_code(config.country_code()),
        ),
        GeocoderId::OpenMeteo => {
            Box::new(OpenMeteoGeocoder::new(http.clone(), &endpoints.open_meteo_geocoding))
        }
        GeocoderId::Nominatim => Box::new(NominatimGeocoder::new(http.clone(), &endpoints.nominatim)),
    }
}

/// The configured fallback chain, in priority order.
pub fn geocoders_from_config(config: &Config, http: &Client) -> anyhow::Result<Vec<Box<dyn Geocoder>>> {
    let ids = config.geocoder_ids()?;
    Ok(ids.into_iter().map(|id| geocoder_from_config(id, config, http)).collect())
}

pub fn reverse_geocoder_from_config(config: &Config, http: &Client) -> Box<dyn ReverseGeocoder> {
    Box::new(BigDataCloudGeocoder::new(http.clone(), &config.endpoints.bigdatacloud))
}
