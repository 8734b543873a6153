use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    http::{base_url, get_json},
    model::Location,
};

use super::{Geocoder, GeocoderId};

#[derive(Debug, Clone)]
pub struct OpenMeteoGeocoder {
    http: Client,
    base_url: String,
}

impl OpenMeteoGeocoder {
    pub fn new(http: Client, endpoint: &str) -> Self {
        Self { http, base_url: base_url(endpoint) }
    }
}

#[derive(Debug, Deserialize)]
struct OmSearchResponse {
    // Absent entirely when nothing matched.
    #[serde(default)]
    results: Vec<OmPlace>,
}

#[derive(Debug, Deserialize)]
struct OmPlace {
    name: String,
    country: Option<String>,
    admin1: Option<String>,
    latitude: f64,
    longitude: f64,
}

impl From<OmPlace> for Location {
    fn from(p: OmPlace) -> Self {
        Location {
            name: p.name,
            country: p.country.unwrap_or_else(|| "Unknown".to_string()),
            state: p.admin1,
            latitude: p.latitude,
            longitude: p.longitude,
        }
    }
}

#[async_trait]
impl Geocoder for OpenMeteoGeocoder {
    fn id(&self) -> GeocoderId {
        GeocoderId::OpenMeteo
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Location>> {
        let url = format!("{}/v1/search", self.base_url);
        let count = limit.to_string();

        let request = self.http.get(url).query(&[
            ("name", query),
            ("count", count.as_str()),
            ("language", "en"),
            ("format", "json"),
        ]);

        let parsed: OmSearchResponse = get_json(request, "Open-Meteo geocoding").await?;

        Ok(parsed.results.into_iter().take(limit).map(Location::from).collect())
    }
}
