use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    http::{base_url, get_json},
    model::Location,
};

use super::{Geocoder, GeocoderId, ReverseGeocoder};

/// BigDataCloud's keyless client endpoints: place autocomplete and
/// reverse geocoding.
#[derive(Debug, Clone)]
pub struct BigDataCloudGeocoder {
    http: Client,
    base_url: String,
    country_code: Option<String>,
}

impl BigDataCloudGeocoder {
    pub fn new(http: Client, endpoint: &str) -> Self {
        Self {
            http,
            base_url: base_url(endpoint),
            country_code: None,
        }
    }

    pub fn with_country_code(mut self, code: Option<&str>) -> Self {
        self.country_code = code.map(str::to_string);
        self
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BdcPlace {
    name: Option<String>,
    country_name: Option<String>,
    region_name: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
}

impl BdcPlace {
    fn into_location(self, query: &str) -> Option<Location> {
        Some(Location {
            name: self.name.filter(|n| !n.is_empty()).unwrap_or_else(|| query.to_string()),
            country: self.country_name.filter(|c| !c.is_empty()).unwrap_or_else(|| "Unknown".to_string()),
            state: self.region_name.filter(|r| !r.is_empty()),
            latitude: self.latitude?,
            longitude: self.longitude?,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BdcReverse {
    city: Option<String>,
    locality: Option<String>,
    principal_subdivision: Option<String>,
}

#[async_trait]
impl Geocoder for BigDataCloudGeocoder {
    fn id(&self) -> GeocoderId {
        GeocoderId::BigDataCloud
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Location>> {
        let url = format!("{}/data/geo-autocomplete", self.base_url);
        let limit = limit.to_string();

        let request = self.http.get(url).query(&[
            ("query", query),
            ("limit", limit.as_str()),
            ("countryCode", self.country_code.as_deref().unwrap_or("")),
        ]);

        let places: Vec<BdcPlace> = get_json(request, "BigDataCloud autocomplete").await?;

        Ok(places.into_iter().filter_map(|p| p.into_location(query)).collect())
    }
}

#[async_trait]
impl ReverseGeocoder for BigDataCloudGeocoder {
    async fn locality(&self, latitude: f64, longitude: f64) -> Result<Option<String>> {
        let url = format!("{}/data/reverse-geocode-client", self.base_url);

        let request = self.http.get(url).query(&[
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
            ("localityLanguage", "en".to_string()),
        ]);

        let parsed: BdcReverse = get_json(request, "BigDataCloud reverse geocoding").await?;

        Ok([parsed.city, parsed.locality, parsed.principal_subdivision]
            .into_iter()
            .flatten()
            .find(|s| !s.trim().is_empty()))
    }
}
