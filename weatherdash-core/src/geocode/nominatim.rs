use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{
    http::{base_url, get_json},
    model::Location,
};

use super::{Geocoder, GeocoderId};

/// OpenStreetMap Nominatim search. Free, keyless, but requires a user agent.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    http: Client,
    base_url: String,
}

impl NominatimGeocoder {
    pub fn new(http: Client, endpoint: &str) -> Self {
        Self { http, base_url: base_url(endpoint) }
    }
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    // Coordinates come back as strings.
    lat: String,
    lon: String,
    name: Option<String>,
    display_name: Option<String>,
    address: Option<NominatimAddress>,
}

#[derive(Debug, Deserialize)]
struct NominatimAddress {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    state: Option<String>,
    country: Option<String>,
}

impl NominatimPlace {
    fn into_location(self, query: &str) -> Option<Location> {
        let (latitude, longitude) = match (self.lat.parse::<f64>(), self.lon.parse::<f64>()) {
            (Ok(lat), Ok(lon)) => (lat, lon),
            _ => {
                debug!("Skipping Nominatim result with bad coordinates: {}, {}", self.lat, self.lon);
                return None;
            }
        };

        let address = self.address;
        let (place, state, country) = match address {
            Some(a) => (a.city.or(a.town).or(a.village), a.state, a.country),
            None => (None, None, None),
        };

        // Prefer the object's own name, then the settlement, then the first
        // component of the display name.
        let name = self
            .name
            .filter(|n| !n.is_empty())
            .or(place)
            .or_else(|| {
                self.display_name
                    .as_deref()
                    .and_then(|d| d.split(',').next())
                    .map(|s| s.trim().to_string())
            })
            .unwrap_or_else(|| query.to_string());

        Some(Location {
            name,
            country: country.unwrap_or_else(|| "Unknown".to_string()),
            state,
            latitude,
            longitude,
        })
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    fn id(&self) -> GeocoderId {
        GeocoderId::Nominatim
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Location>> {
        let url = format!("{}/search", self.base_url);
        let limit = limit.to_string();

        let request = self.http.get(url).query(&[
            ("q", query),
            ("format", "jsonv2"),
            ("addressdetails", "1"),
            ("limit", limit.as_str()),
        ]);

        let places: Vec<NominatimPlace> = get_json(request, "Nominatim search").await?;

        Ok(places.into_iter().filter_map(|p| p.into_location(query)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_string_coordinates() {
        let place: NominatimPlace = serde_json::from_str(
            r#"{
                "lat": "16.4302", "lon": "80.5686",
                "name": "Mangalagiri",
                "display_name": "Mangalagiri, Guntur, Andhra Pradesh, India",
                "address": {"town": "Mangalagiri", "state": "Andhra Pradesh", "country": "India"}
            }"#,
        )
        .unwrap();

        let loc = place.into_location("mangalagiri").unwrap();
        assert_eq!(loc.name, "Mangalagiri");
        assert_eq!(loc.state.as_deref(), Some("Andhra Pradesh"));
        assert_eq!(loc.country, "India");
        assert!((loc.latitude - 16.4302).abs() < 1e-9);
    }

    #[test]
    fn falls_back_to_display_name() {
        let place: NominatimPlace = serde_json::from_str(
            r#"{"lat": "1.0", "lon": "2.0", "name": "", "display_name": "Some Hill, Region"}"#,
        )
        .unwrap();

        let loc = place.into_location("hill").unwrap();
        assert_eq!(loc.name, "Some Hill");
        assert_eq!(loc.country, "Unknown");
    }

    #[test]
    fn bad_coordinates_are_skipped() {
        let place: NominatimPlace =
            serde_json::from_str(r#"{"lat": "north", "lon": "2.0"}"#).unwrap();
        assert!(place.into_location("x").is_none());
    }
}
