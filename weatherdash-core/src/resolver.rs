//! Free-text (or coordinate) queries to locations.
//!
//! The built-in gazetteer is consulted first. Only when it has nothing do we
//! go to the network, trying each configured geocoder in order until one
//! returns a non-empty list. Provider failures are logged and skipped; a
//! query nobody can answer yields an empty result rather than an error.

use tracing::{debug, warn};

use crate::{
    gazetteer::{self, MAX_RESULTS},
    geocode::{Geocoder, ReverseGeocoder},
    model::Location,
};

/// Name used when reverse geocoding can't name a position.
pub const FALLBACK_LOCALITY: &str = "Current Location";

#[derive(Debug, Default)]
pub struct LocationResolver {
    geocoders: Vec<Box<dyn Geocoder>>,
    reverse: Option<Box<dyn ReverseGeocoder>>,
}

/// Parse "lat, lon" or "lat lon" into a coordinate pair within valid ranges.
pub fn parse_coordinates(query: &str) -> Option<(f64, f64)> {
    let mut parts = query
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty());

    let latitude: f64 = parts.next()?.parse().ok()?;
    let longitude: f64 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }

    let valid = (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude);
    valid.then_some((latitude, longitude))
}

impl LocationResolver {
    /// `geocoders` is the fallback chain in priority order.
    pub fn new(geocoders: Vec<Box<dyn Geocoder>>) -> Self {
        Self { geocoders, reverse: None }
    }

    pub fn with_reverse(mut self, reverse: Box<dyn ReverseGeocoder>) -> Self {
        self.reverse = Some(reverse);
        self
    }

    /// Up to five suggestions for `query`, best first.
    pub async fn search(&self, query: &str) -> Vec<Location> {
        self.lookup(query, MAX_RESULTS).await
    }

    /// The single best match for `query`, if any.
    pub async fn resolve_one(&self, query: &str) -> Option<Location> {
        self.lookup(query, 1).await.into_iter().next()
    }

    /// A location at the given coordinates, named by reverse geocoding.
    pub async fn locate(&self, latitude: f64, longitude: f64) -> Location {
        let name = match &self.reverse {
            Some(reverse) => match reverse.locality(latitude, longitude).await {
                Ok(Some(name)) => name,
                Ok(None) => {
                    debug!("Reverse geocoding found nothing at ({latitude}, {longitude})");
                    FALLBACK_LOCALITY.to_string()
                }
                Err(err) => {
                    warn!("Reverse geocoding failed, using fallback name: {err:#}");
                    FALLBACK_LOCALITY.to_string()
                }
            },
            None => FALLBACK_LOCALITY.to_string(),
        };

        Location::new(name, "", latitude, longitude)
    }

    async fn lookup(&self, query: &str, limit: usize) -> Vec<Location> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        if let Some((latitude, longitude)) = parse_coordinates(query) {
            debug!("Treating '{query}' as coordinates");
            return vec![self.locate(latitude, longitude).await];
        }

        let mut local = gazetteer::search(query);
        if !local.is_empty() {
            debug!("Gazetteer matched {} place(s) for '{query}'", local.len());
            local.truncate(limit);
            return local;
        }

        for geocoder in &self.geocoders {
            debug!("Geocoding '{query}' with {}", geocoder.id());

            match geocoder.search(query, limit).await {
                Ok(mut found) if !found.is_empty() => {
                    found.truncate(limit);
                    return found;
                }
                Ok(_) => debug!("{} had no match for '{query}'", geocoder.id()),
                Err(err) => warn!("{} geocoding failed: {err:#}", geocoder.id()),
            }
        }

        debug!("No location found for '{query}'");
        Vec::new()
    }
}
