//! "Use my current location".
//!
//! A terminal has no browser geolocation, so the position comes from an IP
//! lookup service, a fixed home position, or nowhere at all. The contract is
//! the same either way: bounded by a timeout, optionally served from a
//! recent cached fix, and failing with one of a few well-known errors.

use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::Client;
use serde::Deserialize;
use std::{
    fmt::Debug,
    time::{Duration, Instant},
};
use thiserror::Error;
use tracing::debug;

use crate::{
    Config,
    http::{base_url, get_json},
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionOptions {
    pub high_accuracy: bool,
    /// Give up after this long.
    pub timeout: Duration,
    /// Accept a cached position no older than this.
    pub maximum_age: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: Duration::from_secs(10),
            maximum_age: Duration::from_secs(300),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy_meters: Option<f64>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GeolocationError {
    #[error("location access denied")]
    PermissionDenied,
    #[error("location unavailable: {0}")]
    PositionUnavailable(String),
    #[error("location request timed out")]
    Timeout,
    #[error("geolocation is not supported")]
    Unsupported,
}

impl GeolocationError {
    /// Message suitable for showing to the user.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::PermissionDenied => {
                "Location access denied. Please enable location access or enter a city manually."
            }
            Self::PositionUnavailable(_) => {
                "Location information is unavailable. Please enter a city manually."
            }
            Self::Timeout => "Location request timed out. Please try again or enter a city manually.",
            Self::Unsupported => "Geolocation is not supported here. Please enter a city manually.",
        }
    }
}

#[async_trait]
pub trait Geolocator: Send + Sync + Debug {
    async fn current_position(&self, options: &PositionOptions) -> Result<Position, GeolocationError>;
}

/// Approximate position from the caller's public IP address
/// (ip-api.com response shape).
#[derive(Debug)]
pub struct IpGeolocator {
    http: Client,
    base_url: String,
    last_fix: Mutex<Option<(Instant, Position)>>,
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

impl IpGeolocator {
    pub fn new(http: Client, endpoint: &str) -> Self {
        Self {
            http,
            base_url: base_url(endpoint),
            last_fix: Mutex::new(None),
        }
    }

    fn cached(&self, maximum_age: Duration) -> Option<Position> {
        let guard = self.last_fix.lock();
        guard
            .as_ref()
            .filter(|(taken, _)| taken.elapsed() <= maximum_age)
            .map(|(_, position)| *position)
    }

    async fn lookup(&self) -> Result<Position, GeolocationError> {
        let request = self.http.get(format!("{}/json/", self.base_url));

        let parsed: IpApiResponse = get_json(request, "IP geolocation")
            .await
            .map_err(|err| GeolocationError::PositionUnavailable(format!("{err:#}")))?;

        if parsed.status != "success" {
            return Err(GeolocationError::PositionUnavailable(
                parsed.message.unwrap_or_else(|| parsed.status.clone()),
            ));
        }

        match (parsed.lat, parsed.lon) {
            (Some(latitude), Some(longitude)) => Ok(Position {
                latitude,
                longitude,
                // City-level at best.
                accuracy_meters: Some(25_000.0),
            }),
            _ => Err(GeolocationError::PositionUnavailable("response had no coordinates".into())),
        }
    }
}

#[async_trait]
impl Geolocator for IpGeolocator {
    async fn current_position(&self, options: &PositionOptions) -> Result<Position, GeolocationError> {
        if let Some(position) = self.cached(options.maximum_age) {
            debug!("Using cached position");
            return Ok(position);
        }

        let position = tokio::time::timeout(options.timeout, self.lookup())
            .await
            .map_err(|_| GeolocationError::Timeout)??;

        *self.last_fix.lock() = Some((Instant::now(), position));
        Ok(position)
    }
}

/// Always answers with the configured home position.
#[derive(Debug, Clone, Copy)]
pub struct FixedGeolocator(pub Position);

#[async_trait]
impl Geolocator for FixedGeolocator {
    async fn current_position(&self, _options: &PositionOptions) -> Result<Position, GeolocationError> {
        Ok(self.0)
    }
}

/// Answers every request with the same error: geolocation switched off in
/// config, or no way to look a position up.
#[derive(Debug, Clone)]
pub struct UnavailableGeolocator(pub GeolocationError);

#[async_trait]
impl Geolocator for UnavailableGeolocator {
    async fn current_position(&self, _options: &PositionOptions) -> Result<Position, GeolocationError> {
        Err(self.0.clone())
    }
}

pub fn geolocator_from_config(config: &Config, http: &Client) -> Box<dyn Geolocator> {
    let geo = &config.geolocation;

    if !geo.enabled {
        return Box::new(UnavailableGeolocator(GeolocationError::PermissionDenied));
    }

    match geo.home {
        Some(home) => Box::new(FixedGeolocator(Position {
            latitude: home.latitude,
            longitude: home.longitude,
            accuracy_meters: None,
        })),
        None if config.endpoints.ip_location.trim().is_empty() => {
            Box::new(UnavailableGeolocator(GeolocationError::Unsupported))
        }
        None => Box::new(IpGeolocator::new(http.clone(), &config.endpoints.ip_location)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unavailable_repeats_its_error() {
        let geolocator = UnavailableGeolocator(GeolocationError::PermissionDenied);
        let err = geolocator.current_position(&PositionOptions::default()).await.unwrap_err();

        assert_eq!(err, GeolocationError::PermissionDenied);
        assert!(err.user_message().contains("denied"));
    }

    #[tokio::test]
    async fn config_picks_geolocator() {
        let http = Client::new();
        let options = PositionOptions::default();

        let mut cfg = Config::default();
        cfg.set_home(16.48, 80.62).unwrap();
        let position = geolocator_from_config(&cfg, &http)
            .current_position(&options)
            .await
            .unwrap();
        assert_eq!(position.latitude, 16.48);

        cfg.geolocation.enabled = false;
        let err = geolocator_from_config(&cfg, &http)
            .current_position(&options)
            .await
            .unwrap_err();
        assert_eq!(err, GeolocationError::PermissionDenied);

        cfg.geolocation.enabled = true;
        cfg.geolocation.home = None;
        cfg.endpoints.ip_location = String::new();
        let err = geolocator_from_config(&cfg, &http)
            .current_position(&options)
            .await
            .unwrap_err();
        assert_eq!(err, GeolocationError::Unsupported);
    }

    #[test]
    fn every_error_has_a_distinct_message() {
        let errors = [
            GeolocationError::PermissionDenied,
            GeolocationError::PositionUnavailable("x".into()),
            GeolocationError::Timeout,
            GeolocationError::Unsupported,
        ];

        let mut messages: Vec<_> = errors.iter().map(GeolocationError::user_message).collect();
        messages.sort_unstable();
        messages.dedup();
        assert_eq!(messages.len(), errors.len());
    }
}
