//! Core library for the `weatherdash` terminal dashboard.
//!
//! This crate defines:
//! - Location search: built-in gazetteer, geocoding fallback chain, reverse geocoding
//! - Weather fetching and normalization into a fixed set of conditions
//! - Fallback metrics and a synthetic forecast for gaps in provider data
//! - Session state (recent searches, favorites) and geolocation
//!
//! It is used by `weatherdash-cli`, but can also be reused by other front ends.

pub mod conditions;
pub mod config;
pub mod forecast;
pub mod gazetteer;
pub mod geocode;
pub mod geolocation;
pub mod http;
pub mod metrics;
pub mod model;
pub mod normalize;
pub mod provider;
pub mod resolver;
pub mod service;
pub mod session;
pub mod tips;

pub use config::Config;
pub use geocode::{Geocoder, GeocoderId, ReverseGeocoder};
pub use geolocation::{GeolocationError, Geolocator, Position, PositionOptions};
pub use model::{Condition, CurrentWeather, ForecastDay, Location, WeatherSource};
pub use provider::WeatherProvider;
pub use resolver::LocationResolver;
pub use service::WeatherService;
pub use session::Session;
