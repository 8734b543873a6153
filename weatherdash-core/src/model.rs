use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name given to positions obtained from geolocation until reverse geocoding
/// replaces it with a real place name.
pub const CURRENT_LOCATION_NAME: &str = "Your Current Location";

/// Two locations closer than this (in degrees, on both axes) are the same place.
pub const PROXIMITY_DEGREES: f64 = 0.01;

/// A resolved place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(name: impl Into<String>, country: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            country: country.into(),
            state: None,
            latitude,
            longitude,
        }
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Placeholder location for a geolocated position.
    pub fn current(latitude: f64, longitude: f64) -> Self {
        Self::new(CURRENT_LOCATION_NAME, "", latitude, longitude)
    }

    pub fn is_current(&self) -> bool {
        self.name == CURRENT_LOCATION_NAME
    }

    /// True when both coordinates differ by less than [`PROXIMITY_DEGREES`].
    pub fn is_near(&self, other: &Location) -> bool {
        (self.latitude - other.latitude).abs() < PROXIMITY_DEGREES
            && (self.longitude - other.longitude).abs() < PROXIMITY_DEGREES
    }

    /// "Name, State, Country", skipping empty parts.
    pub fn display_name(&self) -> String {
        [Some(self.name.as_str()), self.state.as_deref(), Some(self.country.as_str())]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// The closed set of condition labels shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Condition {
    #[default]
    Clear,
    Sunny,
    #[serde(rename = "Partly Cloudy")]
    PartlyCloudy,
    Cloudy,
    #[serde(rename = "Light Rain")]
    LightRain,
    Rain,
    Thunderstorm,
    Foggy,
}

impl Condition {
    pub fn label(&self) -> &'static str {
        match self {
            Condition::Clear => "Clear",
            Condition::Sunny => "Sunny",
            Condition::PartlyCloudy => "Partly Cloudy",
            Condition::Cloudy => "Cloudy",
            Condition::LightRain => "Light Rain",
            Condition::Rain => "Rain",
            Condition::Thunderstorm => "Thunderstorm",
            Condition::Foggy => "Foggy",
        }
    }

    pub const fn all() -> &'static [Condition] {
        &[
            Condition::Clear,
            Condition::Sunny,
            Condition::PartlyCloudy,
            Condition::Cloudy,
            Condition::LightRain,
            Condition::Rain,
            Condition::Thunderstorm,
            Condition::Foggy,
        ]
    }

    /// Rain or storm.
    pub fn is_wet(&self) -> bool {
        matches!(self, Condition::LightRain | Condition::Rain | Condition::Thunderstorm)
    }

    pub fn is_clear(&self) -> bool {
        matches!(self, Condition::Clear | Condition::Sunny)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where a [`CurrentWeather`] record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherSource {
    Live,
    Synthetic,
}

/// Fully populated current conditions for one location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub location: String,
    pub country: String,
    pub temperature: i32,
    pub feels_like: i32,
    pub condition: Condition,
    pub description: String,
    pub humidity: u8,
    pub wind_speed: i32,
    pub visibility: u32,
    pub sunrise: NaiveTime,
    pub sunset: NaiveTime,
    pub pressure: u32,
    pub uv_index: u8,
    pub air_quality: u32,
    pub dew_point: i32,
    pub forecast: Vec<ForecastDay>,
    pub source: WeatherSource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    /// Short form such as "Fri, Oct 17".
    pub label: String,
    pub temperature: i32,
    pub condition: Condition,
    pub wind_speed: i32,
    pub humidity: u8,
}

impl ForecastDay {
    pub fn label_for(date: NaiveDate) -> String {
        date.format("%a, %b %-d").to_string()
    }
}
