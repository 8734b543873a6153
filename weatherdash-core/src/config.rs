use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

use crate::{geocode::GeocoderId, geolocation::PositionOptions};

/// Which geocoding services to try, and in what order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocodingConfig {
    /// Provider ids in priority order, e.g. ["bigdatacloud", "open-meteo"].
    pub providers: Vec<String>,

    /// Optional ISO country code used to bias autocomplete results.
    pub country_code: Option<String>,
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            providers: vec![
                GeocoderId::BigDataCloud.to_string(),
                GeocoderId::OpenMeteo.to_string(),
            ],
            country_code: None,
        }
    }
}

/// Base URLs of the external services.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub weather: String,
    pub bigdatacloud: String,
    pub open_meteo_geocoding: String,
    pub nominatim: String,
    pub ip_location: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            weather: "https://api.open-meteo.com".to_string(),
            bigdatacloud: "https://api.bigdatacloud.net".to_string(),
            open_meteo_geocoding: "https://geocoding-api.open-meteo.com".to_string(),
            nominatim: "https://nominatim.openstreetmap.org".to_string(),
            ip_location: "http://ip-api.com".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HomePosition {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeolocationConfig {
    /// When false, "use my location" is refused as if permission was denied.
    pub enabled: bool,
    pub high_accuracy: bool,
    pub timeout_secs: u64,
    pub maximum_age_secs: u64,

    /// Fixed position used instead of IP lookup.
    pub home: Option<HomePosition>,
}

impl Default for GeolocationConfig {
    fn default() -> Self {
        let defaults = PositionOptions::default();
        Self {
            enabled: true,
            high_accuracy: defaults.high_accuracy,
            timeout_secs: defaults.timeout.as_secs(),
            maximum_age_secs: defaults.maximum_age.as_secs(),
            home: None,
        }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// [geocoding]
/// providers = ["bigdatacloud", "open-meteo"]
/// country_code = "IN"
///
/// [geolocation]
/// timeout_secs = 10
/// home = { latitude = 16.48, longitude = 80.62 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub geocoding: GeocodingConfig,
    pub endpoints: Endpoints,
    pub geolocation: GeolocationConfig,
}

impl Config {
    /// Geocoders in priority order. Unknown ids are an error so typos in the
    /// config file don't silently disable a provider.
    pub fn geocoder_ids(&self) -> Result<Vec<GeocoderId>> {
        self.geocoding
            .providers
            .iter()
            .map(|s| GeocoderId::try_from(s.as_str()))
            .collect()
    }

    pub fn set_geocoder_order(&mut self, ids: &[GeocoderId]) {
        self.geocoding.providers = ids.iter().map(ToString::to_string).collect();
    }

    /// Store a country bias; blank input clears it.
    pub fn set_country_code(&mut self, code: &str) {
        let code = code.trim();
        self.geocoding.country_code = if code.is_empty() { None } else { Some(code.to_uppercase()) };
    }

    pub fn country_code(&self) -> Option<&str> {
        self.geocoding.country_code.as_deref()
    }

    pub fn set_home(&mut self, latitude: f64, longitude: f64) -> Result<()> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(anyhow!(
                "Home position ({latitude}, {longitude}) is out of range.\n\
                 Latitude must be within -90..90 and longitude within -180..180."
            ));
        }

        self.geolocation.home = Some(HomePosition { latitude, longitude });
        Ok(())
    }

    pub fn position_options(&self) -> PositionOptions {
        PositionOptions {
            high_accuracy: self.geolocation.high_accuracy,
            timeout: Duration::from_secs(self.geolocation.timeout_secs),
            maximum_age: Duration::from_secs(self.geolocation.maximum_age_secs),
        }
    }

    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(path)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weatherdash", "weatherdash")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
