use anyhow::Result;
use async_trait::async_trait;
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{
    forecast::FORECAST_DAYS,
    http::{base_url, get_json},
    model::Location,
    normalize::{RawForecastDay, RawWeather},
};

use super::WeatherProvider;

const HOURLY: &str = "temperature_2m,relative_humidity_2m,wind_speed_10m,surface_pressure,uv_index";
const DAILY: &str =
    "temperature_2m_max,temperature_2m_min,sunrise,sunset,weathercode,wind_speed_10m_max";

/// Open-Meteo forecast API. Keyless; times come back in the location's own
/// timezone because we ask for `timezone=auto`.
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    http: Client,
    base_url: String,
}

impl OpenMeteoProvider {
    pub fn new(http: Client, endpoint: &str) -> Self {
        Self { http, base_url: base_url(endpoint) }
    }
}

#[derive(Debug, Deserialize)]
struct OmCurrent {
    temperature: f64,
    windspeed: f64,
    weathercode: i64,
    time: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OmHourly {
    relative_humidity_2m: Vec<Option<f64>>,
    surface_pressure: Vec<Option<f64>>,
    uv_index: Vec<Option<f64>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OmDaily {
    time: Vec<String>,
    temperature_2m_max: Vec<Option<f64>>,
    temperature_2m_min: Vec<Option<f64>>,
    sunrise: Vec<Option<String>>,
    sunset: Vec<Option<String>>,
    weathercode: Vec<Option<i64>>,
    wind_speed_10m_max: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct OmForecastResponse {
    current_weather: OmCurrent,
    #[serde(default)]
    hourly: OmHourly,
    #[serde(default)]
    daily: OmDaily,
}

fn parse_local(ts: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(ts, "%Y-%m-%dT%H:%M").ok()
}

fn at<T: Copy>(values: &[Option<T>], index: usize) -> Option<T> {
    values.get(index).copied().flatten()
}

fn time_of(values: &[Option<String>], index: usize) -> Option<NaiveTime> {
    values
        .get(index)
        .and_then(Option::as_deref)
        .and_then(parse_local)
        .map(|dt| dt.time())
}

impl OmForecastResponse {
    fn into_raw(self) -> RawWeather {
        let current = self.current_weather;

        let observed_at = current.time.as_deref().and_then(parse_local).unwrap_or_else(|| {
            debug!("Open-Meteo response had no usable current time, using local clock");
            Local::now().naive_local()
        });

        // Hourly arrays start at local midnight of today.
        let hour = observed_at.hour() as usize;
        let hourly = &self.hourly;
        let daily = &self.daily;

        let forecast = (1..=FORECAST_DAYS)
            .filter_map(|i| {
                let max = at(&daily.temperature_2m_max, i)?;
                let min = at(&daily.temperature_2m_min, i)?;
                let date = daily
                    .time
                    .get(i)
                    .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())?;

                Some(RawForecastDay {
                    date,
                    temperature_max: max,
                    temperature_min: min,
                    weather_code: at(&daily.weathercode, i),
                    wind_speed_max: at(&daily.wind_speed_10m_max, i),
                })
            })
            .collect();

        RawWeather {
            temperature: current.temperature,
            wind_speed: current.windspeed,
            weather_code: current.weathercode,
            observed_at,
            humidity: at(&hourly.relative_humidity_2m, hour),
            feels_like: None,
            visibility_km: None,
            pressure: at(&hourly.surface_pressure, hour),
            uv_index: at(&hourly.uv_index, hour),
            air_quality: None,
            sunrise: time_of(&daily.sunrise, 0),
            sunset: time_of(&daily.sunset, 0),
            forecast,
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    async fn fetch(&self, location: &Location) -> Result<RawWeather> {
        let url = format!("{}/v1/forecast", self.base_url);

        let request = self.http.get(url).query(&[
            ("latitude", location.latitude.to_string()),
            ("longitude", location.longitude.to_string()),
            ("current_weather", "true".to_string()),
            ("hourly", HOURLY.to_string()),
            ("daily", DAILY.to_string()),
            ("timezone", "auto".to_string()),
            ("forecast_days", (FORECAST_DAYS + 1).to_string()),
        ]);

        let parsed: OmForecastResponse = get_json(request, "Open-Meteo forecast").await?;

        debug!(
            "Open-Meteo returned code {} at {} for {}",
            parsed.current_weather.weathercode,
            parsed.current_weather.time.as_deref().unwrap_or("?"),
            location.name
        );

        Ok(parsed.into_raw())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> OmForecastResponse {
        let mut humidity = vec![Some(50.0); 24];
        humidity[13] = Some(72.0);
        let mut pressure = vec![Some(1000.0); 24];
        pressure[13] = Some(1008.4);

        serde_json::from_value(serde_json::json!({
            "current_weather": {
                "temperature": 29.4, "windspeed": 11.6, "weathercode": 61,
                "time": "2026-10-16T13:00"
            },
            "hourly": {
                "relative_humidity_2m": humidity,
                "surface_pressure": pressure
            },
            "daily": {
                "time": ["2026-10-16", "2026-10-17", "2026-10-18", "2026-10-19", "2026-10-20", "2026-10-21"],
                "temperature_2m_max": [31.0, 32.2, 30.0, null, 29.0, 28.6],
                "temperature_2m_min": [24.0, 23.9, 22.0, 22.0, 21.0, 20.1],
                "sunrise": ["2026-10-16T05:58", null],
                "sunset": ["2026-10-16T17:41", null],
                "weathercode": [61, 3, null, 95, 0, 1],
                "wind_speed_10m_max": [14.0, 18.2, 9.0, 10.0, 11.0, null]
            }
        }))
        .unwrap()
    }

    #[test]
    fn reads_hourly_values_at_current_hour() {
        let raw = sample().into_raw();

        assert_eq!(raw.observed_at.hour(), 13);
        assert_eq!(raw.humidity, Some(72.0));
        assert_eq!(raw.pressure, Some(1008.4));
        assert_eq!(raw.uv_index, None);
        assert_eq!(raw.weather_code, 61);
    }

    #[test]
    fn reads_sun_times_from_first_day() {
        let raw = sample().into_raw();

        assert_eq!(raw.sunrise, NaiveTime::from_hms_opt(5, 58, 0));
        assert_eq!(raw.sunset, NaiveTime::from_hms_opt(17, 41, 0));
    }

    #[test]
    fn forecast_skips_today_and_incomplete_days() {
        let raw = sample().into_raw();

        // Day 3 has no max temperature.
        assert_eq!(raw.forecast.len(), 4);
        assert_eq!(raw.forecast[0].date, NaiveDate::from_ymd_opt(2026, 10, 17).unwrap());
        assert_eq!(raw.forecast[0].weather_code, Some(3));
        assert_eq!(raw.forecast[1].weather_code, None);
        assert_eq!(raw.forecast[3].wind_speed_max, None);
    }

    #[test]
    fn minimal_payload_parses() {
        let parsed: OmForecastResponse = serde_json::from_str(
            r#"{"current_weather": {"temperature": 10.0, "windspeed": 3.0, "weathercode": 0}}"#,
        )
        .unwrap();

        let raw = parsed.into_raw();
        assert_eq!(raw.humidity, None);
        assert!(raw.forecast.is_empty());
    }
}
