//! Turn a provider payload into a complete [`CurrentWeather`] record.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use rand::Rng;
use tracing::debug;

use crate::{
    conditions::from_wmo_code,
    forecast::{FORECAST_DAYS, synthetic_forecast},
    metrics::{self, round_half_up},
    model::{CurrentWeather, ForecastDay, Location, WeatherSource},
};

const DEFAULT_HUMIDITY: f64 = 50.0;

/// Provider-neutral payload. Anything optional here is filled in by
/// [`normalize`].
#[derive(Debug, Clone, PartialEq)]
pub struct RawWeather {
    pub temperature: f64,
    pub wind_speed: f64,
    pub weather_code: i64,
    /// Observation time on the location's local clock.
    pub observed_at: NaiveDateTime,
    pub humidity: Option<f64>,
    pub feels_like: Option<f64>,
    pub visibility_km: Option<f64>,
    pub pressure: Option<f64>,
    pub uv_index: Option<f64>,
    pub air_quality: Option<f64>,
    pub sunrise: Option<NaiveTime>,
    pub sunset: Option<NaiveTime>,
    pub forecast: Vec<RawForecastDay>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawForecastDay {
    pub date: NaiveDate,
    pub temperature_max: f64,
    pub temperature_min: f64,
    pub weather_code: Option<i64>,
    pub wind_speed_max: Option<f64>,
}

fn default_time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default()
}

fn percent(value: f64) -> u8 {
    round_half_up(value).clamp(0, 100) as u8
}

fn non_negative(value: f64) -> u32 {
    round_half_up(value).max(0) as u32
}

/// Provider days are used only when they form a full five-day run starting
/// tomorrow; otherwise the caller falls back to synthetic days.
fn provider_forecast<R: Rng + ?Sized>(
    raw: &RawWeather,
    today: NaiveDate,
    humidity: f64,
    rng: &mut R,
) -> Option<Vec<ForecastDay>> {
    if raw.forecast.len() != FORECAST_DAYS {
        return None;
    }

    let consecutive = raw
        .forecast
        .iter()
        .zip(1..)
        .all(|(day, offset)| day.date == today + Duration::days(offset));
    if !consecutive {
        return None;
    }

    let days = raw
        .forecast
        .iter()
        .map(|day| {
            let high = round_half_up(day.temperature_max);
            let low = round_half_up(day.temperature_min);
            let temperature = round_half_up(f64::from(high + low) / 2.0);
            let (condition, _) = from_wmo_code(day.weather_code.unwrap_or(raw.weather_code));

            ForecastDay {
                date: day.date,
                label: ForecastDay::label_for(day.date),
                temperature,
                condition,
                wind_speed: round_half_up(day.wind_speed_max.unwrap_or(raw.wind_speed)),
                humidity: percent(humidity + rng.gen_range(-10.0..10.0)),
            }
        })
        .collect();

    Some(days)
}

/// Build the dashboard record for `location` from `raw`, deriving any metric
/// the provider left out.
pub fn normalize<R: Rng + ?Sized>(raw: &RawWeather, location: &Location, rng: &mut R) -> CurrentWeather {
    let (condition, description) = from_wmo_code(raw.weather_code);

    let temperature = round_half_up(raw.temperature);
    let humidity = raw.humidity.unwrap_or(DEFAULT_HUMIDITY);
    let today = raw.observed_at.date();

    let feels_like = raw
        .feels_like
        .map(round_half_up)
        .unwrap_or_else(|| temperature + round_half_up((humidity - 50.0) / 10.0));

    let visibility = raw
        .visibility_km
        .map(non_negative)
        .unwrap_or_else(|| (20 - round_half_up(humidity / 10.0)).max(5) as u32);

    let pressure = match raw.pressure {
        Some(p) => non_negative(p),
        None => metrics::atmospheric_pressure(condition, rng),
    };

    let uv_index = match raw.uv_index {
        Some(uv) => non_negative(uv).min(u32::from(u8::MAX)) as u8,
        None => metrics::uv_index(raw.observed_at.hour(), rng),
    };

    let air_quality = match raw.air_quality {
        Some(aqi) => non_negative(aqi),
        None => metrics::air_quality(location.latitude, location.longitude, rng),
    };

    let forecast = provider_forecast(raw, today, humidity, rng).unwrap_or_else(|| {
        debug!(
            "Provider gave {} forecast days for {}, generating synthetic forecast",
            raw.forecast.len(),
            location.name
        );
        synthetic_forecast(today, temperature, condition, percent(humidity), rng)
    });

    CurrentWeather {
        location: location.name.clone(),
        country: location.country.clone(),
        temperature,
        feels_like,
        condition,
        description: description.to_string(),
        humidity: percent(humidity),
        wind_speed: round_half_up(raw.wind_speed),
        visibility,
        sunrise: raw.sunrise.unwrap_or_else(|| default_time(6, 30)),
        sunset: raw.sunset.unwrap_or_else(|| default_time(18, 30)),
        pressure,
        uv_index,
        air_quality,
        dew_point: metrics::dew_point(f64::from(temperature), humidity),
        forecast,
        source: WeatherSource::Live,
    }
}
