//! Synthetic weather used when the provider gives us nothing.
//!
//! This is filler for the dashboard, not a forecasting model. Temperatures
//! take a bounded random walk and conditions lean towards repeating the
//! previous day.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use rand::Rng;

use crate::{
    metrics::{self, round_half_up},
    model::{Condition, CurrentWeather, ForecastDay, Location, WeatherSource},
};

/// Number of days in every forecast.
pub const FORECAST_DAYS: usize = 5;

pub const MIN_FORECAST_TEMP: i32 = 5;
pub const MAX_FORECAST_TEMP: i32 = 45;

const FORECAST_POOL: [Condition; 5] = [
    Condition::Sunny,
    Condition::PartlyCloudy,
    Condition::Cloudy,
    Condition::LightRain,
    Condition::Clear,
];

const WINTER_POOL: [Condition; 4] = [
    Condition::Cloudy,
    Condition::LightRain,
    Condition::PartlyCloudy,
    Condition::Clear,
];

const MILD_POOL: [Condition; 4] = [
    Condition::Sunny,
    Condition::PartlyCloudy,
    Condition::Clear,
    Condition::LightRain,
];

fn pick<R: Rng + ?Sized>(pool: &[Condition], rng: &mut R) -> Condition {
    pool[rng.gen_range(0..pool.len())]
}

fn next_condition<R: Rng + ?Sized>(prev: Condition, rng: &mut R) -> Condition {
    if prev.label().contains("Rain") && rng.gen_range(0.0..1.0) > 0.6 {
        if rng.gen_bool(0.5) { Condition::Cloudy } else { Condition::LightRain }
    } else if prev == Condition::Sunny && rng.gen_range(0.0..1.0) > 0.7 {
        if rng.gen_bool(0.5) { Condition::Sunny } else { Condition::PartlyCloudy }
    } else {
        pick(&FORECAST_POOL, rng)
    }
}

/// Five days starting the day after `today`.
pub fn synthetic_forecast<R: Rng + ?Sized>(
    today: NaiveDate,
    temperature: i32,
    condition: Condition,
    humidity: u8,
    rng: &mut R,
) -> Vec<ForecastDay> {
    let mut base_temp = temperature;
    let mut prev = condition;

    (1..=FORECAST_DAYS as i64)
        .map(|offset| {
            base_temp =
                (base_temp + rng.gen_range(-5..=4)).clamp(MIN_FORECAST_TEMP, MAX_FORECAST_TEMP);

            let condition = next_condition(prev, rng);
            prev = condition;

            let date = today + Duration::days(offset);
            let humidity =
                round_half_up(f64::from(humidity) + rng.gen_range(-10.0..10.0)).clamp(0, 100) as u8;

            ForecastDay {
                date,
                label: ForecastDay::label_for(date),
                temperature: base_temp,
                condition,
                wind_speed: rng.gen_range(5..=19),
                humidity,
            }
        })
        .collect()
}

fn seasonal_base_temp(latitude: f64, month: u32) -> i32 {
    let winter = matches!(month, 12 | 1 | 2);
    let summer = (6..=9).contains(&month);

    if latitude > 40.0 {
        if winter { 5 } else if summer { 25 } else { 15 }
    } else if latitude < 20.0 {
        if winter { 15 } else if summer { 35 } else { 25 }
    } else {
        20
    }
}

/// A complete, plausible-looking record for `location` at local time `now`.
pub fn synthetic_weather<R: Rng + ?Sized>(
    location: &Location,
    now: NaiveDateTime,
    rng: &mut R,
) -> CurrentWeather {
    let month = now.month();
    let pool: &[Condition] = if matches!(month, 12 | 1 | 2) { &WINTER_POOL } else { &MILD_POOL };

    let condition = pick(pool, rng);
    let temperature = seasonal_base_temp(location.latitude, month) + rng.gen_range(-5..=4);
    let humidity: u8 = rng.gen_range(40..=79);

    let country = if location.country.is_empty() {
        "Unknown".to_string()
    } else {
        location.country.clone()
    };

    CurrentWeather {
        location: location.name.clone(),
        country,
        temperature,
        feels_like: temperature + rng.gen_range(-3..=2),
        condition,
        description: format!("{condition} weather"),
        humidity,
        wind_speed: rng.gen_range(5..=19),
        visibility: rng.gen_range(10..=19),
        sunrise: NaiveTime::from_hms_opt(6, 30, 0).unwrap_or_default(),
        sunset: NaiveTime::from_hms_opt(18, 30, 0).unwrap_or_default(),
        pressure: rng.gen_range(990..1040),
        uv_index: metrics::uv_index(now.hour(), rng),
        air_quality: metrics::air_quality(location.latitude, location.longitude, rng),
        dew_point: metrics::dew_point(f64::from(temperature), f64::from(humidity)),
        forecast: synthetic_forecast(now.date(), temperature, condition, humidity, rng),
        source: WeatherSource::Synthetic,
    }
}
