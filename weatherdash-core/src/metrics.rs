//! Secondary metrics filled in when the provider leaves them out.
//!
//! Everything random here is cosmetic filler. Callers pass the generator so
//! tests can seed it; production code uses an entropy-seeded one.

use rand::Rng;
use std::fmt;

use crate::model::Condition;

/// Standard sea-level pressure in hPa.
pub const SEA_LEVEL_PRESSURE: f64 = 1013.0;

/// Round to the nearest integer with halves going up, so `-0.5` becomes `0`
/// and `-3.5` becomes `-3`. Every derived whole-number value uses this.
pub fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

pub fn atmospheric_pressure<R: Rng + ?Sized>(condition: Condition, rng: &mut R) -> u32 {
    let mut pressure = SEA_LEVEL_PRESSURE;

    if condition.is_wet() {
        pressure -= 15.0 + rng.gen_range(0.0..20.0);
    } else if condition.is_clear() {
        pressure += 5.0 + rng.gen_range(0.0..10.0);
    }

    round_half_up(pressure) as u32
}

/// UV index for a local hour of day (0-23).
pub fn uv_index<R: Rng + ?Sized>(hour: u32, rng: &mut R) -> u8 {
    if !(6..=18).contains(&hour) {
        0
    } else if !(10..=16).contains(&hour) {
        rng.gen_range(1..=3)
    } else {
        rng.gen_range(3..=10)
    }
}

/// Rough air quality index. Anything within 30° of the equator and 100° of
/// the prime meridian is treated as "urban" and gets a worse range.
pub fn air_quality<R: Rng + ?Sized>(latitude: f64, longitude: f64, rng: &mut R) -> u32 {
    let urban = latitude.abs() < 30.0 && longitude.abs() < 100.0;

    if urban {
        rng.gen_range(50..150)
    } else {
        rng.gen_range(20..70)
    }
}

/// Simplified dew point: `t - (100 - rh) / 5`.
pub fn dew_point(temperature: f64, humidity: f64) -> i32 {
    round_half_up(temperature - (100.0 - humidity) / 5.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AirQualityLevel {
    Good,
    Moderate,
    UnhealthyForSensitive,
    Unhealthy,
}

impl AirQualityLevel {
    pub fn from_aqi(aqi: u32) -> Self {
        match aqi {
            0..=50 => Self::Good,
            51..=100 => Self::Moderate,
            101..=150 => Self::UnhealthyForSensitive,
            _ => Self::Unhealthy,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::UnhealthyForSensitive => "Unhealthy for Sensitive Groups",
            Self::Unhealthy => "Unhealthy",
        }
    }
}

impl fmt::Display for AirQualityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UvLevel {
    Low,
    Moderate,
    High,
    VeryHigh,
    Extreme,
}

impl UvLevel {
    pub fn from_index(uv: u8) -> Self {
        match uv {
            0..=2 => Self::Low,
            3..=5 => Self::Moderate,
            6..=7 => Self::High,
            8..=10 => Self::VeryHigh,
            _ => Self::Extreme,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
            Self::VeryHigh => "Very High",
            Self::Extreme => "Extreme",
        }
    }
}

impl fmt::Display for UvLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
