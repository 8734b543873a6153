use std::fmt;

use weatherdash_core::{
    CurrentWeather, Location, WeatherSource,
    metrics::{AirQualityLevel, UvLevel},
    tips::tips,
};

/// Plain-text dashboard for one location.
pub struct Dashboard<'a>(pub &'a CurrentWeather);

impl fmt::Display for Dashboard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let w = self.0;

        if w.country.is_empty() {
            writeln!(f, "{}", w.location)?;
        } else {
            writeln!(f, "{}, {}", w.location, w.country)?;
        }
        writeln!(
            f,
            "  {}°C  {} ({})  feels like {}°C",
            w.temperature, w.condition, w.description, w.feels_like
        )?;
        if w.source == WeatherSource::Synthetic {
            writeln!(f, "  (live data unavailable; showing estimated conditions)")?;
        }
        writeln!(f)?;

        writeln!(f, "  Humidity     {:>5}%", w.humidity)?;
        writeln!(f, "  Wind         {:>5} km/h", w.wind_speed)?;
        writeln!(f, "  Visibility   {:>5} km", w.visibility)?;
        writeln!(f, "  Pressure     {:>5} hPa", w.pressure)?;
        writeln!(f, "  Dew point    {:>5}°C", w.dew_point)?;
        writeln!(f, "  UV index     {:>5}  {}", w.uv_index, UvLevel::from_index(w.uv_index))?;
        writeln!(
            f,
            "  Air quality  {:>5}  {}",
            w.air_quality,
            AirQualityLevel::from_aqi(w.air_quality)
        )?;
        writeln!(
            f,
            "  Sunrise {}  Sunset {}",
            w.sunrise.format("%I:%M %p"),
            w.sunset.format("%I:%M %p")
        )?;

        writeln!(f)?;
        writeln!(f, "  5-day forecast")?;
        for day in &w.forecast {
            writeln!(
                f,
                "    {:<12} {:>3}°C  {:<14} {:>3} km/h  {:>3}%",
                day.label,
                day.temperature,
                day.condition.label(),
                day.wind_speed,
                day.humidity
            )?;
        }

        writeln!(f)?;
        writeln!(f, "  Tips")?;
        for tip in tips(w) {
            writeln!(f, "    {}: {}", tip.title, tip.description)?;
        }

        Ok(())
    }
}

/// One line per suggestion, numbered from 1.
pub fn suggestions(locations: &[Location]) -> String {
    locations
        .iter()
        .enumerate()
        .map(|(i, loc)| {
            format!(
                "{:>2}. {}  ({:.4}, {:.4})\n",
                i + 1,
                loc.display_name(),
                loc.latitude,
                loc.longitude
            )
        })
        .collect()
}
