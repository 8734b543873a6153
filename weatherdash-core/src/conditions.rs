//! Mapping from provider weather codes to dashboard conditions.

use crate::model::Condition;

/// Map a WMO weather code (as used by Open-Meteo) to a condition and a short
/// description. Unknown codes are reported as clear weather.
/// See: https://open-meteo.com/en/docs#weathervariables
pub fn from_wmo_code(code: i64) -> (Condition, &'static str) {
    match code {
        0 => (Condition::Clear, "Clear sky"),
        1 => (Condition::PartlyCloudy, "Mainly clear"),
        2 => (Condition::PartlyCloudy, "Partly cloudy"),
        3 => (Condition::Cloudy, "Overcast"),
        45 => (Condition::Foggy, "Fog"),
        48 => (Condition::Foggy, "Depositing rime fog"),
        51 => (Condition::LightRain, "Light drizzle"),
        53 => (Condition::LightRain, "Moderate drizzle"),
        55 => (Condition::LightRain, "Dense drizzle"),
        61 => (Condition::LightRain, "Slight rain"),
        63 => (Condition::Rain, "Moderate rain"),
        65 => (Condition::Rain, "Heavy rain"),
        80 => (Condition::Rain, "Slight rain showers"),
        81 => (Condition::Rain, "Moderate rain showers"),
        82 => (Condition::Rain, "Violent rain showers"),
        95 => (Condition::Thunderstorm, "Slight thunderstorm"),
        96 => (Condition::Thunderstorm, "Thunderstorm with slight hail"),
        99 => (Condition::Thunderstorm, "Thunderstorm with heavy hail"),
        _ => (Condition::Clear, "Clear weather"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slight_rain_is_light_rain() {
        assert_eq!(from_wmo_code(61), (Condition::LightRain, "Slight rain"));
    }

    #[test]
    fn code_95_is_thunderstorm() {
        assert_eq!(from_wmo_code(95), (Condition::Thunderstorm, "Slight thunderstorm"));
    }

    #[test]
    fn unmapped_code_falls_back_to_clear() {
        assert_eq!(from_wmo_code(12345), (Condition::Clear, "Clear weather"));
        assert_eq!(from_wmo_code(-1), (Condition::Clear, "Clear weather"));
    }

    #[test]
    fn drizzle_and_fog_codes() {
        assert_eq!(from_wmo_code(53).0, Condition::LightRain);
        assert_eq!(from_wmo_code(48).0, Condition::Foggy);
        assert_eq!(from_wmo_code(3), (Condition::Cloudy, "Overcast"));
    }
}
