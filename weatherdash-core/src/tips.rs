use crate::model::CurrentWeather;

const MAX_TIPS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tip {
    pub title: &'static str,
    pub description: &'static str,
}

const fn tip(title: &'static str, description: &'static str) -> Tip {
    Tip { title, description }
}

/// Practical advice for the current conditions, most relevant first.
pub fn tips(weather: &CurrentWeather) -> Vec<Tip> {
    let t = weather.temperature;
    let rainy = weather.condition.label().to_lowercase().contains("rain");
    let mut out = Vec::new();

    if t < 10 {
        out.push(tip("Dress Warmly", "Wear layers, gloves, and a warm coat. Don't forget a hat!"));
    } else if t > 30 {
        out.push(tip("Stay Cool", "Wear light, breathable clothing and stay hydrated."));
    } else if t > 20 {
        out.push(tip("Perfect Weather", "Light clothing is perfect for today's temperature."));
    }

    if rainy {
        out.push(tip("Rain Expected", "Don't forget your umbrella or rain jacket!"));
    }
    if weather.uv_index > 6 {
        out.push(tip("High UV Index", "Use sunscreen, wear a hat, and seek shade during peak hours."));
    }
    if weather.humidity > 80 {
        out.push(tip("High Humidity", "Stay hydrated and avoid strenuous outdoor activities."));
    }
    if weather.wind_speed > 25 {
        out.push(tip("Windy Conditions", "Drive carefully and secure loose outdoor items."));
    }
    if (20..=25).contains(&t) && !rainy {
        out.push(tip(
            "Great for Outdoor Activities",
            "Perfect weather for walking, cycling, or outdoor sports!",
        ));
    }

    out.truncate(MAX_TIPS);

    if out.is_empty() {
        out.push(tip("Enjoy Your Day", "Have a wonderful day with today's weather!"));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{forecast::synthetic_weather, model::Condition, model::Location};
    use chrono::NaiveDate;
    use rand::{SeedableRng, rngs::StdRng};

    fn base() -> CurrentWeather {
        let mut rng = StdRng::seed_from_u64(0);
        let now = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap().and_hms_opt(9, 0, 0).unwrap();
        let mut w = synthetic_weather(&Location::new("X", "Y", 45.0, 10.0), now, &mut rng);
        w.temperature = 15;
        w.condition = Condition::Cloudy;
        w.uv_index = 2;
        w.humidity = 50;
        w.wind_speed = 10;
        w
    }

    fn titles(w: &CurrentWeather) -> Vec<&'static str> {
        tips(w).into_iter().map(|t| t.title).collect()
    }

    #[test]
    fn mild_day_gets_default_tip() {
        assert_eq!(titles(&base()), ["Enjoy Your Day"]);
    }

    #[test]
    fn cold_rainy_day() {
        let mut w = base();
        w.temperature = 4;
        w.condition = Condition::LightRain;

        assert_eq!(titles(&w), ["Dress Warmly", "Rain Expected"]);
    }

    #[test]
    fn outdoor_day() {
        let mut w = base();
        w.temperature = 22;
        w.condition = Condition::Sunny;

        assert_eq!(titles(&w), ["Perfect Weather", "Great for Outdoor Activities"]);
    }

    #[test]
    fn capped_at_three() {
        let mut w = base();
        w.temperature = 35;
        w.condition = Condition::Thunderstorm;
        w.uv_index = 9;
        w.humidity = 90;
        w.wind_speed = 40;

        // Thunderstorm isn't rain, so the umbrella tip is absent.
        assert_eq!(titles(&w), ["Stay Cool", "High UV Index", "High Humidity"]);
    }
}
