//! Built-in list of places searched before any network geocoding.

use crate::model::Location;

/// Maximum number of suggestions returned by any search.
pub const MAX_RESULTS: usize = 5;

struct Place {
    name: &'static str,
    country: &'static str,
    state: Option<&'static str>,
    latitude: f64,
    longitude: f64,
}

const fn place(
    name: &'static str,
    country: &'static str,
    state: Option<&'static str>,
    latitude: f64,
    longitude: f64,
) -> Place {
    Place { name, country, state, latitude, longitude }
}

const PLACES: &[Place] = &[
    // Major cities
    place("London", "United Kingdom", None, 51.5074, -0.1278),
    place("New York", "United States", Some("New York"), 40.7128, -74.0060),
    place("Tokyo", "Japan", None, 35.6762, 139.6503),
    place("Paris", "France", None, 48.8566, 2.3522),
    place("Berlin", "Germany", None, 52.5200, 13.4050),
    place("Mumbai", "India", Some("Maharashtra"), 19.0760, 72.8777),
    place("Delhi", "India", None, 28.7041, 77.1025),
    place("Bangalore", "India", Some("Karnataka"), 12.9716, 77.5946),
    place("Chennai", "India", Some("Tamil Nadu"), 13.0827, 80.2707),
    place("Hyderabad", "India", Some("Telangana"), 17.3850, 78.4867),
    place("Pune", "India", Some("Maharashtra"), 18.5204, 73.8567),
    place("Kolkata", "India", Some("West Bengal"), 22.5726, 88.3639),
    place("Dubai", "United Arab Emirates", None, 25.2048, 55.2708),
    place("Sydney", "Australia", None, -33.8688, 151.2093),
    place("Toronto", "Canada", None, 43.6532, -79.3832),
    place("Singapore", "Singapore", None, 1.3521, 103.8198),
    // Andhra Pradesh towns
    place("Tadepalli", "India", Some("Andhra Pradesh"), 16.4802, 80.6170),
    place("Tadepalligudem", "India", Some("Andhra Pradesh"), 16.8140, 81.5273),
    place("Guntur", "India", Some("Andhra Pradesh"), 16.3067, 80.4365),
    place("Vijayawada", "India", Some("Andhra Pradesh"), 16.5062, 80.6480),
    place("Visakhapatnam", "India", Some("Andhra Pradesh"), 17.6868, 83.2185),
    place("Tirupati", "India", Some("Andhra Pradesh"), 13.6288, 79.4192),
    place("Kurnool", "India", Some("Andhra Pradesh"), 15.8281, 78.0373),
    place("Nellore", "India", Some("Andhra Pradesh"), 14.4426, 79.9865),
    place("Kakinada", "India", Some("Andhra Pradesh"), 16.9891, 82.2475),
    place("Rajahmundry", "India", Some("Andhra Pradesh"), 17.0005, 81.8040),
    // More global cities
    place("Los Angeles", "United States", Some("California"), 34.0522, -118.2437),
    place("Chicago", "United States", Some("Illinois"), 41.8781, -87.6298),
    place("Miami", "United States", Some("Florida"), 25.7617, -80.1918),
    place("San Francisco", "United States", Some("California"), 37.7749, -122.4194),
    place("Seattle", "United States", Some("Washington"), 47.6062, -122.3321),
];

impl Place {
    fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.country.to_lowercase().contains(needle)
            || self.state.is_some_and(|s| s.to_lowercase().contains(needle))
    }

    fn to_location(&self) -> Location {
        Location {
            name: self.name.to_string(),
            country: self.country.to_string(),
            state: self.state.map(str::to_string),
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// Case-insensitive substring search over name, country and state.
/// Results keep gazetteer order and are capped at [`MAX_RESULTS`].
pub fn search(query: &str) -> Vec<Location> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    PLACES
        .iter()
        .filter(|p| p.matches(&needle))
        .take(MAX_RESULTS)
        .map(Place::to_location)
        .collect()
}

/// Every built-in place, in gazetteer order.
pub fn all() -> Vec<Location> {
    PLACES.iter().map(Place::to_location).collect()
}
