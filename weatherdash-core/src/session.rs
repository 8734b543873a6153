//! Per-session view state: the weather on screen, recent searches and
//! favorite places. Lives in memory only.

use std::collections::VecDeque;

use crate::model::{CurrentWeather, Location};

/// Both lists keep at most this many entries.
pub const MAX_ENTRIES: usize = 5;

/// Recent search terms, most recent first, no exact duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchHistory(VecDeque<String>);

impl SearchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move `term` to the front, dropping the oldest entry past the limit.
    pub fn record(&mut self, term: &str) {
        let term = term.trim();
        if term.is_empty() {
            return;
        }

        self.0.retain(|existing| existing != term);
        self.0.push_front(term.to_string());
        self.0.truncate(MAX_ENTRIES);
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Favorite places, most recent first. Places within
/// [`crate::model::PROXIMITY_DEGREES`] of each other count as one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Favorites(VecDeque<Location>);

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false when the place is already a favorite (or is the
    /// geolocation placeholder) and nothing changed.
    pub fn add(&mut self, location: &Location) -> bool {
        if location.is_current() || self.contains(location) {
            return false;
        }

        self.0.push_front(location.clone());
        self.0.truncate(MAX_ENTRIES);
        true
    }

    pub fn contains(&self, location: &Location) -> bool {
        self.0.iter().any(|fav| fav.is_near(location))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Location> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    pub current: Option<CurrentWeather>,
    pub history: SearchHistory,
    pub favorites: Favorites,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// A search for `term` found `location` and its weather.
    pub fn record_lookup(&mut self, term: &str, location: &Location, weather: CurrentWeather) {
        self.history.record(term);
        self.favorites.add(location);
        self.current = Some(weather);
    }

    /// Weather for a picked suggestion or favorite; no search term involved.
    pub fn record_selection(&mut self, location: &Location, weather: CurrentWeather) {
        self.favorites.add(location);
        self.current = Some(weather);
    }

    pub fn record_current_location(&mut self, weather: CurrentWeather) {
        self.current = Some(weather);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{forecast::synthetic_weather, gazetteer};
    use chrono::NaiveDate;
    use rand::{SeedableRng, rngs::StdRng};

    fn weather_for(location: &Location) -> CurrentWeather {
        let mut rng = StdRng::seed_from_u64(0);
        let now = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap().and_hms_opt(12, 0, 0).unwrap();
        synthetic_weather(location, now, &mut rng)
    }

    #[test]
    fn history_moves_repeats_to_front() {
        let mut history = SearchHistory::new();
        for term in ["London", "Paris", "Tokyo"] {
            history.record(term);
        }
        history.record("London");

        assert_eq!(history.iter().collect::<Vec<_>>(), ["London", "Tokyo", "Paris"]);
    }

    #[test]
    fn history_is_bounded() {
        let mut history = SearchHistory::new();
        for i in 0..12 {
            history.record(&format!("term {i}"));
            history.record(&format!("term {}", i / 2));
        }

        assert_eq!(history.len(), MAX_ENTRIES);
        let mut terms: Vec<_> = history.iter().collect();
        terms.sort_unstable();
        terms.dedup();
        assert_eq!(terms.len(), MAX_ENTRIES);
    }

    #[test]
    fn history_is_exact_match() {
        let mut history = SearchHistory::new();
        history.record("london");
        history.record("London");
        history.record("   ");

        assert_eq!(history.iter().collect::<Vec<_>>(), ["London", "london"]);
    }

    #[test]
    fn favorites_dedupe_by_proximity() {
        let mut favorites = Favorites::new();
        let guntur = Location::new("Guntur", "India", 16.3067, 80.4365);
        let nearby = Location::new("Guntur (center)", "India", 16.3100, 80.4400);

        assert!(favorites.add(&guntur));
        assert!(!favorites.add(&nearby));
        assert_eq!(favorites.len(), 1);
    }

    #[test]
    fn favorites_are_bounded_most_recent_first() {
        let mut favorites = Favorites::new();
        let places = gazetteer::all();

        for place in places.iter().take(8) {
            favorites.add(place);
        }

        assert_eq!(favorites.len(), MAX_ENTRIES);
        assert_eq!(favorites.iter().next(), Some(&places[7]));

        let entries: Vec<_> = favorites.iter().collect();
        for (i, a) in entries.iter().enumerate() {
            for b in &entries[i + 1..] {
                assert!(!a.is_near(b));
            }
        }
    }

    #[test]
    fn current_location_is_never_a_favorite() {
        let mut favorites = Favorites::new();
        assert!(!favorites.add(&Location::current(16.0, 80.0)));
        assert!(favorites.is_empty());
    }

    #[test]
    fn lookup_updates_everything() {
        let mut session = Session::new();
        let tadepalli = gazetteer::search("Tadepalli").remove(0);

        session.record_lookup("Tadepalli", &tadepalli, weather_for(&tadepalli));

        assert_eq!(session.history.iter().collect::<Vec<_>>(), ["Tadepalli"]);
        assert!(session.favorites.contains(&tadepalli));
        assert_eq!(session.current.as_ref().map(|w| w.location.as_str()), Some("Tadepalli"));
    }

    #[test]
    fn current_location_only_replaces_weather() {
        let mut session = Session::new();
        let here = Location::new("Mangalagiri", "", 16.43, 80.57);

        session.record_current_location(weather_for(&here));

        assert!(session.history.is_empty());
        assert!(session.favorites.is_empty());
        assert!(session.current.is_some());
    }
}
