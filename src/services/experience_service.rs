//! Weather-aware experience search across the point-of-interest providers.
//!
//! Viator is the primary source; Yelp and Foursquare are fallbacks that only
//! run when the tier before them failed or came back empty. Results are
//! memoized per (location, query, page size) for a few minutes.

use std::time::Duration;

use crate::cache::TtlCache;
use crate::models::experience::Experience;
use crate::models::weather::WeatherSnapshot;
use crate::services::foursquare_service::FoursquareService;
use crate::services::viator_service::ViatorService;
use crate::services::weather_service::WeatherService;
use crate::services::yelp_service::YelpService;

const CACHE_TTL: Duration = Duration::from_secs(300);

const INDOOR_KEYWORDS: [&str; 8] = [
    "museum", "temple", "palace", "spa", "cafe", "aquarium", "gallery", "indoor",
];
const OUTDOOR_KEYWORDS: [&str; 9] = [
    "hiking", "sunset", "trek", "cruise", "safari", "beach", "bike", "kayak", "outdoor",
];

#[derive(Clone)]
pub struct ExperienceService {
    weather: WeatherService,
    viator: ViatorService,
    yelp: YelpService,
    foursquare: FoursquareService,
    cache: TtlCache<Vec<Experience>>,
}

impl ExperienceService {
    pub fn from_env() -> Self {
        Self {
            weather: WeatherService::from_env(),
            viator: ViatorService::from_env(),
            yelp: YelpService::from_env(),
            foursquare: FoursquareService::from_env(),
            cache: TtlCache::new(CACHE_TTL),
        }
    }

    /// Curated experiences for a location, biased indoor or outdoor by the
    /// current weather. Always returns a (possibly empty) list; provider
    /// failures are logged and the next tier takes over.
    pub async fn search(
        &self,
        location: &str,
        query: &str,
        per_page: usize,
    ) -> (WeatherSnapshot, Vec<Experience>) {
        let weather = match self.weather.current(location).await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                eprintln!("Weather lookup failed for {}: {}", location, err);
                WeatherSnapshot::unknown()
            }
        };

        let cache_key = format!("{}|{}|{}", location, query, per_page);
        if let Some(hit) = self.cache.get(&cache_key) {
            return (weather, hit);
        }

        let raw = self.fetch_with_fallback(location, query, per_page).await;
        let curated = weather_filter(raw, weather.indoor_preferred, per_page);

        self.cache.insert(cache_key, curated.clone());
        (weather, curated)
    }

    async fn fetch_with_fallback(
        &self,
        location: &str,
        query: &str,
        per_page: usize,
    ) -> Vec<Experience> {
        match self.viator.search(location, per_page).await {
            Ok(results) if !results.is_empty() => return results,
            Ok(_) => println!("Viator had no results for {}", location),
            Err(err) => eprintln!("Viator search failed: {}", err),
        }

        match self.yelp.search(location, query, per_page).await {
            Ok(results) if !results.is_empty() => return results,
            Ok(_) => println!("Yelp had no results for {}", location),
            Err(err) => eprintln!("Yelp search failed: {}", err),
        }

        match self.foursquare.search(location, query, per_page).await {
            Ok(results) => results,
            Err(err) => {
                eprintln!("Foursquare search failed: {}", err);
                Vec::new()
            }
        }
    }
}

/// Keep items matching the weather preference; if that empties the list, the
/// unfiltered head is better than nothing.
pub fn weather_filter(
    items: Vec<Experience>,
    indoor_preferred: bool,
    per_page: usize,
) -> Vec<Experience> {
    let filtered: Vec<Experience> = items
        .iter()
        .filter(|item| {
            if indoor_preferred {
                is_indoor(item)
            } else {
                is_outdoor(item)
            }
        })
        .cloned()
        .collect();

    let mut curated = if filtered.is_empty() { items } else { filtered };
    curated.truncate(per_page);
    curated
}

fn searchable_text(item: &Experience) -> String {
    format!(
        "{} {}",
        item.title,
        item.description.as_deref().unwrap_or("")
    )
    .to_lowercase()
}

pub fn is_indoor(item: &Experience) -> bool {
    let text = searchable_text(item);
    INDOOR_KEYWORDS.iter().any(|kw| text.contains(kw))
}

pub fn is_outdoor(item: &Experience) -> bool {
    let text = searchable_text(item);
    OUTDOOR_KEYWORDS.iter().any(|kw| text.contains(kw))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exp(title: &str, description: &str) -> Experience {
        let mut e = Experience::new(title, "viator");
        e.description = Some(description.to_string());
        e
    }

    #[test]
    fn test_indoor_outdoor_detection() {
        assert!(is_indoor(&exp("National Museum Tour", "two floors of art")));
        assert!(is_indoor(&exp("Evening out", "dinner at a rooftop cafe")));
        assert!(is_outdoor(&exp("Sunset Kayak", "paddle the bay")));
        assert!(!is_indoor(&exp("City Walk", "a stroll downtown")));
        assert!(!is_outdoor(&exp("City Walk", "a stroll downtown")));
    }

    #[test]
    fn test_rainy_day_keeps_indoor_items() {
        let items = vec![
            exp("National Museum", "paintings"),
            exp("Beach Day", "swim and surf"),
            exp("Aquarium Visit", "sharks"),
        ];
        let curated = weather_filter(items, true, 6);
        assert_eq!(curated.len(), 2);
        assert!(curated.iter().all(is_indoor));
    }

    #[test]
    fn test_clear_day_keeps_outdoor_items() {
        let items = vec![
            exp("National Museum", "paintings"),
            exp("Beach Day", "swim and surf"),
        ];
        let curated = weather_filter(items, false, 6);
        assert_eq!(curated.len(), 1);
        assert_eq!(curated[0].title, "Beach Day");
    }

    #[test]
    fn test_filter_falls_back_to_unfiltered() {
        // nothing matches "indoor", so the raw list survives, truncated
        let items = vec![
            exp("City Walk", "a stroll"),
            exp("Old Town", "history"),
            exp("Harbor", "boats"),
        ];
        let curated = weather_filter(items, true, 2);
        assert_eq!(curated.len(), 2);
        assert_eq!(curated[0].title, "City Walk");
    }

    #[test]
    fn test_empty_input_stays_empty() {
        assert!(weather_filter(Vec::new(), true, 6).is_empty());
    }
}
