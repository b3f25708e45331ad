//! Narrative layer: turns aggregated experience records into itinerary stops
//! via the LLM, with hardcoded fallbacks so the frontend always gets stops.

use chrono::NaiveDate;
use regex::Regex;

use crate::models::experience::Experience;
use crate::models::itinerary::{ScheduledStop, Stop};
use crate::services::llm_service::LlmService;
use crate::services::provider::ProviderError;

const STOP_PATTERN: &str = r"\*\*Stop \d+: (.*?)\*\*";

/// User filters forwarded into the itinerary prompt. All optional; absent
/// ones are rendered as "any".
#[derive(Debug, Default, Clone)]
pub struct TripPreferences {
    pub budget: Option<String>,
    pub activity: Option<String>,
    pub duration: Option<String>,
    pub motivation: Option<String>,
}

#[derive(Clone)]
pub struct ItineraryService {
    llm: LlmService,
    stop_pattern: Regex,
}

impl ItineraryService {
    pub fn from_env() -> Self {
        Self {
            llm: LlmService::from_env(),
            stop_pattern: Regex::new(STOP_PATTERN).expect("stop pattern is valid"),
        }
    }

    /// Three-stop itinerary built around the aggregated experiences. With no
    /// upstream records there is nothing to ground the prompt on, so the
    /// generic stops go out without an LLM round-trip.
    pub async fn three_stop_itinerary(
        &self,
        location: &str,
        prefs: &TripPreferences,
        experiences: &[Experience],
    ) -> Result<Vec<Stop>, ProviderError> {
        if experiences.is_empty() {
            return Ok(fallback_stops(location));
        }

        let titles: Vec<&str> = experiences.iter().map(|e| e.title.as_str()).collect();
        let prompt = format!(
            "You are a travel assistant for {location}.\n\
             User preferences: budget={budget}, activity={activity}, \
             duration={duration}, motivation={motivation}\n\
             Popular spots: {spots}\n\n\
             Create a 3-stop itinerary in format:\n\n\
             **Stop 1: [Activity]**\n[Description]\n\
             **Stop 2: [Activity]**\n[Description]\n\
             **Stop 3: [Activity]**\n[Description]\n",
            location = location,
            budget = prefs.budget.as_deref().unwrap_or("any"),
            activity = prefs.activity.as_deref().unwrap_or("any"),
            duration = prefs.duration.as_deref().unwrap_or("any"),
            motivation = prefs.motivation.as_deref().unwrap_or("any"),
            spots = titles.join(", "),
        );

        let raw = self.llm.chat(&prompt, 1024).await?;
        let stops = self.parse_stops(&raw);
        if stops.is_empty() {
            return Ok(fallback_stops(location));
        }
        Ok(stops)
    }

    /// Day-by-day schedule for a date range, asked for and parsed as JSON.
    pub async fn daily_schedule(
        &self,
        location: &str,
        checkin: NaiveDate,
        checkout: NaiveDate,
    ) -> Result<Vec<ScheduledStop>, ProviderError> {
        let duration_days = (checkout - checkin).num_days();

        let prompt = format!(
            "You are a travel assistant. The user is visiting {location} between \
             {checkin} and {checkout} ({duration_days} days).\n\
             Generate a JSON array of daily experiences.\n\n\
             Each item in the array must be:\n\
             {{\n  \"title\": \"Marine Drive\",\n  \"time\": \"9:00 am - 10:30 am\",\
             \n  \"description\": \"Walk along the sea during the misty morning.\"\n}}\n\n\
             Include at least 3 experiences per day. Output only the JSON array - no extra text.",
        );

        let raw = self.llm.chat(&prompt, 1500).await?;
        let cleaned = strip_code_fence(&raw);

        serde_json::from_str(cleaned).map_err(|e| ProviderError::Decode {
            provider: "groq",
            detail: format!("itinerary was not a JSON array: {}", e),
        })
    }

    /// Pull `(title, description)` pairs out of the `**Stop N: ...**` blocks.
    /// Anything that doesn't match the shape is simply not a stop.
    pub fn parse_stops(&self, raw: &str) -> Vec<Stop> {
        let headers: Vec<(String, usize, usize)> = self
            .stop_pattern
            .captures_iter(raw)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                Some((
                    caps[1].trim().to_string(),
                    whole.start(),
                    whole.end(),
                ))
            })
            .collect();

        headers
            .iter()
            .enumerate()
            .map(|(i, (title, _, body_start))| {
                let body_end = headers
                    .get(i + 1)
                    .map(|(_, next_start, _)| *next_start)
                    .unwrap_or(raw.len());
                Stop {
                    title: title.clone(),
                    description: raw[*body_start..body_end].trim().to_string(),
                }
            })
            .collect()
    }
}

/// Generic stops served when aggregation found nothing or the LLM reply was
/// unusable. Three of them, matching the itinerary the prompt asks for.
pub fn fallback_stops(location: &str) -> Vec<Stop> {
    vec![
        Stop {
            title: "Old Town Walk".to_string(),
            description: format!(
                "Start with a slow walk through the historic heart of {location}."
            ),
        },
        Stop {
            title: "Local Food Stop".to_string(),
            description: format!(
                "Try a well-reviewed local spot for the dishes {location} is known for."
            ),
        },
        Stop {
            title: "Sunset Viewpoint".to_string(),
            description: format!(
                "End the day at a viewpoint with a wide look over {location}."
            ),
        },
    ]
}

/// Strip a ```json fence if the model wrapped its reply in one.
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    if let Some(rest) = trimmed.strip_prefix("```json") {
        if let Some(end) = rest.find("```") {
            return rest[..end].trim();
        }
        return rest.trim();
    }
    trimmed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stops_extracts_blocks() {
        let service = ItineraryService::from_env();
        let raw = "**Stop 1: Marine Drive**\nWalk along the sea.\n\
                   **Stop 2: Night Market**\nStreet food and stalls.\n\
                   **Stop 3: Harbor Cruise**\nGolden hour on the water.";
        let stops = service.parse_stops(raw);
        assert_eq!(stops.len(), 3);
        assert_eq!(stops[0].title, "Marine Drive");
        assert_eq!(stops[0].description, "Walk along the sea.");
        assert_eq!(stops[2].title, "Harbor Cruise");
    }

    #[test]
    fn test_parse_stops_rejects_prose() {
        let service = ItineraryService::from_env();
        assert!(service
            .parse_stops("Here are some ideas for your trip...")
            .is_empty());
    }

    #[test]
    fn test_fallback_stops_are_three() {
        let stops = fallback_stops("Zzyzx");
        assert_eq!(stops.len(), 3);
        assert!(stops[0].description.contains("Zzyzx"));
    }

    #[test]
    fn test_strip_code_fence_variants() {
        assert_eq!(strip_code_fence("```json\n[1,2]\n```"), "[1,2]");
        assert_eq!(strip_code_fence("```json\n[1,2]"), "[1,2]");
        assert_eq!(strip_code_fence("  [1,2]  "), "[1,2]");
    }

    #[test]
    fn test_schedule_parses_after_fence_strip() {
        let raw = "```json\n[{\"title\":\"Marine Drive\",\"time\":\"9:00 am\",\
                   \"description\":\"Sea walk\"}]\n```";
        let stops: Vec<ScheduledStop> =
            serde_json::from_str(strip_code_fence(raw)).unwrap();
        assert_eq!(stops.len(), 1);
        assert_eq!(stops[0].time, "9:00 am");
    }
}
