//! Time-of-day crowd heuristics, used when no measured popularity data is
//! available for a destination.

use crate::models::intel::CrowdEstimate;

/// Crowd level for a venue type at a local hour and weekday (0 = Monday).
pub fn estimate_crowd(venue: &str, hour: u32, weekday: u32) -> CrowdEstimate {
    let weekend = weekday >= 5;

    let level = match venue {
        "mall" if (17..=21).contains(&hour) => "High",
        "beach" if weekend && ((6..=10).contains(&hour) || (16..=19).contains(&hour)) => "High",
        "monument" if (10..=16).contains(&hour) => "Moderate",
        "market" if (18..=22).contains(&hour) => "High",
        _ => "Low",
    };

    CrowdEstimate {
        crowd_level: level.to_string(),
        average_popularity: None,
        based_on: Some("time-based travel patterns".to_string()),
    }
}
