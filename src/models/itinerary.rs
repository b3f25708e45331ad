use serde::{Deserialize, Serialize};

/// One itinerary stop from the preference-driven chat flow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Stop {
    pub title: String,
    pub description: String,
}

/// One time-slotted stop from the daily-schedule chat flow. Deserialized
/// straight out of the LLM's JSON array.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduledStop {
    pub title: String,
    pub time: String,
    pub description: String,
}
