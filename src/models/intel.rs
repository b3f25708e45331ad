use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrafficStatus {
    pub traffic_level: String,
    pub current_speed_kmph: f64,
    pub free_flow_speed_kmph: f64,
    pub delay_advice: String,
}

/// Crowd estimate, either measured (Foursquare popularity average) or derived
/// from time-of-day rules when the measured source is unavailable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrowdEstimate {
    pub crowd_level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_popularity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub based_on: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirQuality {
    pub pm25: Option<f64>,
    pub unit: String,
    pub health_note: String,
}

impl AirQuality {
    pub fn unknown() -> Self {
        Self {
            pm25: None,
            unit: "µg/m³".to_string(),
            health_note: "Unknown".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TravelRisk {
    pub risk_level: Option<f64>,
    pub message: String,
}

impl TravelRisk {
    pub fn unknown() -> Self {
        Self {
            risk_level: None,
            message: "Could not fetch risk data.".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TravelIntel {
    pub city: String,
    pub traffic: Option<TrafficStatus>,
    pub crowd: CrowdEstimate,
    pub air_quality: AirQuality,
    pub risk: TravelRisk,
    pub advice: String,
}
