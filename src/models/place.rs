use serde::{Deserialize, Serialize};

/// Nearby attraction from the OpenTripMap radius search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MindfulPlace {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kinds: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xid: Option<String>,
    pub source: String,
}

/// Rural/cultural point of interest from the Geoapify places search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VillagePlace {
    pub name: String,
    pub category: Vec<String>,
    #[serde(rename = "type")]
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_m: Option<f64>,
    pub source: String,
}
