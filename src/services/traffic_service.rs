use std::env;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::models::intel::TrafficStatus;
use crate::services::provider::ProviderError;

const FLOW_URL: &str =
    "https://api.tomtom.com/traffic/services/4/flowSegmentData/absolute/10/json";

#[derive(Debug, Deserialize)]
struct FlowResponse {
    #[serde(rename = "flowSegmentData")]
    flow_segment_data: Option<FlowSegment>,
}

#[derive(Debug, Deserialize)]
struct FlowSegment {
    #[serde(rename = "currentSpeed")]
    current_speed: f64,
    #[serde(rename = "freeFlowSpeed")]
    free_flow_speed: f64,
}

#[derive(Clone)]
pub struct TrafficService {
    client: Client,
    api_key: Option<String>,
}

impl TrafficService {
    pub fn from_env() -> Self {
        Self {
            client: Client::new(),
            api_key: env::var("TOMTOMKEY").ok(),
        }
    }

    /// Flow at the road segment nearest the coordinate. `Ok(None)` when
    /// TomTom has no segment there (open water, remote areas).
    pub async fn flow_status(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<Option<TrafficStatus>, ProviderError> {
        let key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingCredential("tomtom"))?;

        let point = format!("{},{}", lat, lon);
        let response = self
            .client
            .get(FLOW_URL)
            .query(&[("point", point.as_str()), ("key", key)])
            .timeout(Duration::from_secs(10))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::from_response("tomtom", response).await);
        }

        let data: FlowResponse = response.json().await.map_err(|e| {
            ProviderError::Decode {
                provider: "tomtom",
                detail: e.to_string(),
            }
        })?;

        Ok(data.flow_segment_data.map(|segment| {
            classify_flow(segment.current_speed, segment.free_flow_speed)
        }))
    }
}

/// Congestion level from the current/free-flow speed ratio.
pub fn classify_flow(current_speed: f64, free_flow_speed: f64) -> TrafficStatus {
    let ratio = if free_flow_speed > 0.0 {
        current_speed / free_flow_speed
    } else {
        1.0
    };

    let (level, advice) = if ratio > 0.8 {
        ("Low", "Minimal")
    } else if ratio > 0.5 {
        ("Moderate", "Possible delays")
    } else {
        ("High", "Likely delays")
    };

    TrafficStatus {
        traffic_level: level.to_string(),
        current_speed_kmph: current_speed,
        free_flow_speed_kmph: free_flow_speed,
        delay_advice: advice.to_string(),
    }
}
