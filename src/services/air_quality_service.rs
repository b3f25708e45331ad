use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::models::intel::AirQuality;
use crate::services::provider::ProviderError;

const LATEST_URL: &str = "https://api.openaq.org/v2/latest";

#[derive(Debug, Deserialize)]
struct LatestResponse {
    #[serde(default)]
    results: Vec<LatestResult>,
}

#[derive(Debug, Deserialize)]
struct LatestResult {
    #[serde(default)]
    measurements: Vec<Measurement>,
}

#[derive(Debug, Deserialize)]
struct Measurement {
    parameter: Option<String>,
    value: Option<f64>,
}

#[derive(Clone)]
pub struct AirQualityService {
    client: Client,
}

impl AirQualityService {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Latest pm2.5 reading for a city. A city OpenAQ does not cover comes
    /// back as an `Ok` with no reading, not as an error.
    pub async fn latest(&self, city: &str) -> Result<AirQuality, ProviderError> {
        let response = self
            .client
            .get(LATEST_URL)
            .query(&[("city", city), ("limit", "1")])
            .timeout(Duration::from_secs(10))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::from_response("openaq", response).await);
        }

        let data: LatestResponse = response.json().await.map_err(|e| {
            ProviderError::Decode {
                provider: "openaq",
                detail: e.to_string(),
            }
        })?;

        let pm25 = data
            .results
            .first()
            .and_then(|result| {
                result
                    .measurements
                    .iter()
                    .find(|m| m.parameter.as_deref() == Some("pm25"))
            })
            .and_then(|m| m.value);

        Ok(AirQuality {
            pm25,
            unit: "µg/m³".to_string(),
            health_note: classify_pm25(pm25).to_string(),
        })
    }
}

impl Default for AirQualityService {
    fn default() -> Self {
        Self::new()
    }
}

/// US-EPA style bands for pm2.5.
pub fn classify_pm25(pm25: Option<f64>) -> &'static str {
    match pm25 {
        None => "Unknown",
        Some(v) if v <= 12.0 => "Good",
        Some(v) if v <= 35.0 => "Moderate",
        Some(v) if v <= 55.0 => "Unhealthy for sensitive groups",
        Some(_) => "Unhealthy",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_pm25_bands() {
        assert_eq!(classify_pm25(None), "Unknown");
        assert_eq!(classify_pm25(Some(0.0)), "Good");
        assert_eq!(classify_pm25(Some(12.0)), "Good");
        assert_eq!(classify_pm25(Some(12.1)), "Moderate");
        assert_eq!(classify_pm25(Some(35.0)), "Moderate");
        assert_eq!(classify_pm25(Some(55.0)), "Unhealthy for sensitive groups");
        assert_eq!(classify_pm25(Some(120.0)), "Unhealthy");
    }
}
