use std::env;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::models::place::MindfulPlace;
use crate::services::provider::ProviderError;

const GEONAME_URL: &str = "https://api.opentripmap.com/0.1/en/places/geoname";
const RADIUS_URL: &str = "https://api.opentripmap.com/0.1/en/places/radius";

#[derive(Debug, Deserialize)]
struct GeonameResponse {
    lat: Option<f64>,
    lon: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RadiusResponse {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    properties: FeatureProperties,
}

#[derive(Debug, Deserialize)]
struct FeatureProperties {
    name: Option<String>,
    kinds: Option<String>,
    // numeric in the radius endpoint, "1h".."3h" strings elsewhere
    rate: Option<serde_json::Value>,
    xid: Option<String>,
}

#[derive(Clone)]
pub struct OpenTripMapService {
    client: Client,
    api_key: Option<String>,
}

impl OpenTripMapService {
    pub fn from_env() -> Self {
        Self {
            client: Client::new(),
            api_key: env::var("OPENTRIPMAP_API_KEY").ok(),
        }
    }

    pub async fn geocode(&self, city: &str) -> Result<Option<(f64, f64)>, ProviderError> {
        let key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingCredential("opentripmap"))?;

        let response = self
            .client
            .get(GEONAME_URL)
            .query(&[("name", city), ("apikey", key)])
            .timeout(Duration::from_secs(10))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::from_response("opentripmap", response).await);
        }

        let data: GeonameResponse = response.json().await.map_err(|e| {
            ProviderError::Decode {
                provider: "opentripmap",
                detail: e.to_string(),
            }
        })?;

        Ok(match (data.lat, data.lon) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        })
    }

    pub async fn nearby_attractions(
        &self,
        lat: f64,
        lon: f64,
        radius: u32,
        limit: usize,
    ) -> Result<Vec<MindfulPlace>, ProviderError> {
        let key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingCredential("opentripmap"))?;

        let response = self
            .client
            .get(RADIUS_URL)
            .query(&[
                ("radius", radius.to_string()),
                ("lon", lon.to_string()),
                ("lat", lat.to_string()),
                ("limit", limit.to_string()),
                ("apikey", key.to_string()),
            ])
            .timeout(Duration::from_secs(12))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::from_response("opentripmap", response).await);
        }

        let data: RadiusResponse = response.json().await.map_err(|e| {
            ProviderError::Decode {
                provider: "opentripmap",
                detail: e.to_string(),
            }
        })?;

        Ok(data
            .features
            .into_iter()
            .map(|feature| normalize_feature(feature.properties))
            .collect())
    }
}

fn normalize_feature(props: FeatureProperties) -> MindfulPlace {
    let title = props
        .name
        .filter(|name| !name.is_empty())
        .or_else(|| props.kinds.clone())
        .unwrap_or_else(|| "Attraction".to_string());

    MindfulPlace {
        title,
        kinds: props.kinds,
        rate: props.rate,
        xid: props.xid,
        source: "opentripmap".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unnamed_feature_falls_back_to_kinds() {
        let place = normalize_feature(FeatureProperties {
            name: Some(String::new()),
            kinds: Some("gardens_and_parks".to_string()),
            rate: None,
            xid: Some("W123".to_string()),
        });
        assert_eq!(place.title, "gardens_and_parks");

        let place = normalize_feature(FeatureProperties {
            name: None,
            kinds: None,
            rate: None,
            xid: None,
        });
        assert_eq!(place.title, "Attraction");
    }
}
