use std::env;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::models::place::VillagePlace;
use crate::services::provider::ProviderError;

const GEOCODE_URL: &str = "https://api.geoapify.com/v1/geocode/search";
const PLACES_URL: &str = "https://api.geoapify.com/v2/places";

const PLACE_CATEGORIES: &str = "tourism.sights,heritage,natural,leisure.park,\
entertainment.museum,religion.place_of_worship";

// Fetch wide, then filter and trim for the UI.
const FETCH_LIMIT: usize = 50;
const RESULT_LIMIT: usize = 10;

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    geometry: Option<Geometry>,
    #[serde(default)]
    properties: Properties,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    #[serde(default)]
    coordinates: Vec<f64>, // [lon, lat]
}

#[derive(Debug, Default, Deserialize)]
struct Properties {
    name: Option<String>,
    #[serde(default)]
    categories: Vec<String>,
    distance: Option<f64>,
    formatted: Option<String>,
}

#[derive(Clone)]
pub struct GeoapifyService {
    client: Client,
    api_key: Option<String>,
}

impl GeoapifyService {
    pub fn from_env() -> Self {
        Self {
            client: Client::new(),
            api_key: env::var("GEOAPIFY_API_KEY").ok(),
        }
    }

    pub async fn geocode(&self, location: &str) -> Result<Option<(f64, f64)>, ProviderError> {
        let key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingCredential("geoapify"))?;

        let response = self
            .client
            .get(GEOCODE_URL)
            .query(&[("text", location), ("limit", "1"), ("apiKey", key)])
            .timeout(Duration::from_secs(15))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::from_response("geoapify", response).await);
        }

        let data: FeatureCollection = response.json().await.map_err(|e| {
            ProviderError::Decode {
                provider: "geoapify",
                detail: e.to_string(),
            }
        })?;

        Ok(data.features.first().and_then(|feature| {
            let coords = &feature.geometry.as_ref()?.coordinates;
            match coords.as_slice() {
                [lon, lat, ..] => Some((*lat, *lon)),
                _ => None,
            }
        }))
    }

    /// Rural, natural, and cultural places around a point, nearest first.
    pub async fn village_places(
        &self,
        lat: f64,
        lon: f64,
        radius_m: u32,
    ) -> Result<Vec<VillagePlace>, ProviderError> {
        let key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingCredential("geoapify"))?;

        let response = self
            .client
            .get(PLACES_URL)
            .query(&[
                ("categories", PLACE_CATEGORIES.to_string()),
                ("filter", format!("circle:{},{},{}", lon, lat, radius_m)),
                ("bias", format!("proximity:{},{}", lon, lat)),
                ("limit", FETCH_LIMIT.to_string()),
                ("apiKey", key.to_string()),
            ])
            .timeout(Duration::from_secs(15))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::from_response("geoapify", response).await);
        }

        let data: FeatureCollection = response.json().await.map_err(|e| {
            ProviderError::Decode {
                provider: "geoapify",
                detail: e.to_string(),
            }
        })?;

        let mut places: Vec<VillagePlace> = data
            .features
            .into_iter()
            .filter_map(normalize_feature)
            .collect();

        places.sort_by(|a, b| {
            let da = a.distance_m.unwrap_or(f64::MAX);
            let db = b.distance_m.unwrap_or(f64::MAX);
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        });
        places.truncate(RESULT_LIMIT);

        Ok(places)
    }
}

/// `None` for features not worth showing (unnamed forest polygons).
fn normalize_feature(feature: Feature) -> Option<VillagePlace> {
    let props = feature.properties;

    let unnamed = props.name.as_deref().map_or(true, |n| n.is_empty());
    if unnamed && props.categories.iter().any(|c| c == "natural.forest") {
        return None;
    }

    let (lon, lat) = match feature
        .geometry
        .as_ref()
        .map(|g| g.coordinates.as_slice())
    {
        Some([lon, lat, ..]) => (Some(*lon), Some(*lat)),
        _ => (None, None),
    };

    Some(VillagePlace {
        label: label_from_categories(&props.categories),
        name: props
            .name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| "Local Attraction".to_string()),
        category: props.categories,
        address: props.formatted,
        lat,
        lon,
        distance_m: props.distance,
        source: "geoapify".to_string(),
    })
}

/// Friendly UI label for a Geoapify category list.
fn label_from_categories(categories: &[String]) -> String {
    let text = categories.join(" ");

    let label = if text.contains("religion") {
        "Place of Worship"
    } else if categories.iter().any(|c| c == "natural.water") {
        "Lake / River"
    } else if categories.iter().any(|c| c == "natural.forest") {
        "Forest Area"
    } else if text.contains("natural.mountain") {
        "Mountain / Peak"
    } else if text.contains("heritage") {
        "Heritage Site"
    } else {
        "Local Attraction"
    };
    label.to_string()
}
