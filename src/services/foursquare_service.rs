use std::env;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::models::experience::Experience;
use crate::models::intel::CrowdEstimate;
use crate::services::provider::ProviderError;

const SEARCH_URL: &str = "https://api.foursquare.com/v3/places/search";

// Foursquare place photos need a second request per place; the search tier
// ships a neutral placeholder instead.
const PLACEHOLDER_IMAGE: &str =
    "https://upload.wikimedia.org/wikipedia/commons/thumb/a/a6/Blank_map.png/600px-Blank_map.png";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<Place>,
}

#[derive(Debug, Deserialize)]
struct Place {
    name: Option<String>,
    #[serde(default)]
    categories: Vec<Category>,
    location: Option<PlaceLocation>,
    fsq_id: Option<String>,
    popularity: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct Category {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlaceLocation {
    formatted_address: Option<String>,
}

#[derive(Clone)]
pub struct FoursquareService {
    client: Client,
    api_key: Option<String>,
}

impl FoursquareService {
    pub fn from_env() -> Self {
        Self {
            client: Client::new(),
            api_key: env::var("FOURSQUARE_API_KEY").ok(),
        }
    }

    async fn places_near(
        &self,
        location: &str,
        query: &str,
        limit: usize,
    ) -> Result<Vec<Place>, ProviderError> {
        let key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingCredential("foursquare"))?;

        let query = if query.is_empty() { "tourist" } else { query };
        let limit_param = limit.to_string();
        let response = self
            .client
            .get(SEARCH_URL)
            .header("Authorization", key)
            .query(&[
                ("query", query),
                ("near", location),
                ("limit", limit_param.as_str()),
            ])
            .timeout(Duration::from_secs(10))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::from_response("foursquare", response).await);
        }

        let data: SearchResponse = response.json().await.map_err(|e| {
            ProviderError::Decode {
                provider: "foursquare",
                detail: e.to_string(),
            }
        })?;

        Ok(data.results)
    }

    pub async fn search(
        &self,
        location: &str,
        query: &str,
        limit: usize,
    ) -> Result<Vec<Experience>, ProviderError> {
        let places = self.places_near(location, query, limit).await?;
        Ok(places.into_iter().map(normalize_place).collect())
    }

    /// Crowd estimate from the popularity scores of the busiest places near
    /// the city center.
    pub async fn crowd_estimate(
        &self,
        city: &str,
        limit: usize,
    ) -> Result<CrowdEstimate, ProviderError> {
        let places = self.places_near(city, "tourist", limit).await?;
        let scores: Vec<f64> = places.iter().filter_map(|p| p.popularity).collect();
        let average = if scores.is_empty() {
            0.0
        } else {
            scores.iter().sum::<f64>() / scores.len() as f64
        };

        Ok(CrowdEstimate {
            crowd_level: crowd_level(average).to_string(),
            average_popularity: Some((average * 100.0).round() / 100.0),
            based_on: None,
        })
    }
}

fn normalize_place(place: Place) -> Experience {
    let mut exp = Experience::new(place.name.unwrap_or_default(), "foursquare");
    exp.categories = place
        .categories
        .into_iter()
        .filter_map(|c| c.name)
        .collect();
    exp.address = place.location.and_then(|loc| loc.formatted_address);
    exp.url = place.fsq_id;
    exp.image = Some(PLACEHOLDER_IMAGE.to_string());
    exp
}

fn crowd_level(average_popularity: f64) -> &'static str {
    if average_popularity > 70.0 {
        "High"
    } else if average_popularity > 40.0 {
        "Moderate"
    } else {
        "Low"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crowd_level_boundaries() {
        assert_eq!(crowd_level(85.0), "High");
        assert_eq!(crowd_level(70.0), "Moderate");
        assert_eq!(crowd_level(41.0), "Moderate");
        assert_eq!(crowd_level(40.0), "Low");
        assert_eq!(crowd_level(0.0), "Low");
    }

    #[test]
    fn test_normalize_carries_placeholder_image() {
        let place = Place {
            name: Some("City Market".to_string()),
            categories: vec![Category {
                name: Some("Market".to_string()),
            }],
            location: Some(PlaceLocation {
                formatted_address: Some("1 Market Sq".to_string()),
            }),
            fsq_id: Some("abc123".to_string()),
            popularity: Some(0.9),
        };

        let exp = normalize_place(place);
        assert_eq!(exp.image.as_deref(), Some(PLACEHOLDER_IMAGE));
        assert_eq!(exp.address.as_deref(), Some("1 Market Sq"));
        assert_eq!(exp.source, "foursquare");
    }
}
