use std::env;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::models::experience::Experience;
use crate::services::provider::ProviderError;

const SEARCH_URL: &str = "https://api.yelp.com/v3/businesses/search";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    businesses: Vec<Business>,
}

#[derive(Debug, Deserialize)]
struct Business {
    name: Option<String>,
    rating: Option<f64>,
    review_count: Option<u32>,
    #[serde(default)]
    categories: Vec<Category>,
    image_url: Option<String>,
    url: Option<String>,
    location: Option<BusinessLocation>,
}

#[derive(Debug, Deserialize)]
struct Category {
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BusinessLocation {
    #[serde(default)]
    display_address: Vec<String>,
}

#[derive(Clone)]
pub struct YelpService {
    client: Client,
    api_key: Option<String>,
}

impl YelpService {
    pub fn from_env() -> Self {
        Self {
            client: Client::new(),
            api_key: env::var("YELP_API_KEY").ok(),
        }
    }

    /// Yelp Fusion business search, best-rated first.
    pub async fn search(
        &self,
        location: &str,
        term: &str,
        limit: usize,
    ) -> Result<Vec<Experience>, ProviderError> {
        let key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingCredential("yelp"))?;

        let term = if term.is_empty() { "things to do" } else { term };
        let limit_param = limit.to_string();
        let response = self
            .client
            .get(SEARCH_URL)
            .bearer_auth(key)
            .query(&[
                ("location", location),
                ("term", term),
                ("limit", limit_param.as_str()),
                ("sort_by", "rating"),
            ])
            .timeout(Duration::from_secs(10))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::from_response("yelp", response).await);
        }

        let data: SearchResponse = response.json().await.map_err(|e| {
            ProviderError::Decode {
                provider: "yelp",
                detail: e.to_string(),
            }
        })?;

        Ok(data.businesses.into_iter().map(normalize_business).collect())
    }
}

fn normalize_business(business: Business) -> Experience {
    let mut exp = Experience::new(business.name.unwrap_or_default(), "yelp");
    exp.rating = business.rating;
    exp.review_count = business.review_count;
    exp.categories = business
        .categories
        .into_iter()
        .filter_map(|c| c.title)
        .collect();
    exp.image = business.image_url;
    exp.url = business.url;
    exp.address = business
        .location
        .map(|loc| loc.display_address.join(", "))
        .filter(|addr| !addr.is_empty());
    exp
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_joins_display_address() {
        let business = Business {
            name: Some("Tea House".to_string()),
            rating: Some(4.5),
            review_count: Some(120),
            categories: vec![
                Category {
                    title: Some("Tea Rooms".to_string()),
                },
                Category { title: None },
            ],
            image_url: None,
            url: None,
            location: Some(BusinessLocation {
                display_address: vec!["12 Hill St".to_string(), "Edinburgh".to_string()],
            }),
        };

        let exp = normalize_business(business);
        assert_eq!(exp.address.as_deref(), Some("12 Hill St, Edinburgh"));
        assert_eq!(exp.categories, vec!["Tea Rooms".to_string()]);
        assert_eq!(exp.source, "yelp");
    }
}
