use std::env;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::models::experience::Experience;
use crate::services::provider::ProviderError;

const GEOCODE_URL: &str = "https://api.viator.com/partner/v2/search/geocodes";
const PRODUCTS_URL: &str = "https://api.viator.com/partner/v2/search/products";

#[derive(Debug, Deserialize)]
struct GeocodeEnvelope {
    #[serde(default)]
    data: Vec<GeocodeHit>,
}

#[derive(Debug, Deserialize)]
struct GeocodeHit {
    #[serde(rename = "destinationId")]
    destination_id: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ProductEnvelope {
    #[serde(default)]
    data: Vec<Product>,
}

#[derive(Debug, Deserialize)]
struct Product {
    title: Option<String>,
    description: Option<String>,
    #[serde(default)]
    images: Vec<ProductImage>,
    rating: Option<f64>,
    #[serde(rename = "fromPrice")]
    from_price: Option<ProductPrice>,
    #[serde(rename = "webURL")]
    web_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProductImage {
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProductPrice {
    amount: Option<f64>,
    #[serde(rename = "amountFormatted")]
    amount_formatted: Option<String>,
}

#[derive(Clone)]
pub struct ViatorService {
    client: Client,
    api_key: Option<String>,
}

impl ViatorService {
    pub fn from_env() -> Self {
        Self {
            client: Client::new(),
            api_key: env::var("VIATOR_TOKEN").ok(),
        }
    }

    /// Resolve any city name to a Viator destination id. `Ok(None)` when the
    /// geocoder has no match for the spelling.
    async fn destination_id(&self, city: &str) -> Result<Option<String>, ProviderError> {
        let key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingCredential("viator"))?;

        let response = self
            .client
            .get(GEOCODE_URL)
            .query(&[("query", city)])
            .header("Accept", "application/json")
            .header("exp-api-key", key)
            .timeout(Duration::from_secs(15))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::from_response("viator", response).await);
        }

        let envelope: GeocodeEnvelope = response.json().await.map_err(|e| {
            ProviderError::Decode {
                provider: "viator",
                detail: e.to_string(),
            }
        })?;

        Ok(envelope
            .data
            .first()
            .and_then(|hit| hit.destination_id.as_ref())
            .and_then(destination_id_string))
    }

    /// Global activity search: destination-id lookup first, free-text search
    /// as the fallback for spellings the geocoder does not know.
    pub async fn search(
        &self,
        location: &str,
        limit: usize,
    ) -> Result<Vec<Experience>, ProviderError> {
        let key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingCredential("viator"))?
            .to_string();

        let dest_id = self.destination_id(location).await?;

        let mut query: Vec<(&str, String)> = vec![
            ("currency", "USD".to_string()),
            ("sort", "RECOMMENDED".to_string()),
            ("count", limit.to_string()),
        ];
        match dest_id {
            Some(id) => query.push(("destinationId", id)),
            None => query.push(("query", location.to_string())),
        }

        let response = self
            .client
            .get(PRODUCTS_URL)
            .query(&query)
            .header("Accept", "application/json")
            .header("exp-api-key", key.as_str())
            .timeout(Duration::from_secs(20))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::from_response("viator", response).await);
        }

        let envelope: ProductEnvelope = response.json().await.map_err(|e| {
            ProviderError::Decode {
                provider: "viator",
                detail: e.to_string(),
            }
        })?;

        Ok(envelope
            .data
            .into_iter()
            .map(|product| normalize_product(product, location))
            .collect())
    }
}

fn normalize_product(product: Product, location: &str) -> Experience {
    let mut exp = Experience::new(product.title.unwrap_or_default(), "viator");
    exp.description = Some(
        product
            .description
            .unwrap_or_else(|| format!("Explore {}.", location)),
    );
    exp.image = product.images.into_iter().next().and_then(|img| img.url);
    exp.rating = product.rating;
    if let Some(price) = product.from_price {
        exp.price = price.amount;
        exp.price_formatted = price.amount_formatted;
    }
    exp.url = product.web_url;
    exp
}

/// Viator has served the destination id both as a number and as a string.
fn destination_id_string(value: &serde_json::Value) -> Option<String> {
    value
        .as_str()
        .map(String::from)
        .or_else(|| value.as_i64().map(|n| n.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_id_accepts_both_wire_types() {
        assert_eq!(
            destination_id_string(&serde_json::json!("684")),
            Some("684".to_string())
        );
        assert_eq!(
            destination_id_string(&serde_json::json!(684)),
            Some("684".to_string())
        );
        assert_eq!(destination_id_string(&serde_json::json!(null)), None);
    }

    #[test]
    fn test_normalize_fills_description_fallback() {
        let product = Product {
            title: Some("Sunset Cruise".to_string()),
            description: None,
            images: vec![ProductImage {
                url: Some("https://img.example/1.jpg".to_string()),
            }],
            rating: Some(4.5),
            from_price: Some(ProductPrice {
                amount: Some(39.0),
                amount_formatted: Some("$39.00".to_string()),
            }),
            web_url: None,
        };

        let exp = normalize_product(product, "Lisbon");
        assert_eq!(exp.title, "Sunset Cruise");
        assert_eq!(exp.description.as_deref(), Some("Explore Lisbon."));
        assert_eq!(exp.image.as_deref(), Some("https://img.example/1.jpg"));
        assert_eq!(exp.price, Some(39.0));
        assert_eq!(exp.source, "viator");
    }
}
