use std::env;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::models::hotel::Hotel;
use crate::services::provider::ProviderError;

const SEARCH_URL: &str = "https://engine.hotellook.com/api/v2/cache.json";

#[derive(Debug, Deserialize)]
struct CacheEntry {
    #[serde(rename = "hotelName")]
    hotel_name: Option<String>,
    stars: Option<f64>,
    #[serde(rename = "priceFrom")]
    price_from: Option<f64>,
    location: Option<EntryLocation>,
}

#[derive(Debug, Deserialize)]
struct EntryLocation {
    geo: Option<Geo>,
}

#[derive(Debug, Deserialize)]
struct Geo {
    lat: Option<f64>,
    lon: Option<f64>,
}

#[derive(Clone)]
pub struct HotelsService {
    client: Client,
    token: Option<String>,
}

impl HotelsService {
    pub fn from_env() -> Self {
        Self {
            client: Client::new(),
            token: env::var("T_PAYOUTS_TOKEN").ok(),
        }
    }

    /// Travelpayouts/Hotellook cached price search for a city and date range.
    pub async fn search(
        &self,
        city: &str,
        check_in: &str,
        check_out: &str,
        limit: usize,
    ) -> Result<Vec<Hotel>, ProviderError> {
        let token = self
            .token
            .as_deref()
            .ok_or(ProviderError::MissingCredential("travelpayouts"))?;

        let limit_param = limit.to_string();
        let response = self
            .client
            .get(SEARCH_URL)
            .query(&[
                ("location", city),
                ("checkIn", check_in),
                ("checkOut", check_out),
                ("limit", limit_param.as_str()),
                ("token", token),
            ])
            .timeout(Duration::from_secs(10))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::from_response("travelpayouts", response).await);
        }

        let entries: Vec<CacheEntry> = response.json().await.map_err(|e| {
            ProviderError::Decode {
                provider: "travelpayouts",
                detail: e.to_string(),
            }
        })?;

        Ok(entries.into_iter().map(normalize_entry).collect())
    }
}

fn normalize_entry(entry: CacheEntry) -> Hotel {
    let geo = entry.location.and_then(|loc| loc.geo);
    Hotel {
        name: entry.hotel_name.unwrap_or_else(|| "Untitled".to_string()),
        rating: entry.stars,
        price: entry.price_from,
        lat: geo.as_ref().and_then(|g| g.lat),
        lon: geo.as_ref().and_then(|g| g.lon),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_entry_defaults() {
        let entry = CacheEntry {
            hotel_name: None,
            stars: Some(4.0),
            price_from: Some(82.5),
            location: Some(EntryLocation {
                geo: Some(Geo {
                    lat: Some(48.85),
                    lon: Some(2.35),
                }),
            }),
        };

        let hotel = normalize_entry(entry);
        assert_eq!(hotel.name, "Untitled");
        assert_eq!(hotel.rating, Some(4.0));
        assert_eq!(hotel.lat, Some(48.85));
    }
}
