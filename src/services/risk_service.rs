use std::env;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::models::intel::TravelRisk;
use crate::services::provider::ProviderError;

const SEARCH_URL: &str = "https://gnews.io/api/v4/search";

const LOW_RISK: f64 = 1.0;
const ELEVATED_RISK: f64 = 4.0;

const RISK_KEYWORDS: [&str; 7] = [
    "protest",
    "riot",
    "unrest",
    "emergency",
    "alert",
    "ban",
    "evacuation",
];

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
struct Article {
    title: String,
}

#[derive(Clone)]
pub struct RiskService {
    client: Client,
    api_key: Option<String>,
}

impl RiskService {
    pub fn from_env() -> Self {
        Self {
            client: Client::new(),
            api_key: env::var("GNEWS_API_KEY").ok(),
        }
    }

    /// News-headline screen for a destination. Crude keyword scoring, not a
    /// security product.
    pub async fn assess(&self, country: &str) -> Result<TravelRisk, ProviderError> {
        let key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingCredential("gnews"))?;

        let query = format!("{country} travel OR {country} safety OR {country} unrest");
        let response = self
            .client
            .get(SEARCH_URL)
            .query(&[
                ("q", query.as_str()),
                ("lang", "en"),
                ("token", key),
                ("max", "10"),
            ])
            .timeout(Duration::from_secs(10))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::from_response("gnews", response).await);
        }

        let data: SearchResponse = response.json().await.map_err(|e| {
            ProviderError::Decode {
                provider: "gnews",
                detail: e.to_string(),
            }
        })?;

        let headlines: Vec<String> = data.articles.into_iter().map(|a| a.title).collect();
        let top: Vec<&str> = headlines
            .iter()
            .take(3)
            .map(|s| s.as_str())
            .collect();

        Ok(TravelRisk {
            risk_level: Some(score_headlines(&headlines)),
            message: format!("Top news: {:?}", top),
        })
    }
}

pub fn score_headlines(headlines: &[String]) -> f64 {
    let summary = headlines.join(" | ").to_lowercase();
    if RISK_KEYWORDS.iter().any(|kw| summary.contains(kw)) {
        ELEVATED_RISK
    } else {
        LOW_RISK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_benign_headlines_score_low() {
        let headlines = titles(&[
            "10 beaches to visit this summer",
            "Food guide for the old town",
        ]);
        assert_eq!(score_headlines(&headlines), LOW_RISK);
    }

    #[test]
    fn test_risk_keyword_raises_score() {
        let headlines = titles(&["Protest shuts down the city center"]);
        assert_eq!(score_headlines(&headlines), ELEVATED_RISK);
    }

    #[test]
    fn test_no_headlines_score_low() {
        assert_eq!(score_headlines(&[]), LOW_RISK);
    }
}
