use serde::{Deserialize, Serialize};

/// Normalized place/experience record shared by every point-of-interest
/// provider. `source` names the provider that produced it; everything else is
/// optional because the providers disagree on schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Experience {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_formatted: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
    pub source: String,
}

impl Experience {
    pub fn new(title: impl Into<String>, source: &str) -> Self {
        Self {
            title: title.into(),
            description: None,
            rating: None,
            review_count: None,
            price: None,
            price_formatted: None,
            address: None,
            image: None,
            url: None,
            categories: Vec::new(),
            source: source.to_string(),
        }
    }
}
