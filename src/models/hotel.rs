use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hotel {
    pub name: String,
    pub rating: Option<f64>,
    pub price: Option<f64>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}
