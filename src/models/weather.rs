use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub summary: String,
    pub temperature_c: Option<f64>,
    pub indoor_preferred: bool,
}

impl WeatherSnapshot {
    /// Placeholder returned when the weather provider is unreachable. Biasing
    /// toward indoor keeps the experience filter conservative on bad data.
    pub fn unknown() -> Self {
        Self {
            summary: "Unknown".to_string(),
            temperature_c: None,
            indoor_preferred: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: String,
    pub max_temp: f64,
    pub min_temp: f64,
    pub weather_code: i32,
}
