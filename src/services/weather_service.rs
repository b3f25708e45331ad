use std::env;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::models::weather::{DailyForecast, WeatherSnapshot};
use crate::services::provider::ProviderError;

const WEATHERAPI_URL: &str = "https://api.weatherapi.com/v1/current.json";

/// Condition keywords that push recommendations indoors.
const INDOOR_CONDITIONS: [&str; 6] = ["rain", "snow", "storm", "fog", "drizzle", "wind"];

#[derive(Debug, Deserialize)]
struct WeatherApiResponse {
    current: CurrentConditions,
}

#[derive(Debug, Deserialize)]
struct CurrentConditions {
    temp_c: f64,
    condition: ConditionBlock,
}

#[derive(Debug, Deserialize)]
struct ConditionBlock {
    text: String,
}

#[derive(Clone)]
pub struct WeatherService {
    client: Client,
    api_key: Option<String>,
}

impl WeatherService {
    pub fn from_env() -> Self {
        Self {
            client: Client::new(),
            api_key: env::var("WEATHERAPI_KEY").ok(),
        }
    }

    pub async fn current(&self, location: &str) -> Result<WeatherSnapshot, ProviderError> {
        let key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingCredential("weatherapi"))?;

        let response = self
            .client
            .get(WEATHERAPI_URL)
            .query(&[("key", key), ("q", location), ("aqi", "no")])
            .timeout(Duration::from_secs(10))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::from_response("weatherapi", response).await);
        }

        let data: WeatherApiResponse = response.json().await.map_err(|e| {
            ProviderError::Decode {
                provider: "weatherapi",
                detail: e.to_string(),
            }
        })?;

        let condition = data.current.condition.text.to_lowercase();
        Ok(WeatherSnapshot {
            summary: title_case(&condition),
            temperature_c: Some(data.current.temp_c),
            indoor_preferred: indoor_preferred(&condition),
        })
    }
}

/// True when the condition text suggests staying inside.
pub fn indoor_preferred(condition: &str) -> bool {
    let condition = condition.to_lowercase();
    INDOOR_CONDITIONS.iter().any(|word| condition.contains(word))
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// ── Open-Meteo: keyless geocoding + 16-day forecast ──

const GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Vec<GeocodingResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    daily: DailyBlock,
}

#[derive(Debug, Deserialize)]
struct DailyBlock {
    time: Vec<String>,
    temperature_2m_max: Vec<f64>,
    temperature_2m_min: Vec<f64>,
    weathercode: Vec<i32>,
}

#[derive(Clone)]
pub struct OpenMeteoService {
    client: Client,
}

impl OpenMeteoService {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// City name to coordinates; `Ok(None)` when the geocoder has no match.
    pub async fn geocode(&self, city: &str) -> Result<Option<(f64, f64)>, ProviderError> {
        let response = self
            .client
            .get(GEOCODING_URL)
            .query(&[
                ("name", city),
                ("count", "1"),
                ("language", "en"),
                ("format", "json"),
            ])
            .timeout(Duration::from_secs(10))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::from_response("open-meteo", response).await);
        }

        let data: GeocodingResponse = response.json().await.map_err(|e| {
            ProviderError::Decode {
                provider: "open-meteo",
                detail: e.to_string(),
            }
        })?;

        Ok(data
            .results
            .first()
            .map(|hit| (hit.latitude, hit.longitude)))
    }

    pub async fn forecast_16_days(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<Vec<DailyForecast>, ProviderError> {
        let response = self
            .client
            .get(FORECAST_URL)
            .query(&[
                ("latitude", lat.to_string()),
                ("longitude", lon.to_string()),
                (
                    "daily",
                    "temperature_2m_max,temperature_2m_min,weathercode".to_string(),
                ),
                ("forecast_days", "16".to_string()),
                ("timezone", "auto".to_string()),
            ])
            .timeout(Duration::from_secs(10))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::from_response("open-meteo", response).await);
        }

        let data: ForecastResponse = response.json().await.map_err(|e| {
            ProviderError::Decode {
                provider: "open-meteo",
                detail: e.to_string(),
            }
        })?;

        let daily = data.daily;
        let days = daily
            .time
            .iter()
            .zip(daily.temperature_2m_max.iter())
            .zip(daily.temperature_2m_min.iter())
            .zip(daily.weathercode.iter())
            .map(|(((date, max), min), code)| DailyForecast {
                date: date.clone(),
                max_temp: *max,
                min_temp: *min,
                weather_code: *code,
            })
            .collect();

        Ok(days)
    }
}

impl Default for OpenMeteoService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rainy_conditions_prefer_indoor() {
        assert!(indoor_preferred("Light rain shower"));
        assert!(indoor_preferred("Patchy snow possible"));
        assert!(indoor_preferred("Thundery storm"));
        assert!(indoor_preferred("Freezing fog"));
        assert!(indoor_preferred("Light drizzle"));
        assert!(indoor_preferred("Windy"));
    }

    #[test]
    fn test_clear_conditions_prefer_outdoor() {
        assert!(!indoor_preferred("Sunny"));
        assert!(!indoor_preferred("Partly cloudy"));
        assert!(!indoor_preferred("Clear"));
    }

    #[test]
    fn test_title_case_summary() {
        assert_eq!(title_case("light rain shower"), "Light Rain Shower");
        assert_eq!(title_case("sunny"), "Sunny");
        assert_eq!(title_case(""), "");
    }
}
