//! Travel-intel aggregator: traffic, crowd, air quality, and news risk for a
//! city, fetched concurrently and degraded independently. The route built on
//! this always answers; a failed provider shows up as its placeholder.

use chrono::{Datelike, Local, Timelike};

use crate::models::intel::{AirQuality, CrowdEstimate, TravelIntel, TravelRisk};
use crate::services::air_quality_service::AirQualityService;
use crate::services::crowd_rules;
use crate::services::foursquare_service::FoursquareService;
use crate::services::risk_service::RiskService;
use crate::services::traffic_service::TrafficService;
use crate::services::weather_service::OpenMeteoService;

const CROWD_SAMPLE_SIZE: usize = 10;

#[derive(Clone)]
pub struct IntelService {
    geocoder: OpenMeteoService,
    traffic: TrafficService,
    foursquare: FoursquareService,
    air_quality: AirQualityService,
    risk: RiskService,
}

impl IntelService {
    pub fn from_env() -> Self {
        Self {
            geocoder: OpenMeteoService::new(),
            traffic: TrafficService::from_env(),
            foursquare: FoursquareService::from_env(),
            air_quality: AirQualityService::new(),
            risk: RiskService::from_env(),
        }
    }

    pub async fn assess(&self, city: &str, venue: &str) -> TravelIntel {
        let coords = match self.geocoder.geocode(city).await {
            Ok(coords) => coords,
            Err(err) => {
                eprintln!("Geocoding failed for {}: {}", city, err);
                None
            }
        };

        let traffic_fut = async {
            let (lat, lon) = coords?;
            match self.traffic.flow_status(lat, lon).await {
                Ok(status) => status,
                Err(err) => {
                    eprintln!("Traffic lookup failed for {}: {}", city, err);
                    None
                }
            }
        };

        let crowd_fut = async {
            match self.foursquare.crowd_estimate(city, CROWD_SAMPLE_SIZE).await {
                Ok(estimate) => estimate,
                Err(err) => {
                    eprintln!("Crowd lookup failed for {}: {}", city, err);
                    let now = Local::now();
                    crowd_rules::estimate_crowd(
                        venue,
                        now.hour(),
                        now.weekday().num_days_from_monday(),
                    )
                }
            }
        };

        let air_fut = async {
            match self.air_quality.latest(city).await {
                Ok(reading) => reading,
                Err(err) => {
                    eprintln!("Air quality lookup failed for {}: {}", city, err);
                    AirQuality::unknown()
                }
            }
        };

        let risk_fut = async {
            match self.risk.assess(city).await {
                Ok(risk) => risk,
                Err(err) => {
                    eprintln!("Risk lookup failed for {}: {}", city, err);
                    TravelRisk::unknown()
                }
            }
        };

        let (traffic, crowd, air_quality, risk) =
            futures::join!(traffic_fut, crowd_fut, air_fut, risk_fut);

        let advice = traveler_advice(traffic.as_ref().map(|t| t.traffic_level.as_str()));

        TravelIntel {
            city: city.to_string(),
            traffic,
            crowd,
            air_quality,
            risk,
            advice,
        }
    }
}

/// One-line sightseeing advice from the traffic level. No data reads as
/// favorable, same as light traffic.
pub fn traveler_advice(traffic_level: Option<&str>) -> String {
    match traffic_level {
        Some("High") => "Expect delays reaching popular attractions".to_string(),
        Some("Moderate") => "Some congestion expected near tourist areas".to_string(),
        _ => "Traffic conditions are favorable for sightseeing".to_string(),
    }
}
