use std::env;

use crate::db::message_log::MessageLog;
use crate::services::experience_service::ExperienceService;
use crate::services::geoapify_service::GeoapifyService;
use crate::services::hotels_service::HotelsService;
use crate::services::intel_service::IntelService;
use crate::services::itinerary_service::ItineraryService;
use crate::services::opentripmap_service::OpenTripMapService;
use crate::services::social_service::SocialService;
use crate::services::weather_service::{OpenMeteoService, WeatherService};
use crate::services::yelp_service::YelpService;

const DEFAULT_MESSAGE_LOG: &str = "concierge.db";

/// Everything the route handlers share. Cheap to clone: each service is a
/// reqwest client plus its credential, and the cache/log handles are Arcs.
#[derive(Clone)]
pub struct AppState {
    pub weather: WeatherService,
    pub open_meteo: OpenMeteoService,
    pub experiences: ExperienceService,
    pub itinerary: ItineraryService,
    pub hotels: HotelsService,
    pub social: SocialService,
    pub opentripmap: OpenTripMapService,
    pub geoapify: GeoapifyService,
    pub yelp: YelpService,
    pub intel: IntelService,
    pub messages: Option<MessageLog>,
}

impl AppState {
    pub fn from_env() -> Self {
        let log_path =
            env::var("MESSAGE_LOG_PATH").unwrap_or_else(|_| DEFAULT_MESSAGE_LOG.to_string());
        let messages = match MessageLog::open(&log_path) {
            Ok(log) => Some(log),
            Err(err) => {
                eprintln!("Message log unavailable at {}: {}", log_path, err);
                None
            }
        };

        Self {
            weather: WeatherService::from_env(),
            open_meteo: OpenMeteoService::new(),
            experiences: ExperienceService::from_env(),
            itinerary: ItineraryService::from_env(),
            hotels: HotelsService::from_env(),
            social: SocialService::from_env(),
            opentripmap: OpenTripMapService::from_env(),
            geoapify: GeoapifyService::from_env(),
            yelp: YelpService::from_env(),
            intel: IntelService::from_env(),
            messages,
        }
    }

    /// Best-effort chat transcript write; a broken log never fails a request.
    pub fn log_message(&self, role: &str, content: &str) {
        if let Some(log) = &self.messages {
            if let Err(err) = log.save_message(role, content) {
                eprintln!("Failed to log {} message: {}", role, err);
            }
        }
    }
}
