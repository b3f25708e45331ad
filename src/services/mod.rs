pub mod air_quality_service;
pub mod crowd_rules;
pub mod experience_service;
pub mod foursquare_service;
pub mod geoapify_service;
pub mod hotels_service;
pub mod intel_service;
pub mod itinerary_service;
pub mod llm_service;
pub mod opentripmap_service;
pub mod provider;
pub mod risk_service;
pub mod social_service;
pub mod traffic_service;
pub mod viator_service;
pub mod weather_service;
pub mod yelp_service;
