use std::collections::HashMap;
use std::env;

use actix_web::{HttpResponse, Responder};
use serde::Serialize;

// Environment variable for each upstream credential. Keyless providers
// (Open-Meteo, OpenAQ, Reddit) have nothing to report.
const CREDENTIALS: [(&str, &str); 11] = [
    ("weatherapi", "WEATHERAPI_KEY"),
    ("viator", "VIATOR_TOKEN"),
    ("yelp", "YELP_API_KEY"),
    ("foursquare", "FOURSQUARE_API_KEY"),
    ("geoapify", "GEOAPIFY_API_KEY"),
    ("opentripmap", "OPENTRIPMAP_API_KEY"),
    ("travelpayouts", "T_PAYOUTS_TOKEN"),
    ("youtube", "YOUTUBE_API_KEY"),
    ("gnews", "GNEWS_API_KEY"),
    ("tomtom", "TOMTOMKEY"),
    ("groq", "VY_GROQ_API_KEY"),
];

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    services: HashMap<String, String>,
    version: String,
}

/// Liveness plus which provider credentials are present. No outbound probes;
/// this endpoint has to stay cheap enough for an uptime checker.
pub async fn health_check() -> impl Responder {
    let mut services = HashMap::new();
    for (name, var) in CREDENTIALS {
        let state = if env::var(var).map_or(false, |v| !v.is_empty()) {
            "configured"
        } else {
            "missing"
        };
        services.insert(name.to_string(), state.to_string());
    }

    let status = if services.values().any(|s| s == "missing") {
        "degraded"
    } else {
        "ok"
    };

    HttpResponse::Ok().json(HealthStatus {
        status: status.to_string(),
        services,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
