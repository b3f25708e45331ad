use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use crate::state::AppState;

const DEFAULT_RADIUS_M: u32 = 50_000;

#[derive(serde::Deserialize)]
pub struct QueryParams {
    location: String,
    radius: Option<u32>,
}

/*
    /village/experiences?location=...&radius=50000
*/
pub async fn get_village_experiences(
    data: web::Data<AppState>,
    params: web::Query<QueryParams>,
) -> impl Responder {
    let location = params.location.as_str();

    let coords = match data.geoapify.geocode(location).await {
        Ok(coords) => coords,
        Err(err) => {
            eprintln!("Geoapify geocode failed for {}: {}", location, err);
            return HttpResponse::InternalServerError().json(json!({ "error": err.to_string() }));
        }
    };

    let (lat, lon) = match coords {
        Some(coords) => coords,
        None => {
            return HttpResponse::Ok().json(json!({
                "location": location,
                "error": "Location not found",
                "experiences": [],
            }))
        }
    };

    let radius = params.radius.unwrap_or(DEFAULT_RADIUS_M);
    match data.geoapify.village_places(lat, lon, radius).await {
        Ok(experiences) => HttpResponse::Ok().json(json!({
            "location": location,
            "latitude": lat,
            "longitude": lon,
            "count": experiences.len(),
            "experiences": experiences,
        })),
        Err(err) => {
            eprintln!("Geoapify places failed for {}: {}", location, err);
            HttpResponse::InternalServerError().json(json!({ "error": err.to_string() }))
        }
    }
}
