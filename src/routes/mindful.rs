use actix_web::{web, HttpResponse, Responder};

use crate::models::place::MindfulPlace;
use crate::state::AppState;

const DEFAULT_RADIUS_M: u32 = 2_000;
const DEFAULT_LIMIT: usize = 5;

#[derive(serde::Deserialize)]
pub struct QueryParams {
    location: String,
    radius: Option<u32>,
    limit: Option<usize>,
}

/*
    /mindful?location=...&radius=2000&limit=5

    Quiet nearby attractions. Degrades to an empty list rather than failing,
    since this feeds an optional UI panel.
*/
pub async fn get_mindful_places(
    data: web::Data<AppState>,
    params: web::Query<QueryParams>,
) -> impl Responder {
    let location = params.location.as_str();

    let coords = match data.opentripmap.geocode(location).await {
        Ok(coords) => coords,
        Err(err) => {
            eprintln!("OpenTripMap geocode failed for {}: {}", location, err);
            None
        }
    };

    let (lat, lon) = match coords {
        Some(coords) => coords,
        None => return HttpResponse::Ok().json(Vec::<MindfulPlace>::new()),
    };

    let radius = params.radius.unwrap_or(DEFAULT_RADIUS_M);
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT);
    match data
        .opentripmap
        .nearby_attractions(lat, lon, radius, limit)
        .await
    {
        Ok(places) => HttpResponse::Ok().json(places),
        Err(err) => {
            eprintln!("OpenTripMap radius search failed for {}: {}", location, err);
            HttpResponse::Ok().json(Vec::<MindfulPlace>::new())
        }
    }
}
