use actix_web::{web, HttpResponse, Responder};

use crate::state::AppState;

#[derive(serde::Deserialize)]
pub struct QueryParams {
    city: String,
    venue: Option<String>,
}

/*
    /travel-intel?city=...&venue=monument

    Composite traffic/crowd/air/risk view. `venue` steers the time-of-day
    crowd fallback when the measured estimate is unavailable.
*/
pub async fn get_travel_intel(
    data: web::Data<AppState>,
    params: web::Query<QueryParams>,
) -> impl Responder {
    let venue = params.venue.as_deref().unwrap_or("monument");
    let intel = data.intel.assess(&params.city, venue).await;
    HttpResponse::Ok().json(intel)
}
