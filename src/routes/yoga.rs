use actix_web::{web, HttpResponse, Responder};

use crate::models::experience::Experience;
use crate::state::AppState;

const DEFAULT_LIMIT: usize = 6;

#[derive(serde::Deserialize)]
pub struct QueryParams {
    location: String,
    limit: Option<usize>,
}

/*
    /yoga-events?location=...&limit=6

    Wellness surface; Yelp is the only provider with usable coverage here.
*/
pub async fn get_yoga_events(
    data: web::Data<AppState>,
    params: web::Query<QueryParams>,
) -> impl Responder {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT);
    match data.yelp.search(&params.location, "yoga", limit).await {
        Ok(events) => HttpResponse::Ok().json(events),
        Err(err) => {
            eprintln!("Yoga search failed for {}: {}", params.location, err);
            HttpResponse::Ok().json(Vec::<Experience>::new())
        }
    }
}
