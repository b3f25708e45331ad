use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use crate::state::AppState;

const DEFAULT_LIMIT: usize = 6;

#[derive(serde::Deserialize)]
pub struct QueryParams {
    city: String,
    checkin: String,
    checkout: String,
    limit: Option<usize>,
}

/*
    /hotels?city=...&checkin=2025-08-04&checkout=2025-08-07&limit=6
*/
pub async fn get_hotels(
    data: web::Data<AppState>,
    params: web::Query<QueryParams>,
) -> impl Responder {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT);
    match data
        .hotels
        .search(&params.city, &params.checkin, &params.checkout, limit)
        .await
    {
        Ok(hotels) => HttpResponse::Ok().json(hotels),
        Err(err) => {
            eprintln!("Hotel search failed for {}: {}", params.city, err);
            HttpResponse::InternalServerError().json(json!({ "error": err.to_string() }))
        }
    }
}
