use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use crate::state::AppState;

const DEFAULT_PER_PAGE: usize = 6;

#[derive(serde::Deserialize)]
pub struct QueryParams {
    location: String,
    #[serde(default)]
    query: String,
    per_page: Option<usize>,
}

/*
    /experiences?location=...&query=...&per_page=6
*/
pub async fn get_experiences(
    data: web::Data<AppState>,
    params: web::Query<QueryParams>,
) -> impl Responder {
    let per_page = params.per_page.unwrap_or(DEFAULT_PER_PAGE);
    let (weather, experiences) = data
        .experiences
        .search(&params.location, &params.query, per_page)
        .await;

    HttpResponse::Ok().json(json!({
        "weather": weather,
        "experiences": experiences,
    }))
}
