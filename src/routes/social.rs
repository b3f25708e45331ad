use actix_web::{web, HttpResponse, Responder};

use crate::models::social::SocialPost;
use crate::state::AppState;

const DEFAULT_LIMIT: usize = 5;

#[derive(serde::Deserialize)]
pub struct FeedParams {
    query: String,
    limit: Option<usize>,
}

#[derive(serde::Deserialize)]
pub struct TrendsParams {
    city: String,
}

/*
    /social?query=...&limit=5
*/
pub async fn get_social_feed(
    data: web::Data<AppState>,
    params: web::Query<FeedParams>,
) -> impl Responder {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT);
    let feed = data.social.combined_feed(&params.query, limit).await;
    HttpResponse::Ok().json(feed)
}

/*
    /trends?city=...
*/
pub async fn get_trends(
    data: web::Data<AppState>,
    params: web::Query<TrendsParams>,
) -> impl Responder {
    match data.social.trending_spots(&params.city).await {
        Ok(posts) => HttpResponse::Ok().json(posts),
        Err(err) => {
            eprintln!("Trending lookup failed for {}: {}", params.city, err);
            HttpResponse::Ok().json(Vec::<SocialPost>::new())
        }
    }
}
