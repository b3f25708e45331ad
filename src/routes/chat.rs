use actix_web::{web, HttpResponse, Responder};
use chrono::NaiveDate;
use serde_json::json;

use crate::services::itinerary_service::TripPreferences;
use crate::state::AppState;

const CONTEXT_EXPERIENCES: usize = 6;

#[derive(serde::Deserialize)]
pub struct ItineraryParams {
    location: String,
    budget: Option<String>,
    activity: Option<String>,
    duration: Option<String>,
    motivation: Option<String>,
}

#[derive(serde::Deserialize)]
pub struct ScheduleRequest {
    location: String,
    checkin: String,  // "2025-08-04"
    checkout: String,
}

/*
    GET /chat/experiences?location=...&budget=...&activity=...
*/
pub async fn itinerary_from_preferences(
    data: web::Data<AppState>,
    params: web::Query<ItineraryParams>,
) -> impl Responder {
    let location = params.location.as_str();
    let (_, experiences) = data
        .experiences
        .search(location, "", CONTEXT_EXPERIENCES)
        .await;

    let prefs = TripPreferences {
        budget: params.budget.clone(),
        activity: params.activity.clone(),
        duration: params.duration.clone(),
        motivation: params.motivation.clone(),
    };

    data.log_message("user", &format!("itinerary request for {}", location));

    match data
        .itinerary
        .three_stop_itinerary(location, &prefs, &experiences)
        .await
    {
        Ok(stops) => {
            if let Ok(serialized) = serde_json::to_string(&stops) {
                data.log_message("assistant", &serialized);
            }
            HttpResponse::Ok().json(json!({ "stops": stops }))
        }
        Err(err) => {
            eprintln!("Itinerary generation failed for {}: {}", location, err);
            HttpResponse::Ok().json(json!({ "stops": [], "error": err.to_string() }))
        }
    }
}

/*
    POST /chat/experiences  { location, checkin, checkout }
*/
pub async fn daily_schedule(
    data: web::Data<AppState>,
    body: web::Json<ScheduleRequest>,
) -> impl Responder {
    let checkin = match NaiveDate::parse_from_str(&body.checkin, "%Y-%m-%d") {
        Ok(date) => date,
        Err(_) => {
            return HttpResponse::BadRequest()
                .json(json!({ "error": "checkin must be formatted YYYY-MM-DD" }))
        }
    };
    let checkout = match NaiveDate::parse_from_str(&body.checkout, "%Y-%m-%d") {
        Ok(date) => date,
        Err(_) => {
            return HttpResponse::BadRequest()
                .json(json!({ "error": "checkout must be formatted YYYY-MM-DD" }))
        }
    };
    if checkout <= checkin {
        return HttpResponse::BadRequest()
            .json(json!({ "error": "checkout must be after checkin" }));
    }

    data.log_message(
        "user",
        &format!("{} from {} to {}", body.location, checkin, checkout),
    );

    match data
        .itinerary
        .daily_schedule(&body.location, checkin, checkout)
        .await
    {
        Ok(schedule) => {
            if let Ok(serialized) = serde_json::to_string(&schedule) {
                data.log_message("assistant", &serialized);
            }
            HttpResponse::Ok().json(json!({ "response": schedule }))
        }
        Err(err) => {
            eprintln!("Schedule generation failed for {}: {}", body.location, err);
            HttpResponse::Ok().json(json!({ "response": [], "error": err.to_string() }))
        }
    }
}
