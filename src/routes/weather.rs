use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use crate::models::weather::WeatherSnapshot;
use crate::state::AppState;

#[derive(serde::Deserialize)]
pub struct QueryParams {
    location: String,
}

/*
    /weather?location=...

    Current conditions plus the 16-day outlook. Either half degrades on its
    own: a dead provider leaves the placeholder/empty side in the response.
*/
pub async fn get_weather(
    data: web::Data<AppState>,
    params: web::Query<QueryParams>,
) -> impl Responder {
    let location = params.location.as_str();

    let current = match data.weather.current(location).await {
        Ok(snapshot) => snapshot,
        Err(err) => {
            eprintln!("Weather lookup failed for {}: {}", location, err);
            WeatherSnapshot::unknown()
        }
    };

    let forecast = match data.open_meteo.geocode(location).await {
        Ok(Some((lat, lon))) => match data.open_meteo.forecast_16_days(lat, lon).await {
            Ok(days) => days,
            Err(err) => {
                eprintln!("Forecast failed for {}: {}", location, err);
                Vec::new()
            }
        },
        Ok(None) => Vec::new(),
        Err(err) => {
            eprintln!("Geocoding failed for {}: {}", location, err);
            Vec::new()
        }
    };

    HttpResponse::Ok().json(json!({
        "current": current,
        "forecast": forecast,
    }))
}
