use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use voyayaha_api::routes;
use voyayaha_api::state::AppState;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    println!("Application starting...");

    env_logger::init_from_env(Env::default().default_filter_or("info"));

    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    } else {
        println!("Release mode");
    }

    let host = std::env::var("HOST").unwrap_or_else(|_| HOST.to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| PORT.to_string())
        .parse()
        .unwrap_or(PORT);
    println!("Attempting to bind to {}:{}", host, port);

    let state = AppState::from_env();

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .app_data(web::Data::new(state.clone()))
            .route("/", web::get().to(|| async { "Voyayaha API is running" }))
            .route("/health", web::get().to(routes::health::health_check))
            .route(
                "/experiences",
                web::get().to(routes::experiences::get_experiences),
            )
            .route(
                "/village/experiences",
                web::get().to(routes::village::get_village_experiences),
            )
            .service(
                web::scope("/chat")
                    .route(
                        "/experiences",
                        web::get().to(routes::chat::itinerary_from_preferences),
                    )
                    .route("/experiences", web::post().to(routes::chat::daily_schedule)),
            )
            .route("/weather", web::get().to(routes::weather::get_weather))
            .route("/hotels", web::get().to(routes::hotels::get_hotels))
            .route("/social", web::get().to(routes::social::get_social_feed))
            .route("/trends", web::get().to(routes::social::get_trends))
            .route(
                "/mindful",
                web::get().to(routes::mindful::get_mindful_places),
            )
            .route(
                "/travel-intel",
                web::get().to(routes::intel::get_travel_intel),
            )
            .route(
                "/yoga-events",
                web::get().to(routes::yoga::get_yoga_events),
            )
            .route("/img", web::get().to(routes::img::proxy_image))
    })
    .bind((host, port))?
    .run()
    .await
}
