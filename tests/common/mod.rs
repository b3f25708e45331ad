use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App};

use voyayaha_api::routes;
use voyayaha_api::state::AppState;

// Every upstream credential the app reads. Scrubbed before each TestApp so
// the suite is deterministic and never reaches the network.
const PROVIDER_VARS: [&str; 11] = [
    "WEATHERAPI_KEY",
    "VIATOR_TOKEN",
    "YELP_API_KEY",
    "FOURSQUARE_API_KEY",
    "GEOAPIFY_API_KEY",
    "OPENTRIPMAP_API_KEY",
    "T_PAYOUTS_TOKEN",
    "YOUTUBE_API_KEY",
    "GNEWS_API_KEY",
    "TOMTOMKEY",
    "VY_GROQ_API_KEY",
];

pub struct TestApp {
    pub state: AppState,
}

impl TestApp {
    pub fn new() -> Self {
        for var in PROVIDER_VARS {
            std::env::remove_var(var);
        }
        std::env::set_var("MESSAGE_LOG_PATH", ":memory:");

        Self {
            state: AppState::from_env(),
        }
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .app_data(web::Data::new(self.state.clone()))
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
    }
}
