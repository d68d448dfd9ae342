use actix_cors::Cors;
use actix_web::{error, http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use std::sync::Arc;
use stylo_algo::config::Settings;
use stylo_algo::core::{ComboHistory, InMemoryHistory, Stylist, SuggestionEngine};
use stylo_algo::routes;
use stylo_algo::routes::suggestions::AppState;
use stylo_algo::services::{GeminiStylist, WardrobeStoreClient};
use tracing::{error, info};

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .content_type("application/json")
            .body(serde_json::to_string(self).unwrap())
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Initialize logging
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(log_level))
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting Stylo Algo suggestion service...");

    // Load configuration
    let settings = Settings::load().unwrap_or_else(|e| {
        error!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    info!("Configuration loaded successfully");

    // Initialize wardrobe store client
    let weather_ttl = settings.cache.weather_ttl_secs.unwrap_or(1800);
    let store = Arc::new(WardrobeStoreClient::new(
        settings.store.endpoint,
        settings.store.api_key,
        weather_ttl,
    ));

    info!("Wardrobe store client initialized (weather TTL: {}s)", weather_ttl);

    // Initialize the Gemini stylist
    let stylist: Arc<dyn Stylist> = Arc::new(
        GeminiStylist::new(
            settings.gemini.api_key,
            settings.gemini.model.clone(),
            settings.gemini.timeout_secs,
        )
        .with_temperature(settings.gemini.temperature)
        .with_max_output_tokens(settings.gemini.max_output_tokens),
    );

    info!("Stylist initialized (model: {})", settings.gemini.model);

    // Suggestion history lives for the process lifetime, keyed per owner.
    let history: Arc<dyn ComboHistory> = Arc::new(InMemoryHistory::new());

    // Initialize the suggestion engine with configured adjustments
    let engine = SuggestionEngine::new(
        settings.scoring.adjustments.to_adjustments(),
        settings.suggestion.max_results.unwrap_or(5),
        settings.suggestion.max_fallback_outfits.unwrap_or(4),
    );

    info!("Suggestion engine initialized");

    // Build application state
    let app_state = AppState {
        store,
        stylist,
        history,
        engine,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
