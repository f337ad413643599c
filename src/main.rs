use actix_cors::Cors;
use actix_web::{error, http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use kindred_algo::config::{LoggingSettings, Settings};
use kindred_algo::core::{MatchRanker, ScoringStrategy};
use kindred_algo::routes::{
    self,
    matches::{AppState, MatchLimits, Rankers},
};
use kindred_algo::services::{AppwriteClient, ProfileCache};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

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
            .json(self)
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

/// Install the tracing subscriber; `LOG_LEVEL` / `LOG_FORMAT` override the config file
fn init_logging(logging: &LoggingSettings) {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| logging.format.clone());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load();
    let logging = settings
        .as_ref()
        .map(|s| s.logging.clone())
        .unwrap_or_default();
    init_logging(&logging);

    info!("Starting Kindred Algo compatibility service...");

    let settings = settings.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    info!("Configuration loaded successfully");

    let appwrite = AppwriteClient::new(
        settings.appwrite.endpoint.clone(),
        settings.appwrite.api_key.clone(),
        settings.appwrite.project_id.clone(),
        settings.appwrite.database_id.clone(),
        settings.collection.compatibility_profiles.clone(),
        Duration::from_secs(settings.appwrite.timeout_secs.unwrap_or(30)),
    )
    .map_err(|e| {
        error!("Failed to create Appwrite client: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;

    info!("Appwrite client initialized");

    let cache_ttl = settings.cache.ttl_secs.unwrap_or(300);
    let cache_size = settings.cache.max_entries.unwrap_or(1000);
    let cache = ProfileCache::new(cache_size, cache_ttl);

    info!("Profile cache initialized ({} entries, TTL: {}s)", cache_size, cache_ttl);

    let weights = settings.weights();
    let ranker_config = settings.matching.ranker_config();

    let rankers = Rankers {
        default_strategy: settings.scoring.strategy,
        canonical: MatchRanker::new(ScoringStrategy::Canonical.build(weights), ranker_config),
        legacy: MatchRanker::new(ScoringStrategy::Legacy.build(weights), ranker_config),
    };

    info!(
        "Rankers initialized (default strategy: {}, weights: {:?}, min score: {})",
        settings.scoring.strategy, weights, ranker_config.min_score
    );

    let app_state = AppState {
        appwrite: Arc::new(appwrite),
        cache,
        rankers,
        limits: MatchLimits {
            default_limit: settings.matching.default_limit(),
            max_limit: settings.matching.max_limit(),
            candidate_pool_size: settings.matching.candidate_pool_size(),
        },
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
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
