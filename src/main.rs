use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use kindred_match::config::{LoggingSettings, Settings};
use kindred_match::core::Matcher;
use kindred_match::routes::{self, AppState};
use kindred_match::services::{CacheManager, PgProfileRepository};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// LOG_LEVEL / LOG_FORMAT override the configured values; RUST_LOG wins over both
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
        subscriber.json().init();
    }
}

fn config_error(e: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::InvalidInput, format!("Configuration error: {}", e))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration
    let loaded = Settings::load();
    let logging = loaded
        .as_ref()
        .map(|settings| settings.logging.clone())
        .unwrap_or_default();

    init_logging(&logging);

    info!("Starting Kindred Match compatibility service...");

    let settings = loaded.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        config_error(e)
    })?;

    let weights = settings.scoring.validated_weights().map_err(|e| {
        error!("Invalid scoring weights: {}", e);
        config_error(e)
    })?;

    info!("Configuration loaded successfully");

    // Initialize PostgreSQL profile repository
    let repository = PgProfileRepository::from_settings(
        &settings.database.url,
        settings.database.max_connections,
        settings.database.min_connections,
        settings.database.acquire_timeout_secs,
        settings.database.idle_timeout_secs,
    )
    .await
    .map_err(|e| {
        error!("Failed to connect to PostgreSQL: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;

    info!(
        "PostgreSQL repository initialized (max: {} connections)",
        settings.database.max_connections.unwrap_or(10)
    );

    let matcher = Matcher::new(weights);

    info!("Matcher initialized with weights: {:?}", weights);

    let mut app_state = AppState::new(Arc::new(repository), matcher)
        .with_ranking(settings.ranking.limits());

    // Score cache is optional - the service works without it
    if settings.cache.enabled {
        let ttl = settings.cache.ttl_secs.unwrap_or(300);
        let l1_size = settings.cache.l1_cache_size.unwrap_or(10_000);

        let cache = match &settings.cache.redis_url {
            Some(url) => match CacheManager::with_redis(url, l1_size, ttl).await {
                Ok(cache) => cache,
                Err(e) => {
                    warn!("Failed to connect to Redis ({}), using in-process cache only", e);
                    CacheManager::in_memory(l1_size, ttl)
                }
            },
            None => CacheManager::in_memory(l1_size, ttl),
        };

        info!("Score cache initialized: {:?}", cache.stats());
        app_state = app_state.with_cache(Arc::new(cache));
    } else {
        info!("Score cache disabled");
    }

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .configure(routes::configure_extractors)
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
