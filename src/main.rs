use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use std::io;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use swipematch::config::{LoggingSettings, Settings, StorageBackend, StorageSettings};
use swipematch::routes::{self, AppState};
use swipematch::services::{
    CachedRepository, InMemoryRepository, MatchRepository, PostgresRepository, TokenService,
};

fn init_logging(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

async fn build_repository(storage: &StorageSettings) -> io::Result<Arc<dyn MatchRepository>> {
    match storage.backend {
        StorageBackend::Postgres => {
            let url = storage.url.as_deref().ok_or_else(|| {
                io::Error::new(io::ErrorKind::InvalidInput, "storage.url is required for postgres")
            })?;

            let repository = PostgresRepository::from_settings(
                url,
                storage.max_connections,
                storage.min_connections,
                storage.acquire_timeout_secs,
                storage.idle_timeout_secs,
            )
            .await
            .map_err(|e| {
                error!("Failed to connect to PostgreSQL: {}", e);
                io::Error::new(io::ErrorKind::Other, e.to_string())
            })?;

            info!(
                "PostgreSQL repository initialized (max: {} connections)",
                storage.max_connections.unwrap_or(10)
            );
            Ok(Arc::new(repository))
        }
        StorageBackend::Memory => {
            warn!("Using in-memory storage; data is lost on restart");
            Ok(Arc::new(InMemoryRepository::new()))
        }
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e.to_string())
    })?;

    init_logging(&settings.logging);
    info!("Starting swipematch service...");

    let tokens = TokenService::new(&settings.auth.jwt_secret, settings.auth.token_ttl_secs)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;

    let storage = build_repository(&settings.storage).await?;
    let repository: Arc<dyn MatchRepository> = Arc::new(CachedRepository::new(
        storage,
        settings.cache.profile_cache_size,
        settings.cache.ttl_secs,
    ));

    info!(
        "Profile cache initialized ({} entries, TTL: {}s)",
        settings.cache.profile_cache_size, settings.cache.ttl_secs
    );

    let age_bounds = settings.discovery.age_bounds();
    info!("Discovery default age bounds: {:?}", age_bounds);

    let app_state = AppState::new(repository, tokens, age_bounds);

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
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
