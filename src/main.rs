use actix_cors::Cors;
use actix_web::{web, App, HttpServer, HttpResponse, middleware, error, http::StatusCode};
use animinder::config::{Settings, StorageBackend};
use animinder::routes::{self, AppState};
use animinder::services::{
    AppwriteClient, AppwriteCollections, LikeStore, MatchStore, MemoryStore, PetStore,
    PostgresClient, SessionRegistry,
};
use std::sync::Arc;
use tracing::{info, error};
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

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

/// LOG_LEVEL and LOG_FORMAT win over the [logging] section
fn init_tracing(settings: Option<&Settings>) {
    let (default_level, default_format) = settings
        .map(|s| (s.logging.level.clone(), s.logging.format.clone()))
        .unwrap_or_else(|| ("info".to_string(), "json".to_string()));

    let log_level = std::env::var("LOG_LEVEL").unwrap_or(default_level);
    let log_format = std::env::var("LOG_FORMAT").unwrap_or(default_format);

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level))
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

fn startup_error(context: &str, err: impl std::fmt::Display) -> std::io::Error {
    error!("{}: {}", context, err);
    std::io::Error::new(std::io::ErrorKind::Other, format!("{}: {}", context, err))
}

type Stores = (Arc<dyn PetStore>, Arc<dyn LikeStore>, Arc<dyn MatchStore>, Option<Arc<PostgresClient>>);

async fn build_stores(settings: &Settings) -> std::io::Result<Stores> {
    match settings.storage.backend {
        StorageBackend::Memory => {
            info!("Using in-memory storage; data is lost on restart");
            let store = Arc::new(MemoryStore::new());
            let pets: Arc<dyn PetStore> = store.clone();
            let likes: Arc<dyn LikeStore> = store.clone();
            let matches: Arc<dyn MatchStore> = store;
            Ok((pets, likes, matches, None))
        }
        StorageBackend::Hosted => {
            let appwrite = AppwriteClient::new(
                settings.appwrite.endpoint.clone(),
                settings.appwrite.api_key.clone(),
                settings.appwrite.project_id.clone(),
                settings.appwrite.database_id.clone(),
                AppwriteCollections {
                    pets: settings.collection.pets.clone(),
                },
            )
            .map_err(|e| startup_error("Failed to build Appwrite client", e))?;

            info!("Appwrite client initialized (collection: {})", settings.collection.pets);

            let postgres = Arc::new(
                PostgresClient::from_settings(
                    &settings.database.url,
                    settings.database.max_connections,
                    settings.database.min_connections,
                    settings.database.acquire_timeout_secs,
                    settings.database.idle_timeout_secs,
                )
                .await
                .map_err(|e| startup_error("Failed to connect to PostgreSQL", e))?,
            );

            info!(
                "PostgreSQL client initialized (max: {} connections)",
                settings.database.max_connections.unwrap_or(10)
            );

            let pets: Arc<dyn PetStore> = Arc::new(appwrite);
            let likes: Arc<dyn LikeStore> = postgres.clone();
            let matches: Arc<dyn MatchStore> = postgres.clone();
            Ok((pets, likes, matches, Some(postgres)))
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load();
    init_tracing(settings.as_ref().ok());

    info!("Starting Animinder swipe service...");

    let settings = settings.map_err(|e| startup_error("Failed to load configuration", e))?;

    info!("Configuration loaded successfully (storage: {:?})", settings.storage.backend);

    let (pets, likes, matches, postgres) = build_stores(&settings).await?;

    let sessions = SessionRegistry::new(settings.sessions.capacity, settings.sessions.idle_ttl_secs);

    info!(
        "Session registry initialized ({} sessions, idle TTL: {}s)",
        settings.sessions.capacity, settings.sessions.idle_ttl_secs
    );

    let mut app_state = AppState::new(pets, likes, matches, sessions, settings.swipe.clone());
    if let Some(postgres) = postgres {
        app_state = app_state.with_postgres(postgres);
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
