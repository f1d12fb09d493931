// Route exports
pub mod deck;
pub mod matches;
pub mod pets;

use actix_web::{http::StatusCode, web, HttpResponse};
use std::sync::Arc;

use crate::config::SwipeSettings;
use crate::core::MatchResolver;
use crate::models::ErrorResponse;
use crate::services::{LikeStore, MatchStore, PetStore, PostgresClient, SessionRegistry, StoreError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub pets: Arc<dyn PetStore>,
    pub likes: Arc<dyn LikeStore>,
    pub matches: Arc<dyn MatchStore>,
    pub resolver: MatchResolver,
    pub sessions: SessionRegistry,
    pub swipe: SwipeSettings,
    /// Present when likes and matches live in PostgreSQL
    pub postgres: Option<Arc<PostgresClient>>,
}

impl AppState {
    pub fn new(
        pets: Arc<dyn PetStore>,
        likes: Arc<dyn LikeStore>,
        matches: Arc<dyn MatchStore>,
        sessions: SessionRegistry,
        swipe: SwipeSettings,
    ) -> Self {
        let resolver = MatchResolver::new(pets.clone(), likes.clone(), matches.clone());

        Self {
            pets,
            likes,
            matches,
            resolver,
            sessions,
            swipe,
            postgres: None,
        }
    }

    pub fn with_postgres(mut self, postgres: Arc<PostgresClient>) -> Self {
        self.postgres = Some(postgres);
        self
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(matches::configure)
            .configure(pets::configure)
            .configure(deck::configure),
    );
}

pub(crate) fn error_response(status: StatusCode, error: &str, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message: message.into(),
        status_code: status.as_u16(),
    })
}

/// Map a store failure onto a JSON error response
pub(crate) fn store_error_response(error: &str, err: &StoreError) -> HttpResponse {
    match err {
        StoreError::NotFound(what) => error_response(StatusCode::NOT_FOUND, error, format!("Not found: {}", what)),
        other => error_response(StatusCode::INTERNAL_SERVER_ERROR, error, other.to_string()),
    }
}
