use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use std::collections::HashMap;

use crate::models::{HealthResponse, MatchesResponse};
use crate::routes::{error_response, store_error_response, AppState};

/// Configure health, like history and match routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/likes", web::get().to(get_liked_pets))
        .route("/matches", web::get().to(get_matches));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    // Memory-backed deployments have nothing to ping
    let healthy = match &state.postgres {
        Some(postgres) => postgres.health_check().await.unwrap_or(false),
        None => true,
    };

    let status = if healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

fn required_user_id(query: &HashMap<String, String>) -> Result<&str, HttpResponse> {
    query.get("userId").map(String::as_str).ok_or_else(|| {
        error_response(
            StatusCode::BAD_REQUEST,
            "Missing userId parameter",
            "userId query parameter is required",
        )
    })
}

/// Get the pet ids a user has liked
///
/// GET /api/v1/likes?userId={userId}
async fn get_liked_pets(
    state: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    let user_id = match required_user_id(&query) {
        Ok(user_id) => user_id,
        Err(response) => return response,
    };

    match state.likes.list_likes_by(user_id).await {
        Ok(likes) => {
            let ids: Vec<String> = likes.into_iter().map(|like| like.liked_pet_id).collect();
            tracing::debug!("User {} has liked {} pets", user_id, ids.len());
            HttpResponse::Ok().json(serde_json::json!({
                "userId": user_id,
                "likedPetIds": ids,
                "count": ids.len(),
            }))
        }
        Err(e) => {
            tracing::error!("Failed to fetch likes for {}: {}", user_id, e);
            store_error_response("Failed to fetch likes", &e)
        }
    }
}

/// Get a user's matches, newest first
///
/// GET /api/v1/matches?userId={userId}
async fn get_matches(
    state: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    let user_id = match required_user_id(&query) {
        Ok(user_id) => user_id,
        Err(response) => return response,
    };

    match state.matches.list_matches_for(user_id).await {
        Ok(matches) => HttpResponse::Ok().json(MatchesResponse {
            user_id: user_id.to_string(),
            count: matches.len(),
            matches,
        }),
        Err(e) => {
            tracing::error!("Failed to fetch matches for {}: {}", user_id, e);
            store_error_response("Failed to fetch matches", &e)
        }
    }
}
