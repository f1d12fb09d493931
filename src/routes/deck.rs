use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;

use crate::core::{Decision, GesturePhase, SwipeSession, SwipeStep};
use crate::models::{DeckCard, DeckResponse, DragReleaseRequest, DragUpdateRequest, DragUpdateResponse, LoadDeckRequest, SwipeResponse};
use crate::routes::{error_response, store_error_response, AppState};
use crate::services::SharedSession;

/// Configure deck and swipe routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/deck/load", web::post().to(load_deck))
        .route("/deck/{user_id}", web::get().to(get_deck))
        .route("/deck/{user_id}", web::delete().to(drop_deck))
        .route("/deck/{user_id}/drag", web::post().to(drag))
        .route("/deck/{user_id}/release", web::post().to(release))
        .route("/deck/{user_id}/complete", web::post().to(complete))
        .route("/deck/{user_id}/like", web::post().to(like_top))
        .route("/deck/{user_id}/pass", web::post().to(pass_top));
}

fn deck_response(session: &SwipeSession) -> DeckResponse {
    let deck = session.deck();
    let cards = deck
        .visible()
        .iter()
        .enumerate()
        .map(|(index, pet)| DeckCard {
            pet: pet.clone(),
            interactive: index == 0,
        })
        .collect();

    DeckResponse {
        user_id: session.user_id().to_string(),
        cards,
        remaining: deck.remaining(),
        position: deck.position(),
    }
}

async fn find_session(state: &AppState, user_id: &str) -> Result<SharedSession, HttpResponse> {
    state.sessions.get(user_id).await.ok_or_else(|| {
        error_response(
            StatusCode::NOT_FOUND,
            "No active deck",
            format!("Load a deck for {} first", user_id),
        )
    })
}

/// Build the user's swipe deck
///
/// POST /api/v1/deck/load
///
/// Request body:
/// ```json
/// {
///   "userId": "string",
///   "viewportWidth": 390.0
/// }
/// ```
async fn load_deck(
    state: web::Data<AppState>,
    req: web::Json<LoadDeckRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    let config = state.swipe.gesture_config(req.viewport_width);
    let session = match SwipeSession::load(&req.user_id, config, state.pets.as_ref(), state.likes.as_ref()).await {
        Ok(session) => session,
        Err(e) => {
            tracing::error!("Failed to load deck for {}: {}", req.user_id, e);
            return store_error_response("Failed to load deck", &e);
        }
    };

    let response = deck_response(&session);
    state.sessions.insert(session).await;

    HttpResponse::Ok().json(response)
}

/// Current visible cards
///
/// GET /api/v1/deck/{userId}
async fn get_deck(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let user_id = path.into_inner();
    let shared = match find_session(&state, &user_id).await {
        Ok(shared) => shared,
        Err(response) => return response,
    };

    let session = shared.lock().await;
    HttpResponse::Ok().json(deck_response(&session))
}

/// Forget the user's deck; the next load starts fresh
///
/// DELETE /api/v1/deck/{userId}
async fn drop_deck(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let user_id = path.into_inner();
    state.sessions.remove(&user_id).await;

    tracing::debug!("Dropped deck for {}", user_id);
    HttpResponse::NoContent().finish()
}

/// Feed a drag sample for the top card
///
/// POST /api/v1/deck/{userId}/drag
async fn drag(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<DragUpdateRequest>,
) -> impl Responder {
    let user_id = path.into_inner();
    let shared = match find_session(&state, &user_id).await {
        Ok(shared) => shared,
        Err(response) => return response,
    };

    let mut session = shared.lock().await;
    match session.drag_update(req.dx, req.dy) {
        Some(signals) => HttpResponse::Ok().json(DragUpdateResponse {
            dragging: session.interpreter().phase() == GesturePhase::Dragging,
            signals,
        }),
        None => error_response(StatusCode::CONFLICT, "Deck exhausted", "No card left to drag"),
    }
}

/// Release the drag on the top card
///
/// POST /api/v1/deck/{userId}/release
///
/// Request body:
/// ```json
/// { "dx": 120.0, "dy": 8.0, "vx": 0.7, "vy": 0.0 }
/// ```
async fn release(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<DragReleaseRequest>,
) -> impl Responder {
    let user_id = path.into_inner();
    let shared = match find_session(&state, &user_id).await {
        Ok(shared) => shared,
        Err(response) => return response,
    };

    let mut session = shared.lock().await;
    let step = session.release(req.dx, req.dy, req.vx, req.vy);
    apply_step(&state, &mut session, step).await
}

/// The client finished the release animation
///
/// POST /api/v1/deck/{userId}/complete
async fn complete(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let user_id = path.into_inner();
    let shared = match find_session(&state, &user_id).await {
        Ok(shared) => shared,
        Err(response) => return response,
    };

    shared.lock().await.complete_animation();
    HttpResponse::NoContent().finish()
}

/// Like button on the top card
///
/// POST /api/v1/deck/{userId}/like
async fn like_top(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    decide_top(state, path.into_inner(), Decision::Accept).await
}

/// Pass button on the top card
///
/// POST /api/v1/deck/{userId}/pass
async fn pass_top(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    decide_top(state, path.into_inner(), Decision::Reject).await
}

async fn decide_top(state: web::Data<AppState>, user_id: String, decision: Decision) -> HttpResponse {
    let shared = match find_session(&state, &user_id).await {
        Ok(shared) => shared,
        Err(response) => return response,
    };

    let mut session = shared.lock().await;
    let step = session.decide(decision);
    apply_step(&state, &mut session, step).await
}

/// Run the downstream effects of a decided card
async fn apply_step(state: &AppState, session: &mut SwipeSession, step: SwipeStep) -> HttpResponse {
    let SwipeStep { release, pet } = step;

    let outcome = match (release.decision, &pet) {
        (Decision::Accept, Some(pet)) => match session.like(&state.resolver, pet).await {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                tracing::error!("Failed to like {} for {}: {}", pet.id, session.user_id(), e);
                return store_error_response("Failed to like pet", &e);
            }
        },
        (Decision::Reject, Some(pet)) => {
            tracing::debug!("{} passed on {}", session.user_id(), pet.id);
            None
        }
        _ => None,
    };

    if let Some(outcome) = &outcome {
        if outcome.is_match() {
            tracing::info!("New match for {}", session.user_id());
        }
    }

    HttpResponse::Ok().json(SwipeResponse {
        decision: release.decision,
        motion: release.motion,
        pet_id: pet.map(|p| p.id),
        outcome,
        remaining: session.deck().remaining(),
    })
}
