use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use std::collections::HashMap;
use validator::Validate;

use crate::models::CreatePetRequest;
use crate::routes::{error_response, store_error_response, AppState};

/// Configure pet profile routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/pets", web::post().to(create_pet))
        .route("/pets", web::get().to(list_pets))
        .route("/pets/{pet_id}", web::delete().to(delete_pet));
}

/// Add a pet to the owner's profile
///
/// POST /api/v1/pets
///
/// Request body:
/// ```json
/// {
///   "ownerId": "string",
///   "name": "Max",
///   "type": "Dog",
///   "age": "3",
///   "breed": "Golden Retriever",
///   "image": "https://...",
///   "bio": "string"
/// }
/// ```
async fn create_pet(
    state: web::Data<AppState>,
    req: web::Json<CreatePetRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Rejected pet for {}: {}", req.owner_id, errors);
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    let pet = match req.into_inner().into_pet() {
        Ok(pet) => pet,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, "Validation failed", e.to_string()),
    };

    match state.pets.save_pet(&pet).await {
        Ok(()) => {
            tracing::info!("Created pet {} ({}) for {}", pet.id, pet.name, pet.owner_id);
            HttpResponse::Created().json(pet)
        }
        Err(e) => {
            tracing::error!("Failed to save pet for {}: {}", pet.owner_id, e);
            store_error_response("Failed to save pet", &e)
        }
    }
}

/// List the pets owned by a user
///
/// GET /api/v1/pets?ownerId={ownerId}
async fn list_pets(
    state: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    let Some(owner_id) = query.get("ownerId") else {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Missing ownerId parameter",
            "ownerId query parameter is required",
        );
    };

    match state.pets.list_pets_owned_by(owner_id).await {
        Ok(pets) => HttpResponse::Ok().json(pets),
        Err(e) => {
            tracing::error!("Failed to list pets for {}: {}", owner_id, e);
            store_error_response("Failed to list pets", &e)
        }
    }
}

/// Remove a pet from its owner's profile
///
/// DELETE /api/v1/pets/{petId}
async fn delete_pet(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let pet_id = path.into_inner();

    match state.pets.delete_pet(&pet_id).await {
        Ok(()) => {
            tracing::info!("Deleted pet {}", pet_id);
            HttpResponse::NoContent().finish()
        }
        Err(e) => {
            tracing::warn!("Failed to delete pet {}: {}", pet_id, e);
            store_error_response("Failed to delete pet", &e)
        }
    }
}
