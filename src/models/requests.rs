use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::domain::{Pet, PLACEHOLDER_PHOTO};

/// Youngest and oldest accepted pet age in years
pub const MIN_PET_AGE: u8 = 1;
pub const MAX_PET_AGE: u8 = 30;

/// Request to add a pet to the owner's profile
///
/// `age` arrives as the raw form text so that non-numeric input is reported
/// as a validation failure rather than a JSON error.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePetRequest {
    #[validate(length(min = 1), custom(function = "not_blank"))]
    #[serde(alias = "owner_id", rename = "ownerId")]
    pub owner_id: String,
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[validate(custom(function = "not_blank"))]
    #[serde(alias = "species", rename = "type")]
    pub species: String,
    #[validate(custom(function = "valid_age"))]
    pub age: String,
    #[validate(custom(function = "not_blank"))]
    pub breed: String,
    #[serde(alias = "photo", rename = "image", default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub bio: String,
}

impl CreatePetRequest {
    /// Build the pet document. Call after `validate()` has passed.
    pub fn into_pet(self) -> Result<Pet, ValidationError> {
        let age = parse_age(&self.age)?;
        let photo = self
            .photo
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| PLACEHOLDER_PHOTO.to_string());

        Ok(Pet {
            id: uuid::Uuid::new_v4().to_string(),
            name: self.name.trim().to_string(),
            species: self.species.trim().to_string(),
            age,
            breed: self.breed.trim().to_string(),
            photo,
            bio: self.bio.trim().to_string(),
            owner_id: self.owner_id,
        })
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Please fill all fields".into());
        return Err(err);
    }
    Ok(())
}

fn valid_age(value: &str) -> Result<(), ValidationError> {
    parse_age(value).map(|_| ())
}

fn parse_age(value: &str) -> Result<u8, ValidationError> {
    value
        .trim()
        .parse::<u8>()
        .ok()
        .filter(|age| (MIN_PET_AGE..=MAX_PET_AGE).contains(age))
        .ok_or_else(|| {
            let mut err = ValidationError::new("age_range");
            err.message = Some(format!("Please enter valid age ({}-{})", MIN_PET_AGE, MAX_PET_AGE).into());
            err
        })
}

/// Request to build (or rebuild) a user's swipe deck
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoadDeckRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    /// Card width in logical units of the client viewport
    #[validate(range(min = 1.0))]
    #[serde(alias = "viewport_width", rename = "viewportWidth")]
    pub viewport_width: f64,
}

/// Drag sample reported while the finger is down
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DragUpdateRequest {
    pub dx: f64,
    pub dy: f64,
}

/// Drag release sample: cumulative offset plus release velocity
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DragReleaseRequest {
    pub dx: f64,
    pub dy: f64,
    #[serde(default)]
    pub vx: f64,
    #[serde(default)]
    pub vy: f64,
}
