use async_trait::async_trait;
use thiserror::Error;

use crate::models::{LikeEvent, MatchRecord, Pet};
use crate::services::appwrite::AppwriteError;
use crate::services::postgres::PostgresError;

/// Failure of a backend read or write
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Document store error: {0}")]
    Appwrite(AppwriteError),

    #[error("Database error: {0}")]
    Postgres(PostgresError),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<AppwriteError> for StoreError {
    fn from(err: AppwriteError) -> Self {
        match err {
            AppwriteError::NotFound(what) => StoreError::NotFound(what),
            other => StoreError::Appwrite(other),
        }
    }
}

impl From<PostgresError> for StoreError {
    fn from(err: PostgresError) -> Self {
        match err {
            PostgresError::NotFound(what) => StoreError::NotFound(what),
            other => StoreError::Postgres(other),
        }
    }
}

/// Pet documents
#[async_trait]
pub trait PetStore: Send + Sync {
    async fn get_pet(&self, pet_id: &str) -> Result<Pet, StoreError>;

    async fn save_pet(&self, pet: &Pet) -> Result<(), StoreError>;

    async fn delete_pet(&self, pet_id: &str) -> Result<(), StoreError>;

    async fn list_pets_owned_by(&self, user_id: &str) -> Result<Vec<Pet>, StoreError>;

    /// Every pet not owned by `excluding_user_id` and not in `excluding_pet_ids`
    async fn list_candidate_pets(
        &self,
        excluding_user_id: &str,
        excluding_pet_ids: &[String],
    ) -> Result<Vec<Pet>, StoreError>;
}

/// Append-only like events
#[async_trait]
pub trait LikeStore: Send + Sync {
    async fn append_like(&self, like: &LikeEvent) -> Result<(), StoreError>;

    /// Likes recorded by `user_id`, oldest first
    async fn list_likes_by(&self, user_id: &str) -> Result<Vec<LikeEvent>, StoreError>;
}

/// Append-only match records
#[async_trait]
pub trait MatchStore: Send + Sync {
    async fn append_match(&self, record: &MatchRecord) -> Result<(), StoreError>;

    /// Matches with `user_id` on either side, newest first
    async fn list_matches_for(&self, user_id: &str) -> Result<Vec<MatchRecord>, StoreError>;
}
