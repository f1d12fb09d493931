use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;

use crate::models::{LikeEvent, MatchRecord, Pet};
use crate::services::store::{LikeStore, MatchStore, StoreError};

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// PostgreSQL client for the append-only like and match records
///
/// Pets live in the document store; this database only ever sees inserts
/// and reads keyed by user id.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, PostgresError> {
        if url.is_empty() {
            return Err(PostgresError::InvalidInput("database.url is empty".to_string()));
        }

        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }

    /// Record a like event
    pub async fn insert_like(&self, like: &LikeEvent) -> Result<(), PostgresError> {
        let query = r#"
            INSERT INTO likes (id, liker_user_id, liked_pet_id, owner_id, created_at)
            VALUES ($1, $2, $3, $4, $5)
        "#;

        sqlx::query(query)
            .bind(uuid::Uuid::new_v4())
            .bind(&like.liker_user_id)
            .bind(&like.liked_pet_id)
            .bind(&like.owner_id)
            .bind(like.created_at)
            .execute(&self.pool)
            .await?;

        tracing::debug!("Recorded like: {} -> {}", like.liker_user_id, like.liked_pet_id);

        Ok(())
    }

    /// All likes recorded by `user_id`, oldest first
    pub async fn likes_by(&self, user_id: &str) -> Result<Vec<LikeEvent>, PostgresError> {
        let query = r#"
            SELECT liker_user_id, liked_pet_id, owner_id, created_at
            FROM likes
            WHERE liker_user_id = $1
            ORDER BY created_at ASC
        "#;

        let rows = sqlx::query(query).bind(user_id).fetch_all(&self.pool).await?;

        let likes: Vec<LikeEvent> = rows
            .iter()
            .map(|row| LikeEvent {
                liker_user_id: row.get("liker_user_id"),
                liked_pet_id: row.get("liked_pet_id"),
                owner_id: row.get("owner_id"),
                created_at: row.get("created_at"),
            })
            .collect();

        tracing::debug!("User {} has {} likes", user_id, likes.len());

        Ok(likes)
    }

    /// Record a match with both pet snapshots
    pub async fn insert_match(&self, record: &MatchRecord) -> Result<(), PostgresError> {
        let id = uuid::Uuid::parse_str(&record.id)
            .map_err(|e| PostgresError::InvalidInput(format!("match id {}: {}", record.id, e)))?;

        let query = r#"
            INSERT INTO matches (id, user_id_1, user_id_2, pet_1_id, pet_1, pet_2_id, pet_2, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#;

        sqlx::query(query)
            .bind(id)
            .bind(&record.user_id_1)
            .bind(&record.user_id_2)
            .bind(&record.pet_1_id)
            .bind(Json(&record.pet_1))
            .bind(&record.pet_2_id)
            .bind(Json(&record.pet_2))
            .bind(record.created_at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Matches with `user_id` on either side, newest first
    pub async fn matches_for(&self, user_id: &str) -> Result<Vec<MatchRecord>, PostgresError> {
        let query = r#"
            SELECT id, user_id_1, user_id_2, pet_1_id, pet_1, pet_2_id, pet_2, created_at
            FROM matches
            WHERE user_id_1 = $1 OR user_id_2 = $1
            ORDER BY created_at DESC
        "#;

        let rows = sqlx::query(query).bind(user_id).fetch_all(&self.pool).await?;

        Ok(rows.iter().map(match_from_row).collect())
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

fn match_from_row(row: &PgRow) -> MatchRecord {
    let id: uuid::Uuid = row.get("id");
    let pet_1: Json<Pet> = row.get("pet_1");
    let pet_2: Json<Pet> = row.get("pet_2");

    MatchRecord {
        id: id.to_string(),
        user_id_1: row.get("user_id_1"),
        user_id_2: row.get("user_id_2"),
        pet_1_id: row.get("pet_1_id"),
        pet_1: pet_1.0,
        pet_2_id: row.get("pet_2_id"),
        pet_2: pet_2.0,
        created_at: row.get("created_at"),
    }
}

#[async_trait]
impl LikeStore for PostgresClient {
    async fn append_like(&self, like: &LikeEvent) -> Result<(), StoreError> {
        Ok(self.insert_like(like).await?)
    }

    async fn list_likes_by(&self, user_id: &str) -> Result<Vec<LikeEvent>, StoreError> {
        Ok(self.likes_by(user_id).await?)
    }
}

#[async_trait]
impl MatchStore for PostgresClient {
    async fn append_match(&self, record: &MatchRecord) -> Result<(), StoreError> {
        Ok(self.insert_match(record).await?)
    }

    async fn list_matches_for(&self, user_id: &str) -> Result<Vec<MatchRecord>, StoreError> {
        Ok(self.matches_for(user_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_url_rejected() {
        let result = PostgresClient::from_settings("", None, None, None, None).await;
        assert!(matches!(result, Err(PostgresError::InvalidInput(_))));
    }

    #[tokio::test]
    #[ignore = "Requires PostgreSQL"]
    async fn test_like_roundtrip() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL not set");
        let client = PostgresClient::from_settings(&url, Some(2), Some(1), None, None)
            .await
            .expect("Failed to connect");

        let like = LikeEvent::new("it-user", "it-pet", "it-owner");
        client.insert_like(&like).await.unwrap();

        let likes = client.likes_by("it-user").await.unwrap();
        assert!(likes.iter().any(|l| l.liked_pet_id == "it-pet"));
    }
}
