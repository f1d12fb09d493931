use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

use crate::models::Pet;
use crate::services::store::{PetStore, StoreError};

/// Documents fetched per list request
const PAGE_SIZE: usize = 100;

/// Errors that can occur when interacting with Appwrite
#[derive(Debug, Error)]
pub enum AppwriteError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: invalid API key or token")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Collection IDs in Appwrite
#[derive(Debug, Clone)]
pub struct AppwriteCollections {
    pub pets: String,
}

/// Appwrite document store client holding pet profiles
pub struct AppwriteClient {
    base_url: String,
    api_key: String,
    project_id: String,
    database_id: String,
    client: Client,
    collections: AppwriteCollections,
}

impl AppwriteClient {
    /// Create a new Appwrite client
    pub fn new(
        base_url: String,
        api_key: String,
        project_id: String,
        database_id: String,
        collections: AppwriteCollections,
    ) -> Result<Self, AppwriteError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            base_url,
            api_key,
            project_id,
            database_id,
            client,
            collections,
        })
    }

    fn documents_url(&self) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.base_url.trim_end_matches('/'),
            self.database_id,
            self.collections.pets
        )
    }

    fn document_url(&self, document_id: &str) -> String {
        format!("{}/{}", self.documents_url(), urlencoding::encode(document_id))
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
    }

    /// Map a non-success status to an error
    async fn check(response: Response, what: &str) -> Result<Response, AppwriteError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read body".to_string());

        match status {
            StatusCode::NOT_FOUND => Err(AppwriteError::NotFound(what.to_string())),
            StatusCode::UNAUTHORIZED => Err(AppwriteError::Unauthorized),
            _ => {
                tracing::error!("Appwrite request for {} failed: {} - {}", what, status, body);
                Err(AppwriteError::ApiError(format!("{}: {}", what, status)))
            }
        }
    }

    /// Fetch all pet documents matching `queries`, following offset pages
    ///
    /// Pages are ordered by document id so offsets stay stable between
    /// requests. With `skip_malformed` unset, a document that does not parse
    /// as a pet fails the whole listing.
    async fn list_pets(&self, queries: &[Value], skip_malformed: bool) -> Result<Vec<Pet>, AppwriteError> {
        let mut pets = Vec::new();
        let mut offset = 0;

        loop {
            let mut params: Vec<String> = queries.iter().map(Value::to_string).collect();
            params.push(json!({ "method": "orderAsc", "attribute": "$id" }).to_string());
            params.push(json!({ "method": "limit", "values": [PAGE_SIZE] }).to_string());
            params.push(json!({ "method": "offset", "values": [offset] }).to_string());

            let query_string = params
                .iter()
                .map(|q| format!("queries[]={}", urlencoding::encode(q)))
                .collect::<Vec<_>>()
                .join("&");

            let url = format!("{}?{}", self.documents_url(), query_string);
            tracing::debug!("Listing pets (offset {})", offset);

            let response = self.authorized(self.client.get(&url)).send().await?;
            let json: Value = Self::check(response, "list pets").await?.json().await?;

            let documents = json
                .get("documents")
                .and_then(|d| d.as_array())
                .ok_or_else(|| AppwriteError::InvalidResponse("Missing documents array".into()))?;

            let page_len = documents.len();
            for doc in documents {
                let data = doc.get("data").unwrap_or(doc);
                match serde_json::from_value::<Pet>(data.clone()) {
                    Ok(pet) => pets.push(pet),
                    Err(e) if skip_malformed => {
                        tracing::warn!("Skipping malformed pet document: {}", e);
                    }
                    Err(e) => {
                        return Err(AppwriteError::InvalidResponse(format!("Failed to parse pet: {}", e)));
                    }
                }
            }

            if page_len < PAGE_SIZE {
                break;
            }
            offset += page_len;
        }

        Ok(pets)
    }

    pub async fn fetch_pet(&self, pet_id: &str) -> Result<Pet, AppwriteError> {
        let response = self
            .authorized(self.client.get(self.document_url(pet_id)))
            .send()
            .await?;
        let json: Value = Self::check(response, &format!("pet {}", pet_id)).await?.json().await?;

        let data = json.get("data").unwrap_or(&json);
        serde_json::from_value(data.clone())
            .map_err(|e| AppwriteError::InvalidResponse(format!("Failed to parse pet: {}", e)))
    }

    /// Create the pet document, or update it if the id already exists
    pub async fn upsert_pet(&self, pet: &Pet) -> Result<(), AppwriteError> {
        let payload = json!({ "documentId": pet.id, "data": pet });

        let response = self
            .authorized(self.client.post(self.documents_url()))
            .json(&payload)
            .send()
            .await?;

        if response.status() == StatusCode::CONFLICT {
            tracing::debug!("Pet {} exists, updating", pet.id);
            let response = self
                .authorized(self.client.patch(self.document_url(&pet.id)))
                .json(&json!({ "data": pet }))
                .send()
                .await?;
            Self::check(response, "update pet").await?;
            return Ok(());
        }

        Self::check(response, "create pet").await?;
        tracing::debug!("Saved pet {} for owner {}", pet.id, pet.owner_id);
        Ok(())
    }

    pub async fn remove_pet(&self, pet_id: &str) -> Result<(), AppwriteError> {
        let response = self
            .authorized(self.client.delete(self.document_url(pet_id)))
            .send()
            .await?;
        Self::check(response, &format!("pet {}", pet_id)).await?;
        Ok(())
    }
}

#[async_trait]
impl PetStore for AppwriteClient {
    async fn get_pet(&self, pet_id: &str) -> Result<Pet, StoreError> {
        Ok(self.fetch_pet(pet_id).await?)
    }

    async fn save_pet(&self, pet: &Pet) -> Result<(), StoreError> {
        Ok(self.upsert_pet(pet).await?)
    }

    async fn delete_pet(&self, pet_id: &str) -> Result<(), StoreError> {
        Ok(self.remove_pet(pet_id).await?)
    }

    async fn list_pets_owned_by(&self, user_id: &str) -> Result<Vec<Pet>, StoreError> {
        let queries = [json!({ "method": "equal", "attribute": "ownerId", "values": [user_id] })];
        // Every owned pet must reach the resolver
        let pets = self.list_pets(&queries, false).await?;

        tracing::debug!("Loaded {} pets for owner {}", pets.len(), user_id);
        Ok(pets)
    }

    async fn list_candidate_pets(
        &self,
        excluding_user_id: &str,
        excluding_pet_ids: &[String],
    ) -> Result<Vec<Pet>, StoreError> {
        let queries = [json!({ "method": "notEqual", "attribute": "ownerId", "values": [excluding_user_id] })];

        let pets: Vec<Pet> = self
            .list_pets(&queries, true)
            .await?
            .into_iter()
            .filter(|p| p.owner_id != excluding_user_id && !excluding_pet_ids.contains(&p.id))
            .collect();

        tracing::debug!("Queried {} candidate pets for {}", pets.len(), excluding_user_id);
        Ok(pets)
    }
}
