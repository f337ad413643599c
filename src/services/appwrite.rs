use crate::models::Profile;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

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

/// Appwrite API client
///
/// The profile store the ranker reads from. Only fetches; the core never
/// writes profiles back.
pub struct AppwriteClient {
    base_url: String,
    api_key: String,
    project_id: String,
    database_id: String,
    client: Client,
    profiles_collection: String,
}

impl AppwriteClient {
    /// Create a new Appwrite client
    pub fn new(
        base_url: String,
        api_key: String,
        project_id: String,
        database_id: String,
        profiles_collection: String,
        timeout: Duration,
    ) -> Result<Self, AppwriteError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            api_key,
            project_id,
            database_id,
            client,
            profiles_collection,
        })
    }

    fn documents_url(&self, queries: &[String]) -> Result<String, AppwriteError> {
        let queries_json = serde_json::to_string(queries)
            .map_err(|e| AppwriteError::InvalidResponse(format!("Failed to encode queries: {}", e)))?;

        Ok(format!(
            "{}/databases/{}/collections/{}/documents?queries={}",
            self.base_url.trim_end_matches('/'),
            self.database_id,
            self.profiles_collection,
            urlencoding::encode(&queries_json)
        ))
    }

    async fn fetch_documents(&self, url: &str) -> Result<Vec<Value>, AppwriteError> {
        let response = self
            .client
            .get(url)
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(AppwriteError::Unauthorized);
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Appwrite request failed: {} - {}", status, body);
            return Err(AppwriteError::ApiError(format!("Request failed: {}", status)));
        }

        let json: Value = response.json().await?;

        let documents = json
            .get("documents")
            .and_then(|d| d.as_array())
            .ok_or_else(|| AppwriteError::InvalidResponse("Missing documents array".into()))?;

        Ok(documents.clone())
    }

    /// Get a single compatibility profile by user ID
    pub async fn get_profile(&self, user_id: &str) -> Result<Profile, AppwriteError> {
        let url = self.documents_url(&[
            format!("equal(\"userId\", [\"{}\"])", user_id),
            "limit(1)".to_string(),
        ])?;

        tracing::debug!("Fetching profile for user: {}", user_id);

        let documents = self.fetch_documents(&url).await?;
        let doc = documents
            .first()
            .ok_or_else(|| AppwriteError::NotFound(format!("Profile not found for user {}", user_id)))?;

        decode_profile(doc)
            .map_err(|e| AppwriteError::InvalidResponse(format!("Failed to parse profile: {}", e)))
    }

    /// Fetch the candidate pool for a user
    ///
    /// Each document is decoded on its own. A document that cannot be read
    /// comes back as `None` so the ranker can report it instead of the whole
    /// fetch failing.
    pub async fn list_candidates(
        &self,
        user_id: &str,
        pool_size: usize,
    ) -> Result<Vec<Option<Profile>>, AppwriteError> {
        let url = self.documents_url(&[
            format!("notEqual(\"userId\", [\"{}\"])", user_id),
            format!("limit({})", pool_size),
        ])?;

        let documents = self.fetch_documents(&url).await?;

        let candidates: Vec<Option<Profile>> = documents
            .iter()
            .map(|doc| match decode_profile(doc) {
                Ok(profile) => Some(profile),
                Err(e) => {
                    tracing::debug!("Undecodable candidate document: {}", e);
                    None
                }
            })
            .collect();

        tracing::debug!("Queried {} candidates for {}", candidates.len(), user_id);

        Ok(candidates)
    }
}

/// Decode an Appwrite document into a profile
///
/// Profiles may be stored flat or under `data`. The `userId` attribute wins
/// over the document `$id` when both are present.
fn decode_profile(doc: &Value) -> Result<Profile, serde_json::Error> {
    let data = doc.get("data").unwrap_or(doc);
    let mut profile: Profile = serde_json::from_value(data.clone())?;

    if profile.id.is_empty() {
        if let Some(id) = doc.get("$id").and_then(Value::as_str) {
            profile.id = id.to_string();
        }
    }

    Ok(profile)
}
