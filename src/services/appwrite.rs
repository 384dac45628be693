use crate::models::Profile;
use reqwest::Client;
use serde_json::{json, Value};
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

/// Appwrite API client for the user profile collection
pub struct AppwriteClient {
    base_url: String,
    api_key: String,
    project_id: String,
    database_id: String,
    client: Client,
    collections: AppwriteCollections,
}

/// Collection IDs in Appwrite
#[derive(Debug, Clone)]
pub struct AppwriteCollections {
    pub user_profiles: String,
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

    fn documents_url(&self, queries: &[Value]) -> String {
        let mut url = format!(
            "{}/databases/{}/collections/{}/documents",
            self.base_url.trim_end_matches('/'),
            self.database_id,
            self.collections.user_profiles
        );

        for (i, query) in queries.iter().enumerate() {
            url.push(if i == 0 { '?' } else { '&' });
            url.push_str("queries%5B%5D=");
            url.push_str(&urlencoding::encode(&query.to_string()));
        }

        url
    }

    async fn list_documents(&self, queries: &[Value]) -> Result<Vec<Value>, AppwriteError> {
        let url = self.documents_url(queries);

        let response = self
            .client
            .get(&url)
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AppwriteError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Appwrite list documents failed: {} - {}", status, body);
            return Err(AppwriteError::ApiError(format!("Failed to list documents: {}", status)));
        }

        let mut json: Value = response.json().await?;

        match json.get_mut("documents").map(Value::take) {
            Some(Value::Array(documents)) => Ok(documents),
            _ => Err(AppwriteError::InvalidResponse("Missing documents array".into())),
        }
    }

    /// Get a single profile by user ID
    pub async fn get_profile(&self, user_id: &str) -> Result<Profile, AppwriteError> {
        tracing::debug!("Fetching profile for user: {}", user_id);

        let queries = [
            json!({ "method": "equal", "attribute": "userId", "values": [user_id] }),
            json!({ "method": "limit", "values": [1] }),
        ];

        let documents = self.list_documents(&queries).await?;

        let doc = documents
            .into_iter()
            .next()
            .ok_or_else(|| AppwriteError::NotFound(format!("Profile not found for user {}", user_id)))?;

        serde_json::from_value(document_data(doc))
            .map_err(|e| AppwriteError::InvalidResponse(format!("Failed to parse profile: {}", e)))
    }

    /// Query active candidate profiles for a user
    ///
    /// The user's own profile and `exclude_ids` are removed from the result.
    pub async fn query_candidates(
        &self,
        user_id: &str,
        exclude_ids: &[String],
        limit: usize,
    ) -> Result<Vec<Profile>, AppwriteError> {
        let queries = [
            json!({ "method": "equal", "attribute": "isActive", "values": [true] }),
            json!({ "method": "notEqual", "attribute": "userId", "values": [user_id] }),
            json!({ "method": "limit", "values": [limit] }),
        ];

        let documents = self.list_documents(&queries).await?;
        let total = documents.len();

        let profiles: Vec<Profile> = documents
            .into_iter()
            .filter_map(|doc| match serde_json::from_value::<Profile>(document_data(doc)) {
                Ok(profile) => Some(profile),
                Err(e) => {
                    tracing::warn!("Skipping malformed profile document: {}", e);
                    None
                }
            })
            .filter(|p| p.id != user_id && !exclude_ids.contains(&p.id))
            .collect();

        tracing::debug!("Queried {} candidates (documents: {})", profiles.len(), total);

        Ok(profiles)
    }
}

/// Older Appwrite responses nest attributes under `data`
fn document_data(mut doc: Value) -> Value {
    match doc.get_mut("data").map(Value::take) {
        Some(data @ Value::Object(_)) => data,
        _ => doc,
    }
}
