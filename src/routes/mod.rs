// Route exports
pub mod connections;
pub mod matches;
pub mod profiles;

use actix_web::{error, http::StatusCode, web, HttpRequest, HttpResponse};
use crate::core::Matcher;
use crate::config::MatchingSettings;
use crate::models::{ErrorResponse, Profile};
use crate::services::{AppwriteClient, AppwriteError, CacheKey, CacheManager, PostgresClient, PostgresError};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub appwrite: Arc<AppwriteClient>,
    pub cache: Arc<CacheManager>,
    pub postgres: Arc<PostgresClient>,
    pub matcher: Matcher,
    pub matching: MatchingSettings,
}

impl AppState {
    /// Fetch a profile through the cache
    pub async fn load_profile(&self, user_id: &str) -> Result<Profile, AppwriteError> {
        let key = CacheKey::profile(user_id);

        if let Ok(profile) = self.cache.get::<Profile>(&key).await {
            return Ok(profile);
        }

        let profile = self.appwrite.get_profile(user_id).await?;

        if let Err(e) = self.cache.set(&key, &profile).await {
            tracing::warn!("Failed to cache profile {}: {}", user_id, e);
        }

        Ok(profile)
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(matches::configure)
            .configure(connections::configure)
            .configure(profiles::configure),
    );
}

/// JSON error for payload extraction failures
#[derive(Debug)]
pub struct JsonError(ErrorResponse);

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.0.error, self.0.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status_code).unwrap_or(StatusCode::BAD_REQUEST)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(&self.0)
    }
}

fn bad_request(error: &str, message: String) -> actix_web::Error {
    JsonError(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: 400,
    })
    .into()
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    bad_request("invalid_json", format!("Invalid JSON: {}", err))
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    bad_request("invalid_query", format!("Invalid query: {}", err))
}

/// Handle path parameter errors (e.g. malformed connection ids)
pub fn handle_path_error(err: error::PathError, _req: &HttpRequest) -> actix_web::Error {
    bad_request("invalid_path", format!("Invalid path: {}", err))
}

pub(crate) fn error_response(status: StatusCode, error: &str, message: impl ToString) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message: message.to_string(),
        status_code: status.as_u16(),
    })
}

pub(crate) fn appwrite_error_response(err: AppwriteError, context: &str) -> HttpResponse {
    let (status, code) = match err {
        AppwriteError::NotFound(_) => (StatusCode::NOT_FOUND, "profile_not_found"),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "profile_store_error"),
    };
    error_response(status, code, format!("{}: {}", context, err))
}

pub(crate) fn postgres_error_response(err: PostgresError, context: &str) -> HttpResponse {
    let (status, code) = match err {
        PostgresError::NotFound(_) => (StatusCode::NOT_FOUND, "connection_not_found"),
        PostgresError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "invalid_input"),
        PostgresError::Conflict(_) => (StatusCode::CONFLICT, "connection_conflict"),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "database_error"),
    };
    error_response(status, code, format!("{}: {}", context, err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        let resp = appwrite_error_response(AppwriteError::NotFound("u1".into()), "Profile not found");
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = appwrite_error_response(AppwriteError::Unauthorized, "Failed");
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let resp = postgres_error_response(PostgresError::InvalidInput("self".into()), "Bad");
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = postgres_error_response(PostgresError::Conflict("dup".into()), "Failed");
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn test_error_bodies_use_snake_case_codes() {
        let resp = appwrite_error_response(AppwriteError::NotFound("u1".into()), "Failed to fetch user profile");
        let body = actix_web::body::to_bytes(resp.into_body()).await.unwrap();
        let body: ErrorResponse = serde_json::from_slice(&body).unwrap();

        assert_eq!(body.error, "profile_not_found");
        assert!(body.message.starts_with("Failed to fetch user profile: "));
        assert_eq!(body.status_code, 404);

        let resp = postgres_error_response(PostgresError::NotFound("c1".into()), "Failed to reject connection");
        let body = actix_web::body::to_bytes(resp.into_body()).await.unwrap();
        let body: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(body.error, "connection_not_found");
    }
}
