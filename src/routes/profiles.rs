use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use crate::services::CacheKey;
use super::{error_response, AppState};

/// Configure profile cache routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/profiles/{user_id}/cache", web::delete().to(invalidate_profile));
}

/// Drop a cached profile so the next lookup reads Appwrite
///
/// DELETE /api/v1/profiles/{userId}/cache
///
/// Called after a profile edit.
async fn invalidate_profile(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let user_id = path.into_inner();

    match state.cache.delete(&CacheKey::profile(&user_id)).await {
        Ok(()) => {
            tracing::debug!("Invalidated cached profile for {}", user_id);
            HttpResponse::Ok().json(serde_json::json!({ "success": true }))
        }
        Err(e) => {
            tracing::error!("Failed to invalidate profile {}: {}", user_id, e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "cache_error", e)
        }
    }
}
