use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{RecommendRequest, ScoreRequest, RecommendResponse, ScoreResponse, HealthResponse};
use super::{appwrite_error_response, error_response, AppState};

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches/recommend", web::post().to(recommend))
        .route("/matches/score", web::post().to(score));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let pg_healthy = state.postgres.health_check().await.unwrap_or(false);

    let status = if pg_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Recommend connections
///
/// POST /api/v1/matches/recommend
///
/// Request body:
/// ```json
/// {
///   "userId": "string",
///   "limit": 20,
///   "excludeUserIds": ["string"],
///   "query": "optional search text"
/// }
/// ```
async fn recommend(
    state: web::Data<AppState>,
    req: web::Json<RecommendRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for recommend request: {:?}", errors);
        return error_response(StatusCode::BAD_REQUEST, "validation_failed", errors);
    }

    let user_id = &req.user_id;
    let limit = req
        .limit
        .unwrap_or(state.matching.default_limit)
        .min(state.matching.max_limit) as usize;

    tracing::info!("Recommending matches for user: {}, limit: {}", user_id, limit);

    let reference = match state.load_profile(user_id).await {
        Ok(profile) => profile,
        Err(e) => {
            tracing::error!("Failed to fetch profile for {}: {}", user_id, e);
            return appwrite_error_response(e, "Failed to fetch user profile");
        }
    };

    // Blocked users are never recommended; a lookup failure degrades to no blocks
    let mut excluded = match state.postgres.blocked_ids(user_id).await {
        Ok(ids) => ids,
        Err(e) => {
            tracing::warn!("Failed to fetch blocked users for {}, proceeding without: {}", user_id, e);
            vec![]
        }
    };
    excluded.extend(req.exclude_user_ids.iter().cloned());

    let candidates = match state
        .appwrite
        .query_candidates(user_id, &excluded, state.matching.candidate_pool_size)
        .await
    {
        Ok(candidates) => candidates,
        Err(e) => {
            tracing::error!("Failed to query candidates for {}: {}", user_id, e);
            return appwrite_error_response(e, "Failed to query candidates");
        }
    };

    let result = state.matcher.recommend(
        &reference,
        candidates,
        &excluded,
        req.query.as_deref(),
        limit,
    );

    tracing::info!(
        "Returning {} matches for user {} (from {} candidates)",
        result.matches.len(),
        user_id,
        result.total_candidates
    );

    HttpResponse::Ok().json(RecommendResponse {
        matches: result.matches,
        total_candidates: result.total_candidates,
    })
}

/// Score one user against another
///
/// POST /api/v1/matches/score
async fn score(
    state: web::Data<AppState>,
    req: web::Json<ScoreRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, "validation_failed", errors);
    }

    let reference = match state.load_profile(&req.user_id).await {
        Ok(profile) => profile,
        Err(e) => return appwrite_error_response(e, "Failed to fetch user profile"),
    };

    let target = match state.load_profile(&req.target_user_id).await {
        Ok(profile) => profile,
        Err(e) => return appwrite_error_response(e, "Failed to fetch target profile"),
    };

    let breakdown = state.matcher.breakdown(&reference, &target);

    tracing::debug!("Score {} -> {}: {}", req.user_id, req.target_user_id, breakdown.score);

    HttpResponse::Ok().json(ScoreResponse {
        user_id: req.user_id.clone(),
        target_user_id: req.target_user_id.clone(),
        breakdown,
    })
}
