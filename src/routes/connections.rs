use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use uuid::Uuid;
use validator::Validate;
use crate::models::{ConnectionResponse, ConnectionStatus, UserIdsResponse, UserPairRequest, UserQuery};
use super::{appwrite_error_response, error_response, postgres_error_response, AppState};

/// Configure all connection routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/connections", web::post().to(send_request))
        .route("/connections", web::get().to(list_connections))
        .route("/connections/pending", web::get().to(list_pending))
        .route("/connections/blocked", web::get().to(list_blocked))
        .route("/connections/block", web::post().to(block_user))
        .route("/connections/unblock", web::post().to(unblock_user))
        .route("/connections/{id}/accept", web::post().to(accept_request))
        .route("/connections/{id}/reject", web::post().to(reject_request));
}

/// Send a connection request
///
/// POST /api/v1/connections
///
/// Request body:
/// ```json
/// { "fromUserId": "string", "toUserId": "string" }
/// ```
async fn send_request(
    state: web::Data<AppState>,
    req: web::Json<UserPairRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, "validation_failed", errors);
    }

    match state.postgres.send_request(&req.from_user_id, &req.to_user_id).await {
        Ok(connection) => {
            tracing::info!("Connection request {} -> {}", req.from_user_id, req.to_user_id);
            HttpResponse::Ok().json(ConnectionResponse { connection })
        }
        Err(e) => {
            tracing::error!("Failed to create connection request: {}", e);
            postgres_error_response(e, "Failed to send connection request")
        }
    }
}

/// Accept a pending request
///
/// POST /api/v1/connections/{id}/accept
///
/// The match score and shared tags are computed from both profiles and
/// stored with the connection.
async fn accept_request(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();

    let connection = match state.postgres.get_connection(id).await {
        Ok(connection) => connection,
        Err(e) => return postgres_error_response(e, "Failed to fetch connection"),
    };

    if connection.status != ConnectionStatus::Pending {
        return error_response(
            StatusCode::CONFLICT,
            "connection_not_pending",
            format!("Connection {} is {:?}", id, connection.status),
        );
    }

    let from = match state.load_profile(&connection.from_user_id).await {
        Ok(profile) => profile,
        Err(e) => return appwrite_error_response(e, "Failed to fetch requester profile"),
    };
    let to = match state.load_profile(&connection.to_user_id).await {
        Ok(profile) => profile,
        Err(e) => return appwrite_error_response(e, "Failed to fetch recipient profile"),
    };

    let breakdown = state.matcher.breakdown(&from, &to);

    match state.postgres.accept(id, &breakdown).await {
        Ok(connection) => HttpResponse::Ok().json(ConnectionResponse { connection }),
        Err(e) => {
            tracing::error!("Failed to accept connection {}: {}", id, e);
            postgres_error_response(e, "Failed to accept connection")
        }
    }
}

/// Reject a pending request
///
/// POST /api/v1/connections/{id}/reject
async fn reject_request(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();

    match state.postgres.reject(id).await {
        Ok(connection) => HttpResponse::Ok().json(ConnectionResponse { connection }),
        Err(e) => postgres_error_response(e, "Failed to reject connection"),
    }
}

/// Pending requests addressed to a user
///
/// GET /api/v1/connections/pending?userId={userId}
async fn list_pending(
    state: web::Data<AppState>,
    query: web::Query<UserQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return error_response(StatusCode::BAD_REQUEST, "validation_failed", errors);
    }

    match state.postgres.pending_for(&query.user_id).await {
        Ok(pending) => HttpResponse::Ok().json(serde_json::json!({
            "userId": query.user_id,
            "pending": pending,
            "count": pending.len(),
        })),
        Err(e) => {
            tracing::error!("Failed to fetch pending requests for {}: {}", query.user_id, e);
            postgres_error_response(e, "Failed to fetch pending requests")
        }
    }
}

/// Accepted connections of a user
///
/// GET /api/v1/connections?userId={userId}
async fn list_connections(
    state: web::Data<AppState>,
    query: web::Query<UserQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return error_response(StatusCode::BAD_REQUEST, "validation_failed", errors);
    }

    match state.postgres.connections_of(&query.user_id).await {
        Ok(user_ids) => HttpResponse::Ok().json(UserIdsResponse {
            user_id: query.user_id.clone(),
            count: user_ids.len(),
            user_ids,
        }),
        Err(e) => postgres_error_response(e, "Failed to fetch connections"),
    }
}

/// Users blocked by a user
///
/// GET /api/v1/connections/blocked?userId={userId}
async fn list_blocked(
    state: web::Data<AppState>,
    query: web::Query<UserQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return error_response(StatusCode::BAD_REQUEST, "validation_failed", errors);
    }

    match state.postgres.blocked_ids(&query.user_id).await {
        Ok(user_ids) => HttpResponse::Ok().json(UserIdsResponse {
            user_id: query.user_id.clone(),
            count: user_ids.len(),
            user_ids,
        }),
        Err(e) => postgres_error_response(e, "Failed to fetch blocked users"),
    }
}

/// POST /api/v1/connections/block
async fn block_user(
    state: web::Data<AppState>,
    req: web::Json<UserPairRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, "validation_failed", errors);
    }

    match state.postgres.block(&req.from_user_id, &req.to_user_id).await {
        Ok(()) => {
            tracing::info!("User {} blocked {}", req.from_user_id, req.to_user_id);
            HttpResponse::Ok().json(serde_json::json!({ "success": true }))
        }
        Err(e) => postgres_error_response(e, "Failed to block user"),
    }
}

/// POST /api/v1/connections/unblock
async fn unblock_user(
    state: web::Data<AppState>,
    req: web::Json<UserPairRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, "validation_failed", errors);
    }

    match state.postgres.unblock(&req.from_user_id, &req.to_user_id).await {
        Ok(removed) => HttpResponse::Ok().json(serde_json::json!({ "success": removed })),
        Err(e) => postgres_error_response(e, "Failed to unblock user"),
    }
}
