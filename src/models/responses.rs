use serde::{Deserialize, Serialize};
use crate::models::domain::{Connection, MatchBreakdown, ScoredCandidate};

/// Response for the recommend endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub matches: Vec<ScoredCandidate>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
}

/// Response for the score endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreResponse {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "targetUserId")]
    pub target_user_id: String,
    pub breakdown: MatchBreakdown,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}

/// Single connection response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionResponse {
    pub connection: Connection,
}

/// List of user ids related to a user (connections, blocked users)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserIdsResponse {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "userIds")]
    pub user_ids: Vec<String>,
    pub count: usize,
}
