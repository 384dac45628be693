use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request for ranked recommendations
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    /// Falls back to `matching.default_limit` when absent
    #[serde(default)]
    #[validate(range(min = 1))]
    pub limit: Option<u16>,
    #[serde(default)]
    #[serde(alias = "exclude_user_ids", rename = "excludeUserIds")]
    pub exclude_user_ids: Vec<String>,
    #[serde(default)]
    pub query: Option<String>,
}

/// Request to score one profile against another
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ScoreRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "target_user_id", rename = "targetUserId")]
    pub target_user_id: String,
}

/// Pair of users for connection requests and blocking
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UserPairRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "from_user_id", rename = "fromUserId")]
    pub from_user_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "to_user_id", rename = "toUserId")]
    pub to_user_id: String,
}

/// `?userId=` query string
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UserQuery {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommend_request_defaults() {
        let req: RecommendRequest = serde_json::from_str(r#"{"userId": "u1"}"#).unwrap();
        assert!(req.limit.is_none());
        assert!(req.exclude_user_ids.is_empty());
        assert!(req.query.is_none());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_zero_limit_rejected() {
        let req: RecommendRequest = serde_json::from_str(r#"{"userId": "u1", "limit": 0}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_empty_user_id_rejected() {
        let req = UserPairRequest {
            from_user_id: String::new(),
            to_user_id: "u2".to_string(),
        };
        assert!(req.validate().is_err());
    }
}
