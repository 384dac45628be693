use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;

/// Student profile with the fields used for compatibility scoring
///
/// `interests` and `goals` are sets: a document listing the same tag twice
/// deserializes to a single entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(rename = "userId", alias = "uid")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "destinationCountry", default)]
    pub destination_country: Option<String>,
    #[serde(rename = "destinationState", default)]
    pub destination_state: Option<String>,
    #[serde(rename = "destinationCity", default)]
    pub destination_city: Option<String>,
    #[serde(default)]
    pub university: Option<String>,
    #[serde(rename = "studyField", default)]
    pub study_field: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub interests: BTreeSet<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub goals: BTreeSet<String>,
    #[serde(rename = "isActive", default = "default_true", deserialize_with = "null_as_true")]
    pub is_active: bool,
}

impl Profile {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            is_active: true,
            ..Default::default()
        }
    }
}

fn default_true() -> bool { true }

/// Appwrite returns `null` for unset attributes
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(true))
}

/// Candidate profile with its compatibility score against a reference profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub profile: Profile,
    pub score: u8,
    #[serde(rename = "sharedInterests")]
    pub shared_interests: Vec<String>,
    #[serde(rename = "sharedGoals")]
    pub shared_goals: Vec<String>,
}

/// Which comparisons contributed to a score
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchBreakdown {
    pub score: u8,
    #[serde(rename = "sameCountry")]
    pub same_country: bool,
    #[serde(rename = "sameState")]
    pub same_state: bool,
    #[serde(rename = "sameCity")]
    pub same_city: bool,
    #[serde(rename = "sameUniversity")]
    pub same_university: bool,
    #[serde(rename = "sameStudyField")]
    pub same_study_field: bool,
    #[serde(rename = "sharedInterests")]
    pub shared_interests: Vec<String>,
    #[serde(rename = "sharedGoals")]
    pub shared_goals: Vec<String>,
}

/// Points awarded per matching field or shared tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringWeights {
    pub country: u32,
    pub state: u32,
    pub city: u32,
    pub university: u32,
    pub study_field: u32,
    pub per_interest: u32,
    pub per_goal: u32,
    pub max_score: u8,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            country: 30,
            state: 20,
            city: 15,
            university: 25,
            study_field: 20,
            per_interest: 5,
            per_goal: 5,
            max_score: 100,
        }
    }
}

/// Connection request lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "connection_status", rename_all = "lowercase")]
pub enum ConnectionStatus {
    Pending,
    Accepted,
    Rejected,
    Blocked,
}

/// Connection between two users as stored in PostgreSQL
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection {
    pub id: uuid::Uuid,
    #[serde(rename = "fromUserId")]
    pub from_user_id: String,
    #[serde(rename = "toUserId")]
    pub to_user_id: String,
    pub status: ConnectionStatus,
    #[serde(rename = "matchScore")]
    pub match_score: i16,
    #[serde(rename = "sharedInterests")]
    pub shared_interests: Vec<String>,
    #[serde(rename = "sharedGoals")]
    pub shared_goals: Vec<String>,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}
