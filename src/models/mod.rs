// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Profile, ScoredCandidate, MatchBreakdown, ScoringWeights, Connection, ConnectionStatus};
pub use requests::{RecommendRequest, ScoreRequest, UserPairRequest, UserQuery};
pub use responses::{RecommendResponse, ScoreResponse, HealthResponse, ErrorResponse, ConnectionResponse, UserIdsResponse};
