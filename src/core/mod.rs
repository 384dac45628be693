// Core algorithm exports
pub mod filters;
pub mod matcher;
pub mod ranker;
pub mod scoring;

pub use filters::{is_eligible_candidate, matches_search_query};
pub use matcher::{Matcher, MatchResult};
pub use ranker::rank_candidates;
pub use scoring::{calculate_match_score, score_breakdown, shared_tags};
