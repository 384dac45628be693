//! NSA Match - compatibility scoring and connections for the Nepali Students Abroad app
//!
//! The core scores a candidate profile against a reference profile from
//! shared destination, academic fields, interests and goals, and ranks
//! candidate sets best-first. The service layer wraps it in an HTTP API
//! backed by Appwrite profiles and PostgreSQL connection records.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{Matcher, MatchResult, calculate_match_score, rank_candidates};
pub use models::{Profile, ScoredCandidate, MatchBreakdown, ScoringWeights};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let profile = Profile::new("u1");
        assert_eq!(calculate_match_score(&profile, &profile, &ScoringWeights::default()), 0);
    }
}
