use crate::models::{Profile, ScoredCandidate, MatchBreakdown, ScoringWeights};
use crate::core::{
    filters::{is_eligible_candidate, matches_search_query},
    ranker::rank_candidates,
    scoring::{calculate_match_score, score_breakdown},
};

/// Result of the recommendation pipeline
#[derive(Debug)]
pub struct MatchResult {
    pub matches: Vec<ScoredCandidate>,
    pub total_candidates: usize,
}

/// Recommendation orchestrator
///
/// # Pipeline Stages
/// 1. Eligibility filtering (self, inactive, excluded ids)
/// 2. Optional text search
/// 3. Scoring and stable ranking
/// 4. Truncation to the requested limit
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
}

impl Matcher {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn score(&self, reference: &Profile, candidate: &Profile) -> u8 {
        calculate_match_score(reference, candidate, &self.weights)
    }

    pub fn breakdown(&self, reference: &Profile, candidate: &Profile) -> MatchBreakdown {
        score_breakdown(reference, candidate, &self.weights)
    }

    /// Rank all candidates without filtering
    pub fn rank(&self, reference: &Profile, candidates: Vec<Profile>) -> Vec<ScoredCandidate> {
        rank_candidates(reference, candidates, &self.weights)
    }

    /// Recommend connections for a user
    ///
    /// # Arguments
    /// * `reference` - The profile recommendations are computed for
    /// * `candidates` - Profiles fetched from the profile store
    /// * `excluded` - Ids that must never be returned (blocked users etc.)
    /// * `query` - Optional free-text search
    /// * `limit` - Maximum number of matches to return
    pub fn recommend(
        &self,
        reference: &Profile,
        candidates: Vec<Profile>,
        excluded: &[String],
        query: Option<&str>,
        limit: usize,
    ) -> MatchResult {
        let total_candidates = candidates.len();

        let eligible: Vec<Profile> = candidates
            .into_iter()
            .filter(|profile| is_eligible_candidate(reference, profile, excluded))
            .filter(|profile| query.map_or(true, |q| matches_search_query(profile, q)))
            .collect();

        let mut matches = self.rank(reference, eligible);
        matches.truncate(limit);

        MatchResult {
            matches,
            total_candidates,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_candidate(id: &str, country: &str, interests: &[&str]) -> Profile {
        Profile {
            name: format!("User {}", id),
            destination_country: Some(country.to_string()),
            interests: interests.iter().map(|i| i.to_string()).collect(),
            ..Profile::new(id)
        }
    }

    fn create_reference() -> Profile {
        create_candidate("current_user", "UK", &["Football", "Photography"])
    }

    #[test]
    fn test_recommend_basic() {
        let matcher = Matcher::with_default_weights();
        let reference = create_reference();

        let candidates = vec![
            create_candidate("1", "USA", &[]),                      // 0
            create_candidate("2", "UK", &["Football"]),             // 35
            create_candidate("current_user", "UK", &["Football"]),  // self
        ];

        let result = matcher.recommend(&reference, candidates, &[], None, 10);

        assert_eq!(result.total_candidates, 3);
        assert_eq!(result.matches.len(), 2);
        assert_eq!(result.matches[0].profile.id, "2");
        assert_eq!(result.matches[0].score, 35);
        assert_eq!(result.matches[0].shared_interests, vec!["Football"]);
    }

    #[test]
    fn test_respects_limit() {
        let matcher = Matcher::with_default_weights();
        let reference = create_reference();

        let candidates: Vec<Profile> = (0..20)
            .map(|i| create_candidate(&i.to_string(), "UK", &[]))
            .collect();

        let result = matcher.recommend(&reference, candidates, &[], None, 5);

        assert_eq!(result.matches.len(), 5);
        assert_eq!(result.matches[0].profile.id, "0");
    }

    #[test]
    fn test_excluded_and_search() {
        let matcher = Matcher::with_default_weights();
        let reference = create_reference();

        let mut candidates = vec![
            create_candidate("1", "UK", &[]),
            create_candidate("2", "UK", &[]),
            create_candidate("3", "UK", &[]),
        ];
        candidates[2].name = "Bikash".to_string();

        let result = matcher.recommend(&reference, candidates.clone(), &["1".to_string()], None, 10);
        assert_eq!(result.matches.len(), 2);

        let result = matcher.recommend(&reference, candidates, &[], Some("bikash"), 10);
        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches[0].profile.id, "3");
    }

    #[test]
    fn test_rank_does_not_filter() {
        let matcher = Matcher::default();
        let reference = create_reference();

        let ranked = matcher.rank(&reference, vec![reference.clone()]);

        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].score, 40);
    }
}
