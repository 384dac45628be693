use crate::models::{Profile, ScoredCandidate, ScoringWeights};
use crate::core::scoring::score_breakdown;

/// Score every candidate against the reference profile and order them best-first
///
/// One entry is produced per candidate, duplicates included. Candidates with
/// equal scores keep their input order. The reference profile is not filtered
/// out if it appears among the candidates.
pub fn rank_candidates(
    reference: &Profile,
    candidates: Vec<Profile>,
    weights: &ScoringWeights,
) -> Vec<ScoredCandidate> {
    let mut ranked: Vec<ScoredCandidate> = candidates
        .into_iter()
        .map(|profile| {
            let breakdown = score_breakdown(reference, &profile, weights);
            ScoredCandidate {
                profile,
                score: breakdown.score,
                shared_interests: breakdown.shared_interests,
                shared_goals: breakdown.shared_goals,
            }
        })
        .collect();

    // sort_by is stable
    ranked.sort_by(|a, b| b.score.cmp(&a.score));

    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: &str, country: Option<&str>, university: Option<&str>) -> Profile {
        Profile {
            destination_country: country.map(str::to_string),
            university: university.map(str::to_string),
            ..Profile::new(id)
        }
    }

    fn reference() -> Profile {
        candidate("ref", Some("Canada"), Some("UBC"))
    }

    #[test]
    fn test_empty_candidates() {
        let ranked = rank_candidates(&reference(), vec![], &ScoringWeights::default());
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_ties_keep_input_order() {
        let candidates = vec![
            candidate("1", None, Some("UBC")),         // 25
            candidate("2", Some("Canada"), Some("UBC")), // 55
            candidate("3", Some("Canada"), Some("UBC")), // 55
        ];

        let ranked = rank_candidates(&reference(), candidates, &ScoringWeights::default());

        let ids: Vec<&str> = ranked.iter().map(|c| c.profile.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "3", "1"]);
        assert_eq!(ranked[0].score, 55);
        assert_eq!(ranked[2].score, 25);
    }

    #[test]
    fn test_duplicates_and_self_are_kept() {
        let candidates = vec![
            reference(),
            candidate("x", None, None),
            candidate("x", None, None),
        ];

        let ranked = rank_candidates(&reference(), candidates, &ScoringWeights::default());

        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].profile.id, "ref");
        assert_eq!(ranked[1].profile.id, "x");
        assert_eq!(ranked[2].profile.id, "x");
    }
}
