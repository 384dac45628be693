use crate::models::{Profile, MatchBreakdown, ScoringWeights};
use std::collections::BTreeSet;

/// Calculate a compatibility score (0-100) between a reference profile and a candidate
///
/// Scoring table (default weights):
/// ```text
/// destination country equal    30
/// destination state equal      20
/// destination city equal       15
/// university equal             25
/// study field equal            20
/// each shared interest          5
/// each shared goal              5
/// ```
/// The sum is clamped to `weights.max_score`. An unset or empty field on
/// either side never matches.
#[inline]
pub fn calculate_match_score(
    reference: &Profile,
    candidate: &Profile,
    weights: &ScoringWeights,
) -> u8 {
    score_breakdown(reference, candidate, weights).score
}

/// Score two profiles and report which comparisons contributed
pub fn score_breakdown(
    reference: &Profile,
    candidate: &Profile,
    weights: &ScoringWeights,
) -> MatchBreakdown {
    let same_country = field_matches(&reference.destination_country, &candidate.destination_country);
    let same_state = field_matches(&reference.destination_state, &candidate.destination_state);
    let same_city = field_matches(&reference.destination_city, &candidate.destination_city);
    let same_university = field_matches(&reference.university, &candidate.university);
    let same_study_field = field_matches(&reference.study_field, &candidate.study_field);

    let shared_interests = shared_tags(&reference.interests, &candidate.interests);
    let shared_goals = shared_tags(&reference.goals, &candidate.goals);

    let mut total: u64 = 0;
    total += points(same_country, weights.country);
    total += points(same_state, weights.state);
    total += points(same_city, weights.city);
    total += points(same_university, weights.university);
    total += points(same_study_field, weights.study_field);
    total += shared_interests.len() as u64 * weights.per_interest as u64;
    total += shared_goals.len() as u64 * weights.per_goal as u64;

    let score = total.min(weights.max_score as u64) as u8;

    MatchBreakdown {
        score,
        same_country,
        same_state,
        same_city,
        same_university,
        same_study_field,
        shared_interests,
        shared_goals,
    }
}

/// Tags present in both sets, in sorted order
#[inline]
pub fn shared_tags(a: &BTreeSet<String>, b: &BTreeSet<String>) -> Vec<String> {
    a.intersection(b).cloned().collect()
}

/// Exact equality where both sides are set and non-empty
#[inline]
fn field_matches(a: &Option<String>, b: &Option<String>) -> bool {
    match (a.as_deref(), b.as_deref()) {
        (Some(a), Some(b)) => !a.is_empty() && a == b,
        _ => false,
    }
}

#[inline]
fn points(matched: bool, weight: u32) -> u64 {
    if matched { weight as u64 } else { 0 }
}
