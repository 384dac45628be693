use crate::models::Profile;

/// Check if a candidate may be shown to the reference user at all
///
/// Drops the reference user's own profile, inactive profiles and any id in
/// `excluded` (blocked users, client-side exclusions).
#[inline]
pub fn is_eligible_candidate(
    reference: &Profile,
    candidate: &Profile,
    excluded: &[String],
) -> bool {
    if candidate.id == reference.id {
        return false;
    }

    if !candidate.is_active {
        return false;
    }

    !excluded.contains(&candidate.id)
}

/// Case-insensitive substring search over name, study field and university
///
/// A blank query matches every profile.
pub fn matches_search_query(profile: &Profile, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    let contains = |value: &str| value.to_lowercase().contains(&needle);

    contains(&profile.name)
        || profile.study_field.as_deref().is_some_and(contains)
        || profile.university.as_deref().is_some_and(contains)
}
