// Criterion benchmarks for NSA Match

use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};
use nsa_match::core::{Matcher, calculate_match_score, rank_candidates};
use nsa_match::models::{Profile, ScoringWeights};

const COUNTRIES: &[&str] = &["USA", "UK", "Australia", "Canada", "Japan"];
const UNIVERSITIES: &[&str] = &["MIT", "UCL", "UNSW", "UBC", "Waseda", "Monash"];
const INTERESTS: &[&str] = &[
    "AI", "Music", "Cricket", "Football", "Hiking", "Cooking", "Photography",
    "Dance", "Reading", "Gaming", "Travel", "Volunteering",
];

fn create_candidate(id: usize) -> Profile {
    Profile {
        name: format!("User {}", id),
        destination_country: Some(COUNTRIES[id % COUNTRIES.len()].to_string()),
        university: Some(UNIVERSITIES[id % UNIVERSITIES.len()].to_string()),
        study_field: if id % 3 == 0 { Some("Engineering".to_string()) } else { None },
        interests: (0..4)
            .map(|k| INTERESTS[(id + k * 5) % INTERESTS.len()].to_string())
            .collect(),
        goals: if id % 2 == 0 { ["PR".to_string()].into_iter().collect() } else { Default::default() },
        ..Profile::new(id.to_string())
    }
}

fn create_reference() -> Profile {
    Profile {
        destination_country: Some("USA".to_string()),
        university: Some("MIT".to_string()),
        study_field: Some("Engineering".to_string()),
        interests: ["AI", "Music", "Hiking"].iter().map(|s| s.to_string()).collect(),
        goals: ["PR".to_string()].into_iter().collect(),
        ..Profile::new("current_user")
    }
}

fn bench_score(c: &mut Criterion) {
    let reference = create_reference();
    let candidate = create_candidate(0);
    let weights = ScoringWeights::default();

    c.bench_function("calculate_match_score", |b| {
        b.iter(|| calculate_match_score(black_box(&reference), black_box(&candidate), &weights));
    });
}

fn bench_ranking(c: &mut Criterion) {
    let reference = create_reference();
    let weights = ScoringWeights::default();

    let mut group = c.benchmark_group("ranking");

    for candidate_count in [10, 100, 1000, 10000].iter() {
        let candidates: Vec<Profile> = (0..*candidate_count).map(create_candidate).collect();

        group.bench_with_input(
            BenchmarkId::new("rank_candidates", candidate_count),
            candidate_count,
            |b, _| {
                b.iter(|| rank_candidates(black_box(&reference), black_box(candidates.clone()), &weights));
            },
        );
    }

    group.finish();
}

fn bench_recommend(c: &mut Criterion) {
    let matcher = Matcher::with_default_weights();
    let reference = create_reference();
    let candidates: Vec<Profile> = (0..1000).map(create_candidate).collect();
    let excluded: Vec<String> = (0..50).map(|i| (i * 7).to_string()).collect();

    c.bench_function("recommend_1000_candidates", |b| {
        b.iter(|| {
            matcher.recommend(
                black_box(&reference),
                black_box(candidates.clone()),
                &excluded,
                Some("user 1"),
                black_box(20),
            )
        });
    });
}

criterion_group!(benches, bench_score, bench_ranking, bench_recommend);

criterion_main!(benches);
