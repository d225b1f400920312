// Criterion benchmarks for Pawdr Match

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pawdr_match::core::MatchFilter;
use pawdr_match::models::{CandidatePet, ResponseDraft};
use pawdr_match::services::supabase::render_query;

fn create_candidate(id: usize) -> CandidatePet {
    CandidatePet {
        id: id.to_string(),
        name: format!("Pet {}", id),
        description: None,
        long_description: None,
        picture: None,
        age: None,
        species: id % 2 == 0,
        energy_level: (id % 4) as i32,
        good_with_kids: (id % 3) as i32,
        good_with_pets: (id % 4) as i32,
        ease_of_care: (id % 4) as i32,
    }
}

fn all_responses() -> Vec<pawdr_match::models::QuestionnaireResponse> {
    let mut responses = Vec::new();
    for outdoor in 0..3u8 {
        for pets in 0..3u8 {
            for experience in 0..3u8 {
                for species in 0..3u8 {
                    let draft = ResponseDraft::new()
                        .with_answer(1, outdoor)
                        .and_then(|d| d.with_answer(2, pets))
                        .and_then(|d| d.with_answer(3, experience))
                        .and_then(|d| d.with_answer(4, species))
                        .unwrap();
                    responses.push(draft.complete().unwrap());
                }
            }
        }
    }
    responses
}

fn bench_build_query(c: &mut Criterion) {
    let filter = MatchFilter::default();
    let responses = all_responses();

    c.bench_function("build_query_all_answer_combinations", |b| {
        b.iter(|| {
            for response in &responses {
                black_box(filter.build_query(black_box(response)));
            }
        });
    });
}

fn bench_render_query(c: &mut Criterion) {
    let filter = MatchFilter::default();
    let query = filter.build_query(&all_responses()[0]);

    c.bench_function("render_postgrest_query", |b| {
        b.iter(|| render_query(black_box(&query)));
    });
}

fn bench_local_evaluation(c: &mut Criterion) {
    let filter = MatchFilter::default();
    let query = filter.build_query(&all_responses()[13]);

    let mut group = c.benchmark_group("accepts");

    for candidate_count in [10, 100, 1000].iter() {
        let candidates: Vec<CandidatePet> = (0..*candidate_count).map(create_candidate).collect();

        group.bench_with_input(
            BenchmarkId::new("pet_query_accepts", candidate_count),
            candidate_count,
            |b, _| {
                b.iter(|| {
                    candidates
                        .iter()
                        .filter(|pet| query.accepts(black_box(pet)))
                        .count()
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_build_query,
    bench_render_query,
    bench_local_evaluation
);

criterion_main!(benches);
