// Criterion benchmarks for Mentor Match

use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};
use mentor_match::core::{build_preference_lists, compare_attributes, compute_affinity, run_stable_matching, Matcher};
use mentor_match::models::{AttributeValue, CandidateRecord};

const MAJORS: &[&str] = &["Biology", "Physics", "Chemistry", "Computer Science", "History"];
const HOBBIES: &[&str] = &["Chess", "Hiking", "Running", "Painting", "Cooking", "Climbing", "Music"];

fn create_record(prefix: &str, id: usize) -> CandidateRecord {
    let hobbies: Vec<&str> = (0..3).map(|k| HOBBIES[(id * 3 + k * 2) % HOBBIES.len()]).collect();

    let record = CandidateRecord::new(format!("{}{}", prefix, id))
        .with_attribute("major", AttributeValue::single("Major", MAJORS[id % MAJORS.len()]))
        .with_attribute("school", AttributeValue::single("School", if id % 2 == 0 { "Cornell" } else { "NYU" }))
        .with_attribute("hobbies", AttributeValue::multi("Hobbies", hobbies.join(", ")));

    if id % 4 == 0 {
        record.with_favorite("Hobbies")
    } else {
        record
    }
}

fn create_side(prefix: &str, count: usize) -> Vec<CandidateRecord> {
    (0..count).map(|i| create_record(prefix, i)).collect()
}

fn bench_compare_attributes(c: &mut Criterion) {
    let a = AttributeValue::multi("Hobbies", "Chess, Hiking, Running, Painting");
    let b = AttributeValue::multi("Hobbies", "Painting, Cooking, Chess");

    c.bench_function("compare_multi_choice", |bench| {
        bench.iter(|| compare_attributes(black_box(&a), black_box(&b)));
    });
}

fn bench_affinity(c: &mut Criterion) {
    let mentee = create_record("mentee", 4);
    let mentor = create_record("mentor", 7);

    c.bench_function("compute_affinity", |b| {
        b.iter(|| compute_affinity(black_box(&mentee), black_box(&mentor)));
    });
}

fn bench_preference_lists(c: &mut Criterion) {
    let mut group = c.benchmark_group("preference_lists");

    for count in [10, 50, 100, 250].iter() {
        let mentees = create_side("mentee", *count);
        let mentors = create_side("mentor", *count);

        group.bench_with_input(BenchmarkId::new("build", count), count, |b, _| {
            b.iter(|| build_preference_lists(black_box(&mentees), black_box(&mentors)));
        });
    }

    group.finish();
}

fn bench_stable_matching(c: &mut Criterion) {
    let mut group = c.benchmark_group("stable_matching");

    for count in [10, 50, 100, 250].iter() {
        let mentees = create_side("mentee", *count);
        let mentors = create_side("mentor", *count);
        let (ranked_mentees, ranked_mentors) = match build_preference_lists(&mentees, &mentors) {
            Ok(lists) => lists,
            Err(e) => panic!("benchmark input is invalid: {}", e),
        };

        group.bench_with_input(BenchmarkId::new("deferred_acceptance", count), count, |b, _| {
            b.iter(|| run_stable_matching(black_box(&ranked_mentees), black_box(&ranked_mentors)));
        });
    }

    group.finish();
}

fn bench_full_pipeline(c: &mut Criterion) {
    let matcher = Matcher::with_default_config();
    let mentees = create_side("mentee", 100);
    let mentors = create_side("mentor", 80);

    c.bench_function("matcher_run_100x80", |b| {
        b.iter(|| matcher.run(black_box(&mentees), black_box(&mentors)));
    });
}

criterion_group!(
    benches,
    bench_compare_attributes,
    bench_affinity,
    bench_preference_lists,
    bench_stable_matching,
    bench_full_pipeline
);

criterion_main!(benches);
