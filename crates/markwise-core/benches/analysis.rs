use criterion::{black_box, criterion_group, criterion_main, Criterion};

use markwise_core::analytics::summarize;
use markwise_core::analyzer::analyze;
use markwise_core::merge::TopicMerger;
use markwise_core::model::StudentRecord;
use markwise_core::scheme::ExamScheme;

fn make_class(scheme: &ExamScheme, size: usize) -> Vec<StudentRecord> {
    (0..size)
        .map(|i| {
            let scores = scheme
                .questions()
                .iter()
                .enumerate()
                .map(|(q, question)| ((i * 7 + q * 3) % 11) as f64 / 10.0 * question.max_score)
                .collect();
            StudentRecord::new(format!("Student {i}"), scores)
        })
        .collect()
}

fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");
    let scheme = ExamScheme::preset("2nd Year Higher").unwrap();
    let merger = TopicMerger::standard();
    let record = make_class(&scheme, 1).remove(0);

    group.bench_function("2nd Year Higher, top 3", |b| {
        b.iter(|| analyze(black_box(&record), black_box(&scheme), &merger, 3))
    });

    group.finish();
}

fn bench_summarize(c: &mut Criterion) {
    let mut group = c.benchmark_group("summarize");
    let scheme = ExamScheme::preset("2nd Year Higher").unwrap();
    let merger = TopicMerger::standard();

    for size in [30, 300] {
        let class = make_class(&scheme, size);
        group.bench_function(format!("class of {size}"), |b| {
            b.iter(|| summarize(black_box(&class), black_box(&scheme), &merger))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_analyze, bench_summarize);
criterion_main!(benches);
