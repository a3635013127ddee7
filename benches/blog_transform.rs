//! 博客数据转换性能基准测试

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use serde_json::{Value, json};
use std::hint::black_box;

use folio::services::blog::{BlogTransformer, calculate_read_time, generate_slug};

fn raw_posts(count: usize) -> Value {
    let posts: Vec<Value> = (0..count)
        .map(|i| {
            json!({
                "title": format!("Post number {} about Smart Contracts & DeFi!", i),
                "tags": ["Web3", "DeFi", "Smart Contracts", format!("Topic {}", i % 7)],
                "summary": "A short summary",
                "content": [
                    { "type": "paragraph", "text": "lorem ipsum dolor sit amet ".repeat(40) },
                    { "type": "heading", "text": "Section" },
                    { "type": "paragraph", "text": "consectetur adipiscing elit ".repeat(60) }
                ]
            })
        })
        .collect();
    json!({ "blog": { "posts": posts } })
}

// ============== transform ==============

fn bench_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("blog/transform");
    let transformer = BlogTransformer::new("Stepank", "https://img.example/default.png");
    let today = chrono::NaiveDate::from_ymd_opt(2025, 7, 1).unwrap_or_default();

    for count in [1usize, 20, 200] {
        let raw = raw_posts(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &raw, |b, raw| {
            b.iter(|| transformer.transform(black_box(raw), today));
        });
    }

    group.finish();
}

// ============== helpers ==============

fn bench_helpers(c: &mut Criterion) {
    let mut group = c.benchmark_group("blog/helpers");

    group.bench_function("generate_slug", |b| {
        b.iter(|| generate_slug(black_box("Building Your First Smart Contract -- A Guide (2025)")));
    });

    let content = raw_posts(1)["blog"]["posts"][0]["content"].clone();
    group.bench_function("calculate_read_time", |b| {
        b.iter(|| calculate_read_time(Some(black_box(&content))));
    });

    group.finish();
}

criterion_group!(benches, bench_transform, bench_helpers);
criterion_main!(benches);
