//! 背景图生成性能基准测试

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use folio::config::BackgroundConfig;
use folio::services::background::Pattern;
use folio::services::{BackgroundGenerator, ClientFingerprint};

// ============== 每种图案的渲染耗时 ==============

fn bench_render_patterns(c: &mut Criterion) {
    let mut group = c.benchmark_group("background/render_svg");
    let generator = BackgroundGenerator::new(&BackgroundConfig::default());

    // seed mod 11 == 图案序号
    for (index, pattern) in Pattern::ALL.iter().enumerate() {
        let seed = 11 * 1000 + index as u32;
        group.bench_with_input(
            BenchmarkId::from_parameter(pattern.name()),
            &seed,
            |b, &seed| {
                b.iter(|| generator.render_svg(black_box(seed), 1920, 1080));
            },
        );
    }

    group.finish();
}

// ============== 尺寸对渲染的影响 ==============

fn bench_render_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("background/render_size");
    let generator = BackgroundGenerator::new(&BackgroundConfig {
        noise: false,
        ..BackgroundConfig::default()
    });

    for (w, h) in [(640, 360), (1920, 1080), (3840, 2160)] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", w, h)),
            &(w, h),
            |b, &(w, h)| {
                // waves 的采样点数量随宽度增长
                b.iter(|| generator.render_svg(black_box(3), w, h));
            },
        );
    }

    group.finish();
}

// ============== 指纹种子 ==============

fn bench_fingerprint_seed(c: &mut Criterion) {
    let fingerprint = ClientFingerprint {
        user_agent: "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0 Safari/537.36".to_string(),
        screen_width: 2560,
        screen_height: 1440,
        time_zone: "America/Los_Angeles".to_string(),
        language: "en-US".to_string(),
    };

    c.bench_function("background/fingerprint_seed", |b| {
        b.iter(|| black_box(&fingerprint).seed());
    });
}

criterion_group!(
    benches,
    bench_render_patterns,
    bench_render_sizes,
    bench_fingerprint_seed
);
criterion_main!(benches);
