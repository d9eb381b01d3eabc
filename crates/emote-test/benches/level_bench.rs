//! Benchmarks for level extraction

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use emote_audio::{extract_level, LevelExtractor, LevelMode, WindowSpec};
use emote_test::signal;

fn bench_extract_level(c: &mut Criterion) {
    let frame = signal::sine(512, 0.6, 100);
    let mut group = c.benchmark_group("extract_level");

    for mode in [LevelMode::Rms, LevelMode::MeanAbs] {
        let window = WindowSpec {
            mode,
            ..Default::default()
        };
        group.bench_with_input(BenchmarkId::from_parameter(format!("{:?}", mode)), &window, |b, w| {
            b.iter(|| black_box(extract_level(black_box(&frame), w)))
        });
    }
    group.finish();
}

fn bench_streaming_extractor(c: &mut Criterion) {
    let mut group = c.benchmark_group("extractor_push");

    // A2DP callbacks commonly deliver 128..4096 frames
    for frames in [128usize, 512, 4096] {
        let chunk = signal::noise(frames, 0.5, 7);
        let mut extractor = LevelExtractor::default();

        group.bench_with_input(BenchmarkId::from_parameter(frames), &chunk, |b, chunk| {
            b.iter(|| black_box(extractor.push(chunk)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_extract_level, bench_streaming_extractor);
criterion_main!(benches);
