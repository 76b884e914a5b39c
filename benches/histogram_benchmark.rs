#![allow(clippy::expect_used, clippy::unwrap_used, missing_docs)]
//! Benchmark for sampled luminance histograms.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use colorcard::histogram::{calculate_hue_histogram, calculate_rgb_histogram};
use colorcard::prelude::*;

fn gradient(width: u32, height: u32) -> Framebuffer {
    let mut fb = Framebuffer::new(width, height).unwrap();
    for y in 0..height {
        for x in 0..width {
            // Deterministic pattern with some high-frequency variation
            let r = (x * 255 / width) as u8;
            let g = (y * 255 / height) as u8;
            let b = ((x ^ y) % 256) as u8;
            fb.set_pixel(x, y, Rgba::rgb(r, g, b));
        }
    }
    fb
}

fn luminance_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("luminance_histogram");

    for (w, h) in [(320, 240), (1920, 1080), (4000, 3000)] {
        let image = gradient(w, h);
        for step in [1, 4] {
            let id = BenchmarkId::new(format!("step{step}"), format!("{w}x{h}"));
            group.bench_with_input(id, &image, |b, image| {
                b.iter(|| calculate_histogram(black_box(image), step));
            });
        }
    }

    group.finish();
}

fn channel_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("channel_histograms");
    let image = gradient(1920, 1080);

    group.bench_function("rgb", |b| b.iter(|| calculate_rgb_histogram(black_box(&image), 4)));
    group.bench_function("hue", |b| b.iter(|| calculate_hue_histogram(black_box(&image), 4)));

    group.finish();
}

criterion_group!(benches, luminance_benchmark, channel_benchmark);
criterion_main!(benches);
