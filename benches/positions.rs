//! Benchmarks for the character-position cache and scrolling
//!
//! Run with: cargo bench positions

use cmdline::viewport::{CharPositions, MonospaceMeasure, Viewport};

fn main() {
    divan::main();
}

#[divan::bench(args = [16, 128, 1024])]
fn recompute(bencher: divan::Bencher, len: usize) {
    let text = "x".repeat(len);
    let measure = MonospaceMeasure::default();
    let mut positions = CharPositions::new();
    bencher.bench_local(|| {
        positions.invalidate();
        positions.update(divan::black_box(&text), &measure, 16.0)
    });
}

#[divan::bench]
fn cached_update() -> bool {
    let text = "easing bezier_2d 0.1 0.2 0.3 0.4";
    let measure = MonospaceMeasure::default();
    let mut positions = CharPositions::new();
    positions.update(text, &measure, 16.0);
    positions.update(divan::black_box(text), &measure, 16.0)
}

#[divan::bench(args = [128, 1024])]
fn hit_test_and_scroll(bencher: divan::Bencher, len: usize) {
    let text = "y".repeat(len);
    let mut positions = CharPositions::new();
    positions.update(&text, &MonospaceMeasure::default(), 16.0);
    let mut viewport = Viewport::new(800.0);
    bencher.bench_local(|| {
        let hit = positions.hit_test(divan::black_box(viewport.content_x(400.0)));
        viewport.scroll_into_view(&positions, hit, false);
        viewport.scroll_into_view(&positions, len, false);
        viewport.scroll_into_view(&positions, 0, false);
        hit
    });
}
