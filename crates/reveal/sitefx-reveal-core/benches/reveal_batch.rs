//! Batch delivery and counter frame throughput.
//!
//! Run with: `cargo bench --bench reveal_batch`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sitefx_reveal::{
    ElementId, RevealKind, ViewportRevealController, VisibilityEntry, WatcherConfig,
};
use sitefx_test_fixtures::{FakeElement, FakePage};

fn page_with(count: usize, class: &str, text: &str) -> (FakePage, Vec<ElementId>) {
    let mut page = FakePage::new(1280.0, 800.0);
    let ids = (0..count)
        .map(|i| {
            page.push(
                FakeElement::new("div")
                    .with_class(class)
                    .with_text(text)
                    .at(i as f64 * 20.0, 20.0),
            )
        })
        .collect();
    (page, ids)
}

fn bench_timeline_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("timeline_batch");
    for size in [10usize, 100, 1_000] {
        let (page, ids) = page_with(size, "timeline-item", "");
        let entries: Vec<_> = ids.iter().map(|&e| VisibilityEntry::visible(e, 1.0)).collect();
        group.bench_with_input(BenchmarkId::from_parameter(size), &entries, |b, entries| {
            b.iter(|| {
                let mut ctl = ViewportRevealController::default();
                let w = ctl.register(RevealKind::TimelineStagger, &ids, WatcherConfig::default());
                black_box(ctl.handle_entries(&page, w, black_box(entries)).effects.len());
            });
        });
    }
    group.finish();
}

fn bench_counter_frames(c: &mut Criterion) {
    let mut group = c.benchmark_group("counter_frames");
    for size in [1usize, 10, 100] {
        let (page, ids) = page_with(size, "stat-number", "2,500,000+");
        let entries: Vec<_> = ids.iter().map(|&e| VisibilityEntry::visible(e, 1.0)).collect();
        group.bench_with_input(BenchmarkId::from_parameter(size), &entries, |b, entries| {
            b.iter(|| {
                let mut ctl = ViewportRevealController::default();
                let w = ctl.register(RevealKind::Counter, &ids, WatcherConfig::default());
                ctl.handle_entries(&page, w, entries);
                while ctl.is_animating() {
                    black_box(ctl.frame().effects.len());
                }
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_timeline_batch, bench_counter_frames);
criterion_main!(benches);
