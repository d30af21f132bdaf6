use std::sync::Arc;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use vellum::prelude::*;
use vellum_quality::{FixedClassifier, QualityPolicy};
use vellum_test_utils::MockSceneBackend;

fn page(count: u64) -> StaticElements {
    let mut page = StaticElements::new();
    for i in 0..count {
        page.insert(
            ElementId(i),
            ElementRect::new(40.0, i as f32 * 90.0, 480.0, 48.0),
            format!("Section heading {}", i),
            ComputedStyle::new(32.0),
        );
    }
    page
}

fn bench_tick(c: &mut Criterion) {
    let frame = ViewportFrame::new(1920.0, 1080.0, 1.0);
    let camera = CameraModel::perspective(75.0, frame.aspect_ratio(), 5.0);
    let ctx = DeviceContext::classify_with(
        DeviceSignals::new(frame.width, frame.pixel_ratio),
        &FixedClassifier(DeviceClass::Desktop),
        &QualityPolicy::default(),
    );
    let backend = Arc::new(MockSceneBackend::new());
    let mut page = page(40);
    let mut overlay = TextOverlay::new(
        backend.clone(),
        &ctx,
        frame,
        &EffectConfig::default(),
        FontSystem::with_default_font(),
    )
    .unwrap();
    overlay.sync(&page, &camera);

    let mut elapsed = 0.0;
    c.bench_function("tick_40_elements", |b| {
        b.iter(|| {
            elapsed += 1.0 / 60.0;
            page.scroll_by(3.0);
            backend.clear_calls();
            black_box(overlay.tick(&page, &camera, elapsed))
        })
    });
}

criterion_group!(benches, bench_tick);
criterion_main!(benches);
