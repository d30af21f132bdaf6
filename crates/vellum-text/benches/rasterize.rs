use criterion::{Criterion, black_box, criterion_group, criterion_main};
use vellum_quality::DeviceClass;
use vellum_text::{
    CanvasSizing, RasterCache, RasterDevice, RasterRequest, TextAlign, TextRasterizer,
};

fn bench_rasterize(c: &mut Criterion) {
    let mut rasterizer = TextRasterizer::default();
    let device = RasterDevice::new(DeviceClass::Desktop, 2.0);

    let heading = RasterRequest::new("Matter", 120.0);
    c.bench_function("rasterize_heading", |b| {
        b.iter(|| black_box(rasterizer.rasterize(&heading, &device)))
    });

    let paragraph = RasterRequest::new(
        "We build interfaces\nthat feel physical\nand load fast",
        24.0,
    )
    .align(TextAlign::Left);
    c.bench_function("rasterize_paragraph", |b| {
        b.iter(|| black_box(rasterizer.rasterize(&paragraph, &device)))
    });

    let banner = RasterRequest::new("Matter", 120.0).sizing(CanvasSizing::Banner);
    let mobile = RasterDevice::new(DeviceClass::Mobile, 3.0);
    c.bench_function("rasterize_banner_mobile", |b| {
        b.iter(|| black_box(rasterizer.rasterize(&banner, &mobile)))
    });
}

fn bench_cache(c: &mut Criterion) {
    let mut rasterizer = TextRasterizer::default();
    let mut cache = RasterCache::new();
    let device = RasterDevice::new(DeviceClass::Desktop, 2.0);
    let request = RasterRequest::new("Cached heading", 64.0);

    c.bench_function("raster_cache_hit", |b| {
        b.iter(|| black_box(cache.get_or_rasterize(&mut rasterizer, &request, &device)))
    });
}

criterion_group!(benches, bench_rasterize, bench_cache);
criterion_main!(benches);
