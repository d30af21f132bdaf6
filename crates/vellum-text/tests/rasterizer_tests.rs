use vellum_core::Color;
use vellum_quality::{DeviceClass, DeviceContext, DeviceSignals};
use vellum_text::{
    CanvasSizing, FontDatabase, FontFamily, FontSystem, FontWeight, RasterDevice, RasterRequest,
    TextAlign, TextError, TextRasterizer,
};

fn matter_request() -> RasterRequest {
    RasterRequest::new("Matter", 120.0)
        .color(Color::from_css("white").unwrap())
        .align(TextAlign::from_css("center"))
        .family(FontFamily::from_css_list("Arial"))
        .weight(FontWeight::from_css("bold"))
}

#[test]
fn identical_inputs_give_identical_pixels() {
    let mut rasterizer = TextRasterizer::new(FontSystem::with_system_fonts());
    let device = RasterDevice::new(DeviceClass::Desktop, 2.0);

    let first = rasterizer.rasterize(&matter_request(), &device).unwrap();
    let second = rasterizer.rasterize(&matter_request(), &device).unwrap();

    assert!(first.width >= 512);
    assert!(first.height >= 128);
    assert_eq!(first.size(), second.size());
    assert_eq!(first.pixels, second.pixels);
}

#[test]
fn embedded_font_output_is_stable() {
    let device = RasterDevice::new(DeviceClass::Desktop, 1.0);
    let a = TextRasterizer::new(FontSystem::with_default_font())
        .rasterize(&matter_request(), &device)
        .unwrap();
    let b = TextRasterizer::new(FontSystem::with_default_font())
        .rasterize(&matter_request(), &device)
        .unwrap();

    assert_eq!(a, b);
    assert!(!a.is_blank());
}

#[test]
fn empty_font_database_fails_without_panicking() {
    let mut rasterizer = TextRasterizer::new(FontSystem::new(FontDatabase::empty()));
    let result = rasterizer.rasterize(&matter_request(), &RasterDevice::new(DeviceClass::Desktop, 1.0));
    assert_eq!(result.unwrap_err(), TextError::NoFonts);
}

#[test]
fn fresh_rasterizers_agree() {
    let device = RasterDevice::new(DeviceClass::Mobile, 3.0);
    let request = matter_request().align(TextAlign::Left);

    let a = TextRasterizer::default().rasterize(&request, &device).unwrap();
    let b = TextRasterizer::default().rasterize(&request, &device).unwrap();
    assert_eq!(a, b);
}

#[test]
fn higher_pixel_ratio_never_shrinks_canvas() {
    let mut rasterizer = TextRasterizer::default();
    let request = RasterRequest::new("Sharp\nedges", 32.0);

    let mut prev = (0, 0);
    for ratio in [1.0, 1.5, 2.0, 3.0] {
        let image = rasterizer
            .rasterize(&request, &RasterDevice::new(DeviceClass::Desktop, ratio))
            .unwrap();
        assert!(image.width >= prev.0 && image.height >= prev.1);
        prev = image.size();
    }
}

#[test]
fn constrained_devices_get_smaller_rasters() {
    let mut rasterizer = TextRasterizer::default();
    let request = matter_request();

    let desktop = rasterizer
        .rasterize(&request, &RasterDevice::new(DeviceClass::Desktop, 2.0))
        .unwrap();
    let mobile = rasterizer
        .rasterize(&request, &RasterDevice::new(DeviceClass::Mobile, 2.0))
        .unwrap();

    assert!(mobile.scale < desktop.scale);
    assert!(mobile.width <= desktop.width);
}

#[test]
fn device_context_drives_scale() {
    let ctx = DeviceContext::from_signals(DeviceSignals::new(390.0, 3.0).with_cores(8));
    let device = RasterDevice::from(&ctx);
    assert_eq!(device.pixel_ratio, 2.0);

    let image = TextRasterizer::default()
        .rasterize(&RasterRequest::new("Hi", 18.0), &device)
        .unwrap();
    // max(2, 2 * 1.5)
    assert_eq!(image.scale, 3.0);
}

#[test]
fn banner_text_is_centred() {
    let mut rasterizer = TextRasterizer::default();
    let request = RasterRequest::new("Matter", 60.0).sizing(CanvasSizing::Banner);
    let image = rasterizer
        .rasterize(&request, &RasterDevice::new(DeviceClass::Desktop, 1.0))
        .unwrap();

    assert_eq!(image.size(), (2048, 512));
    assert!(!image.is_blank());

    let (mut min_x, mut max_x) = (u32::MAX, 0);
    for y in 0..image.height {
        for x in 0..image.width {
            if image.pixel(x, y).is_some_and(|px| px[3] > 0) {
                min_x = min_x.min(x);
                max_x = max_x.max(x);
            }
        }
    }
    let left_gap = min_x as i64;
    let right_gap = (image.width - 1 - max_x) as i64;
    assert!((left_gap - right_gap).abs() < 16, "gaps {left_gap} / {right_gap}");
}
