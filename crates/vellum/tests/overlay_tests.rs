//! Text overlay behaviour against the recording mock backend.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use vellum::prelude::*;
use vellum::{IntroBanner, IntroConfig, OverlayConfig};
use vellum_quality::{FixedClassifier, QualityPolicy};
use vellum_test_utils::MockSceneBackend;
use vellum_text::TextRasterizer;
use vellum_viewport::map_rect_to_world_size;

const HEADLINE: ElementId = ElementId(1);
const TAGLINE: ElementId = ElementId(2);
const FOOTER: ElementId = ElementId(3);

fn fonts() -> FontSystem {
    FontSystem::with_default_font()
}

fn context(class: DeviceClass, frame: ViewportFrame) -> DeviceContext {
    DeviceContext::classify_with(
        DeviceSignals::new(frame.width, frame.pixel_ratio),
        &FixedClassifier(class),
        &QualityPolicy::default(),
    )
}

fn camera_for(frame: ViewportFrame) -> CameraModel {
    CameraModel::perspective(75.0, frame.aspect_ratio(), 5.0)
}

fn page() -> StaticElements {
    let mut page = StaticElements::new();
    let style = ComputedStyle::new(32.0).with_weight("700");
    page.insert(
        HEADLINE,
        ElementRect::new(20.0, 100.0, 300.0, 40.0),
        "Build the future",
        style.clone(),
    );
    page.insert(
        TAGLINE,
        ElementRect::new(20.0, 400.0, 300.0, 40.0),
        "Take it to the next level",
        style.clone(),
    );
    page.insert(
        FOOTER,
        ElementRect::new(20.0, 3000.0, 300.0, 40.0),
        "Below the fold",
        style,
    );
    page
}

fn overlay(
    class: DeviceClass,
    frame: ViewportFrame,
    config: EffectConfig,
) -> (Arc<MockSceneBackend>, TextOverlay<MockSceneBackend>) {
    let backend = Arc::new(MockSceneBackend::new());
    let overlay = TextOverlay::new(
        backend.clone(),
        &context(class, frame),
        frame,
        &config,
        fonts(),
    )
    .unwrap();
    (backend, overlay)
}

fn desktop_frame() -> ViewportFrame {
    ViewportFrame::new(1920.0, 1080.0, 1.0)
}

#[test]
fn zero_sized_rect_creates_no_mesh() {
    let frame = desktop_frame();
    let camera = camera_for(frame);
    let (backend, mut overlay) = overlay(DeviceClass::Desktop, frame, EffectConfig::default());

    let mut page = StaticElements::new();
    page.insert(
        HEADLINE,
        ElementRect::new(100.0, 100.0, 0.0, 40.0),
        "Hidden until laid out",
        ComputedStyle::default(),
    );

    let report = overlay.sync(&page, &camera);
    assert_eq!(report.created, 0);
    assert_eq!(report.skipped, 1);
    overlay.tick(&page, &camera, 0.5);
    assert_eq!(backend.count_mesh_creates(), 0);
    assert_eq!(backend.count_texture_creates(), 0);
    assert_eq!(backend.count_mesh_updates(), 0);

    // Laid out on a later frame: picked up by the next sync.
    page.set_rect(HEADLINE, ElementRect::new(100.0, 100.0, 200.0, 40.0));
    assert_eq!(overlay.sync(&page, &camera).created, 1);
    assert_eq!(backend.live_meshes(), 1);
}

#[test]
fn empty_text_is_skipped() {
    let frame = desktop_frame();
    let camera = camera_for(frame);
    let (backend, mut overlay) = overlay(DeviceClass::Desktop, frame, EffectConfig::default());

    let mut page = StaticElements::new();
    page.insert(
        HEADLINE,
        ElementRect::new(0.0, 0.0, 100.0, 20.0),
        "   ",
        ComputedStyle::default(),
    );
    assert_eq!(overlay.sync(&page, &camera).skipped, 1);
    assert!(overlay.is_empty());
    assert_eq!(backend.count_texture_creates(), 0);
}

#[test]
fn sync_creates_once_and_drops_vanished_elements() {
    let frame = desktop_frame();
    let camera = camera_for(frame);
    let (backend, mut overlay) = overlay(DeviceClass::Desktop, frame, EffectConfig::default());
    let mut page = page();

    assert_eq!(overlay.sync(&page, &camera).created, 3);
    assert_eq!(overlay.sync(&page, &camera), vellum::SyncReport::default());
    assert_eq!(backend.count_mesh_creates(), 3);

    page.remove(TAGLINE);
    let report = overlay.sync(&page, &camera);
    assert_eq!(report.removed, 1);
    assert!(!overlay.contains(TAGLINE));
    assert_eq!(backend.live_meshes(), 2);
    assert_eq!(backend.live_geometries(), 2);
    assert_eq!(backend.live_textures(), 2);
    assert_eq!(backend.invalid_disposals(), 0);
    assert_eq!(overlay.cache().len(), 2);
}

#[test]
fn every_texture_is_single_mip() {
    let frame = desktop_frame();
    let camera = camera_for(frame);
    let (backend, mut overlay) = overlay(DeviceClass::Desktop, frame, EffectConfig::default());
    overlay.sync(&page(), &camera);

    for call in backend.calls() {
        if let vellum_test_utils::SceneCall::CreateTexture {
            label,
            mip_level_count,
            ..
        } = call
        {
            assert!(label.starts_with("vellum-text-"));
            assert_eq!(mip_level_count, 1);
        }
    }
}

#[test]
fn tick_shows_visible_elements_only() {
    let frame = desktop_frame();
    let camera = camera_for(frame);
    let (backend, mut overlay) = overlay(DeviceClass::Desktop, frame, EffectConfig::default());
    let page = page();
    overlay.sync(&page, &camera);

    let report = overlay.tick(&page, &camera, 1.0);
    assert_eq!(report.shown, 2);
    assert_eq!(report.hidden, 1);

    let headline = overlay.mesh(HEADLINE).unwrap();
    let footer = overlay.mesh(FOOTER).unwrap();
    assert!(backend.mesh_state(headline).is_some_and(|s| s.visible));
    assert_eq!(backend.mesh_state(footer), None);
    assert!(!overlay.record(FOOTER).unwrap().ever_visible);

    overlay.tick(&page, &camera, 1.5);
    let state = backend.mesh_state(headline).unwrap();
    assert!((state.canvas_time - 0.5).abs() < 1e-6);
    assert_eq!(state.scale, 1.0);
}

#[test]
fn leaving_the_viewport_resets_canvas_time() {
    let frame = desktop_frame();
    let camera = camera_for(frame);
    let (backend, mut overlay) = overlay(DeviceClass::Desktop, frame, EffectConfig::default());
    let mut page = page();
    overlay.sync(&page, &camera);
    let headline = overlay.mesh(HEADLINE).unwrap();

    overlay.tick(&page, &camera, 1.0);
    page.scroll_by(2000.0);
    overlay.tick(&page, &camera, 2.0);
    assert!(backend.mesh_state(headline).is_some_and(|s| !s.visible));
    assert_eq!(overlay.record(HEADLINE).unwrap().visible_since, None);
    assert!(overlay.record(HEADLINE).unwrap().ever_visible);

    page.scroll_by(-2000.0);
    overlay.tick(&page, &camera, 3.0);
    let state = backend.mesh_state(headline).unwrap();
    assert!(state.visible);
    assert_eq!(state.canvas_time, 0.0);
    assert_eq!(overlay.record(HEADLINE).unwrap().visible_since, Some(3.0));
}

#[test]
fn sticky_visibility_keeps_seen_meshes() {
    let frame = desktop_frame();
    let camera = camera_for(frame);
    let config =
        EffectConfig::default().with_overlay(OverlayConfig::default().with_sticky_visibility(true));
    let (backend, mut overlay) = overlay(DeviceClass::Desktop, frame, config);
    let mut page = page();
    overlay.sync(&page, &camera);

    overlay.tick(&page, &camera, 1.0);
    page.scroll_by(2000.0);
    overlay.tick(&page, &camera, 2.0);

    let headline = overlay.mesh(HEADLINE).unwrap();
    assert!(backend.mesh_state(headline).is_some_and(|s| s.visible));
    // Scrolled into view for the first time.
    let footer = overlay.mesh(FOOTER).unwrap();
    assert!(backend.mesh_state(footer).is_some_and(|s| s.visible));
}

#[test]
fn resize_rebuilds_without_leaks() {
    let frame = desktop_frame();
    let (backend, mut overlay) = overlay(DeviceClass::Desktop, frame, EffectConfig::default());
    let page = page();
    overlay.sync(&page, &camera_for(frame));
    overlay.tick(&page, &camera_for(frame), 0.5);

    let resized = ViewportFrame::new(1280.0, 800.0, 1.0);
    let state = overlay.handle_viewport(resized, &page, &camera_for(resized));
    assert_eq!(state, ViewportState::Resizing);
    assert_eq!(overlay.len(), 3);
    assert_eq!(backend.count_mesh_creates(), 6);
    assert_eq!(backend.live_meshes(), 3);
    assert_eq!(backend.live_geometries(), 3);
    assert_eq!(backend.live_textures(), 3);
    assert_eq!(backend.invalid_disposals(), 0);

    let again = ViewportFrame::new(1440.0, 900.0, 2.0);
    overlay.handle_viewport(again, &page, &camera_for(again));
    assert_eq!(backend.count_mesh_creates(), 9);
    assert_eq!(backend.live_meshes(), 3);
    assert_eq!(backend.invalid_disposals(), 0);
}

#[test]
fn resize_follows_live_pixel_ratio() {
    let frame = desktop_frame();
    let (backend, mut overlay) = overlay(DeviceClass::Desktop, frame, EffectConfig::default());
    let page = page();
    overlay.sync(&page, &camera_for(frame));
    assert_eq!(overlay.raster_device().pixel_ratio, 1.0);

    let retina = ViewportFrame::new(1920.0, 1080.0, 2.0);
    let state = overlay.handle_viewport(retina, &page, &camera_for(retina));
    assert_eq!(state, ViewportState::Resizing);
    assert_eq!(overlay.raster_device().pixel_ratio, 2.0);

    // Rasters made at the old ratio are gone from the cache.
    assert_eq!(overlay.cache().len(), 3);
    assert_eq!(backend.live_textures(), 3);

    let dense = ViewportFrame::new(1920.0, 1080.0, 4.0);
    overlay.handle_viewport(dense, &page, &camera_for(dense));
    assert_eq!(overlay.raster_device().pixel_ratio, 3.0);
}

#[test]
fn resize_at_same_ratio_reuses_rasters() {
    let frame = desktop_frame();
    let (_backend, mut overlay) = overlay(DeviceClass::Desktop, frame, EffectConfig::default());
    let page = page();
    overlay.sync(&page, &camera_for(frame));

    let resized = ViewportFrame::new(1280.0, 800.0, 1.0);
    overlay.handle_viewport(resized, &page, &camera_for(resized));
    assert_eq!(overlay.cache().hits, 3);
    assert_eq!(overlay.cache().len(), 3);
}

#[test]
fn degenerate_viewport_is_ignored() {
    let full = ViewportFrame::new(390.0, 800.0, 3.0);
    let (backend, mut overlay) = overlay(DeviceClass::Mobile, full, EffectConfig::default());
    let page = page();
    overlay.sync(&page, &camera_for(full));

    let collapsed = ViewportFrame::new(390.0, 0.0, 3.0);
    let state = overlay.handle_viewport(collapsed, &page, &camera_for(full));
    assert_eq!(state, ViewportState::Stable);
    assert_eq!(overlay.tracker().current(), full);
    assert_eq!(backend.count_mesh_creates(), 3);

    overlay.handle_orientation_change(collapsed, &page, &camera_for(full));
    assert_eq!(overlay.tracker().reference(), full);
    assert_eq!(backend.count_mesh_creates(), 3);

    overlay.tick(&page, &camera_for(full), 1.0);
    let headline = overlay.mesh(HEADLINE).unwrap();
    assert!(backend.mesh_state(headline).is_some_and(|s| s.scale.is_finite()));
}

#[test]
fn url_bar_drift_keeps_mesh_size() {
    let full = ViewportFrame::new(390.0, 800.0, 3.0);
    let (backend, mut overlay) = overlay(DeviceClass::Mobile, full, EffectConfig::default());
    let page = page();
    overlay.sync(&page, &camera_for(full));
    overlay.tick(&page, &camera_for(full), 0.5);

    let headline = overlay.mesh(HEADLINE).unwrap();
    let geometry_before = backend.mesh_geometry(headline).unwrap();
    let creates_before = backend.count_geometry_creates();

    let drifted = ViewportFrame::new(390.0, 650.0, 3.0);
    let camera = camera_for(drifted);
    assert_eq!(
        overlay.handle_viewport(drifted, &page, &camera),
        ViewportState::Drifting
    );
    overlay.tick(&page, &camera, 1.0);

    assert_eq!(backend.mesh_geometry(headline), Some(geometry_before));
    assert_eq!(backend.count_geometry_creates(), creates_before);
    assert_eq!(backend.count_mesh_creates(), 3);

    let state = backend.mesh_state(headline).unwrap();
    assert!((state.scale - 800.0 / 650.0).abs() < 1e-5);

    // Drawn extent matches the element's CSS box in the live frame.
    let rect = page.rect(HEADLINE).unwrap();
    let live = map_rect_to_world_size(&rect, &camera, &drifted).unwrap();
    assert!((geometry_before.width * state.scale - live.width).abs() < 1e-4);
    assert!((geometry_before.height * state.scale - live.height).abs() < 1e-4);
}

#[test]
fn context_loss_forgets_handles_and_rebuilds() {
    let frame = desktop_frame();
    let camera = camera_for(frame);
    let (backend, mut overlay) = overlay(DeviceClass::Desktop, frame, EffectConfig::default());
    let page = page();
    overlay.sync(&page, &camera);

    backend.lose_context();
    overlay.on_context_lost();
    assert!(overlay.is_suspended());
    assert!(overlay.is_empty());
    assert!(overlay.cache().is_empty());
    assert_eq!(overlay.tick(&page, &camera, 1.0), vellum::TickReport::default());
    assert_eq!(overlay.sync(&page, &camera), vellum::SyncReport::default());

    backend.restore_context();
    let report = overlay.on_context_restored(&page, &camera);
    assert_eq!(report.created, 3);
    assert_eq!(overlay.cache().misses, 3);
    assert_eq!(overlay.cache().len(), 3);
    assert_eq!(backend.live_meshes(), 3);
    assert_eq!(backend.invalid_disposals(), 0);
}

#[test]
fn missing_context_is_fatal() {
    let backend = Arc::new(MockSceneBackend::new());
    backend.lose_context();
    let frame = desktop_frame();
    let err = TextOverlay::new(
        backend,
        &context(DeviceClass::Desktop, frame),
        frame,
        &EffectConfig::default(),
        fonts(),
    )
    .err()
    .unwrap();
    assert!(err.is_fatal());
    assert!(err.user_notice().is_some());
}

#[test]
fn highlight_fades_in_from_first_visibility() {
    let frame = desktop_frame();
    let camera = camera_for(frame);
    let config = EffectConfig::default().with_highlight(
        HighlightRules::new()
            .with_words(["future"])
            .with_phrases(["next level"]),
    );
    let (backend, mut overlay) = overlay(DeviceClass::Desktop, frame, config);
    let page = page();
    overlay.sync(&page, &camera);

    assert!(overlay.is_highlighted(HEADLINE));
    assert!(overlay.is_highlighted(TAGLINE));
    assert!(!overlay.is_highlighted(FOOTER));

    let headline = overlay.mesh(HEADLINE).unwrap();
    overlay.tick(&page, &camera, 2.0);
    assert_eq!(backend.mesh_state(headline).unwrap().highlight, 0.0);
    overlay.tick(&page, &camera, 2.25);
    assert!((backend.mesh_state(headline).unwrap().highlight - 0.5).abs() < 1e-5);
    overlay.tick(&page, &camera, 4.0);
    assert_eq!(backend.mesh_state(headline).unwrap().highlight, 1.0);
    assert_eq!(backend.mesh_state(headline).unwrap().highlight_color, Color::RED);

    overlay.add_highlight_words(["fold"]);
    assert!(overlay.is_highlighted(FOOTER));
}

#[test]
fn dispose_all_releases_everything() {
    let frame = desktop_frame();
    let camera = camera_for(frame);
    let (backend, mut overlay) = overlay(DeviceClass::Desktop, frame, EffectConfig::default());
    overlay.sync(&page(), &camera);

    overlay.dispose_all();
    assert!(overlay.is_empty());
    assert_eq!(backend.live_meshes(), 0);
    assert_eq!(backend.live_geometries(), 0);
    assert_eq!(backend.live_textures(), 0);
    assert_eq!(backend.invalid_disposals(), 0);
}

#[test]
fn intro_banner_lifecycle() {
    let frame = desktop_frame();
    let ctx = context(DeviceClass::Desktop, frame);
    let backend = Arc::new(MockSceneBackend::new());
    let mut rasterizer = TextRasterizer::new(fonts());

    let banner = IntroBanner::create(
        backend.clone(),
        &ctx,
        frame.width,
        &IntroConfig::default(),
        &mut rasterizer,
    )
    .unwrap();
    assert_eq!(banner.len(), 3);
    assert_eq!(backend.live_meshes(), 3);

    for call in backend.calls() {
        if let vellum_test_utils::SceneCall::CreateTexture { width, height, .. } = call {
            assert_eq!((width, height), (2048, 512));
        }
    }

    banner.update(1.0);
    let accented: Vec<_> = backend
        .mesh_handles()
        .into_iter()
        .filter_map(|mesh| backend.mesh_state(mesh))
        .filter(|state| state.highlight == 1.0)
        .collect();
    assert_eq!(accented.len(), 1);

    banner.dispose();
    assert_eq!(backend.live_meshes(), 0);
    assert_eq!(backend.live_textures(), 0);
    assert_eq!(backend.invalid_disposals(), 0);
}

#[test]
fn failed_intro_word_releases_earlier_words() {
    let frame = desktop_frame();
    let ctx = context(DeviceClass::Desktop, frame);
    let backend = Arc::new(MockSceneBackend::new());
    let mut rasterizer = TextRasterizer::new(fonts());

    let result = IntroBanner::create(
        backend.clone(),
        &ctx,
        frame.width,
        &IntroConfig::default().with_words(["Looks", " ", "Matter"]),
        &mut rasterizer,
    );
    assert!(result.is_err());
    assert_eq!(backend.count_mesh_creates(), 1);
    assert_eq!(backend.live_meshes(), 0);
    assert_eq!(backend.live_geometries(), 0);
    assert_eq!(backend.live_textures(), 0);
    assert_eq!(backend.invalid_disposals(), 0);
}

#[test]
fn completion_signal_gates_late_subscribers() {
    let mut intro = IntroSequence::new(&IntroConfig::default());
    let signal = intro.signal();
    let fired = Arc::new(AtomicUsize::new(0));

    let early = fired.clone();
    signal.subscribe(move || {
        early.fetch_add(1, Ordering::SeqCst);
    });
    assert_eq!(intro.update(Duration::from_secs(6)), IntroEvent::None);
    assert_eq!(fired.load(Ordering::SeqCst), 0);

    assert_eq!(intro.update(Duration::from_millis(6250)), IntroEvent::Completed);
    assert_eq!(fired.load(Ordering::SeqCst), 1);

    let late = fired.clone();
    signal.subscribe(move || {
        late.fetch_add(1, Ordering::SeqCst);
    });
    assert_eq!(fired.load(Ordering::SeqCst), 2);
    assert!(!signal.fire());
    assert_eq!(fired.load(Ordering::SeqCst), 2);
}
