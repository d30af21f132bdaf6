//! Preloader intro: three banner words on a timer, then a one-shot
//! completion signal that gates everything else on the page.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use vellum_core::Color;
use vellum_core::math::Vec3;
use vellum_quality::{DeviceClass, DeviceContext};
use vellum_test_utils::{
    GeometryHandle, MeshHandle, MeshState, PlaneGeometry, SceneBackend, TextureHandle,
    TextureUpload,
};
use vellum_text::{
    CanvasSizing, FontFamily, FontWeight, RasterDevice, RasterRequest, TextRasterizer,
    TextureSettings,
};

use crate::config::IntroConfig;
use crate::error::{VellumResult, require_context};

type Subscriber = Box<dyn FnOnce() + Send>;

#[derive(Default)]
struct SignalState {
    fired: bool,
    subscribers: Vec<Subscriber>,
}

/// Fires exactly once, with no payload.
///
/// Subscribers added after the signal fired run immediately. Clones share
/// state.
#[derive(Clone, Default)]
pub struct CompletionSignal {
    state: Arc<Mutex<SignalState>>,
}

impl CompletionSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, callback: impl FnOnce() + Send + 'static) {
        let mut state = self.state.lock();
        if state.fired {
            drop(state);
            callback();
        } else {
            state.subscribers.push(Box::new(callback));
        }
    }

    /// Run every pending subscriber. Returns `false` if already fired.
    pub fn fire(&self) -> bool {
        let subscribers = {
            let mut state = self.state.lock();
            if state.fired {
                return false;
            }
            state.fired = true;
            std::mem::take(&mut state.subscribers)
        };
        // Callbacks may subscribe again; the lock is released by now.
        for callback in subscribers {
            callback();
        }
        true
    }

    pub fn has_fired(&self) -> bool {
        self.state.lock().fired
    }
}

impl std::fmt::Debug for CompletionSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("CompletionSignal")
            .field("fired", &state.fired)
            .field("pending", &state.subscribers.len())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntroEvent {
    None,
    /// The preloader finished; the completion signal has fired.
    Completed,
    /// Settle delay passed: build the text overlay now.
    SetupOverlay,
}

/// Preloader timeline.
#[derive(Debug)]
pub struct IntroSequence {
    duration: Duration,
    settle_delay: Duration,
    signal: CompletionSignal,
    completed_at: Option<Duration>,
    setup_done: bool,
}

impl IntroSequence {
    pub fn new(config: &IntroConfig) -> Self {
        Self {
            duration: config.duration,
            settle_delay: config.settle_delay,
            signal: CompletionSignal::new(),
            completed_at: None,
            setup_done: false,
        }
    }

    pub fn signal(&self) -> CompletionSignal {
        self.signal.clone()
    }

    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Preloader progress in `[0, 1]`.
    pub fn progress(&self, elapsed: Duration) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Advance to `elapsed` since the page started. Each event is returned
    /// once.
    pub fn update(&mut self, elapsed: Duration) -> IntroEvent {
        match self.completed_at {
            None if elapsed >= self.duration => {
                self.completed_at = Some(elapsed);
                tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "intro complete");
                self.signal.fire();
                IntroEvent::Completed
            }
            Some(at) if !self.setup_done && elapsed >= at + self.settle_delay => {
                self.setup_done = true;
                IntroEvent::SetupOverlay
            }
            _ => IntroEvent::None,
        }
    }
}

/// Size and placement of the three intro words for a viewport width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntroLayout {
    pub font_scale: f32,
    pub geometry_scale: f32,
    /// CSS pixel font size after scaling.
    pub font_size: f32,
    pub plane: PlaneGeometry,
    pub positions: [Vec3; 3],
    /// Words stacked vertically instead of side by side.
    pub stacked: bool,
}

impl IntroLayout {
    const PLANE_WIDTH: f32 = 2.5;
    const PLANE_HEIGHT: f32 = 0.625;

    pub fn for_width(width: f32, class: DeviceClass, config: &IntroConfig) -> Self {
        let (font_scale, geometry_scale) = match width {
            w if w < 480.0 => (0.7, 0.6),
            w if w < 640.0 => (0.6, 0.6),
            w if w < 768.0 => (0.8, 0.8),
            w if w < 1024.0 => (0.75, 0.75),
            w if w < 1280.0 => (0.6, 1.0),
            _ => (0.8, 1.0),
        };
        let base_font = if class.is_constrained() { 100.0 } else { 120.0 };

        let stacked = width < 640.0;
        let positions = if stacked {
            let spacing = if width < 480.0 { 0.4 } else { 0.6 };
            [
                Vec3::new(0.0, spacing, 0.0),
                Vec3::ZERO,
                Vec3::new(0.0, -spacing, 0.0),
            ]
        } else {
            let spacing = config.horizontal_spacing;
            [
                Vec3::new(-spacing, 0.0, 0.0),
                Vec3::ZERO,
                Vec3::new(spacing, 0.0, 0.0),
            ]
        };

        Self {
            font_scale,
            geometry_scale,
            font_size: base_font * font_scale,
            plane: PlaneGeometry::new(
                Self::PLANE_WIDTH * geometry_scale,
                Self::PLANE_HEIGHT * geometry_scale,
            ),
            positions,
            stacked,
        }
    }
}

struct BannerWord {
    mesh: MeshHandle,
    geometry: GeometryHandle,
    texture: TextureHandle,
    position: Vec3,
    accent: bool,
}

/// The three intro word meshes.
pub struct IntroBanner<B: SceneBackend> {
    backend: Arc<B>,
    words: Vec<BannerWord>,
    accent_color: Color,
}

impl<B: SceneBackend> IntroBanner<B> {
    pub fn create(
        backend: Arc<B>,
        ctx: &DeviceContext,
        viewport_width: f32,
        config: &IntroConfig,
        rasterizer: &mut TextRasterizer,
    ) -> VellumResult<Self> {
        require_context(!backend.is_context_lost(), "no rendering context")?;

        let layout = IntroLayout::for_width(viewport_width, ctx.class, config);
        let device = RasterDevice::from(ctx);
        let settings = TextureSettings::from_profile(&ctx.profile);

        let mut words = Vec::with_capacity(config.words.len());
        for (index, (word, position)) in config.words.iter().zip(layout.positions).enumerate() {
            let request = RasterRequest::new(word.as_str(), layout.font_size)
                .color(Color::WHITE)
                .family(FontFamily::Named("Arial".to_string()))
                .weight(FontWeight::Bold)
                .sizing(CanvasSizing::Banner);
            let image = match rasterizer.rasterize(&request, &device) {
                Ok(image) => image,
                Err(err) => {
                    // Words already uploaded belong to nobody yet.
                    release(backend.as_ref(), &words);
                    return Err(err.into());
                }
            };

            let label = format!("vellum-intro-{}", index);
            let texture = backend.create_texture(&TextureUpload {
                label: &label,
                image: &image,
                settings,
            });
            let geometry = backend.create_geometry(layout.plane);
            let mesh = backend.create_mesh(geometry, texture);
            words.push(BannerWord {
                mesh,
                geometry,
                texture,
                position,
                accent: index == config.accent_word,
            });
        }

        tracing::debug!(
            stacked = layout.stacked,
            font_size = layout.font_size,
            "intro banner created"
        );
        Ok(Self {
            backend,
            words,
            accent_color: Color::RED,
        })
    }

    /// Push the preloader time to every word.
    pub fn update(&self, elapsed: f32) {
        for word in &self.words {
            self.backend.update_mesh(
                word.mesh,
                &MeshState {
                    position: word.position,
                    scale: 1.0,
                    visible: true,
                    canvas_time: elapsed,
                    highlight: if word.accent { 1.0 } else { 0.0 },
                    highlight_color: self.accent_color,
                },
            );
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Release the word meshes once the preloader is gone.
    pub fn dispose(self) {
        release(self.backend.as_ref(), &self.words);
    }
}

fn release<B: SceneBackend>(backend: &B, words: &[BannerWord]) {
    if backend.is_context_lost() {
        return;
    }
    for word in words {
        backend.dispose_mesh(word.mesh);
        backend.dispose_geometry(word.geometry);
        backend.dispose_texture(word.texture);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn test_signal_fires_once() {
        let signal = CompletionSignal::new();
        let count = Arc::new(AtomicUsize::new(0));

        let c = count.clone();
        signal.subscribe(move || {
            c.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(count.load(Ordering::SeqCst), 0);

        assert!(signal.fire());
        assert!(!signal.fire());
        assert_eq!(count.load(Ordering::SeqCst), 1);

        let c = count.clone();
        signal.clone().subscribe(move || {
            c.fetch_add(10, Ordering::SeqCst);
        });
        assert_eq!(count.load(Ordering::SeqCst), 11);
        assert!(signal.has_fired());
    }

    #[test]
    fn test_sequence_timeline() {
        let mut intro = IntroSequence::new(&IntroConfig::default());
        assert_eq!(intro.update(Duration::from_millis(3000)), IntroEvent::None);
        assert!((intro.progress(Duration::from_millis(3100)) - 0.5).abs() < 1e-6);

        assert_eq!(intro.update(Duration::from_millis(6216)), IntroEvent::Completed);
        assert!(intro.signal().has_fired());
        assert_eq!(intro.update(Duration::from_millis(6300)), IntroEvent::None);
        assert_eq!(intro.update(Duration::from_millis(6420)), IntroEvent::SetupOverlay);
        assert_eq!(intro.update(Duration::from_millis(9000)), IntroEvent::None);
    }

    #[test]
    fn test_layout_tiers() {
        let config = IntroConfig::default();

        let phone = IntroLayout::for_width(390.0, DeviceClass::Mobile, &config);
        assert!(phone.stacked);
        assert_eq!(phone.positions[0], Vec3::new(0.0, 0.4, 0.0));
        assert!((phone.font_size - 70.0).abs() < 1e-4);
        assert!((phone.plane.width - 1.5).abs() < 1e-6);

        let large_phone = IntroLayout::for_width(600.0, DeviceClass::Mobile, &config);
        assert_eq!(large_phone.positions[2], Vec3::new(0.0, -0.6, 0.0));

        let laptop = IntroLayout::for_width(1100.0, DeviceClass::Desktop, &config);
        assert!(!laptop.stacked);
        assert_eq!(laptop.positions[0], Vec3::new(-0.9, 0.0, 0.0));
        assert!((laptop.font_size - 72.0).abs() < 1e-4);

        let wide = IntroLayout::for_width(1920.0, DeviceClass::Desktop, &config);
        assert!((wide.font_size - 96.0).abs() < 1e-4);
        assert_eq!(wide.plane, PlaneGeometry::new(2.5, 0.625));
    }
}
