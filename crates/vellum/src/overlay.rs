//! DOM-synchronised text overlay.
//!
//! Each tracked element owns exactly one mesh, one geometry and one texture.
//! The overlay keeps them in step with the element's box every frame, tells
//! real resizes apart from URL-bar drift, and survives context loss by
//! forgetting its handles and rebuilding.

use std::sync::Arc;

use vellum_core::ViewportFrame;
use vellum_core::alloc::{HashMap, HashSet};
use vellum_core::profiling::{profile_function, profile_scope};
use vellum_quality::{DeviceClass, DeviceContext, QualityProfile};
use vellum_test_utils::{
    GeometryHandle, MeshHandle, MeshState, PlaneGeometry, SceneBackend, TextureHandle,
    TextureUpload,
};
use vellum_text::{
    FontSystem, RasterCache, RasterDevice, RasterKey, TextRasterizer, TextureSettings,
};
use vellum_viewport::{CameraModel, ViewportState, ViewportTracker, WorldSize};

use crate::config::{EffectConfig, OverlayConfig};
use crate::element::{ElementId, ElementRecord, ElementSource};
use crate::error::{VellumResult, require_context};
use crate::highlight::HighlightRules;

/// Outcome of a [`TextOverlay::sync`] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub created: usize,
    pub removed: usize,
    /// Elements that could not be built this pass and will be retried.
    pub skipped: usize,
}

/// Outcome of a [`TextOverlay::tick`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub shown: usize,
    pub hidden: usize,
    pub geometry_rebuilds: usize,
    /// Elements whose rect could not be placed this tick.
    pub skipped: usize,
}

struct TrackedElement {
    record: ElementRecord,
    mesh: MeshHandle,
    geometry: GeometryHandle,
    texture: TextureHandle,
    raster_key: RasterKey,
    /// Geometry size before the compensation scale.
    size: WorldSize,
    text: String,
    highlighted: bool,
    highlight_start: Option<f32>,
    /// Whether the last state pushed to the mesh was visible.
    shown: bool,
}

/// Text meshes mirrored from page elements.
pub struct TextOverlay<B: SceneBackend> {
    backend: Arc<B>,
    config: OverlayConfig,
    highlight: HighlightRules,
    rasterizer: TextRasterizer,
    cache: RasterCache,
    tracker: ViewportTracker,
    class: DeviceClass,
    profile: QualityProfile,
    raster_device: RasterDevice,
    texture_settings: TextureSettings,
    entries: HashMap<ElementId, TrackedElement>,
    suspended: bool,
}

impl<B: SceneBackend> TextOverlay<B> {
    /// Create an empty overlay.
    ///
    /// Fails with [`crate::VellumError::UnsupportedEnvironment`] when the
    /// backend has no rendering context to begin with.
    pub fn new(
        backend: Arc<B>,
        ctx: &DeviceContext,
        frame: ViewportFrame,
        config: &EffectConfig,
        fonts: FontSystem,
    ) -> VellumResult<Self> {
        require_context(!backend.is_context_lost(), "no rendering context")?;

        let profile = ctx.profile.clone();
        let raster_device =
            RasterDevice::new(ctx.class, profile.effective_pixel_ratio(frame.pixel_ratio));
        tracing::info!(
            class = %ctx.class,
            pixel_ratio = raster_device.pixel_ratio,
            "Text overlay created"
        );

        Ok(Self {
            backend,
            config: config.overlay.clone(),
            highlight: config.highlight.clone(),
            rasterizer: TextRasterizer::new(fonts).with_max_dimension(config.raster.max_dimension),
            cache: RasterCache::new(),
            tracker: ViewportTracker::new(frame, config.viewport),
            class: ctx.class,
            texture_settings: TextureSettings::from_profile(&profile),
            profile,
            raster_device,
            entries: HashMap::new(),
            suspended: false,
        })
    }

    /// Build meshes for elements not yet tracked and drop the ones that
    /// disappeared.
    ///
    /// Elements that cannot be built (empty text, zero-size box, failed
    /// raster) are skipped and picked up by a later call.
    pub fn sync(&mut self, source: &dyn ElementSource, camera: &CameraModel) -> SyncReport {
        profile_function!();
        let mut report = SyncReport::default();
        if self.suspended {
            return report;
        }

        let ids = source.element_ids();
        let live: HashSet<ElementId> = ids.iter().copied().collect();

        let gone: Vec<ElementId> = self
            .entries
            .keys()
            .filter(|id| !live.contains(id))
            .copied()
            .collect();
        for id in gone {
            if let Some(entry) = self.entries.remove(&id) {
                self.dispose_entry(&entry);
                tracing::debug!(element = %id, "element removed");
                report.removed += 1;
            }
        }

        for id in ids {
            if self.entries.contains_key(&id) {
                continue;
            }
            match self.build_entry(source, id, camera) {
                Ok(Some(entry)) => {
                    self.entries.insert(id, entry);
                    report.created += 1;
                }
                Ok(None) => report.skipped += 1,
                Err(err) => {
                    tracing::debug!(element = %id, "skipping element: {}", err);
                    report.skipped += 1;
                }
            }
        }

        if report.removed > 0 {
            self.prune_cache();
        }

        if report.created > 0 || report.removed > 0 {
            tracing::debug!(
                created = report.created,
                removed = report.removed,
                skipped = report.skipped,
                tracked = self.entries.len(),
                "overlay synced"
            );
        }
        report
    }

    /// Rasterize, upload and place one element. `Ok(None)` if it vanished
    /// while being read.
    fn build_entry(
        &mut self,
        source: &dyn ElementSource,
        id: ElementId,
        camera: &CameraModel,
    ) -> VellumResult<Option<TrackedElement>> {
        let (Some(rect), Some(text), Some(style)) = (source.rect(id), source.text(id), source.style(id))
        else {
            return Ok(None);
        };
        let text = text.trim().to_string();

        // Placement first: a zero-size box must not cost a raster.
        let placement = self.tracker.place(&rect, camera)?;
        let request = style.to_request(&text);
        let image = {
            profile_scope!("rasterize_element");
            self.cache
                .get_or_rasterize(&mut self.rasterizer, &request, &self.raster_device)?
        };

        let label = format!("{}-{}", self.config.label_prefix, id.0);
        let texture = self.backend.create_texture(&TextureUpload {
            label: &label,
            image: &image,
            settings: self.texture_settings,
        });
        let geometry = self
            .backend
            .create_geometry(PlaneGeometry::new(placement.size.width, placement.size.height));
        let mesh = self.backend.create_mesh(geometry, texture);

        let highlighted = self.highlight.matches(&text);
        tracing::debug!(
            element = %id,
            width = image.width,
            height = image.height,
            highlighted,
            "element mesh created"
        );

        Ok(Some(TrackedElement {
            record: ElementRecord {
                last_rect: Some(rect),
                ..ElementRecord::default()
            },
            mesh,
            geometry,
            texture,
            raster_key: RasterKey::new(&request, &self.raster_device),
            size: placement.size,
            text,
            highlighted,
            highlight_start: None,
            shown: false,
        }))
    }

    /// Per-frame update. `elapsed` is overlay time in seconds.
    pub fn tick(
        &mut self,
        source: &dyn ElementSource,
        camera: &CameraModel,
        elapsed: f32,
    ) -> TickReport {
        profile_function!();
        let mut report = TickReport::default();
        if self.suspended {
            return report;
        }

        let threshold = self.config.geometry_threshold_for(self.class);
        let sticky = self.config.sticky_visibility;

        for (id, entry) in self.entries.iter_mut() {
            // Gone elements are cleaned up by the next sync.
            let Some(rect) = source.rect(*id) else {
                continue;
            };
            entry.record.last_rect = Some(rect);

            let visible = self.tracker.is_visible(&rect, self.class);
            let shown = visible || (sticky && entry.record.ever_visible);

            if !shown {
                entry.record.visible_since = None;
                if entry.shown {
                    self.backend.update_mesh(
                        entry.mesh,
                        &MeshState {
                            visible: false,
                            ..MeshState::default()
                        },
                    );
                    entry.shown = false;
                }
                report.hidden += 1;
                continue;
            }

            let placement = match self.tracker.place(&rect, camera) {
                Ok(placement) => placement,
                Err(err) => {
                    tracing::debug!(element = %id, "not placeable this tick: {}", err);
                    report.skipped += 1;
                    continue;
                }
            };

            if visible {
                entry.record.ever_visible = true;
            }
            if entry.record.visible_since.is_none() {
                entry.record.visible_since = Some(elapsed);
            }
            if entry.highlighted && entry.highlight_start.is_none() {
                entry.highlight_start = Some(elapsed);
            }

            if placement.size.max_abs_diff(&entry.size) > threshold {
                self.backend.dispose_geometry(entry.geometry);
                let geometry = self
                    .backend
                    .create_geometry(PlaneGeometry::new(placement.size.width, placement.size.height));
                self.backend.set_mesh_geometry(entry.mesh, geometry);
                entry.geometry = geometry;
                entry.size = placement.size;
                report.geometry_rebuilds += 1;
            }

            let highlight = entry
                .highlight_start
                .map(|start| self.highlight.progress(elapsed - start))
                .unwrap_or(0.0);

            self.backend.update_mesh(
                entry.mesh,
                &MeshState {
                    position: placement.position,
                    scale: placement.scale,
                    visible: true,
                    canvas_time: entry.record.canvas_time(elapsed),
                    highlight,
                    highlight_color: self.highlight.color,
                },
            );
            entry.shown = true;
            report.shown += 1;
        }

        report
    }

    /// Feed a new viewport measurement.
    ///
    /// A real resize disposes every mesh and rebuilds from the current page
    /// state. Drift only changes how the next [`tick`](Self::tick) places
    /// meshes.
    pub fn handle_viewport(
        &mut self,
        frame: ViewportFrame,
        source: &dyn ElementSource,
        camera: &CameraModel,
    ) -> ViewportState {
        if !frame.is_valid() {
            return self.tracker.state();
        }
        let state = self.tracker.observe(frame, self.class);
        if state == ViewportState::Resizing {
            self.rebuild(frame, source, camera);
        }
        state
    }

    /// Orientation changes always count as a real resize. Call after the
    /// settle delay so the reported size is final.
    pub fn handle_orientation_change(
        &mut self,
        frame: ViewportFrame,
        source: &dyn ElementSource,
        camera: &CameraModel,
    ) {
        if !frame.is_valid() {
            tracing::debug!(width = frame.width, height = frame.height, "orientation frame ignored");
            return;
        }
        self.tracker.force_reset(frame);
        self.rebuild(frame, source, camera);
    }

    fn rebuild(&mut self, frame: ViewportFrame, source: &dyn ElementSource, camera: &CameraModel) {
        self.raster_device.pixel_ratio = self.profile.effective_pixel_ratio(frame.pixel_ratio);
        let disposed = self.entries.len();
        self.dispose_all();
        let report = self.sync(source, camera);
        self.prune_cache();
        tracing::info!(
            width = frame.width,
            height = frame.height,
            disposed,
            created = report.created,
            "overlay rebuilt after resize"
        );
    }

    /// Drop rasters no tracked element was built from.
    fn prune_cache(&mut self) {
        let live: HashSet<RasterKey> = self.entries.values().map(|entry| entry.raster_key).collect();
        self.cache.retain(|key| live.contains(key));
    }

    /// The rendering context was lost: every handle is already invalid.
    pub fn on_context_lost(&mut self) {
        tracing::warn!(tracked = self.entries.len(), "rendering context lost, suspending overlay");
        self.entries.clear();
        self.cache.clear();
        self.suspended = true;
    }

    /// Rebuild everything after the context came back.
    pub fn on_context_restored(
        &mut self,
        source: &dyn ElementSource,
        camera: &CameraModel,
    ) -> SyncReport {
        self.suspended = false;
        let report = self.sync(source, camera);
        tracing::info!(created = report.created, "rendering context restored, overlay rebuilt");
        report
    }

    /// Release every mesh, geometry and texture.
    pub fn dispose_all(&mut self) {
        let entries: Vec<TrackedElement> = self.entries.drain().map(|(_, entry)| entry).collect();
        for entry in &entries {
            self.dispose_entry(entry);
        }
    }

    fn dispose_entry(&self, entry: &TrackedElement) {
        if self.backend.is_context_lost() {
            return;
        }
        self.backend.dispose_mesh(entry.mesh);
        self.backend.dispose_geometry(entry.geometry);
        self.backend.dispose_texture(entry.texture);
    }

    pub fn add_highlight_words<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.highlight.add_words(words);
        self.refresh_highlight_flags();
    }

    pub fn add_highlight_phrases<I, S>(&mut self, phrases: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.highlight.add_phrases(phrases);
        self.refresh_highlight_flags();
    }

    pub fn set_highlight_color(&mut self, color: vellum_core::Color) {
        self.highlight.set_color(color);
    }

    fn refresh_highlight_flags(&mut self) {
        for entry in self.entries.values_mut() {
            entry.highlighted = self.highlight.matches(&entry.text);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn record(&self, id: ElementId) -> Option<&ElementRecord> {
        self.entries.get(&id).map(|entry| &entry.record)
    }

    pub fn mesh(&self, id: ElementId) -> Option<MeshHandle> {
        self.entries.get(&id).map(|entry| entry.mesh)
    }

    pub fn is_highlighted(&self, id: ElementId) -> bool {
        self.entries.get(&id).is_some_and(|entry| entry.highlighted)
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    pub fn tracker(&self) -> &ViewportTracker {
        &self.tracker
    }

    pub fn raster_device(&self) -> RasterDevice {
        self.raster_device
    }

    pub fn cache(&self) -> &RasterCache {
        &self.cache
    }

    pub fn highlight(&self) -> &HighlightRules {
        &self.highlight
    }

    pub fn backend(&self) -> &Arc<B> {
        &self.backend
    }
}
