//! Raster cache keyed by every input that affects the output pixels.

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use vellum_core::alloc::HashMap;

use crate::error::TextResult;
use crate::rasterizer::{RasterImage, TextRasterizer};
use crate::style::{RasterDevice, RasterRequest};

/// Hash of a request plus device metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RasterKey(u64);

impl RasterKey {
    pub fn new(request: &RasterRequest, device: &RasterDevice) -> Self {
        let mut hasher = fxhash::FxHasher64::default();
        request.text.hash(&mut hasher);
        request.font_size.to_bits().hash(&mut hasher);
        for channel in request.color.to_array() {
            channel.to_bits().hash(&mut hasher);
        }
        request.align.hash(&mut hasher);
        request.family.hash(&mut hasher);
        request.weight.hash(&mut hasher);
        request.sizing.hash(&mut hasher);
        device.class.hash(&mut hasher);
        device.pixel_ratio.to_bits().hash(&mut hasher);
        Self(hasher.finish())
    }
}

struct CachedRaster {
    request: RasterRequest,
    device: RasterDevice,
    image: Arc<RasterImage>,
}

impl CachedRaster {
    fn matches(&self, request: &RasterRequest, device: &RasterDevice) -> bool {
        self.request == *request && self.device == *device
    }
}

/// Cache of finished rasters.
///
/// Must be cleared whenever GPU resources are lost so nothing stale is
/// re-uploaded. Entries keep their full inputs, so a key collision is a
/// miss rather than the wrong pixels.
pub struct RasterCache {
    entries: HashMap<RasterKey, CachedRaster>,
    /// Statistics for monitoring cache performance
    pub hits: u64,
    pub misses: u64,
}

impl RasterCache {
    pub fn new() -> Self {
        Self {
            entries: HashMap::default(),
            hits: 0,
            misses: 0,
        }
    }

    /// Cached raster for `request`, rendering it on a miss.
    ///
    /// Failed renders are not cached.
    pub fn get_or_rasterize(
        &mut self,
        rasterizer: &mut TextRasterizer,
        request: &RasterRequest,
        device: &RasterDevice,
    ) -> TextResult<Arc<RasterImage>> {
        let key = RasterKey::new(request, device);
        match self.entries.get(&key) {
            Some(cached) if cached.matches(request, device) => {
                self.hits += 1;
                return Ok(cached.image.clone());
            }
            Some(_) => tracing::warn!(?key, "raster key collision, replacing entry"),
            None => {}
        }

        self.misses += 1;
        let image = Arc::new(rasterizer.rasterize(request, device)?);
        self.entries.insert(
            key,
            CachedRaster {
                request: request.clone(),
                device: *device,
                image: image.clone(),
            },
        );
        Ok(image)
    }

    /// Drop one entry. Returns whether it was present.
    pub fn remove(&mut self, key: &RasterKey) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Keep only the entries `keep` accepts.
    pub fn retain(&mut self, mut keep: impl FnMut(&RasterKey) -> bool) {
        let before = self.entries.len();
        self.entries.retain(|key, _| keep(key));
        let evicted = before - self.entries.len();
        if evicted > 0 {
            tracing::debug!(evicted, remaining = self.entries.len(), "Evicted rasters");
        }
    }

    pub fn contains(&self, key: &RasterKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn clear(&mut self) {
        if !self.entries.is_empty() {
            tracing::debug!(entries = self.entries.len(), "Clearing raster cache");
        }
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }

    pub fn hit_rate(&self) -> f32 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f32 / total as f32
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for RasterCache {
    fn default() -> Self {
        Self::new()
    }
}
