//! Mock implementation of SceneBackend for testing.
//!
//! Records every call and tracks which resources are alive, so tests can
//! assert that nothing leaks across resizes and that nothing is disposed
//! twice.

use parking_lot::Mutex;
use vellum_core::alloc::{HashMap, HashSet};

use crate::scene_backend::*;

/// Records a scene operation for verification in tests.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneCall {
    CreateGeometry {
        handle: GeometryHandle,
        geometry: PlaneGeometry,
    },
    CreateTexture {
        handle: TextureHandle,
        label: String,
        width: u32,
        height: u32,
        mip_level_count: u32,
        format: wgpu::TextureFormat,
    },
    CreateMesh {
        handle: MeshHandle,
        geometry: GeometryHandle,
        texture: TextureHandle,
    },
    SetMeshGeometry {
        mesh: MeshHandle,
        geometry: GeometryHandle,
    },
    UpdateMesh {
        mesh: MeshHandle,
        state: MeshState,
    },
    DisposeGeometry(GeometryHandle),
    DisposeTexture(TextureHandle),
    DisposeMesh(MeshHandle),
    ContextLost,
    ContextRestored,
}

#[derive(Debug, Clone)]
struct MockMesh {
    geometry: GeometryHandle,
    texture: TextureHandle,
    state: Option<MeshState>,
}

#[derive(Default)]
struct MockScene {
    calls: Vec<SceneCall>,
    next_id: u64,
    geometries: HashMap<GeometryHandle, PlaneGeometry>,
    textures: HashSet<TextureHandle>,
    meshes: HashMap<MeshHandle, MockMesh>,
    context_lost: bool,
    invalid_disposals: usize,
}

impl MockScene {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Mock implementation of SceneBackend for testing.
///
/// # Example
///
/// ```rust
/// use vellum_test_utils::{MockSceneBackend, PlaneGeometry, SceneBackend};
///
/// let mock = MockSceneBackend::new();
/// let geometry = mock.create_geometry(PlaneGeometry::new(1.0, 0.25));
///
/// assert_eq!(mock.count_geometry_creates(), 1);
/// assert_eq!(mock.geometry(geometry), Some(PlaneGeometry::new(1.0, 0.25)));
/// ```
pub struct MockSceneBackend {
    scene: Mutex<MockScene>,
}

impl MockSceneBackend {
    pub fn new() -> Self {
        Self {
            scene: Mutex::new(MockScene::default()),
        }
    }

    /// Get a copy of all recorded calls (for test assertions).
    pub fn calls(&self) -> Vec<SceneCall> {
        self.scene.lock().calls.clone()
    }

    /// Clear recorded calls (useful between test steps).
    pub fn clear_calls(&self) {
        self.scene.lock().calls.clear();
    }

    fn count(&self, pred: impl Fn(&SceneCall) -> bool) -> usize {
        self.scene.lock().calls.iter().filter(|call| pred(call)).count()
    }

    pub fn count_geometry_creates(&self) -> usize {
        self.count(|call| matches!(call, SceneCall::CreateGeometry { .. }))
    }

    pub fn count_texture_creates(&self) -> usize {
        self.count(|call| matches!(call, SceneCall::CreateTexture { .. }))
    }

    pub fn count_mesh_creates(&self) -> usize {
        self.count(|call| matches!(call, SceneCall::CreateMesh { .. }))
    }

    pub fn count_mesh_updates(&self) -> usize {
        self.count(|call| matches!(call, SceneCall::UpdateMesh { .. }))
    }

    pub fn count_geometry_disposes(&self) -> usize {
        self.count(|call| matches!(call, SceneCall::DisposeGeometry(_)))
    }

    pub fn live_geometries(&self) -> usize {
        self.scene.lock().geometries.len()
    }

    pub fn live_textures(&self) -> usize {
        self.scene.lock().textures.len()
    }

    pub fn live_meshes(&self) -> usize {
        self.scene.lock().meshes.len()
    }

    /// Disposals of handles that were never created, already disposed, or
    /// invalidated by a context loss.
    pub fn invalid_disposals(&self) -> usize {
        self.scene.lock().invalid_disposals
    }

    pub fn geometry(&self, handle: GeometryHandle) -> Option<PlaneGeometry> {
        self.scene.lock().geometries.get(&handle).copied()
    }

    /// Geometry currently attached to `mesh`.
    pub fn mesh_geometry(&self, mesh: MeshHandle) -> Option<PlaneGeometry> {
        let scene = self.scene.lock();
        let handle = scene.meshes.get(&mesh)?.geometry;
        scene.geometries.get(&handle).copied()
    }

    pub fn mesh_texture(&self, mesh: MeshHandle) -> Option<TextureHandle> {
        self.scene.lock().meshes.get(&mesh).map(|m| m.texture)
    }

    /// Last state pushed to `mesh`.
    pub fn mesh_state(&self, mesh: MeshHandle) -> Option<MeshState> {
        self.scene.lock().meshes.get(&mesh).and_then(|m| m.state)
    }

    pub fn mesh_handles(&self) -> Vec<MeshHandle> {
        let mut handles: Vec<_> = self.scene.lock().meshes.keys().copied().collect();
        handles.sort();
        handles
    }

    /// Simulate the GPU dropping every resource.
    pub fn lose_context(&self) {
        let mut scene = self.scene.lock();
        scene.context_lost = true;
        scene.geometries.clear();
        scene.textures.clear();
        scene.meshes.clear();
        scene.calls.push(SceneCall::ContextLost);
    }

    pub fn restore_context(&self) {
        let mut scene = self.scene.lock();
        scene.context_lost = false;
        scene.calls.push(SceneCall::ContextRestored);
    }
}

impl Default for MockSceneBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneBackend for MockSceneBackend {
    fn create_geometry(&self, geometry: PlaneGeometry) -> GeometryHandle {
        let mut scene = self.scene.lock();
        let handle = GeometryHandle(scene.next_id());
        scene.geometries.insert(handle, geometry);
        scene
            .calls
            .push(SceneCall::CreateGeometry { handle, geometry });
        handle
    }

    fn create_texture(&self, upload: &TextureUpload<'_>) -> TextureHandle {
        let desc = upload.descriptor();
        let mut scene = self.scene.lock();
        let handle = TextureHandle(scene.next_id());
        scene.textures.insert(handle);
        scene.calls.push(SceneCall::CreateTexture {
            handle,
            label: upload.label.to_string(),
            width: desc.size.width,
            height: desc.size.height,
            mip_level_count: desc.mip_level_count,
            format: desc.format,
        });
        handle
    }

    fn create_mesh(&self, geometry: GeometryHandle, texture: TextureHandle) -> MeshHandle {
        let mut scene = self.scene.lock();
        let handle = MeshHandle(scene.next_id());
        scene.meshes.insert(
            handle,
            MockMesh {
                geometry,
                texture,
                state: None,
            },
        );
        scene.calls.push(SceneCall::CreateMesh {
            handle,
            geometry,
            texture,
        });
        handle
    }

    fn set_mesh_geometry(&self, mesh: MeshHandle, geometry: GeometryHandle) {
        let mut scene = self.scene.lock();
        if let Some(m) = scene.meshes.get_mut(&mesh) {
            m.geometry = geometry;
        }
        scene.calls.push(SceneCall::SetMeshGeometry { mesh, geometry });
    }

    fn update_mesh(&self, mesh: MeshHandle, state: &MeshState) {
        let mut scene = self.scene.lock();
        if let Some(m) = scene.meshes.get_mut(&mesh) {
            m.state = Some(*state);
        }
        scene.calls.push(SceneCall::UpdateMesh {
            mesh,
            state: *state,
        });
    }

    fn dispose_geometry(&self, geometry: GeometryHandle) {
        let mut scene = self.scene.lock();
        if scene.geometries.remove(&geometry).is_none() {
            scene.invalid_disposals += 1;
        }
        scene.calls.push(SceneCall::DisposeGeometry(geometry));
    }

    fn dispose_texture(&self, texture: TextureHandle) {
        let mut scene = self.scene.lock();
        if !scene.textures.remove(&texture) {
            scene.invalid_disposals += 1;
        }
        scene.calls.push(SceneCall::DisposeTexture(texture));
    }

    fn dispose_mesh(&self, mesh: MeshHandle) {
        let mut scene = self.scene.lock();
        if scene.meshes.remove(&mesh).is_none() {
            scene.invalid_disposals += 1;
        }
        scene.calls.push(SceneCall::DisposeMesh(mesh));
    }

    fn is_context_lost(&self) -> bool {
        self.scene.lock().context_lost
    }
}
