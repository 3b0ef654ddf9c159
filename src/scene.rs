//! Engine boundary: opaque scene-resource handles and the backend trait.
//!
//! The external 3D engine owns the lifetime of cameras and mesh nodes. The
//! core only threads opaque handle values through calls and sequences
//! creation and destruction; it never dereferences engine resources.

use std::path::{Path, PathBuf};

use glam::Vec3;

use crate::error::{Error, Result};

/// Opaque handle to an engine-owned camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CameraId(u32);

impl CameraId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Opaque handle to an engine-owned mesh scene node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshNodeId(u32);

impl MeshNodeId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Axis-aligned bounding box in a node's local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox3 {
    pub min: Vec3,
    pub max: Vec3,
}

impl BBox3 {
    /// Unit cube from -1 to 1.
    pub const UNIT: Self = Self {
        min: Vec3::splat(-1.0),
        max: Vec3::splat(1.0),
    };

    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Axis-aligned cube with the given half edge length, centered at the
    /// origin.
    pub fn cube(half_edge: f32) -> Self {
        Self {
            min: Vec3::splat(-half_edge),
            max: Vec3::splat(half_edge),
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Half the diagonal length, used to frame a mesh in its viewport.
    pub fn radius(&self) -> f32 {
        self.size().length() / 2.0
    }
}

/// Scene operations the core consumes from the external engine.
pub trait SceneBackend {
    /// Create a camera looking at `target` from `position`.
    fn add_camera(&mut self, position: Vec3, target: Vec3) -> CameraId;

    /// Move an existing camera. Unknown handles are ignored.
    fn set_camera_position(&mut self, camera: CameraId, position: Vec3);

    /// Load a mesh from a filesystem path and instantiate a scene node at
    /// `position`. Fails with [`Error::MeshLoad`] when the engine cannot
    /// produce a node (missing file, unsupported format, corrupt data).
    fn load_mesh(&mut self, path: &Path, position: Vec3) -> Result<MeshNodeId>;

    /// Local-space bounding box of a mesh node.
    fn mesh_bounds(&self, node: MeshNodeId) -> BBox3;

    /// Toggle the lighting material flag on a node.
    fn set_lighting(&mut self, node: MeshNodeId, lit: bool);

    /// Detach and destroy a mesh node.
    fn remove_mesh(&mut self, node: MeshNodeId);
}

/// Camera state tracked by [`HeadlessScene`].
#[derive(Debug, Clone, Copy)]
pub struct HeadlessCamera {
    pub position: Vec3,
    pub target: Vec3,
}

/// Mesh-node state tracked by [`HeadlessScene`].
#[derive(Debug, Clone)]
pub struct HeadlessNode {
    pub path: PathBuf,
    pub position: Vec3,
    pub bounds: BBox3,
    pub lit: bool,
}

/// In-memory scene backend.
///
/// Stands in for the real engine in tests: loads always succeed unless
/// `fail_loads` is set, and freshly loaded nodes report `next_bounds`.
#[derive(Debug, Default)]
pub struct HeadlessScene {
    cameras: Vec<HeadlessCamera>,
    nodes: Vec<Option<HeadlessNode>>,
    /// Bounding box reported by subsequently loaded nodes.
    pub next_bounds: Option<BBox3>,
    /// When set, every load fails with this reason.
    pub fail_loads: Option<String>,
}

impl HeadlessScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn camera(&self, id: CameraId) -> Option<&HeadlessCamera> {
        self.cameras.get(id.raw() as usize)
    }

    pub fn camera_count(&self) -> usize {
        self.cameras.len()
    }

    pub fn node(&self, id: MeshNodeId) -> Option<&HeadlessNode> {
        self.nodes.get(id.raw() as usize).and_then(|n| n.as_ref())
    }

    /// Number of mesh nodes not yet removed.
    pub fn live_node_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }
}

impl SceneBackend for HeadlessScene {
    fn add_camera(&mut self, position: Vec3, target: Vec3) -> CameraId {
        let id = CameraId::new(self.cameras.len() as u32);
        self.cameras.push(HeadlessCamera { position, target });
        id
    }

    fn set_camera_position(&mut self, camera: CameraId, position: Vec3) {
        if let Some(cam) = self.cameras.get_mut(camera.raw() as usize) {
            cam.position = position;
        }
    }

    fn load_mesh(&mut self, path: &Path, position: Vec3) -> Result<MeshNodeId> {
        if let Some(reason) = &self.fail_loads {
            return Err(Error::mesh_load(path, reason.clone()));
        }
        let id = MeshNodeId::new(self.nodes.len() as u32);
        self.nodes.push(Some(HeadlessNode {
            path: path.to_path_buf(),
            position,
            bounds: self.next_bounds.unwrap_or(BBox3::UNIT),
            lit: true,
        }));
        Ok(id)
    }

    fn mesh_bounds(&self, node: MeshNodeId) -> BBox3 {
        self.node(node).map(|n| n.bounds).unwrap_or(BBox3::UNIT)
    }

    fn set_lighting(&mut self, node: MeshNodeId, lit: bool) {
        if let Some(Some(n)) = self.nodes.get_mut(node.raw() as usize) {
            n.lit = lit;
        }
    }

    fn remove_mesh(&mut self, node: MeshNodeId) {
        if let Some(slot) = self.nodes.get_mut(node.raw() as usize) {
            *slot = None;
        }
    }
}
