//! Scene backend used by the egui frontend.
//!
//! The frontend has no real 3D engine behind it, so the stage tracks what
//! the engine would own: cameras, loaded mesh nodes, their positions and
//! material flags. Load failures (missing file, unrecognized format) are
//! detected here so the slot lifecycle behaves exactly as it would against
//! a real engine.

use std::path::{Path, PathBuf};

use glam::Vec3;

use crate::error::{Error, Result};
use crate::scene::{BBox3, CameraId, MeshNodeId, SceneBackend};

/// Mesh file extensions the viewer accepts.
pub const SUPPORTED_EXTENSIONS: &[&str] = &[
    "obj", "stl", "ply", "3ds", "b3d", "md2", "md3", "x", "dae", "lwo",
];

/// Camera tracked by the stage.
#[derive(Debug, Clone, Copy)]
pub struct StageCamera {
    pub position: Vec3,
    pub target: Vec3,
}

/// Loaded mesh node tracked by the stage.
#[derive(Debug, Clone)]
pub struct StageNode {
    pub path: PathBuf,
    pub position: Vec3,
    pub bounds: BBox3,
    pub lit: bool,
}

impl StageNode {
    /// File name shown in the node's viewport cell.
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// In-process stand-in for the external engine's scene manager.
#[derive(Debug, Default)]
pub struct Stage {
    cameras: Vec<StageCamera>,
    nodes: Vec<Option<StageNode>>,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn camera(&self, id: CameraId) -> Option<&StageCamera> {
        self.cameras.get(id.raw() as usize)
    }

    pub fn node(&self, id: MeshNodeId) -> Option<&StageNode> {
        self.nodes.get(id.raw() as usize).and_then(|n| n.as_ref())
    }
}

impl SceneBackend for Stage {
    fn add_camera(&mut self, position: Vec3, target: Vec3) -> CameraId {
        let id = CameraId::new(self.cameras.len() as u32);
        self.cameras.push(StageCamera { position, target });
        id
    }

    fn set_camera_position(&mut self, camera: CameraId, position: Vec3) {
        if let Some(cam) = self.cameras.get_mut(camera.raw() as usize) {
            cam.position = position;
        }
    }

    fn load_mesh(&mut self, path: &Path, position: Vec3) -> Result<MeshNodeId> {
        if !path.exists() {
            return Err(Error::mesh_load(path, "file not found"));
        }
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if SUPPORTED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()) => {}
            Some(ext) => {
                return Err(Error::mesh_load(
                    path,
                    format!("unsupported mesh format .{ext}"),
                ))
            }
            None => return Err(Error::mesh_load(path, "missing file extension")),
        }

        let id = MeshNodeId::new(self.nodes.len() as u32);
        self.nodes.push(Some(StageNode {
            path: path.to_path_buf(),
            position,
            bounds: BBox3::UNIT,
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_rejects_missing_file() {
        let mut stage = Stage::new();
        let err = stage
            .load_mesh(Path::new("/nonexistent/mesh.obj"), Vec3::ZERO)
            .unwrap_err();
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_load_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "not a mesh").unwrap();

        let mut stage = Stage::new();
        let err = stage.load_mesh(&path, Vec3::ZERO).unwrap_err();
        assert!(err.to_string().contains("unsupported mesh format"));
    }

    #[test]
    fn test_load_accepts_supported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cube.OBJ");
        fs::write(&path, "v 0 0 0").unwrap();

        let mut stage = Stage::new();
        let node = stage.load_mesh(&path, Vec3::new(1.0, 0.0, 0.0)).unwrap();
        let tracked = stage.node(node).unwrap();
        assert_eq!(tracked.display_name(), "cube.OBJ");
        assert_eq!(tracked.position, Vec3::new(1.0, 0.0, 0.0));
    }
}
