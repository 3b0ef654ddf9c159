//! Mesh-slot lifecycle.
//!
//! One slot per viewport cell. Cameras are pre-allocated for every cell at
//! startup and survive for the whole session; meshes attach and detach over
//! time. Filling picks the lowest-index empty slot, closing removes the
//! most-recently-filled mesh (stack order), matching the "undo last action"
//! semantics of the Close Last Mesh command.

use std::path::Path;

use glam::Vec3;
use log::{debug, info};

use crate::error::{Error, Result};
use crate::layout::ViewportCell;
use crate::scene::{CameraId, MeshNodeId, SceneBackend};

/// One viewport cell's camera + optional mesh pairing.
#[derive(Debug, Clone, Copy)]
pub struct Slot {
    world_center: Vec3,
    camera: CameraId,
    mesh: Option<MeshNodeId>,
}

impl Slot {
    pub fn camera(&self) -> CameraId {
        self.camera
    }

    pub fn mesh(&self) -> Option<MeshNodeId> {
        self.mesh
    }

    pub fn is_occupied(&self) -> bool {
        self.mesh.is_some()
    }

    pub fn world_center(&self) -> Vec3 {
        self.world_center
    }
}

/// Owns the ordered collection of slots and sequences engine calls for
/// mesh add/close operations.
#[derive(Debug)]
pub struct SlotManager {
    slots: Vec<Slot>,
    // Cell indices in fill order; the tail is the most recent.
    fill_order: Vec<usize>,
    camera_distance_factor: f32,
}

impl SlotManager {
    /// Create one slot per cell, pre-allocating a camera for each.
    ///
    /// The initial camera position is a placeholder offset from the cell
    /// center; it is replaced on the first mesh load.
    pub fn new(
        scene: &mut dyn SceneBackend,
        cells: &[ViewportCell],
        box_slide: f32,
        camera_distance_factor: f32,
    ) -> Self {
        let slots = cells
            .iter()
            .map(|cell| {
                let camera = scene.add_camera(
                    cell.world_center + Vec3::new(5.0, 5.0, box_slide),
                    cell.world_center,
                );
                Slot {
                    world_center: cell.world_center,
                    camera,
                    mesh: None,
                }
            })
            .collect();
        Self {
            slots,
            fill_order: Vec::new(),
            camera_distance_factor,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn occupied_count(&self) -> usize {
        self.fill_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fill_order.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.fill_order.len() == self.slots.len()
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn slot(&self, cell: usize) -> Option<&Slot> {
        self.slots.get(cell)
    }

    /// Camera for a cell, used every frame to select the active camera
    /// before drawing that cell's viewport.
    pub fn camera_for(&self, cell: usize) -> Option<CameraId> {
        self.slots.get(cell).map(|s| s.camera)
    }

    /// Load a mesh into the lowest-index empty slot.
    ///
    /// The mesh node is placed at the slot's world center with lighting
    /// disabled, and the slot's camera is pulled back along the view axis
    /// far enough to frame the mesh's bounding radius.
    pub fn add_mesh(&mut self, scene: &mut dyn SceneBackend, path: &Path) -> Result<usize> {
        let Some(cell) = self.slots.iter().position(|s| s.mesh.is_none()) else {
            return Err(Error::SlotsFull {
                capacity: self.slots.len(),
            });
        };

        let center = self.slots[cell].world_center;
        let node = scene.load_mesh(path, center)?;
        scene.set_lighting(node, false);

        let radius = scene.mesh_bounds(node).radius();
        let distance = radius * self.camera_distance_factor;
        scene.set_camera_position(self.slots[cell].camera, center - Vec3::new(0.0, 0.0, distance));

        self.slots[cell].mesh = Some(node);
        self.fill_order.push(cell);
        info!("loaded mesh {} into slot {cell}", path.display());
        Ok(cell)
    }

    /// Close the most-recently-filled slot, keeping its camera for reuse.
    pub fn close_last(&mut self, scene: &mut dyn SceneBackend) -> Result<usize> {
        let Some(cell) = self.fill_order.pop() else {
            return Err(Error::NoMeshLoaded);
        };
        if let Some(node) = self.slots[cell].mesh.take() {
            scene.remove_mesh(node);
        }
        debug!("closed mesh in slot {cell}");
        Ok(cell)
    }

    /// Close every occupied slot, most recent first.
    pub fn close_all(&mut self, scene: &mut dyn SceneBackend) {
        while self.close_last(scene).is_ok() {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{cells, GridSpec};
    use crate::scene::{BBox3, HeadlessScene};

    fn manager(scene: &mut HeadlessScene) -> SlotManager {
        let cells = cells(1280, 720, GridSpec::new(2, 2), 100.0);
        SlotManager::new(scene, &cells, 100.0, 3.2)
    }

    #[test]
    fn test_cameras_preallocated_per_cell() {
        let mut scene = HeadlessScene::new();
        let slots = manager(&mut scene);
        assert_eq!(slots.capacity(), 4);
        assert_eq!(scene.camera_count(), 4);
        for cell in 0..4 {
            let camera = slots.camera_for(cell).unwrap();
            let target = scene.camera(camera).unwrap().target;
            assert_eq!(target, slots.slot(cell).unwrap().world_center());
        }
    }

    #[test]
    fn test_add_fills_lowest_empty_slot() {
        let mut scene = HeadlessScene::new();
        let mut slots = manager(&mut scene);

        assert_eq!(slots.add_mesh(&mut scene, Path::new("a.obj")).unwrap(), 0);
        assert_eq!(slots.add_mesh(&mut scene, Path::new("b.obj")).unwrap(), 1);
        assert_eq!(slots.occupied_count(), 2);
    }

    #[test]
    fn test_capacity_error_on_fifth_add() {
        let mut scene = HeadlessScene::new();
        let mut slots = manager(&mut scene);

        for name in ["a.obj", "b.obj", "c.obj", "d.obj"] {
            slots.add_mesh(&mut scene, Path::new(name)).unwrap();
        }
        let err = slots.add_mesh(&mut scene, Path::new("e.obj")).unwrap_err();
        assert!(matches!(err, Error::SlotsFull { capacity: 4 }));
        // The four loaded meshes are unaffected
        assert_eq!(slots.occupied_count(), 4);
        assert_eq!(scene.live_node_count(), 4);
    }

    #[test]
    fn test_close_last_is_stack_ordered() {
        let mut scene = HeadlessScene::new();
        let mut slots = manager(&mut scene);

        slots.add_mesh(&mut scene, Path::new("a.obj")).unwrap();
        slots.add_mesh(&mut scene, Path::new("b.obj")).unwrap();
        slots.add_mesh(&mut scene, Path::new("c.obj")).unwrap();

        // C was added last, so it goes first
        assert_eq!(slots.close_last(&mut scene).unwrap(), 2);
        assert!(slots.slot(0).unwrap().is_occupied());
        assert!(slots.slot(1).unwrap().is_occupied());
        assert!(!slots.slot(2).unwrap().is_occupied());
        assert_eq!(scene.live_node_count(), 2);
    }

    #[test]
    fn test_close_last_on_empty_fails() {
        let mut scene = HeadlessScene::new();
        let mut slots = manager(&mut scene);
        assert!(matches!(
            slots.close_last(&mut scene),
            Err(Error::NoMeshLoaded)
        ));
    }

    #[test]
    fn test_close_retains_camera() {
        let mut scene = HeadlessScene::new();
        let mut slots = manager(&mut scene);

        slots.add_mesh(&mut scene, Path::new("a.obj")).unwrap();
        slots.close_last(&mut scene).unwrap();

        assert_eq!(scene.camera_count(), 4);
        assert!(slots.camera_for(0).is_some());

        // The freed slot accepts a new mesh
        assert_eq!(slots.add_mesh(&mut scene, Path::new("b.obj")).unwrap(), 0);
    }

    #[test]
    fn test_close_all_empties_everything() {
        let mut scene = HeadlessScene::new();
        let mut slots = manager(&mut scene);

        for name in ["a.obj", "b.obj", "c.obj"] {
            slots.add_mesh(&mut scene, Path::new(name)).unwrap();
        }
        slots.close_all(&mut scene);

        assert_eq!(slots.occupied_count(), 0);
        assert_eq!(scene.live_node_count(), 0);
    }

    #[test]
    fn test_camera_framed_to_mesh_radius() {
        let mut scene = HeadlessScene::new();
        scene.next_bounds = Some(BBox3::cube(5.0));
        let mut slots = manager(&mut scene);

        let cell = slots.add_mesh(&mut scene, Path::new("a.obj")).unwrap();
        let center = slots.slot(cell).unwrap().world_center();
        let camera = slots.camera_for(cell).unwrap();
        let position = scene.camera(camera).unwrap().position;

        let radius = BBox3::cube(5.0).radius();
        assert_eq!(position.x, center.x);
        assert_eq!(position.y, center.y);
        assert!((position.z - (center.z - radius * 3.2)).abs() < 1e-4);
    }

    #[test]
    fn test_lighting_disabled_on_load() {
        let mut scene = HeadlessScene::new();
        let mut slots = manager(&mut scene);

        let cell = slots.add_mesh(&mut scene, Path::new("a.obj")).unwrap();
        let node = slots.slot(cell).unwrap().mesh().unwrap();
        assert!(!scene.node(node).unwrap().lit);
    }

    #[test]
    fn test_failed_load_leaves_slot_empty() {
        let mut scene = HeadlessScene::new();
        scene.fail_loads = Some("corrupt data".into());
        let mut slots = manager(&mut scene);

        assert!(slots.add_mesh(&mut scene, Path::new("a.obj")).is_err());
        assert_eq!(slots.occupied_count(), 0);
        assert!(!slots.slot(0).unwrap().is_occupied());
    }
}
