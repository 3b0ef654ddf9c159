//! Viewing session: configuration, layout, and slot state wired together.
//!
//! The GUI layer owns the window and the event loop; a [`Session`] owns
//! everything in between. Each frame the render loop reads
//! [`Session::draw_list`] to decide which viewport rectangle and camera to
//! activate before asking the engine to draw that cell.

use crate::config::AppConfig;
use crate::events::{dispatch, Reaction, UiEvent};
use crate::layout::{self, PixelRect, ViewportCell};
use crate::scene::{CameraId, SceneBackend};
use crate::slots::SlotManager;

/// One per-frame render pass: draw `cell` into `rect` through `camera`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawPass {
    pub cell: usize,
    pub rect: PixelRect,
    pub camera: CameraId,
}

/// Application state between startup and shutdown.
#[derive(Debug)]
pub struct Session {
    config: AppConfig,
    cells: Vec<ViewportCell>,
    slots: SlotManager,
}

impl Session {
    /// Build the cell layout for the initial window size and pre-allocate
    /// one camera per cell.
    pub fn new(
        config: AppConfig,
        scene: &mut dyn SceneBackend,
        window_width: u32,
        window_height: u32,
    ) -> Self {
        let cells = layout::cells(window_width, window_height, config.grid, config.box_slide);
        let slots = SlotManager::new(scene, &cells, config.box_slide, config.camera_distance_factor);
        Self {
            config,
            cells,
            slots,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn cells(&self) -> &[ViewportCell] {
        &self.cells
    }

    pub fn slots(&self) -> &SlotManager {
        &self.slots
    }

    /// Recompute pixel rectangles for a new window size. World centers
    /// depend only on the grid and `box_slide`, so cameras stay put.
    pub fn resize(&mut self, window_width: u32, window_height: u32) {
        self.cells = layout::cells(
            window_width,
            window_height,
            self.config.grid,
            self.config.box_slide,
        );
    }

    /// Route one UI event; see [`dispatch`].
    pub fn handle(&mut self, scene: &mut dyn SceneBackend, event: UiEvent) -> Option<Reaction> {
        dispatch(event, &mut self.slots, scene)
    }

    /// Render passes for the occupied slots, in cell order.
    pub fn draw_list(&self) -> Vec<DrawPass> {
        self.cells
            .iter()
            .filter(|cell| {
                self.slots
                    .slot(cell.index)
                    .is_some_and(|slot| slot.is_occupied())
            })
            .map(|cell| DrawPass {
                cell: cell.index,
                rect: cell.rect,
                // Occupied slots always have a camera; fall back to a dead
                // handle rather than panicking on a race that cannot happen
                // in the single-threaded loop.
                camera: self
                    .slots
                    .camera_for(cell.index)
                    .unwrap_or(CameraId::new(u32::MAX)),
            })
            .collect()
    }
}
