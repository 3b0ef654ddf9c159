//! Viewport grid layout.
//!
//! The window is partitioned into columns×rows cells in row-major order.
//! Each cell gets a pixel rectangle inside the window and a world-space
//! center where its camera anchor and mesh are placed.

use glam::Vec3;

/// The columns×rows partition of the window for split-screen mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSpec {
    columns: u32,
    rows: u32,
}

impl GridSpec {
    /// Create a grid spec. Zero counts are clamped to one.
    pub fn new(columns: u32, rows: u32) -> Self {
        Self {
            columns: columns.max(1),
            rows: rows.max(1),
        }
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Total number of viewport cells.
    pub fn cell_count(&self) -> usize {
        (self.columns * self.rows) as usize
    }
}

/// Pixel rectangle inside the window, origin at the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// One rectangular sub-region of the window, rendered with one camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportCell {
    /// Row-major cell index in `[0, columns*rows)`.
    pub index: usize,
    /// Pixel rectangle, recomputed on every resize.
    pub rect: PixelRect,
    /// World-space center for this cell's camera anchor and mesh.
    pub world_center: Vec3,
}

/// Compute the viewport cells for a window size, in row-major order.
///
/// Cell sizes use integer division; a remainder strip on the right/bottom
/// edge stays uncovered rather than stretching the last row or column.
///
/// World centers sit on a regular grid centered at the origin with pitch
/// `2 * box_slide`, starting from the upper-left cell. Screen-space rows
/// grow downward, which maps to decreasing world Y.
pub fn cells(
    window_width: u32,
    window_height: u32,
    grid: GridSpec,
    box_slide: f32,
) -> Vec<ViewportCell> {
    let cell_width = window_width / grid.columns;
    let cell_height = window_height / grid.rows;

    let total_x = box_slide * 2.0 * grid.columns as f32;
    let total_y = box_slide * 2.0 * grid.rows as f32;
    let start = Vec3::new(-total_x / 2.0 + box_slide, total_y / 2.0 - box_slide, 0.0);

    let mut out = Vec::with_capacity(grid.cell_count());
    for row in 0..grid.rows {
        for col in 0..grid.columns {
            let index = (row * grid.columns + col) as usize;
            out.push(ViewportCell {
                index,
                rect: PixelRect {
                    x: cell_width * col,
                    y: cell_height * row,
                    width: cell_width,
                    height: cell_height,
                },
                world_center: Vec3::new(
                    start.x + box_slide * 2.0 * col as f32,
                    start.y - box_slide * 2.0 * row as f32,
                    0.0,
                ),
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_spec_clamps_zero() {
        let grid = GridSpec::new(0, 0);
        assert_eq!(grid.columns(), 1);
        assert_eq!(grid.rows(), 1);
        assert_eq!(grid.cell_count(), 1);
    }

    #[test]
    fn test_cells_row_major_rects() {
        let cells = cells(1280, 720, GridSpec::new(2, 2), 100.0);
        assert_eq!(cells.len(), 4);

        assert_eq!(
            cells[0].rect,
            PixelRect { x: 0, y: 0, width: 640, height: 360 }
        );
        assert_eq!(
            cells[1].rect,
            PixelRect { x: 640, y: 0, width: 640, height: 360 }
        );
        assert_eq!(
            cells[2].rect,
            PixelRect { x: 0, y: 360, width: 640, height: 360 }
        );
        assert_eq!(
            cells[3].rect,
            PixelRect { x: 640, y: 360, width: 640, height: 360 }
        );

        for (i, cell) in cells.iter().enumerate() {
            assert_eq!(cell.index, i);
        }
    }

    #[test]
    fn test_cells_leave_remainder_uncovered() {
        let grid = GridSpec::new(3, 2);
        let cells = cells(1001, 601, grid, 100.0);

        // All cells share the floored size
        for cell in &cells {
            assert_eq!(cell.rect.width, 333);
            assert_eq!(cell.rect.height, 300);
        }

        // Union of cell areas never exceeds the window area
        let covered: u64 = cells
            .iter()
            .map(|c| c.rect.width as u64 * c.rect.height as u64)
            .sum();
        assert!(covered <= 1001 * 601);

        // First cell starts at the origin
        assert_eq!(cells[0].rect.x, 0);
        assert_eq!(cells[0].rect.y, 0);
    }

    #[test]
    fn test_world_centers_2x2() {
        let cells = cells(1280, 720, GridSpec::new(2, 2), 100.0);

        assert_eq!(cells[0].world_center, Vec3::new(-100.0, 100.0, 0.0));
        assert_eq!(cells[1].world_center, Vec3::new(100.0, 100.0, 0.0));
        assert_eq!(cells[2].world_center, Vec3::new(-100.0, -100.0, 0.0));
        assert_eq!(cells[3].world_center, Vec3::new(100.0, -100.0, 0.0));
    }

    #[test]
    fn test_world_centers_single_cell_at_origin() {
        let cells = cells(800, 600, GridSpec::new(1, 1), 50.0);
        assert_eq!(cells[0].world_center, Vec3::ZERO);
    }
}
