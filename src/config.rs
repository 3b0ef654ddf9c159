//! Application configuration.
//!
//! One [`AppConfig`] is constructed at startup and passed by reference into
//! the layout, slot, and window code. There is no ambient global state.

use crate::layout::GridSpec;

/// Short description printed to the console at startup and shown in the
/// About dialog.
pub const DESCRIPTION: &str = "Mdview is a split-screen viewer for common 3D mesh formats.\n\
It renders each loaded mesh in its own viewport cell with a dedicated camera.";

/// License line accompanying the description.
pub const LICENSE: &str = "Distributed under the MIT license.";

/// Directory name under the platform config dir used for persisted state.
pub const APP_DIR: &str = "mdview";

/// Immutable application configuration, fixed at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Window title.
    pub title: String,
    /// Preferred window width when the desktop is large enough.
    pub preferred_width: u32,
    /// Preferred window height when the desktop is large enough.
    pub preferred_height: u32,
    /// Split-screen partition of the window.
    pub grid: GridSpec,
    /// Half the edge length of the cubic region holding one cell's camera
    /// anchor in world space.
    pub box_slide: f32,
    /// Camera distance from a mesh, as a multiple of its bounding radius.
    pub camera_distance_factor: f32,
}

impl AppConfig {
    /// Preferred height/width ratio.
    pub fn preferred_ratio(&self) -> f32 {
        self.preferred_height as f32 / self.preferred_width as f32
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Mdview 3D Viewer".to_string(),
            preferred_width: 1280,
            preferred_height: 720,
            grid: GridSpec::new(2, 2),
            box_slide: 100.0,
            camera_distance_factor: 3.2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.preferred_width, 1280);
        assert_eq!(config.preferred_height, 720);
        assert_eq!(config.grid.cell_count(), 4);
        assert!((config.preferred_ratio() - 0.5625).abs() < 1e-6);
    }
}
