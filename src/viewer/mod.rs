//! Mesh viewer frontend built on eframe.

mod app;
mod settings;
mod stage;

pub use settings::Settings;
pub use stage::Stage;

use std::path::PathBuf;

use anyhow::Result;

use crate::config::{self, AppConfig};
use crate::window::WindowGeometry;

/// Run the viewer with an optional initial mesh file.
///
/// Window creation is the one fatal condition: everything after that is
/// recoverable and stays inside the event loop.
pub fn run(initial_file: Option<PathBuf>) -> Result<()> {
    env_logger::init();

    log::info!("{}", config::DESCRIPTION);
    log::info!("{}", config::LICENSE);

    let app_config = AppConfig::default();

    // A persisted geometry wins; otherwise open at the preferred size and
    // fit to the desktop once the monitor size is known (first frame).
    let (geometry, needs_desktop_fit) = match WindowGeometry::load() {
        Some(saved) => {
            log::info!("restored window geometry: {}x{}", saved.width, saved.height);
            (saved, false)
        }
        None => (WindowGeometry::preferred(&app_config), true),
    };

    let title = app_config.title.clone();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([geometry.width as f32, geometry.height as f32])
            .with_title(title.clone())
            .with_fullscreen(geometry.fullscreen),
        renderer: eframe::Renderer::Wgpu,
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::ViewerApp::new(
                cc,
                app_config,
                geometry,
                needs_desktop_fit,
                initial_file,
            )))
        }),
    )
    .map_err(|e| anyhow::anyhow!("failed to create viewer window: {}", e))
}
