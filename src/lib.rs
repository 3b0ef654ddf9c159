//! # Mdview
//!
//! Split-screen 3D mesh viewer: a thin application layer over an external
//! real-time 3D engine. The engine owns rendering, mesh parsing, widgets,
//! and the window system; this crate owns the logic in between.
//!
//! ## Modules
//!
//! - [`config`] - Application configuration constructed once at startup
//! - [`window`] - Desktop fitting and window-geometry persistence
//! - [`layout`] - Viewport grid partition and world-space camera anchors
//! - [`scene`] - Engine boundary (opaque handles, backend trait)
//! - [`slots`] - Per-cell camera + mesh pairing with stack-order closing
//! - [`events`] - UI event classification and dispatch
//! - [`session`] - Everything wired together, plus the per-frame draw list
//! - [`viewer`] - eframe/egui frontend (feature `viewer`)
//!
//! ## Example
//!
//! ```
//! use mdview::config::AppConfig;
//! use mdview::scene::HeadlessScene;
//! use mdview::session::Session;
//!
//! let mut scene = HeadlessScene::new();
//! let session = Session::new(AppConfig::default(), &mut scene, 1280, 720);
//! assert!(session.draw_list().is_empty());
//! ```

pub mod config;
pub mod error;
pub mod events;
pub mod layout;
pub mod scene;
pub mod session;
pub mod slots;
pub mod window;

// GUI frontend (optional, enabled with the "viewer" feature)
#[cfg(feature = "viewer")]
pub mod viewer;

pub use error::{Error, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::AppConfig;
    pub use crate::error::{Error, Result};
    pub use crate::events::{DialogId, MenuCommand, Reaction, UiEvent};
    pub use crate::layout::{GridSpec, PixelRect, ViewportCell};
    pub use crate::scene::{BBox3, CameraId, MeshNodeId, SceneBackend};
    pub use crate::session::{DrawPass, Session};
    pub use crate::slots::SlotManager;
    pub use crate::window::WindowGeometry;
}
