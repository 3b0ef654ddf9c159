//! Window geometry: desktop fitting and persistence.
//!
//! The initial window size is computed from the desktop resolution so the
//! window keeps the preferred aspect ratio without exceeding the desktop.
//! The last-used geometry persists across runs as a plain-text record of
//! three whitespace-separated fields: `width height fullscreen(0|1)`.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::config::{AppConfig, APP_DIR};
use crate::error::{Error, Result};

// Persisted sizes outside these exclusive bounds are treated as corrupt.
const MIN_WIDTH: u32 = 320;
const MIN_HEIGHT: u32 = 180;
const MAX_DIMENSION: u32 = 10000;

/// Compute an initial window size from the desktop resolution.
///
/// The preferred aspect ratio is kept in every case. First matching rule
/// wins:
///
/// 1. desktop larger than twice the preferred size in both dimensions:
///    half the desktop width;
/// 2. desktop larger than the preferred size in both dimensions: the
///    preferred size unchanged;
/// 3. desktop taller (by ratio) than preferred: full desktop width;
/// 4. otherwise: full desktop height.
pub fn fit(
    desktop_width: u32,
    desktop_height: u32,
    preferred_width: u32,
    preferred_height: u32,
) -> (u32, u32) {
    let ratio = preferred_height as f32 / preferred_width as f32;

    if desktop_width > preferred_width * 2 && desktop_height > preferred_height * 2 {
        let width = desktop_width / 2;
        return (width, (width as f32 * ratio) as u32);
    }

    if desktop_width > preferred_width && desktop_height > preferred_height {
        return (preferred_width, preferred_height);
    }

    let desktop_ratio = desktop_height as f32 / desktop_width as f32;
    if desktop_ratio > ratio {
        return (desktop_width, (desktop_width as f32 * ratio) as u32);
    }

    ((desktop_height as f32 / ratio) as u32, desktop_height)
}

/// Window size and fullscreen state, tracked while the application runs and
/// persisted at shutdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowGeometry {
    pub width: u32,
    pub height: u32,
    pub fullscreen: bool,
}

impl WindowGeometry {
    /// Geometry using the configured preferred size, windowed.
    pub fn preferred(config: &AppConfig) -> Self {
        Self {
            width: config.preferred_width,
            height: config.preferred_height,
            fullscreen: false,
        }
    }

    /// Geometry fitted to the desktop resolution, or the preferred size
    /// unchanged when the desktop resolution is unknown.
    pub fn fitted(desktop: Option<(u32, u32)>, config: &AppConfig) -> Self {
        match desktop {
            Some((dw, dh)) => {
                let (width, height) =
                    fit(dw, dh, config.preferred_width, config.preferred_height);
                Self {
                    width,
                    height,
                    fullscreen: false,
                }
            }
            None => Self::preferred(config),
        }
    }

    /// Whether a persisted size is usable.
    pub fn is_sane(width: u32, height: u32) -> bool {
        width > MIN_WIDTH && width < MAX_DIMENSION && height > MIN_HEIGHT && height < MAX_DIMENSION
    }

    /// Parse the persisted record. Out-of-range sizes and malformed input
    /// are rejected.
    pub fn parse(text: &str) -> Result<Self> {
        let mut fields = text.split_whitespace();
        let width: u32 = fields
            .next()
            .and_then(|f| f.parse().ok())
            .ok_or_else(|| Error::PersistCorrupt("missing or invalid width".into()))?;
        let height: u32 = fields
            .next()
            .and_then(|f| f.parse().ok())
            .ok_or_else(|| Error::PersistCorrupt("missing or invalid height".into()))?;
        let fullscreen: u32 = fields
            .next()
            .and_then(|f| f.parse().ok())
            .ok_or_else(|| Error::PersistCorrupt("missing or invalid fullscreen flag".into()))?;

        if !Self::is_sane(width, height) {
            return Err(Error::PersistCorrupt(format!(
                "size {width}x{height} out of range"
            )));
        }

        Ok(Self {
            width,
            height,
            fullscreen: fullscreen != 0,
        })
    }

    fn record(&self) -> String {
        format!(
            "{} {} {}\n",
            self.width,
            self.height,
            if self.fullscreen { 1 } else { 0 }
        )
    }

    /// Read geometry from an explicit file path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Write geometry to an explicit file path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        fs::write(path, self.record())?;
        Ok(())
    }

    /// Path of the persisted window-state file.
    fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut p| {
            p.push(APP_DIR);
            fs::create_dir_all(&p).ok();
            p.push("window.txt");
            p
        })
    }

    /// Load the persisted geometry, if present and usable.
    pub fn load() -> Option<Self> {
        let path = Self::path()?;
        match Self::load_from(&path) {
            Ok(geometry) => Some(geometry),
            Err(err) => {
                debug!("ignoring persisted window geometry: {err}");
                None
            }
        }
    }

    /// Persist the geometry. Failures are ignored; the next run falls back
    /// to a computed default.
    pub fn save(&self) {
        if let Some(path) = Self::path() {
            let _ = self.save_to(&path);
        }
    }
}
