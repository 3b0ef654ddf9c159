//! Persistent UI preferences.
//!
//! Window geometry has its own plain-text record (see [`crate::window`]);
//! everything else UI-related lives here as JSON.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::APP_DIR;

const MAX_RECENT_FILES: usize = 10;

/// UI preferences that persist between sessions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory the file dialog opens in.
    pub last_dir: Option<PathBuf>,

    /// Recently loaded meshes (most recent first, max 10).
    pub recent_files: Vec<PathBuf>,
}

impl Settings {
    /// Get settings file path
    fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut p| {
            p.push(APP_DIR);
            std::fs::create_dir_all(&p).ok();
            p.push("settings.json");
            p
        })
    }

    /// Load settings from file
    pub fn load() -> Self {
        Self::path()
            .and_then(|p| std::fs::read_to_string(&p).ok())
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default()
    }

    /// Save settings to file
    pub fn save(&self) {
        if let Some(path) = Self::path() {
            if let Ok(json) = serde_json::to_string_pretty(self) {
                let _ = std::fs::write(path, json);
            }
        }
    }

    /// Add file to recent files list (moves to top if already present)
    pub fn add_recent(&mut self, path: PathBuf) {
        self.recent_files.retain(|p| p != &path);
        self.recent_files.insert(0, path);
        self.recent_files.truncate(MAX_RECENT_FILES);
    }

    /// Get recent files (filters out non-existent)
    pub fn recent_files(&self) -> Vec<&PathBuf> {
        self.recent_files.iter().filter(|p| p.exists()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_recent_dedupes_and_truncates() {
        let mut settings = Settings::default();
        for i in 0..12 {
            settings.add_recent(PathBuf::from(format!("mesh{i}.obj")));
        }
        assert_eq!(settings.recent_files.len(), MAX_RECENT_FILES);
        assert_eq!(settings.recent_files[0], PathBuf::from("mesh11.obj"));

        settings.add_recent(PathBuf::from("mesh5.obj"));
        assert_eq!(settings.recent_files[0], PathBuf::from("mesh5.obj"));
        assert_eq!(
            settings
                .recent_files
                .iter()
                .filter(|p| **p == PathBuf::from("mesh5.obj"))
                .count(),
            1
        );
    }
}
