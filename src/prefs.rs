use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

/// User preferences persisted across sessions. Everything else about a
/// session is in-memory only.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Preferences {
    #[serde(default)]
    pub dark_mode: bool,
}

impl Preferences {
    /// Load from `prefs.toml` in `dir`. Missing or unreadable files fall
    /// back to defaults.
    pub fn load(dir: &Path) -> Self {
        match std::fs::read_to_string(prefs_path(dir)) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Flip dark mode and persist the new value. Returns the new flag.
    pub fn toggle_dark_mode(&mut self, dir: &Path) -> bool {
        self.dark_mode = !self.dark_mode;
        self.save(dir);
        self.dark_mode
    }

    pub fn save(&self, dir: &Path) {
        let path = prefs_path(dir);
        match toml::to_string(self) {
            Ok(contents) => {
                if let Err(e) = std::fs::write(&path, contents) {
                    warn!("failed to save preferences to {}: {e}", path.display());
                }
            }
            Err(e) => warn!("failed to serialize preferences: {e}"),
        }
    }
}

fn prefs_path(dir: &Path) -> PathBuf {
    dir.join("prefs.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("aura-prefs-{tag}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_toggle_twice_restores_original() {
        let dir = temp_dir("toggle");
        let mut prefs = Preferences::default();
        assert!(!prefs.dark_mode);

        assert!(prefs.toggle_dark_mode(&dir));
        assert!(!prefs.toggle_dark_mode(&dir));
        assert_eq!(prefs, Preferences::default());
    }

    #[test]
    fn test_persists_across_reload() {
        let dir = temp_dir("reload");
        let _ = std::fs::remove_file(dir.join("prefs.toml"));
        let mut prefs = Preferences::load(&dir);
        prefs.toggle_dark_mode(&dir);

        let reloaded = Preferences::load(&dir);
        assert!(reloaded.dark_mode);
    }

    #[test]
    fn test_missing_file_defaults() {
        let dir = temp_dir("missing");
        let prefs = Preferences::load(&dir.join("nope"));
        assert!(!prefs.dark_mode);
    }
}
