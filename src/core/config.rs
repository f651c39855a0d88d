//! Application configuration management

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory the file dialogs start in
    pub last_directory: Option<PathBuf>,
    /// Editor settings
    pub editor: EditorConfig,
    /// Window settings
    pub window: WindowConfig,
}

/// Editor-specific settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Font size in pixels at last exit
    pub font_size: f32,
    /// Size restored by "Reset Font Size to Default"
    pub default_font_size: f32,
    pub min_font_size: f32,
    pub max_font_size: f32,
    /// Increment used by increase/decrease
    pub font_step: f32,
    /// Word wrap
    pub word_wrap: bool,
    /// Use the monospace font family instead of the proportional one
    pub monospace: bool,
}

/// Window settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            font_size: 14.0,
            default_font_size: 14.0,
            min_font_size: 10.0,
            max_font_size: 24.0,
            font_step: 2.0,
            word_wrap: false,
            monospace: false,
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 450.0,
        }
    }
}

impl AppConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "text-editor", "Text Editor")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Result<Self> {
        let path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Self::load_from(&path)
    }

    /// Load configuration from a specific file. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config: {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure config directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;

        tracing::info!("Saved config to: {}", path.display());
        Ok(())
    }

    /// Remember the directory containing `file` for the next dialog
    pub fn remember_directory(&mut self, file: &Path) {
        if let Some(parent) = file.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.last_directory = Some(parent.to_path_buf());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config.editor.font_size, 14.0);
        assert!(config.last_directory.is_none());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "editor": { "word_wrap": true } }"#).unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert!(config.editor.word_wrap);
        assert_eq!(config.editor.max_font_size, 24.0);
        assert_eq!(config.window.width, 800.0);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(AppConfig::load_from(&path).is_err());
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut config = AppConfig::default();
        config.editor.font_size = 18.0;
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.editor.font_size, 18.0);
    }

    #[test]
    fn test_remember_directory() {
        let mut config = AppConfig::default();
        config.remember_directory(Path::new("bare.txt"));
        assert!(config.last_directory.is_none());

        config.remember_directory(Path::new("/home/user/notes/todo.txt"));
        assert_eq!(
            config.last_directory.as_deref(),
            Some(Path::new("/home/user/notes"))
        );
    }
}
