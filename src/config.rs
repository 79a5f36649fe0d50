//! Command-line configuration persistence
//!
//! Stored in `~/.config/cmdline/config.yaml`. Every field is optional in the
//! file; missing ones take their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::editable::CoalescePolicy;

/// Layout, timing and appearance settings for the command line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandLineConfig {
    /// Shown dimmed while the line is empty
    pub placeholder: String,
    pub font_size: f32,
    /// Height of the input band at the bottom of the window
    pub bar_height: f32,
    /// Distance between a panel row's baselines
    pub row_height: f32,
    /// Horizontal text inset on both sides
    pub padding: f32,
    /// Extra distance scrolled past the caret when it leaves the view
    pub scroll_overshoot: f32,
    /// Blank space allowed after the end of the text when scrolled fully right
    pub trailing_space: f32,
    /// Rows in the suggestion and problem panels
    pub visible_rows: usize,
    pub undo_interval_ms: u64,
    pub undo_max_edits: usize,
    pub blink_period_ms: u64,
    /// Caret is drawn for this long at the start of each period
    pub blink_visible_ms: u64,
    /// Fraction of the edge overshoot scrolled per tick while drag-selecting
    pub drag_scroll_factor: f32,
    /// Theme id, builtin or from `~/.config/cmdline/themes/`
    pub theme: String,
}

impl Default for CommandLineConfig {
    fn default() -> Self {
        let policy = CoalescePolicy::default();
        Self {
            placeholder: "Type a command...".to_string(),
            font_size: 16.0,
            bar_height: 40.0,
            row_height: 25.0,
            padding: 20.0,
            scroll_overshoot: 100.0,
            trailing_space: 100.0,
            visible_rows: crate::annotate::VISIBLE_ROWS,
            undo_interval_ms: policy.interval_ms,
            undo_max_edits: policy.max_edits,
            blink_period_ms: 1000,
            blink_visible_ms: 500,
            drag_scroll_factor: 0.1,
            theme: "default-dark".to_string(),
        }
    }
}

impl CommandLineConfig {
    /// Load from the user config dir, falling back to defaults
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Load from an explicit file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::Io(format!("Failed to read config at {}: {}", path.display(), e))
        })?;
        serde_yaml::from_str(&content).map_err(|e| {
            ConfigError::Parse(format!("Failed to parse config at {}: {}", path.display(), e))
        })
    }

    /// Save to the user config dir
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = crate::config_paths::config_file().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&path)
    }

    /// Save to an explicit file, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Io(format!("Failed to create config directory: {}", e)))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content).map_err(|e| {
            ConfigError::Io(format!("Failed to write config to {}: {}", path.display(), e))
        })?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Undo coalescing thresholds
    pub fn coalesce_policy(&self) -> CoalescePolicy {
        CoalescePolicy {
            interval_ms: self.undo_interval_ms,
            max_edits: self.undo_max_edits,
        }
    }

    /// Whether the caret is in the visible half of its blink cycle
    pub fn caret_visible(&self, elapsed_ms: u64) -> bool {
        if self.blink_period_ms == 0 {
            return true;
        }
        elapsed_ms % self.blink_period_ms <= self.blink_visible_ms
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    NoConfigDir,
    Io(String),
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NoConfigDir => write!(f, "No config directory available"),
            ConfigError::Io(e) => write!(f, "{}", e),
            ConfigError::Parse(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: CommandLineConfig =
            serde_yaml::from_str("placeholder: \"> \"\nvisible_rows: 4\n").unwrap();
        assert_eq!(config.placeholder, "> ");
        assert_eq!(config.visible_rows, 4);
        assert_eq!(config.undo_interval_ms, 3000);
        assert_eq!(config.theme, "default-dark");
    }

    #[test]
    fn test_save_and_load_from() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        let config = CommandLineConfig {
            font_size: 20.0,
            theme: "high-contrast".to_string(),
            ..CommandLineConfig::default()
        };
        config.save_to(&path).unwrap();

        assert_eq!(CommandLineConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_load_from_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.yaml");
        assert!(matches!(
            CommandLineConfig::load_from(&missing),
            Err(ConfigError::Io(_))
        ));

        let broken = dir.path().join("broken.yaml");
        std::fs::write(&broken, "font_size: [").unwrap();
        assert!(matches!(
            CommandLineConfig::load_from(&broken),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_caret_blink_phase() {
        let config = CommandLineConfig::default();
        assert!(config.caret_visible(0));
        assert!(config.caret_visible(500));
        assert!(!config.caret_visible(501));
        assert!(!config.caret_visible(999));
        assert!(config.caret_visible(1000));
    }
}
