//! Theme system for the command line
//!
//! Provides YAML-based theming support with compile-time embedded themes
//! and user-defined themes from config directories.
//!
//! Theme loading priority:
//! 1. User config: `~/.config/cmdline/themes/{id}.yaml`
//! 2. Embedded: Built-in themes compiled into binary

use std::path::Path;

use serde::Deserialize;

// Embed theme YAML files at compile time
pub const DEFAULT_DARK_YAML: &str = include_str!("../themes/default-dark.yaml");
pub const HIGH_CONTRAST_YAML: &str = include_str!("../themes/high-contrast.yaml");

/// A built-in theme entry
pub struct BuiltinTheme {
    /// Stable identifier for config (e.g. "default-dark")
    pub id: &'static str,
    /// Embedded YAML content
    pub yaml: &'static str,
}

/// Registry of all built-in themes
pub const BUILTIN_THEMES: &[BuiltinTheme] = &[
    BuiltinTheme {
        id: "default-dark",
        yaml: DEFAULT_DARK_YAML,
    },
    BuiltinTheme {
        id: "high-contrast",
        yaml: HIGH_CONTRAST_YAML,
    },
];

/// Load a theme from a YAML file
pub fn from_file(path: &Path) -> Result<Theme, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read theme file {}: {}", path.display(), e))?;
    Theme::from_yaml(&content)
}

/// Load theme by id with priority: user → builtin
pub fn load_theme(id: &str) -> Result<Theme, String> {
    if let Some(user_dir) = crate::config_paths::themes_dir() {
        let user_path = user_dir.join(format!("{}.yaml", id));
        if user_path.exists() {
            tracing::info!("Loading user theme from {}", user_path.display());
            return from_file(&user_path);
        }
    }

    tracing::info!("Loading builtin theme: {}", id);
    Theme::from_builtin(id)
}

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);

    /// Create a new color from RGB values (alpha defaults to 255)
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a new color from RGBA values
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Unpack a 0xAARRGGBB value
    pub const fn from_argb_u32(argb: u32) -> Self {
        Self {
            a: (argb >> 24) as u8,
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
        }
    }


    /// Parse from "#RRGGBB" or "#RRGGBBAA" hex string
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let s = s.trim_start_matches('#');
        if !s.is_ascii() {
            return Err(format!("Invalid color format: {}", s));
        }
        let channel = |i: usize| u8::from_str_radix(&s[i..i + 2], 16).map_err(|e| e.to_string());
        match s.len() {
            6 => Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Ok(Color::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => Err(format!("Invalid color format: {}", s)),
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
    }
}

// =============================================================================
// Raw theme data as parsed from YAML
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct ThemeData {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub author: Option<String>,
    pub ui: UiThemeData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UiThemeData {
    pub bar: BarThemeData,
    #[serde(default)]
    pub problems: ProblemThemeData,
    #[serde(default)]
    pub suggestions: SuggestionThemeData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BarThemeData {
    pub background: String,
    pub foreground: String,
    pub caret: String,
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub selection_background: Option<String>,
    #[serde(default)]
    pub selection_foreground: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProblemThemeData {
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default)]
    pub foreground: Option<String>,
    #[serde(default)]
    pub underline: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SuggestionThemeData {
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default)]
    pub foreground: Option<String>,
    #[serde(default)]
    pub foreground_dimmed: Option<String>,
    #[serde(default)]
    pub selected_foreground: Option<String>,
    #[serde(default)]
    pub selected_background: Option<String>,
    #[serde(default)]
    pub selected_background_dimmed: Option<String>,
}

// =============================================================================
// Resolved theme
// =============================================================================

/// Input bar colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarTheme {
    pub background: Color,
    /// Text not covered by any highlight
    pub foreground: Color,
    pub caret: Color,
    pub placeholder: Color,
    pub selection_background: Color,
    pub selection_foreground: Color,
}

/// Problem panel and underline colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProblemTheme {
    pub background: Color,
    pub foreground: Color,
    pub underline: Color,
}

/// Suggestion panel colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestionTheme {
    pub background: Color,
    /// Row text while the panel is focused
    pub foreground: Color,
    /// Row text while the panel is shown but unfocused
    pub foreground_dimmed: Color,
    pub selected_foreground: Color,
    pub selected_background: Color,
    pub selected_background_dimmed: Color,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: String,
    pub bar: BarTheme,
    pub problems: ProblemTheme,
    pub suggestions: SuggestionTheme,
}

fn resolve(value: &Option<String>, fallback: Color) -> Result<Color, String> {
    Ok(value
        .as_ref()
        .map(|s| Color::from_hex(s))
        .transpose()?
        .unwrap_or(fallback))
}

impl Theme {
    /// Load theme from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        let data: ThemeData =
            serde_yaml::from_str(yaml).map_err(|e| format!("YAML parse error: {}", e))?;
        Self::from_data(data)
    }

    /// Load a built-in theme by id
    pub fn from_builtin(id: &str) -> Result<Self, String> {
        let entry = BUILTIN_THEMES
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| format!("Unknown theme id: {}", id))?;
        Theme::from_yaml(entry.yaml)
    }

    /// Convert raw theme data to resolved theme
    pub fn from_data(data: ThemeData) -> Result<Self, String> {
        let fallback = Theme::fallback();
        let bar = &data.ui.bar;
        let background = Color::from_hex(&bar.background)?;
        let problems = &data.ui.problems;
        let suggestions = &data.ui.suggestions;

        Ok(Theme {
            name: data.name,
            bar: BarTheme {
                background,
                foreground: Color::from_hex(&bar.foreground)?,
                caret: Color::from_hex(&bar.caret)?,
                placeholder: resolve(&bar.placeholder, fallback.bar.placeholder)?,
                selection_background: resolve(
                    &bar.selection_background,
                    fallback.bar.selection_background,
                )?,
                selection_foreground: resolve(
                    &bar.selection_foreground,
                    fallback.bar.selection_foreground,
                )?,
            },
            problems: ProblemTheme {
                background: resolve(&problems.background, background)?,
                foreground: resolve(&problems.foreground, fallback.problems.foreground)?,
                underline: resolve(&problems.underline, fallback.problems.underline)?,
            },
            suggestions: SuggestionTheme {
                background: resolve(&suggestions.background, background)?,
                foreground: resolve(&suggestions.foreground, fallback.suggestions.foreground)?,
                foreground_dimmed: resolve(
                    &suggestions.foreground_dimmed,
                    fallback.suggestions.foreground_dimmed,
                )?,
                selected_foreground: resolve(
                    &suggestions.selected_foreground,
                    fallback.suggestions.selected_foreground,
                )?,
                selected_background: resolve(
                    &suggestions.selected_background,
                    fallback.suggestions.selected_background,
                )?,
                selected_background_dimmed: resolve(
                    &suggestions.selected_background_dimmed,
                    fallback.suggestions.selected_background_dimmed,
                )?,
            },
        })
    }

    /// Hardcoded dark palette, used when no YAML theme can be loaded
    pub fn fallback() -> Self {
        let panel = Color::from_argb_u32(0xFF333333);
        Theme {
            name: "Fallback Dark".to_string(),
            bar: BarTheme {
                background: panel,
                foreground: Color::WHITE,
                caret: Color::from_argb_u32(0xFF00FF88),
                placeholder: Color::from_argb_u32(0x99FFFFFF),
                selection_background: Color::from_argb_u32(0x9900FF88),
                selection_foreground: Color::WHITE,
            },
            problems: ProblemTheme {
                background: panel,
                foreground: Color::from_argb_u32(0xFFFF3333),
                underline: Color::from_argb_u32(0xFFFF0000),
            },
            suggestions: SuggestionTheme {
                background: panel,
                foreground: Color::WHITE,
                foreground_dimmed: Color::from_argb_u32(0x99FFFFFF),
                selected_foreground: Color::from_argb_u32(0xFFFFFF00),
                selected_background: Color::from_argb_u32(0x9900AAFF),
                selected_background_dimmed: Color::from_argb_u32(0x99555555),
            },
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::from_builtin("default-dark").unwrap_or_else(|_| Theme::fallback())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_hex() {
        assert_eq!(Color::from_hex("#FF3333").unwrap(), Color::rgb(0xFF, 0x33, 0x33));
        assert_eq!(
            Color::from_hex("#00FF8899").unwrap(),
            Color::rgba(0x00, 0xFF, 0x88, 0x99)
        );
        assert!(Color::from_hex("#123").is_err());
        assert!(Color::from_hex("#GG0000").is_err());
    }

    #[test]
    fn test_color_from_argb() {
        let color = Color::from_argb_u32(0x9900FF88);
        assert_eq!(color, Color::rgba(0x00, 0xFF, 0x88, 0x99));
    }

    #[test]
    fn test_builtin_themes_parse() {
        for builtin in BUILTIN_THEMES {
            let theme = Theme::from_builtin(builtin.id);
            assert!(theme.is_ok(), "{} failed: {:?}", builtin.id, theme.err());
        }
    }

    #[test]
    fn test_default_dark_matches_fallback_colors() {
        let theme = Theme::from_builtin("default-dark").unwrap();
        let fallback = Theme::fallback();
        assert_eq!(theme.bar, fallback.bar);
        assert_eq!(theme.suggestions, fallback.suggestions);
    }

    #[test]
    fn test_optional_sections_fall_back() {
        let yaml = r##"
version: 1
name: Minimal
ui:
  bar:
    background: "#101010"
    foreground: "#EEEEEE"
    caret: "#00FF88"
"##;
        let theme = Theme::from_yaml(yaml).unwrap();
        assert_eq!(theme.name, "Minimal");
        assert_eq!(theme.problems.background, Color::rgb(0x10, 0x10, 0x10));
        assert_eq!(
            theme.suggestions.selected_foreground,
            Theme::fallback().suggestions.selected_foreground
        );
    }

    #[test]
    fn test_unknown_builtin_errors() {
        assert!(Theme::from_builtin("nope").is_err());
    }
}
