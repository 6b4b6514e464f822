//! Colour themes and ANSI escape sequence generation.
//!
//! Built-in themes are TOML files compiled into the plugin; a custom theme
//! can be loaded from a TOML file with the same shape:
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! selection_fg = "#1e1e2e"
//! selection_bg = "#89b4fa"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! input_border = "#89b4fa"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! status_fg = "#a6adc8"
//! error_fg = "#f38ba8"
//! link_fg = "#94e2d5"
//! loading_fg = "#f9e2af"
//! ```
//!
//! # Example
//!
//! ```rust
//! use geolookup::ui::Theme;
//!
//! let theme = Theme::from_name("catppuccin-latte").unwrap();
//! let line = format!("{}Bold{}", Theme::bold(), Theme::reset());
//! assert!(line.starts_with("\u{1b}[1m"));
//! assert_eq!(theme.name, "catppuccin-latte");
//! ```

use crate::domain::{GeolookupError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Theme used when none is configured.
pub const DEFAULT_THEME: &str = "catppuccin-mocha";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Hex colours (`"#rrggbb"`) for every UI element.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Highlighted row.
    pub selection_fg: String,
    pub selection_bg: String,

    pub text_normal: String,
    /// Footer, placeholder, secondary result details.
    pub text_dim: String,

    pub border: String,
    pub input_border: String,

    /// Typed text inside suggestions.
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    pub status_fg: String,
    pub error_fg: String,
    /// Map link marker of results that have one.
    pub link_fg: String,
    pub loading_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// Supported names: `catppuccin-mocha`, `catppuccin-latte`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`GeolookupError::Io`] if the file cannot be read and
    /// [`GeolookupError::Theme`] if it is not a valid theme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;

        toml::from_str(&contents)
            .map_err(|e| GeolookupError::Theme(format!("failed to parse {}: {e}", path.display())))
    }

    /// Terminal-default palette used if a built-in theme ever fails to load.
    fn plain() -> Self {
        let white = "#ffffff".to_string();
        let grey = "#808080".to_string();
        let black = "#000000".to_string();
        Self {
            name: "plain".to_string(),
            colors: ThemeColors {
                header_fg: white.clone(),
                header_bg: None,
                selection_fg: black.clone(),
                selection_bg: white.clone(),
                text_normal: white.clone(),
                text_dim: grey.clone(),
                border: grey.clone(),
                input_border: white.clone(),
                match_highlight_fg: black,
                match_highlight_bg: "#ffff00".to_string(),
                status_fg: grey,
                error_fg: "#ff5f5f".to_string(),
                link_fg: "#5fd7ff".to_string(),
                loading_fg: white,
            },
        }
    }

    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim().trim_start_matches('#');
        let channel = |range: std::ops::Range<usize>| {
            hex.get(range)
                .and_then(|h| u8::from_str_radix(h, 16).ok())
                .unwrap_or(255)
        };

        if hex.len() == 6 {
            (channel(0..2), channel(2..4), channel(4..6))
        } else {
            (255, 255, 255)
        }
    }

    /// 24-bit foreground escape for a hex colour.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// 24-bit background escape for a hex colour.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Catppuccin Mocha.
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).unwrap_or_else(Self::plain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn built_in_themes_parse() {
        assert_eq!(Theme::default().name, DEFAULT_THEME);
        assert!(Theme::from_name("catppuccin-latte").is_some());
        assert!(Theme::from_name("solarized").is_none());
    }

    #[test]
    fn custom_theme_file_round_trips_through_toml() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        let mut custom = Theme::plain();
        custom.name = "custom".to_string();
        let toml = toml::to_string(&custom).expect("serialize");
        file.write_all(toml.as_bytes()).expect("write");

        let loaded = Theme::from_file(file.path()).expect("load");
        assert_eq!(loaded.name, "custom");
        assert_eq!(loaded.colors.error_fg, "#ff5f5f");
    }

    #[test]
    fn invalid_theme_file_is_theme_error() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(b"name = 3").expect("write");
        assert!(matches!(Theme::from_file(file.path()), Err(GeolookupError::Theme(_))));
    }

    #[test]
    fn unreadable_theme_file_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = Theme::from_file(dir.path().join("missing.toml")).expect_err("missing file");
        let GeolookupError::Io(io) = err else {
            panic!("expected an IO error, got {err:?}");
        };
        assert_eq!(io.kind(), std::io::ErrorKind::NotFound);
    }

    #[test]
    fn hex_parsing_tolerates_garbage() {
        assert_eq!(Theme::fg("#010203"), "\u{1b}[38;2;1;2;3m");
        assert_eq!(Theme::bg("nope"), "\u{1b}[48;2;255;255;255m");
        assert_eq!(Theme::fg("#zz0000"), "\u{1b}[38;2;255;0;0m");
    }
}
