//! Geolookup: a Zellij plugin for keyboard-driven address lookup.
//!
//! Geolookup is a terminal multiplexer plugin that provides:
//! - Debounced address suggestions while typing (ArcGIS World geocoder)
//! - Resolution of a chosen suggestion into ranked address candidates
//! - Keyboard navigation of whichever list is on screen
//! - Opening a candidate's location in an external map viewer
//! - Protection against out-of-order network responses

//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Debouncer, suggestion and result sessions        │
//! │  - Derived mode and keyboard routing                │
//! │  - Generation-stamped settlements                   │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Geocode Layer │   │ Infrastructure│
//! │ (ui/)         │   │ (geocode/)    │   │ (infra../)    │
//! │ - Rendering   │   │ - URL builder │   │ - Paths       │
//! │ - Locale      │   │ - JSON decode │   │ - Timer queue │
//! │ - Hit-testing │   │ - Request tags│   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain Layer (domain/)                             │
//! │  - Suggestion, Candidate, Location                  │
//! │  - Error types                                      │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing                            │
//! │  - File-based OTLP export                           │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/geolookup.wasm" {
//!         country_code "BGR"
//!         lang_code "bg"
//!         locale "bg"
//!         debounce_ms "300"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Event Flow
//!
//! 1. A keystroke edits the input buffer and re-arms the debounce timer.
//! 2. When the timer elapses the handler emits `FetchSuggestions` stamped
//!    with a fresh generation; the shim issues the web request.
//! 3. The response comes back as `SuggestionsSettled`; anything but the
//!    latest generation is dropped.
//! 4. Choosing a suggestion closes the list, switches to result browsing,
//!    and emits `FindCandidates`.
//! 5. Enter or a click on a result emits `OpenExternalLink`.
//!
//! # Examples
//!
//! ```rust
//! use geolookup::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//!
//! let mut actions = Vec::new();
//! for c in "Sofia".chars() {
//!     let (_, emitted) = handle_event(&mut state, &Event::Char(c))?;
//!     actions = emitted;
//! }
//! assert!(matches!(actions.as_slice(), [Action::StartTimer { .. }]));
//! # Ok::<(), geolookup::GeolookupError>(())
//! ```
//!
//! # Platform Support
//!
//! - **Target**: `wasm32-wasip1` (Zellij WASM runtime)
//! - **Terminal**: Any ANSI-capable terminal emulator with 24-bit colour

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod domain;
pub mod geocode;
pub mod infrastructure;
pub mod observability;
pub mod ui;

pub use app::{handle_event, Action, AppState, Event, LookupSettings, Mode, NavKey};
pub use domain::{GeolookupError, Result};
pub use ui::{Locale, Theme};

use std::collections::BTreeMap;
use std::time::Duration;

/// Plugin configuration parsed from Zellij's configuration system.
///
/// Every option is optional; unparseable values fall back to the default.
///
/// ```kdl
/// plugin location="file:/path/to/geolookup.wasm" {
///     suggest_url "https://geocode.arcgis.com/arcgis/rest/services/World/GeocodeServer/suggest"
///     find_url "https://geocode.arcgis.com/arcgis/rest/services/World/GeocodeServer/findAddressCandidates"
///     country_code "BGR"
///     lang_code "bg"
///     max_suggestions "8"
///     min_chars "3"
///     debounce_ms "300"
///     blur_grace_ms "120"
///     locale "en"
///     open_command "xdg-open"
///     theme "catppuccin-mocha"
///     theme_file "~/themes/geolookup.toml"
///     trace_level "info"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub suggest_url: String,
    pub find_url: String,
    /// ISO 3166-1 alpha-3 country constraint for both lookups.
    pub country_code: String,
    /// Language of candidate addresses.
    pub lang_code: String,
    pub max_suggestions: u32,
    /// Minimum trimmed input length, in characters, before suggesting.
    pub min_chars: usize,
    pub debounce_ms: u64,
    /// Delay between losing focus and closing the suggestion list.
    pub blur_grace_ms: u64,
    pub locale: Locale,
    /// Command used to open map links (`xdg-open`, `open`, ...).
    pub open_command: String,
    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,
    /// Path to a custom TOML theme file; `~/` and relative paths resolve under `/host`.
    pub theme_file: Option<String>,
    /// [`EnvFilter`](tracing_subscriber::EnvFilter) directive.
    pub trace_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            suggest_url: geocode::DEFAULT_SUGGEST_URL.to_string(),
            find_url: geocode::DEFAULT_FIND_URL.to_string(),
            country_code: "BGR".to_string(),
            lang_code: "bg".to_string(),
            max_suggestions: 8,
            min_chars: 3,
            debounce_ms: 300,
            blur_grace_ms: 120,
            locale: Locale::English,
            open_command: "xdg-open".to_string(),
            theme_name: None,
            theme_file: None,
            trace_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use geolookup::{Config, Locale};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("locale".to_string(), "bg".to_string());
    /// map.insert("debounce_ms".to_string(), "250".to_string());
    /// map.insert("min_chars".to_string(), "zero".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.locale, Locale::Bulgarian);
    /// assert_eq!(config.debounce_ms, 250);
    /// assert_eq!(config.min_chars, 3);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        Self {
            suggest_url: text("suggest_url").unwrap_or(defaults.suggest_url),
            find_url: text("find_url").unwrap_or(defaults.find_url),
            country_code: text("country_code").unwrap_or(defaults.country_code),
            lang_code: text("lang_code").unwrap_or(defaults.lang_code),
            max_suggestions: parse_or(config, "max_suggestions", defaults.max_suggestions)
                .clamp(1, 15),
            min_chars: parse_or(config, "min_chars", defaults.min_chars).max(1),
            debounce_ms: parse_or(config, "debounce_ms", defaults.debounce_ms),
            blur_grace_ms: parse_or(config, "blur_grace_ms", defaults.blur_grace_ms),
            locale: text("locale")
                .and_then(|code| Locale::from_code(&code))
                .unwrap_or(defaults.locale),
            open_command: text("open_command").unwrap_or(defaults.open_command),
            theme_name: text("theme"),
            theme_file: text("theme_file"),
            trace_level: text("trace_level").unwrap_or(defaults.trace_level),
        }
    }

    /// Interaction timings and thresholds.
    #[must_use]
    pub const fn lookup_settings(&self) -> LookupSettings {
        LookupSettings {
            min_chars: self.min_chars,
            debounce: Duration::from_millis(self.debounce_ms),
            blur_grace: Duration::from_millis(self.blur_grace_ms),
        }
    }

    /// Resolves the configured theme, falling back to the default.
    #[must_use]
    pub fn theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            let path = infrastructure::resolve_host_path(theme_file);
            return Theme::from_file(&path).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme file, using default");
                Theme::default()
            });
        }

        self.theme_name.as_ref().map_or_else(Theme::default, |name| {
            Theme::from_name(name).unwrap_or_else(|| {
                tracing::warn!(theme_name = %name, "unknown theme, using default");
                Theme::default()
            })
        })
    }
}

fn parse_or<T: std::str::FromStr>(config: &BTreeMap<String, String>, key: &str, default: T) -> T {
    config
        .get(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Creates the application state for a configuration.
///
/// # Example
///
/// ```rust
/// use geolookup::{initialize, Config, Mode};
///
/// let state = initialize(&Config::default());
/// assert_eq!(state.mode(), Mode::Idle);
/// assert_eq!(state.settings.min_chars, 3);
/// ```
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(
        country_code = %config.country_code,
        min_chars = config.min_chars,
        debounce_ms = config.debounce_ms,
        "initializing geolookup plugin"
    );
    AppState::new(config.lookup_settings())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn empty_map_yields_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn values_are_parsed_and_bounded() {
        let config = Config::from_zellij(&map(&[
            ("country_code", "GRC"),
            ("max_suggestions", "50"),
            ("min_chars", "0"),
            ("blur_grace_ms", " 200 "),
            ("locale", "klingon"),
            ("theme", "catppuccin-latte"),
            ("trace_level", ""),
        ]));
        assert_eq!(config.country_code, "GRC");
        assert_eq!(config.max_suggestions, 15);
        assert_eq!(config.min_chars, 1);
        assert_eq!(config.blur_grace_ms, 200);
        assert_eq!(config.locale, Locale::English);
        assert_eq!(config.theme_name.as_deref(), Some("catppuccin-latte"));
        assert_eq!(config.trace_level, "info");
    }

    #[test]
    fn lookup_settings_follow_config() {
        let config = Config::from_zellij(&map(&[("debounce_ms", "500"), ("min_chars", "4")]));
        let settings = config.lookup_settings();
        assert_eq!(settings.debounce, Duration::from_millis(500));
        assert_eq!(settings.min_chars, 4);
        assert_eq!(initialize(&config).settings, settings);
    }

    #[test]
    fn theme_file_takes_precedence_and_falls_back() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        let mut custom = Theme::default();
        custom.name = "from-file".to_string();
        file.write_all(toml::to_string(&custom).expect("toml").as_bytes())
            .expect("write");

        let config = Config {
            theme_name: Some("catppuccin-latte".to_string()),
            theme_file: Some(file.path().display().to_string()),
            ..Config::default()
        };
        assert_eq!(config.theme().name, "from-file");

        let missing = Config {
            theme_file: Some("/nonexistent/theme.toml".to_string()),
            ..Config::default()
        };
        assert_eq!(missing.theme().name, "catppuccin-mocha");

        let unknown = Config {
            theme_name: Some("nope".to_string()),
            ..Config::default()
        };
        assert_eq!(unknown.theme().name, "catppuccin-mocha");
    }
}
