//! User interface rendering layer with component-based architecture.
//!
//! This module turns state snapshots into ANSI-styled terminal output. It
//! provides localized strings, theme support, a windowed list that follows
//! the cursor, typed-text highlighting in suggestions, and pointer
//! hit-testing.
//!
//! # Architecture
//!
//! ```text
//! AppState → Snapshot → UIViewModel → components → frame buffer → stdout
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: Display-ready view model, layout and hit-testing
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Screen part renderers
//! - [`helpers`]: Shared rendering utilities (highlighting, padding)
//! - [`locale`]: User-facing strings (English, Bulgarian)
//! - [`theme`]: Colour themes and ANSI escape generation

pub mod components;
pub mod helpers;
pub mod locale;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use locale::Locale;
pub use renderer::{render, render_to_string};
pub use theme::Theme;
pub use viewmodel::{DisplayItem, EmptyState, Hit, ListKind, UIViewModel};
