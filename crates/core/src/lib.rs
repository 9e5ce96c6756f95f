//! Theme-token derivation and preset assembly.
//!
//! ```text
//!   ThemePreset ─▶ engine::generate_theme_vars ─▶ ThemeCssVars ─▶ apply_theme ─▶ <html style>
//!        │
//!        └─ (names only) ─▶ preset::build_preset(base) ─▶ component-library preset
//! ```

pub mod builtin;
pub mod color;
pub mod engine;
pub mod merge;
pub mod metadata;
pub mod preset;

pub use color::{ColorError, Rgb};
pub use engine::{InlineStyle, StyleTarget, apply_theme, generate_theme_vars, render_stylesheet};
pub use merge::{
    MergeOptions, PathError, StyleKey, StylePath, Styles, deep_find_and_replace_property,
    deep_merge_styles, deep_merge_styles_in_place,
};
pub use preset::{FifoCache, NoCache, PresetCache, PresetInputs, build_preset};
