//! Token derivation engine.
//!
//! Resolves every semantic CSS variable from a [`ThemePreset`]. Each token
//! goes through the same priority chain:
//!
//! 1. an explicit override in `preset.colors.<mode>`,
//! 2. the preset's top-level seed run through the derivation rules,
//! 3. the defaults in [`crate::metadata`].
//!
//! The engine never fails. Invalid hex values are logged and replaced with
//! black by the color primitives.

pub mod apply;
pub mod family;

pub use apply::{InlineStyle, StyleTarget, apply_theme, parse_declarations};
pub use family::{FamilyColors, contrast_foreground, generate_family};

use hueprint_protocol::{ModeColors, PairOverrides, ThemeCssVars, ThemeMode, ThemePreset};

use crate::color::Rgb;
use crate::metadata::{
    ACCENT_WEIGHT_DARK, ACCENT_WEIGHT_LIGHT, BORDER_OFFSET_DARK, BORDER_OFFSET_LIGHT, CARD_OFFSET,
    DEFAULT_BACKGROUND_DARK, DEFAULT_BACKGROUND_LIGHT, DEFAULT_CARD_DARK, DEFAULT_CARD_LIGHT,
    DEFAULT_NEUTRAL, DEFAULT_PRIMARY, DEFAULT_SIDEBAR_DARK, DEFAULT_SIDEBAR_LIGHT,
    LIGHT_FOREGROUND_STEP, MUTED_WEIGHT_DARK, MUTED_WEIGHT_LIGHT, SIDEBAR_OFFSET, STATUS_FAMILIES,
};
use family::resolve;

/// Compute the full variable map for one mode.
pub fn generate_theme_vars(preset: &ThemePreset, mode: ThemeMode) -> ThemeCssVars {
    let empty = ModeColors::default();
    let overrides = preset.overrides_for(mode).unwrap_or(&empty);
    let dark = mode.is_dark();
    let mut vars = ThemeCssVars::new();

    // ── Surfaces ──────────────────────────────────────────────
    let custom_background = overrides
        .background
        .as_deref()
        .or_else(|| preset.background_for(mode))
        .filter(|hex| !hex.trim().is_empty())
        .map(Rgb::from_hex_lossy);
    let background = custom_background.unwrap_or_else(|| {
        Rgb::from_hex_lossy(if dark {
            DEFAULT_BACKGROUND_DARK
        } else {
            DEFAULT_BACKGROUND_LIGHT
        })
    });
    let foreground = resolve(overrides.foreground.as_deref(), || {
        contrast_foreground(background)
    });
    vars.insert("--background", background.to_string());
    vars.insert("--foreground", foreground.to_string());

    let card_surface = || match custom_background {
        Some(bg) => bg.adjust(CARD_OFFSET),
        None => Rgb::from_hex_lossy(if dark { DEFAULT_CARD_DARK } else { DEFAULT_CARD_LIGHT }),
    };
    write_pair(&mut vars, "card", &overrides.card, card_surface);
    write_pair(&mut vars, "popover", &overrides.popover, card_surface);

    let neutral = seed(preset.neutral.as_deref(), DEFAULT_NEUTRAL);
    let muted_weight = if dark { MUTED_WEIGHT_DARK } else { MUTED_WEIGHT_LIGHT };
    let muted = resolve(overrides.muted.default.as_deref(), || {
        neutral.mix(background, muted_weight)
    });
    let muted_foreground = resolve(overrides.muted.foreground.as_deref(), || {
        if dark {
            neutral.adjust(LIGHT_FOREGROUND_STEP)
        } else {
            neutral
        }
    });
    vars.insert("--muted", muted.to_string());
    vars.insert("--muted-foreground", muted_foreground.to_string());

    // ── Brand families ────────────────────────────────────────
    let primary = generate_family(
        seed(Some(preset.primary.as_str()), DEFAULT_PRIMARY),
        mode,
        Some(&overrides.primary),
    );
    primary.write_to("primary", &mut vars);

    let accent_seed = match non_empty(preset.accent.as_deref()) {
        Some(hex) => Rgb::from_hex_lossy(hex),
        None => {
            let weight = if dark { ACCENT_WEIGHT_DARK } else { ACCENT_WEIGHT_LIGHT };
            primary.default.mix(neutral, weight)
        }
    };
    let accent = generate_family(accent_seed, mode, Some(&overrides.accent));
    accent.write_to("accent", &mut vars);

    write_pair(&mut vars, "secondary", &overrides.secondary, || {
        primary.default.mix(background, muted_weight)
    });

    for (name, fallback) in STATUS_FAMILIES {
        let status = generate_family(
            seed(status_seed(preset, name), fallback),
            mode,
            overrides.family(name),
        );
        status.write_to(name, &mut vars);
    }

    // ── Lines ─────────────────────────────────────────────────
    let border = resolve(overrides.border.as_deref(), || {
        background.adjust(if dark { BORDER_OFFSET_DARK } else { -BORDER_OFFSET_LIGHT })
    });
    let input = resolve(overrides.input.as_deref(), || border);
    let ring = resolve(overrides.ring.as_deref(), || primary.default);
    vars.insert("--border", border.to_string());
    vars.insert("--input", input.to_string());
    vars.insert("--ring", ring.to_string());

    // ── Sidebar ───────────────────────────────────────────────
    let sb = &overrides.sidebar;
    let sidebar = resolve(sb.background.as_deref(), || match custom_background {
        Some(bg) => bg.adjust(if dark { SIDEBAR_OFFSET } else { -SIDEBAR_OFFSET }),
        None => Rgb::from_hex_lossy(if dark {
            DEFAULT_SIDEBAR_DARK
        } else {
            DEFAULT_SIDEBAR_LIGHT
        }),
    });
    let sidebar_primary = resolve(sb.primary.as_deref(), || primary.default);
    let sidebar_accent = resolve(sb.accent.as_deref(), || accent.default);
    let sidebar_vars = [
        ("--sidebar", sidebar),
        (
            "--sidebar-foreground",
            resolve(sb.foreground.as_deref(), || contrast_foreground(sidebar)),
        ),
        ("--sidebar-primary", sidebar_primary),
        (
            "--sidebar-primary-foreground",
            resolve(sb.primary_foreground.as_deref(), || {
                if non_empty(sb.primary.as_deref()).is_some() {
                    contrast_foreground(sidebar_primary)
                } else {
                    primary.foreground
                }
            }),
        ),
        ("--sidebar-accent", sidebar_accent),
        (
            "--sidebar-accent-foreground",
            resolve(sb.accent_foreground.as_deref(), || {
                if non_empty(sb.accent.as_deref()).is_some() {
                    contrast_foreground(sidebar_accent)
                } else {
                    accent.foreground
                }
            }),
        ),
        ("--sidebar-border", resolve(sb.border.as_deref(), || border)),
        ("--sidebar-ring", resolve(sb.ring.as_deref(), || ring)),
    ];
    for (name, color) in sidebar_vars {
        vars.insert(name, color.to_string());
    }

    tracing::debug!(theme = %preset.name, %mode, vars = vars.len(), "generated theme vars");
    vars
}

/// A stylesheet with light tokens on `:root` and dark tokens on `.dark`.
pub fn render_stylesheet(preset: &ThemePreset) -> String {
    let block = |selector: &str, mode: ThemeMode| {
        let body: String = generate_theme_vars(preset, mode)
            .iter()
            .map(|(name, value)| format!("  {name}: {value};\n"))
            .collect();
        format!("{selector} {{\n{body}}}\n")
    };
    format!(
        "{}\n{}",
        block(":root", ThemeMode::Light),
        block(".dark", ThemeMode::Dark)
    )
}

fn write_pair(
    vars: &mut ThemeCssVars,
    name: &str,
    overrides: &PairOverrides,
    surface: impl FnOnce() -> Rgb,
) {
    let base = resolve(overrides.default.as_deref(), surface);
    let foreground = resolve(overrides.foreground.as_deref(), || contrast_foreground(base));
    vars.insert(format!("--{name}"), base.to_string());
    vars.insert(format!("--{name}-foreground"), foreground.to_string());
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|hex| !hex.trim().is_empty())
}

/// A preset seed, or the engine default when unset or blank.
fn seed(value: Option<&str>, fallback: &str) -> Rgb {
    Rgb::from_hex_lossy(non_empty(value).unwrap_or(fallback))
}

fn status_seed<'a>(preset: &'a ThemePreset, name: &str) -> Option<&'a str> {
    match name {
        "destructive" => preset.destructive.as_deref(),
        "warn" => preset.warn.as_deref(),
        "success" => preset.success.as_deref(),
        "info" => preset.info.as_deref(),
        "help" => preset.help.as_deref(),
        _ => None,
    }
}
