//! Engine constants and the declarative list of color families.

use hueprint_protocol::{ColorFamily, FamilyKind};
use serde_json::{Map, Value};

// ── Brightness offsets (percent, see `Rgb::adjust`) ───────────────────

/// Hover shift: brighter in dark mode, darker in light mode.
pub const HOVER_OFFSET: f64 = 10.0;
/// Darkening applied to a base to get its light tint in dark mode.
pub const DARK_LIGHT_OFFSET: f64 = 40.0;
/// Card and popover shift away from a custom background.
pub const CARD_OFFSET: f64 = 4.0;
/// Sidebar shift away from a custom background.
pub const SIDEBAR_OFFSET: f64 = 2.0;
pub const BORDER_OFFSET_LIGHT: f64 = 10.0;
pub const BORDER_OFFSET_DARK: f64 = 15.0;
/// Step used when pushing a light-tint foreground until it is legible.
pub const LIGHT_FOREGROUND_STEP: f64 = 20.0;

// ── Mix weights (share of the first color) ────────────────────────────

/// Base share when tinting toward white in light mode.
pub const LIGHT_TINT_WEIGHT: f64 = 0.15;
pub const ACCENT_WEIGHT_LIGHT: f64 = 0.12;
pub const ACCENT_WEIGHT_DARK: f64 = 0.25;
pub const MUTED_WEIGHT_LIGHT: f64 = 0.08;
pub const MUTED_WEIGHT_DARK: f64 = 0.18;

// ── Default colors ────────────────────────────────────────────────────

pub const DEFAULT_PRIMARY: &str = "#3b82f6";
pub const DEFAULT_NEUTRAL: &str = "#71717a";
pub const DEFAULT_BACKGROUND_LIGHT: &str = "#ffffff";
pub const DEFAULT_BACKGROUND_DARK: &str = "#09090b";
pub const DEFAULT_CARD_LIGHT: &str = "#ffffff";
pub const DEFAULT_CARD_DARK: &str = "#111113";
pub const DEFAULT_SIDEBAR_LIGHT: &str = "#fafafa";
pub const DEFAULT_SIDEBAR_DARK: &str = "#0f0f12";
/// Text placed on light surfaces.
pub const FOREGROUND_ON_LIGHT: &str = "#09090b";
/// Text placed on dark surfaces.
pub const FOREGROUND_ON_DARK: &str = "#fafafa";

pub const DEFAULT_DESTRUCTIVE: &str = "#ef4444";
pub const DEFAULT_WARN: &str = "#f59e0b";
pub const DEFAULT_SUCCESS: &str = "#22c55e";
pub const DEFAULT_INFO: &str = "#0ea5e9";
pub const DEFAULT_HELP: &str = "#a855f7";

/// Status families with their fallback seeds.
pub const STATUS_FAMILIES: &[(&str, &str)] = &[
    ("destructive", DEFAULT_DESTRUCTIVE),
    ("warn", DEFAULT_WARN),
    ("success", DEFAULT_SUCCESS),
    ("info", DEFAULT_INFO),
    ("help", DEFAULT_HELP),
];

/// Every color family the engine produces, in emission order.
pub const COLOR_FAMILIES: &[ColorFamily] = &[
    ColorFamily::new("background", FamilyKind::Single),
    ColorFamily::new("foreground", FamilyKind::Single),
    ColorFamily::new("border", FamilyKind::Single),
    ColorFamily::new("input", FamilyKind::Single),
    ColorFamily::new("ring", FamilyKind::Single),
    ColorFamily::new("card", FamilyKind::Pair),
    ColorFamily::new("popover", FamilyKind::Pair),
    ColorFamily::new("muted", FamilyKind::Pair),
    ColorFamily::new("secondary", FamilyKind::Pair),
    ColorFamily::new("primary", FamilyKind::Interactive),
    ColorFamily::new("accent", FamilyKind::Interactive),
    ColorFamily::new("destructive", FamilyKind::Interactive),
    ColorFamily::new("warn", FamilyKind::Interactive),
    ColorFamily::new("success", FamilyKind::Interactive),
    ColorFamily::new("info", FamilyKind::Interactive),
    ColorFamily::new("help", FamilyKind::Interactive),
    ColorFamily::new("sidebar", FamilyKind::Sidebar),
];

/// All CSS variables the engine writes.
pub fn theme_var_names() -> Vec<String> {
    COLOR_FAMILIES
        .iter()
        .flat_map(|family| family.var_names().collect::<Vec<_>>())
        .collect()
}

pub fn is_theme_var(name: &str) -> bool {
    COLOR_FAMILIES
        .iter()
        .any(|family| family.var_names().any(|var| var == name))
}

/// The UnoCSS `theme.colors` table derived from [`COLOR_FAMILIES`].
///
/// Single families map to one color string; the others map to an object
/// keyed `DEFAULT`, `foreground`, `hover`, ... so `bg-primary-hover` and
/// `text-accent-foreground` resolve to the engine's variables.
pub fn unocss_colors() -> Value {
    let mut colors = Map::new();
    for family in COLOR_FAMILIES {
        let entry = match family.kind {
            FamilyKind::Single => Value::String(alpha_color(&family.var_name(""))),
            _ => {
                let mut slots = Map::new();
                for suffix in family.kind.suffixes() {
                    let key = match suffix.strip_prefix('-') {
                        Some(slot) => slot.to_string(),
                        None => "DEFAULT".to_string(),
                    };
                    slots.insert(key, Value::String(alpha_color(&family.var_name(suffix))));
                }
                Value::Object(slots)
            }
        };
        colors.insert(family.name.to_string(), entry);
    }
    Value::Object(colors)
}

fn alpha_color(var: &str) -> String {
    format!("rgb(var({var}) / <alpha-value>)")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn var_names_are_unique() {
        let names = theme_var_names();
        let unique: std::collections::BTreeSet<&String> = names.iter().collect();
        assert_eq!(names.len(), unique.len());
        // 5 single + 4 pairs * 2 + 7 interactive * 6 + 8 sidebar
        assert_eq!(names.len(), 5 + 8 + 42 + 8);
    }

    #[test]
    fn recognizes_theme_vars() {
        assert!(is_theme_var("--primary-hover"));
        assert!(is_theme_var("--sidebar-ring"));
        assert!(is_theme_var("--muted-foreground"));
        assert!(!is_theme_var("--transition-duration"));
        assert!(!is_theme_var("--ring-foreground"));
    }

    #[test]
    fn status_families_are_interactive() {
        for (name, seed) in STATUS_FAMILIES {
            let family = COLOR_FAMILIES.iter().find(|f| f.name == *name).unwrap();
            assert_eq!(family.kind, FamilyKind::Interactive);
            assert!(seed.starts_with('#'));
        }
    }

    #[test]
    fn unocss_table_covers_every_family() {
        let colors = unocss_colors();
        assert_eq!(
            colors["ring"],
            Value::String("rgb(var(--ring) / <alpha-value>)".to_string())
        );
        assert_eq!(
            colors["primary"]["DEFAULT"],
            Value::String("rgb(var(--primary) / <alpha-value>)".to_string())
        );
        assert_eq!(
            colors["accent"]["light-foreground"],
            Value::String("rgb(var(--accent-light-foreground) / <alpha-value>)".to_string())
        );
        assert_eq!(
            colors["sidebar"]["primary-foreground"],
            Value::String("rgb(var(--sidebar-primary-foreground) / <alpha-value>)".to_string())
        );
        assert_eq!(colors.as_object().unwrap().len(), COLOR_FAMILIES.len());
    }
}
