use hueprint_protocol::{FamilyOverrides, ThemeCssVars, ThemeMode};

use crate::color::Rgb;
use crate::metadata::{
    DARK_LIGHT_OFFSET, FOREGROUND_ON_DARK, FOREGROUND_ON_LIGHT, HOVER_OFFSET,
    LIGHT_FOREGROUND_STEP, LIGHT_TINT_WEIGHT,
};

/// Resolved colors of one interactive family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FamilyColors {
    pub default: Rgb,
    pub foreground: Rgb,
    pub hover: Rgb,
    pub hover_foreground: Rgb,
    pub light: Rgb,
    pub light_foreground: Rgb,
}

impl FamilyColors {
    /// Write `--{name}`, `--{name}-foreground`, ... into `vars`.
    pub fn write_to(&self, name: &str, vars: &mut ThemeCssVars) {
        let slots = [
            ("", self.default),
            ("-foreground", self.foreground),
            ("-hover", self.hover),
            ("-hover-foreground", self.hover_foreground),
            ("-light", self.light),
            ("-light-foreground", self.light_foreground),
        ];
        for (suffix, color) in slots {
            vars.insert(format!("--{name}{suffix}"), color.to_string());
        }
    }
}

/// Derive a full interactive family from a seed.
///
/// Each slot present in `overrides` wins on its own; derived slots are
/// computed from the resolved base, so overriding only `default` still
/// yields a consistent hover and tint.
pub fn generate_family(
    seed: Rgb,
    mode: ThemeMode,
    overrides: Option<&FamilyOverrides>,
) -> FamilyColors {
    let empty = FamilyOverrides::default();
    let o = overrides.unwrap_or(&empty);
    let dark = mode.is_dark();

    let default = resolve(o.default.as_deref(), || seed);
    let hover = resolve(o.hover.as_deref(), || {
        default.adjust(if dark { HOVER_OFFSET } else { -HOVER_OFFSET })
    });
    let light = resolve(o.light.as_deref(), || {
        if dark {
            default.adjust(-DARK_LIGHT_OFFSET)
        } else {
            default.mix(Rgb::WHITE, LIGHT_TINT_WEIGHT)
        }
    });

    FamilyColors {
        default,
        foreground: resolve(o.foreground.as_deref(), || contrast_foreground(default)),
        hover,
        hover_foreground: resolve(o.hover_foreground.as_deref(), || contrast_foreground(hover)),
        light,
        light_foreground: resolve(o.light_foreground.as_deref(), || {
            legible_on_tint(light, mode)
        }),
    }
}

/// An explicit override (normalized, trusted as-is) or the derived value.
/// A blank override counts as unset.
pub(crate) fn resolve(explicit: Option<&str>, derive: impl FnOnce() -> Rgb) -> Rgb {
    match explicit.filter(|hex| !hex.trim().is_empty()) {
        Some(hex) => Rgb::from_hex_lossy(hex),
        None => derive(),
    }
}

/// Light text on dark surfaces, dark text on light ones.
pub fn contrast_foreground(surface: Rgb) -> Rgb {
    if surface.is_dark() {
        Rgb::from_hex_lossy(FOREGROUND_ON_DARK)
    } else {
        Rgb::from_hex_lossy(FOREGROUND_ON_LIGHT)
    }
}

/// Text color for content placed on a family's light tint.
///
/// Keeps the tint's hue: in light mode the tint is darkened step by step
/// until it crosses the luma threshold, in dark mode it is brightened the
/// same way. A tint already on the wrong side for its mode gets plain
/// contrast text.
fn legible_on_tint(tint: Rgb, mode: ThemeMode) -> Rgb {
    match mode {
        ThemeMode::Light => {
            if tint.is_dark() {
                return contrast_foreground(tint);
            }
            let mut candidate = tint.adjust(-LIGHT_FOREGROUND_STEP);
            while !candidate.is_dark() {
                candidate = candidate.adjust(-LIGHT_FOREGROUND_STEP);
            }
            candidate
        }
        ThemeMode::Dark => {
            if !tint.is_dark() {
                return contrast_foreground(tint);
            }
            let mut candidate = tint.adjust(LIGHT_FOREGROUND_STEP);
            while candidate.is_dark() && candidate != Rgb::WHITE {
                candidate = candidate.adjust(LIGHT_FOREGROUND_STEP);
            }
            candidate
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(s: &str) -> Rgb {
        Rgb::from_hex(s).unwrap()
    }

    #[test]
    fn hover_direction_follows_mode() {
        let base = hex("#3b82f6");
        let light = generate_family(base, ThemeMode::Light, None);
        let dark = generate_family(base, ThemeMode::Dark, None);
        assert_eq!(light.hover, base.adjust(-HOVER_OFFSET));
        assert_eq!(dark.hover, base.adjust(HOVER_OFFSET));
        assert!(light.hover.luma() < base.luma());
        assert!(dark.hover.luma() > base.luma());
    }

    #[test]
    fn light_tint_mixes_with_white_in_light_mode() {
        let base = hex("#3b82f6");
        let family = generate_family(base, ThemeMode::Light, None);
        assert_eq!(family.light, base.mix(Rgb::WHITE, LIGHT_TINT_WEIGHT));
        assert!(!family.light.is_dark());
        // Text on the pale tint stays dark.
        assert!(family.light_foreground.is_dark());
    }

    #[test]
    fn light_tint_darkens_in_dark_mode() {
        let base = hex("#3b82f6");
        let family = generate_family(base, ThemeMode::Dark, None);
        assert_eq!(family.light, base.adjust(-DARK_LIGHT_OFFSET));
        assert!(family.light.is_dark());
        assert!(!family.light_foreground.is_dark());
    }

    #[test]
    fn foregrounds_contrast_with_their_surface() {
        let dark_base = generate_family(hex("#1d4ed8"), ThemeMode::Light, None);
        assert_eq!(dark_base.foreground, hex(FOREGROUND_ON_DARK));

        let pale_base = generate_family(hex("#fde047"), ThemeMode::Light, None);
        assert_eq!(pale_base.foreground, hex(FOREGROUND_ON_LIGHT));
    }

    #[test]
    fn overrides_win_slot_by_slot() {
        let overrides = FamilyOverrides {
            default: Some("#ff0000".to_string()),
            hover: Some("#123456".to_string()),
            ..FamilyOverrides::default()
        };
        let family = generate_family(hex("#3b82f6"), ThemeMode::Light, Some(&overrides));
        assert_eq!(family.default, hex("#ff0000"));
        assert_eq!(family.hover, hex("#123456"));
        // Tint derives from the overridden base, not the seed.
        assert_eq!(family.light, hex("#ff0000").mix(Rgb::WHITE, LIGHT_TINT_WEIGHT));
    }

    #[test]
    fn blank_overrides_derive_like_unset_ones() {
        let blank = FamilyOverrides {
            default: Some(String::new()),
            hover: Some("  ".to_string()),
            ..FamilyOverrides::default()
        };
        let seed = hex("#3b82f6");
        assert_eq!(
            generate_family(seed, ThemeMode::Light, Some(&blank)),
            generate_family(seed, ThemeMode::Light, None)
        );
    }

    #[test]
    fn tint_text_steps_from_the_tint() {
        let family = generate_family(hex("#3b82f6"), ThemeMode::Light, None);
        let tint = family.light;
        let mut expected = tint.adjust(-LIGHT_FOREGROUND_STEP);
        while !expected.is_dark() {
            expected = expected.adjust(-LIGHT_FOREGROUND_STEP);
        }
        assert_eq!(family.light_foreground, expected);
        assert_ne!(family.light_foreground, tint);
    }

    #[test]
    fn legible_tint_text_terminates_on_white_base() {
        let family = generate_family(Rgb::WHITE, ThemeMode::Light, None);
        assert!(family.light_foreground.is_dark());
        let family = generate_family(Rgb::BLACK, ThemeMode::Dark, None);
        assert!(!family.light_foreground.is_dark());
    }

    #[test]
    fn writes_six_variables() {
        let mut vars = ThemeCssVars::new();
        generate_family(hex("#3b82f6"), ThemeMode::Light, None).write_to("primary", &mut vars);
        assert_eq!(vars.len(), 6);
        assert_eq!(vars.get("--primary"), Some("59 130 246"));
        assert!(vars.contains("--primary-light-foreground"));
    }
}
