use serde::{Deserialize, Serialize};

use crate::mode::ThemeMode;

/// Seed configuration for a theme.
///
/// Only `primary` is required. Every other seed falls back to an engine
/// default, and every derived token can be pinned per mode through
/// [`ThemePreset::colors`]. Colors are hex strings (`#rgb` or `#rrggbb`).
///
/// ```json
/// {
///   "name": "ocean",
///   "primary": "#0ea5e9",
///   "backgroundDark": "#0b1120",
///   "colors": { "light": { "primary": { "hover": "#0284c7" } } }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThemePreset {
    pub name: String,
    pub primary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destructive: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neutral: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_light: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_dark: Option<String>,
    #[serde(skip_serializing_if = "ThemeColors::is_empty")]
    pub colors: ThemeColors,
}

impl ThemePreset {
    pub fn new(name: impl Into<String>, primary: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            primary: primary.into(),
            ..Self::default()
        }
    }

    /// Custom background seed for a mode, if one was configured.
    pub fn background_for(&self, mode: ThemeMode) -> Option<&str> {
        match mode {
            ThemeMode::Light => self.background_light.as_deref(),
            ThemeMode::Dark => self.background_dark.as_deref(),
        }
    }

    /// Explicit overrides for a mode, if any.
    pub fn overrides_for(&self, mode: ThemeMode) -> Option<&ModeColors> {
        match mode {
            ThemeMode::Light => self.colors.light.as_ref(),
            ThemeMode::Dark => self.colors.dark.as_ref(),
        }
    }
}

/// Per-mode explicit overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeColors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub light: Option<ModeColors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dark: Option<ModeColors>,
}

impl ThemeColors {
    pub fn is_empty(&self) -> bool {
        self.light.is_none() && self.dark.is_none()
    }
}

/// Explicit hex values for any derived token of one mode.
///
/// A value present here is used verbatim (after normalization) instead of
/// the derived one. No contrast validation is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModeColors {
    pub background: Option<String>,
    pub foreground: Option<String>,
    pub border: Option<String>,
    pub input: Option<String>,
    pub ring: Option<String>,

    pub card: PairOverrides,
    pub popover: PairOverrides,
    pub muted: PairOverrides,
    pub secondary: PairOverrides,

    pub primary: FamilyOverrides,
    pub accent: FamilyOverrides,
    pub destructive: FamilyOverrides,
    pub warn: FamilyOverrides,
    pub success: FamilyOverrides,
    pub info: FamilyOverrides,
    pub help: FamilyOverrides,

    pub sidebar: SidebarOverrides,
}

impl ModeColors {
    /// Overrides of a single-token family by name.
    pub fn single(&self, name: &str) -> Option<&str> {
        match name {
            "background" => self.background.as_deref(),
            "foreground" => self.foreground.as_deref(),
            "border" => self.border.as_deref(),
            "input" => self.input.as_deref(),
            "ring" => self.ring.as_deref(),
            _ => None,
        }
    }

    /// Overrides of a pair family by name.
    pub fn pair(&self, name: &str) -> Option<&PairOverrides> {
        match name {
            "card" => Some(&self.card),
            "popover" => Some(&self.popover),
            "muted" => Some(&self.muted),
            "secondary" => Some(&self.secondary),
            _ => None,
        }
    }

    /// Overrides of an interactive family by name.
    pub fn family(&self, name: &str) -> Option<&FamilyOverrides> {
        match name {
            "primary" => Some(&self.primary),
            "accent" => Some(&self.accent),
            "destructive" => Some(&self.destructive),
            "warn" => Some(&self.warn),
            "success" => Some(&self.success),
            "info" => Some(&self.info),
            "help" => Some(&self.help),
            _ => None,
        }
    }
}

/// Overrides for a `DEFAULT` + `foreground` family.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PairOverrides {
    #[serde(alias = "DEFAULT")]
    pub default: Option<String>,
    pub foreground: Option<String>,
}

/// Overrides for an interactive family (base, hover and light tint, each
/// with its foreground).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FamilyOverrides {
    #[serde(alias = "DEFAULT")]
    pub default: Option<String>,
    pub foreground: Option<String>,
    pub hover: Option<String>,
    pub hover_foreground: Option<String>,
    pub light: Option<String>,
    pub light_foreground: Option<String>,
}

/// Sidebar configuration. Unset entries derive from the main theme.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SidebarOverrides {
    pub background: Option<String>,
    pub foreground: Option<String>,
    pub primary: Option<String>,
    pub primary_foreground: Option<String>,
    pub accent: Option<String>,
    pub accent_foreground: Option<String>,
    pub border: Option<String>,
    pub ring: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case_preset() {
        let json = r##"{
            "name": "ocean",
            "primary": "#0ea5e9",
            "backgroundDark": "#0b1120",
            "colors": {
                "light": {
                    "primary": { "DEFAULT": "#0284c7", "hoverForeground": "#fff" },
                    "sidebar": { "primaryForeground": "#000" }
                }
            }
        }"##;
        let preset: ThemePreset = serde_json::from_str(json).unwrap();
        assert_eq!(preset.name, "ocean");
        assert_eq!(preset.background_for(ThemeMode::Dark), Some("#0b1120"));
        assert_eq!(preset.background_for(ThemeMode::Light), None);

        let light = preset.overrides_for(ThemeMode::Light).unwrap();
        assert_eq!(light.primary.default.as_deref(), Some("#0284c7"));
        assert_eq!(light.primary.hover_foreground.as_deref(), Some("#fff"));
        assert_eq!(light.sidebar.primary_foreground.as_deref(), Some("#000"));
        assert!(preset.overrides_for(ThemeMode::Dark).is_none());
    }

    #[test]
    fn missing_fields_default() {
        let preset: ThemePreset = serde_json::from_str(r##"{"primary":"#123"}"##).unwrap();
        assert!(preset.name.is_empty());
        assert!(preset.accent.is_none());
        assert!(preset.colors.is_empty());
    }

    #[test]
    fn lookup_by_family_name() {
        let mut colors = ModeColors::default();
        colors.warn.hover = Some("#aa0000".to_string());
        colors.ring = Some("#00ff00".to_string());
        colors.muted.foreground = Some("#333".to_string());

        assert_eq!(colors.family("warn").unwrap().hover.as_deref(), Some("#aa0000"));
        assert_eq!(colors.single("ring"), Some("#00ff00"));
        assert_eq!(colors.pair("muted").unwrap().foreground.as_deref(), Some("#333"));
        assert!(colors.family("sidebar").is_none());
        assert!(colors.single("primary").is_none());
    }
}
