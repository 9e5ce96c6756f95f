use hueprint_protocol::ThemePreset;

/// Themes shipped with the crate.
pub fn presets() -> Vec<ThemePreset> {
    vec![
        ThemePreset::new("default", "#3b82f6"),
        ThemePreset {
            accent: Some("#14b8a6".to_string()),
            ..ThemePreset::new("emerald", "#10b981")
        },
        ThemePreset {
            background_dark: Some("#0c0a09".to_string()),
            neutral: Some("#78716c".to_string()),
            ..ThemePreset::new("amber", "#d97706")
        },
        ThemePreset::new("rose", "#e11d48"),
        ThemePreset {
            help: Some("#ec4899".to_string()),
            ..ThemePreset::new("violet", "#7c3aed")
        },
        ThemePreset {
            neutral: Some("#64748b".to_string()),
            background_light: Some("#f8fafc".to_string()),
            background_dark: Some("#020617".to_string()),
            ..ThemePreset::new("slate", "#475569")
        },
    ]
}

/// Look up a built-in theme by name, ignoring case.
pub fn find(name: &str) -> Option<ThemePreset> {
    presets()
        .into_iter()
        .find(|preset| preset.name.eq_ignore_ascii_case(name))
}
