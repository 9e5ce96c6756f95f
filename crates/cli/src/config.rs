use std::path::{Path, PathBuf};

use hueprint_core::builtin;
use hueprint_protocol::ThemePreset;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid TOML in {path}: {source}")]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("unknown theme {0:?} (see `hueprint themes`)")]
    UnknownTheme(String),
}

/// On-disk format of a preset file, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Toml,
}

impl FileFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::Toml,
            _ => Self::Json,
        }
    }
}

/// Where the theme comes from: a preset file or a built-in name.
pub fn resolve_theme(file: Option<&Path>, name: &str) -> Result<ThemePreset, ConfigError> {
    match file {
        Some(path) => load_preset(path),
        None => builtin::find(name).ok_or_else(|| ConfigError::UnknownTheme(name.to_string())),
    }
}

pub fn load_preset(path: &Path) -> Result<ThemePreset, ConfigError> {
    let text = read(path)?;
    let mut preset = parse_preset(&text, FileFormat::from_path(path), path)?;
    if preset.name.is_empty()
        && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
    {
        preset.name = stem.to_string();
    }
    tracing::debug!(path = %path.display(), theme = %preset.name, "loaded preset");
    Ok(preset)
}

pub fn parse_preset(text: &str, format: FileFormat, path: &Path) -> Result<ThemePreset, ConfigError> {
    match format {
        FileFormat::Json => serde_json::from_str(text).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        }),
        FileFormat::Toml => toml::from_str(text).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Base component preset; an empty object when no file is given.
pub fn load_base(path: Option<&Path>) -> Result<Value, ConfigError> {
    let Some(path) = path else {
        return Ok(Value::Object(serde_json::Map::new()));
    };
    let text = read(path)?;
    serde_json::from_str(&text).map_err(|source| ConfigError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn read(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_follows_extension() {
        assert_eq!(FileFormat::from_path(Path::new("a/theme.TOML")), FileFormat::Toml);
        assert_eq!(FileFormat::from_path(Path::new("theme.json")), FileFormat::Json);
        assert_eq!(FileFormat::from_path(Path::new("theme")), FileFormat::Json);
    }

    #[test]
    fn parses_toml_preset() {
        let text = r##"
            name = "forest"
            primary = "#15803d"
            backgroundDark = "#052e16"

            [colors.dark.primary]
            hover = "#22c55e"

            [colors.dark.sidebar]
            background = "#022c22"
        "##;
        let preset = parse_preset(text, FileFormat::Toml, Path::new("forest.toml")).unwrap();
        assert_eq!(preset.name, "forest");
        assert_eq!(preset.background_dark.as_deref(), Some("#052e16"));
        let dark = preset.colors.dark.unwrap();
        assert_eq!(dark.primary.hover.as_deref(), Some("#22c55e"));
        assert_eq!(dark.sidebar.background.as_deref(), Some("#022c22"));
    }

    #[test]
    fn reports_json_errors_with_path() {
        let err = parse_preset("{", FileFormat::Json, Path::new("bad.json")).unwrap_err();
        assert!(err.to_string().starts_with("invalid JSON in bad.json"));
    }

    #[test]
    fn resolves_builtin_and_unknown_names() {
        assert_eq!(resolve_theme(None, "rose").unwrap().name, "rose");
        assert!(matches!(
            resolve_theme(None, "nope"),
            Err(ConfigError::UnknownTheme(_))
        ));
    }

    #[test]
    fn missing_base_is_empty_object() {
        assert_eq!(load_base(None).unwrap(), serde_json::json!({}));
        assert!(matches!(
            load_base(Some(Path::new("/nonexistent/base.json"))),
            Err(ConfigError::Io { .. })
        ));
    }
}
