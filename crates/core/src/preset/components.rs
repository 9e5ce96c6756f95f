use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::adapter::ColorAdapter;
use crate::merge::{StylePath, Styles};

/// Overall control density.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Size {
    Small,
    #[default]
    Medium,
    Large,
}

impl Size {
    fn scale(self) -> f32 {
        match self {
            Self::Small => 0.875,
            Self::Medium => 1.0,
            Self::Large => 1.125,
        }
    }
}

impl std::str::FromStr for Size {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "small" | "sm" => Ok(Self::Small),
            "medium" | "md" => Ok(Self::Medium),
            "large" | "lg" => Ok(Self::Large),
            other => Err(format!("unknown size: {other}")),
        }
    }
}

/// User-facing size preferences that feed component tokens.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SizeSettings {
    pub size: Size,
    /// Horizontal control padding in rem.
    pub padding: f32,
    /// Corner radius in rem.
    pub rounded: f32,
    /// Base font size in px.
    pub font_size: f32,
}

impl Default for SizeSettings {
    fn default() -> Self {
        Self {
            size: Size::Medium,
            padding: 0.75,
            rounded: 0.375,
            font_size: 14.0,
        }
    }
}

/// CSS lengths derived from [`SizeSettings`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeTokens {
    pub padding_x: String,
    pub padding_y: String,
    pub border_radius: String,
    pub font_size: String,
    pub font_size_sm: String,
    pub font_size_lg: String,
    pub control_size: String,
}

impl From<&SizeSettings> for SizeTokens {
    fn from(settings: &SizeSettings) -> Self {
        let scale = settings.size.scale();
        let padding = settings.padding.max(0.0) * scale;
        let font = settings.font_size.max(1.0) * scale;
        Self {
            padding_x: rem(padding),
            padding_y: rem(padding * 0.5),
            border_radius: rem(settings.rounded.max(0.0)),
            font_size: px(font),
            font_size_sm: px(font * 0.875),
            font_size_lg: px(font * 1.125),
            control_size: rem(1.25 * scale),
        }
    }
}

fn rem(value: f32) -> String {
    format!("{}rem", trim_number(value))
}

fn px(value: f32) -> String {
    format!("{}px", trim_number(value.round()))
}

fn trim_number(value: f32) -> String {
    let formatted = format!("{value:.4}");
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Per-component overrides as exact-path styles.
pub fn component_overrides(tokens: &SizeTokens, colors: &ColorAdapter) -> Styles {
    let mut styles = Styles::new();

    styles = at(
        styles,
        &["components", "button", "root"],
        json!({
            "paddingX": tokens.padding_x,
            "paddingY": tokens.padding_y,
            "borderRadius": tokens.border_radius,
            "sm": { "fontSize": tokens.font_size_sm },
            "lg": { "fontSize": tokens.font_size_lg },
        }),
    );
    for scheme in ["light", "dark"] {
        styles = at(
            styles,
            &["components", "button", "colorScheme", scheme, "root", "primary"],
            json!({
                "background": colors.primary_color(),
                "hoverBackground": colors.primary_hover_color(),
                "activeBackground": colors.primary_hover_color(),
                "borderColor": colors.primary_color(),
                "hoverBorderColor": colors.primary_hover_color(),
                "color": colors.primary_foreground(),
                "hoverColor": colors.primary_foreground(),
                "focusRing": { "color": colors.ring_color() },
            }),
        );
    }

    styles = at(
        styles,
        &["components", "checkbox", "root"],
        json!({
            "width": tokens.control_size,
            "height": tokens.control_size,
            "borderRadius": tokens.border_radius,
            "checkedBackground": colors.primary_color(),
            "checkedHoverBackground": colors.primary_hover_color(),
        }),
    );
    styles = at(
        styles,
        &["components", "checkbox", "icon"],
        json!({ "checkedColor": colors.primary_foreground() }),
    );

    let cell_padding = format!("{} {}", tokens.padding_y, tokens.padding_x);
    styles = at(
        styles,
        &["components", "datatable", "headerCell"],
        json!({ "padding": cell_padding, "background": colors.bg_100() }),
    );
    styles = at(
        styles,
        &["components", "datatable", "bodyCell"],
        json!({ "padding": cell_padding, "borderColor": colors.border_color() }),
    );
    styles = at(
        styles,
        &["components", "datatable", "row"],
        json!({
            "hoverBackground": colors.bg_100(),
            "selectedBackground": colors.primary_light(),
            "selectedColor": colors.primary_light_foreground(),
        }),
    );

    styles = at(
        styles,
        &["components", "toggleswitch", "root"],
        json!({
            "borderRadius": "9999px",
            "checkedBackground": colors.primary_color(),
            "checkedHoverBackground": colors.primary_hover_color(),
        }),
    );
    styles = at(
        styles,
        &["components", "toggleswitch", "handle"],
        json!({ "size": tokens.control_size }),
    );

    for component in ["inputtext", "select"] {
        styles = at(
            styles,
            &["components", component, "root"],
            json!({
                "paddingX": tokens.padding_x,
                "paddingY": tokens.padding_y,
                "borderRadius": tokens.border_radius,
                "focusBorderColor": colors.ring_color(),
            }),
        );
    }

    at(
        styles,
        &["components", "dialog", "root"],
        json!({
            "borderRadius": tokens.border_radius,
            "background": colors.card_color(),
            "color": colors.card_foreground(),
        }),
    )
}

fn at(styles: Styles, segments: &[&str], value: Value) -> Styles {
    match StylePath::new(segments.iter().copied()) {
        Ok(path) => styles.with_path(path, value),
        Err(err) => {
            tracing::warn!(%err, "skipping component override");
            styles
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn medium_tokens() {
        let tokens = SizeTokens::from(&SizeSettings::default());
        assert_eq!(tokens.padding_x, "0.75rem");
        assert_eq!(tokens.padding_y, "0.375rem");
        assert_eq!(tokens.border_radius, "0.375rem");
        assert_eq!(tokens.font_size, "14px");
        assert_eq!(tokens.control_size, "1.25rem");
    }

    #[test]
    fn size_scales_padding_and_font() {
        let settings = SizeSettings {
            size: Size::Large,
            padding: 1.0,
            rounded: 0.5,
            font_size: 16.0,
        };
        let tokens = SizeTokens::from(&settings);
        assert_eq!(tokens.padding_x, "1.125rem");
        assert_eq!(tokens.font_size, "18px");
        assert_eq!(tokens.border_radius, "0.5rem");
    }

    #[test]
    fn parses_size_names() {
        assert_eq!("SM".parse::<Size>(), Ok(Size::Small));
        assert_eq!("large".parse::<Size>(), Ok(Size::Large));
        assert!("huge".parse::<Size>().is_err());
    }

    #[test]
    fn overrides_target_component_paths() {
        let tokens = SizeTokens::from(&SizeSettings::default());
        let styles = component_overrides(&tokens, &ColorAdapter);
        let paths: Vec<String> = styles
            .iter()
            .filter_map(|(key, _)| match key {
                crate::merge::StyleKey::Path(path) => Some(path.to_string()),
                crate::merge::StyleKey::Name(_) => None,
            })
            .collect();
        assert_eq!(paths.len(), styles.len());
        assert!(paths.contains(&"components.button.root".to_string()));
        assert!(paths.contains(&"components.button.colorScheme.dark.root.primary".to_string()));
        assert!(paths.contains(&"components.toggleswitch.handle".to_string()));
        assert!(paths.contains(&"components.select.root".to_string()));
    }
}
