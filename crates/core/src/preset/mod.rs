//! Component-library preset assembly.
//!
//! Grafts the engine's variables and the size tokens onto a clone of a
//! base preset (for example PrimeVue's Aura). Every color written is a
//! `var(--…)` reference, so the assembled preset only has to be rebuilt
//! when its inputs change, not on every light/dark toggle.

pub mod adapter;
pub mod cache;
pub mod components;

pub use adapter::{ColorAdapter, SCALE_STEPS};
pub use cache::{DEFAULT_CACHE_CAPACITY, FifoCache, NoCache, PresetCache};
pub use components::{Size, SizeSettings, SizeTokens, component_overrides};

use std::collections::BTreeMap;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::merge::{
    MergeOptions, StylePath, Styles, deep_find_and_replace_property, deep_merge_styles_in_place,
};

/// Overlay color written to every `mask.background` in the preset.
pub const MASK_BACKGROUND: &str = "rgb(0 0 0 / 0.4)";

/// Everything preset assembly depends on.
///
/// The cache key is this struct serialized, so adding a field here is all
/// it takes for the cache to distinguish on it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PresetInputs {
    /// Active theme name. Themes may ship their own base preset, so
    /// switching themes must not reuse another theme's result.
    pub theme: String,
    pub sizes: SizeSettings,
}

impl PresetInputs {
    pub fn new(theme: impl Into<String>, sizes: SizeSettings) -> Self {
        Self {
            theme: theme.into(),
            sizes,
        }
    }

    /// Key for a preset built from `base` with these inputs: a fingerprint
    /// of the serialized base followed by the serialized inputs.
    pub fn cache_key(&self, base: &Value) -> String {
        let inputs = serde_json::to_string(self).unwrap_or_else(|_| format!("{self:?}"));
        format!("{:016x}:{inputs}", fingerprint(base))
    }
}

/// Assemble a preset, reusing a cached result when the inputs match.
///
/// `base` is never modified. The returned preset is `base` with:
/// - `semantic.primary` set to a 50–950 scale,
/// - `semantic.colorScheme.{light,dark}` surface and state tokens,
/// - per-component size and color overrides,
/// - every `mask.background` replaced by [`MASK_BACKGROUND`].
pub fn build_preset(
    base: &Value,
    inputs: &PresetInputs,
    cache: &mut dyn PresetCache,
) -> Arc<Value> {
    let key = inputs.cache_key(base);
    if let Some(hit) = cache.get(&key) {
        tracing::debug!(theme = %inputs.theme, "preset cache hit");
        return hit;
    }

    let colors = ColorAdapter;
    let tokens = SizeTokens::from(&inputs.sizes);
    let mut styles = semantic_styles(&colors, &tokens);
    styles.extend(component_overrides(&tokens, &colors));

    let mut preset = base.clone();
    let writes = deep_merge_styles_in_place(&mut preset, &styles, &MergeOptions::default());
    let masks = deep_find_and_replace_property(
        &mut preset,
        "mask",
        "background",
        &Value::String(MASK_BACKGROUND.to_string()),
    );
    tracing::debug!(theme = %inputs.theme, writes, masks, "assembled preset");

    let preset = Arc::new(preset);
    cache.insert(key, Arc::clone(&preset));
    preset
}

fn semantic_styles(colors: &ColorAdapter, tokens: &SizeTokens) -> Styles {
    let scheme = color_scheme_tokens(colors);
    let mut entries: Vec<(Vec<&str>, Value)> = vec![
        (
            vec!["semantic", "primary"],
            scale_object(colors.color_scale("primary")),
        ),
        (
            vec!["semantic", "focusRing"],
            json!({
                "width": "2px",
                "style": "solid",
                "color": colors.ring_color(),
                "offset": "2px",
            }),
        ),
        (
            vec!["semantic", "formField"],
            json!({
                "paddingX": tokens.padding_x,
                "paddingY": tokens.padding_y,
                "borderRadius": tokens.border_radius,
                "fontSize": tokens.font_size,
            }),
        ),
    ];
    for mode in ["light", "dark"] {
        entries.push((vec!["semantic", "colorScheme", mode], scheme.clone()));
    }

    entries
        .into_iter()
        .fold(Styles::new(), |styles, (segments, value)| {
            match StylePath::new(segments) {
                Ok(path) => styles.with_path(path, value),
                Err(err) => {
                    tracing::warn!(%err, "skipping semantic token");
                    styles
                }
            }
        })
}

/// Tokens shared by both schemes; the variables behind them switch.
fn color_scheme_tokens(colors: &ColorAdapter) -> Value {
    json!({
        "surface": scale_object(colors.surface_scale()),
        "primary": {
            "color": colors.primary_color(),
            "contrastColor": colors.primary_foreground(),
            "hoverColor": colors.primary_hover_color(),
            "activeColor": colors.primary_hover_color(),
        },
        "highlight": {
            "background": colors.primary_light(),
            "focusBackground": colors.token_alpha("primary-light", 0.8),
            "color": colors.primary_light_foreground(),
            "focusColor": colors.primary_light_foreground(),
        },
        "formField": {
            "background": colors.background_color(),
            "disabledBackground": colors.bg_200(),
            "borderColor": colors.token("input"),
            "hoverBorderColor": colors.primary_color(),
            "focusBorderColor": colors.ring_color(),
            "color": colors.foreground_color(),
            "placeholderColor": colors.muted_foreground(),
        },
        "text": {
            "color": colors.foreground_color(),
            "mutedColor": colors.muted_foreground(),
            "hoverColor": colors.accent_color(),
        },
        "content": {
            "background": colors.card_color(),
            "hoverBackground": colors.bg_100(),
            "borderColor": colors.border_color(),
            "color": colors.card_foreground(),
        },
        "overlay": {
            "popover": {
                "background": colors.token("popover"),
                "color": colors.token("popover-foreground"),
            },
            "modal": {
                "background": colors.card_color(),
                "color": colors.card_foreground(),
            },
        },
    })
}

/// Hash of the compact JSON form. Object keys serialize in sorted order,
/// so equal values always hash equally.
fn fingerprint(value: &Value) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.to_string().hash(&mut hasher);
    hasher.finish()
}

fn scale_object(scale: BTreeMap<u16, String>) -> Value {
    let map: Map<String, Value> = scale
        .into_iter()
        .map(|(step, value)| (step.to_string(), Value::String(value)))
        .collect();
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aura_like() -> Value {
        json!({
            "primitive": { "blue": { "500": "#3b82f6" } },
            "semantic": {
                "primary": { "500": "{blue.500}" },
                "transitionDuration": "0.2s",
            },
            "components": {
                "button": { "root": { "paddingX": "1rem", "iconOnlyWidth": "2.5rem" } },
                "dialog": { "root": { "background": "x" }, "mask": { "background": "black" } },
            }
        })
    }

    #[test]
    fn leaves_base_untouched_and_unrelated_tokens_intact() {
        let base = aura_like();
        let preset = build_preset(&base, &PresetInputs::default(), &mut NoCache);
        assert_eq!(base, aura_like());
        assert_eq!(preset["primitive"]["blue"]["500"], json!("#3b82f6"));
        assert_eq!(preset["semantic"]["transitionDuration"], json!("0.2s"));
        assert_eq!(
            preset["components"]["button"]["root"]["iconOnlyWidth"],
            json!("2.5rem")
        );
    }

    #[test]
    fn injects_scales_and_size_tokens() {
        let preset = build_preset(&aura_like(), &PresetInputs::default(), &mut NoCache);
        assert_eq!(preset["semantic"]["primary"]["500"], json!("rgb(var(--primary))"));
        assert_eq!(preset["semantic"]["primary"]["600"], json!("rgb(var(--primary-hover))"));
        assert_eq!(preset["components"]["button"]["root"]["paddingX"], json!("0.75rem"));
        assert_eq!(
            preset["semantic"]["colorScheme"]["dark"]["surface"]["0"],
            json!("rgb(var(--background))")
        );
        assert_eq!(
            preset["components"]["dialog"]["mask"]["background"],
            json!(MASK_BACKGROUND)
        );
    }

    #[test]
    fn builds_into_empty_base() {
        let preset = build_preset(&json!({}), &PresetInputs::default(), &mut NoCache);
        assert!(preset["components"]["checkbox"]["root"]["width"].is_string());
        assert!(preset["semantic"]["focusRing"]["color"].is_string());
    }

    #[test]
    fn cache_returns_same_allocation_for_same_inputs() {
        let mut cache = FifoCache::default();
        let inputs = PresetInputs::new("ocean", SizeSettings::default());
        let first = build_preset(&aura_like(), &inputs, &mut cache);
        let second = build_preset(&aura_like(), &inputs, &mut cache);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);

        let larger = PresetInputs::new(
            "ocean",
            SizeSettings {
                size: Size::Large,
                ..SizeSettings::default()
            },
        );
        let third = build_preset(&aura_like(), &larger, &mut cache);
        assert!(!Arc::ptr_eq(&first, &third));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn every_input_field_changes_the_key() {
        let preset = aura_like();
        let base = PresetInputs::default();
        let mut other = base.clone();
        other.theme = "rose".to_string();
        assert_ne!(base.cache_key(&preset), other.cache_key(&preset));

        let mut other = base.clone();
        other.sizes.rounded = 1.0;
        assert_ne!(base.cache_key(&preset), other.cache_key(&preset));

        let mut other = base.clone();
        other.sizes.font_size = 15.0;
        assert_ne!(base.cache_key(&preset), other.cache_key(&preset));

        assert_ne!(base.cache_key(&preset), base.cache_key(&json!({})));
        assert_eq!(base.cache_key(&preset), base.cache_key(&aura_like()));
    }

    #[test]
    fn different_bases_never_share_a_cached_result() {
        let mut cache = FifoCache::default();
        let inputs = PresetInputs::default();
        let a = build_preset(&json!({ "marker": "A" }), &inputs, &mut cache);
        let b = build_preset(&json!({ "marker": "B" }), &inputs, &mut cache);
        assert_eq!(a["marker"], json!("A"));
        assert_eq!(b["marker"], json!("B"));
        assert_eq!(cache.len(), 2);

        let again = build_preset(&json!({ "marker": "A" }), &inputs, &mut cache);
        assert!(Arc::ptr_eq(&a, &again));
    }
}
