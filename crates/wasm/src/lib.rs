mod console;

use std::sync::{LazyLock, Mutex};

use hueprint_core::engine::{self, StyleTarget};
use hueprint_core::metadata;
use hueprint_core::preset::{self, FifoCache, PresetInputs};
use hueprint_protocol::{ThemeCssVars, ThemeMode, ThemePreset};
use serde_json::Value;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::CssStyleDeclaration;

static PRESETS: LazyLock<Mutex<FifoCache>> = LazyLock::new(|| Mutex::new(FifoCache::default()));

/// Inline style of an element, written through `cssText`.
struct DeclarationTarget(CssStyleDeclaration);

impl StyleTarget for DeclarationTarget {
    fn css_text(&self) -> String {
        self.0.css_text()
    }

    fn set_css_text(&mut self, css_text: &str) {
        self.0.set_css_text(css_text);
    }
}

/// Route `tracing` events (color fallbacks, dropped style paths) to the
/// browser console. Runs once when the module is instantiated.
#[wasm_bindgen(start)]
pub fn start() {
    console::init();
}

fn js_err(e: impl std::fmt::Display) -> JsError {
    JsError::new(&e.to_string())
}

fn parse_theme(preset_json: &str) -> Result<ThemePreset, JsError> {
    serde_json::from_str(preset_json).map_err(js_err)
}

fn derive(preset_json: &str, is_dark: bool) -> Result<ThemeCssVars, JsError> {
    let preset = parse_theme(preset_json)?;
    Ok(engine::generate_theme_vars(&preset, ThemeMode::from_dark(is_dark)))
}

fn root_style() -> Result<CssStyleDeclaration, JsError> {
    let root = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.document_element())
        .ok_or_else(|| JsError::new("no document root element"))?;
    let root = root
        .dyn_into::<web_sys::HtmlElement>()
        .map_err(|_| JsError::new("document root is not an HTML element"))?;
    Ok(root.style())
}

/// Derive the theme variables for one mode. Returns a JSON object of
/// `--name` to `"R G B"`.
#[wasm_bindgen]
pub fn generate_theme_vars(preset_json: &str, is_dark: bool) -> Result<String, JsError> {
    let vars = derive(preset_json, is_dark)?;
    serde_json::to_string(&vars).map_err(js_err)
}

/// Derive and write the theme variables onto `<html>` in one `cssText`
/// assignment.
#[wasm_bindgen]
pub fn apply_theme(preset_json: &str, is_dark: bool) -> Result<(), JsError> {
    let vars = derive(preset_json, is_dark)?;
    let mut target = DeclarationTarget(root_style()?);
    engine::apply_theme(&mut target, &vars);
    Ok(())
}

/// Assemble a component preset from a base preset and the inputs
/// `{ theme, sizes }`. Results are memoized per input set.
#[wasm_bindgen]
pub fn build_preset(base_json: &str, inputs_json: &str) -> Result<String, JsError> {
    let base: Value = serde_json::from_str(base_json).map_err(js_err)?;
    let inputs: PresetInputs = serde_json::from_str(inputs_json).map_err(js_err)?;
    let mut cache = PRESETS
        .lock()
        .map_err(|_| JsError::new("preset cache lock poisoned"))?;
    let preset = preset::build_preset(&base, &inputs, &mut *cache);
    serde_json::to_string(preset.as_ref()).map_err(js_err)
}

/// Names of every variable the engine emits, as a JSON array.
#[wasm_bindgen]
pub fn theme_var_names() -> Result<String, JsError> {
    serde_json::to_string(&metadata::theme_var_names()).map_err(js_err)
}
