use hueprint_protocol::ThemeCssVars;

use crate::metadata::is_theme_var;

/// An element's inline style, seen as a whole `cssText` string.
///
/// The browser implementation wraps `CssStyleDeclaration`; [`InlineStyle`]
/// is the in-memory one.
pub trait StyleTarget {
    fn css_text(&self) -> String;
    fn set_css_text(&mut self, css_text: &str);
}

/// In-memory inline style. Counts `cssText` writes so callers can check
/// that a theme switch is a single mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineStyle {
    declarations: Vec<(String, String)>,
    writes: usize,
}

impl InlineStyle {
    pub fn parse(css_text: &str) -> Self {
        Self {
            declarations: parse_declarations(css_text),
            writes: 0,
        }
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|(name, _)| name == property)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Number of mutations applied so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl StyleTarget for InlineStyle {
    fn css_text(&self) -> String {
        render_declarations(
            self.declarations
                .iter()
                .map(|(name, value)| (name.as_str(), value.as_str())),
        )
    }

    fn set_css_text(&mut self, css_text: &str) {
        self.declarations = parse_declarations(css_text);
        self.writes += 1;
    }
}

/// Split `a: b; c: d` into ordered `(property, value)` pairs. Entries
/// without a colon or with an empty property are skipped; a repeated
/// property keeps its last value at its first position.
///
/// `;` only ends a declaration outside parentheses and quotes, so values
/// like `url(data:image/png;base64,...)` come through intact.
pub fn parse_declarations(css_text: &str) -> Vec<(String, String)> {
    let mut declarations: Vec<(String, String)> = Vec::new();
    for entry in split_declarations(css_text) {
        let Some((name, value)) = entry.split_once(':') else {
            continue;
        };
        let (name, value) = (name.trim(), value.trim());
        if name.is_empty() {
            continue;
        }
        match declarations.iter_mut().find(|(existing, _)| existing == name) {
            Some((_, slot)) => *slot = value.to_string(),
            None => declarations.push((name.to_string(), value.to_string())),
        }
    }
    declarations
}

fn split_declarations(css_text: &str) -> Vec<&str> {
    let mut entries = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut start = 0;
    for (index, c) in css_text.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match (quote, c) {
            (_, '\\') => escaped = true,
            (Some(open), c) if c == open => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '(') => depth += 1,
            (None, ')') => depth = depth.saturating_sub(1),
            (None, ';') if depth == 0 => {
                entries.push(&css_text[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }
    entries.push(&css_text[start..]);
    entries
}

fn render_declarations<'a>(declarations: impl Iterator<Item = (&'a str, &'a str)>) -> String {
    declarations
        .map(|(name, value)| format!("{name}: {value};"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Write `vars` onto `target` in one `cssText` assignment.
///
/// Inline properties that are not theme variables (transition durations,
/// layout vars set at runtime, ...) are kept in their original order ahead
/// of the theme block. Stale theme variables are dropped.
pub fn apply_theme<T: StyleTarget + ?Sized>(target: &mut T, vars: &ThemeCssVars) {
    let current = parse_declarations(&target.css_text());
    let preserved: Vec<(String, String)> = current
        .into_iter()
        .filter(|(name, _)| !is_theme_var(name) && !vars.contains(name))
        .collect();

    let css_text = render_declarations(
        preserved
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .chain(vars.iter()),
    );
    target.set_css_text(&css_text);
    tracing::debug!(
        vars = vars.len(),
        preserved = preserved.len(),
        "applied theme to inline style"
    );
}
