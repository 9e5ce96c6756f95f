//! Deep-merge utilities for nested preset objects.
//!
//! Third-party presets carry thousands of tokens; these helpers only ever
//! write the keys a caller asks for and leave every other branch alone.
//!
//! A [`Styles`] list holds two kinds of key:
//!
//! - [`StyleKey::Name`] matches that key name at any depth,
//! - [`StyleKey::Path`] matches one exact location and is created if the
//!   target does not have it.

pub mod path;

pub use path::{PathError, StylePath};

use std::fmt;

use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleKey {
    Name(String),
    Path(StylePath),
}

/// Ordered `(key, value)` pairs to write into a target.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Styles {
    entries: Vec<(StyleKey, Value)>,
}

impl Styles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>, value: Value) -> Self {
        self.entries.push((StyleKey::Name(name.into()), value));
        self
    }

    pub fn with_path(mut self, path: StylePath, value: Value) -> Self {
        self.entries.push((StyleKey::Path(path), value));
        self
    }

    pub fn push(&mut self, key: StyleKey, value: Value) {
        self.entries.push((key, value));
    }

    /// Build from a JSON object: keys containing `.` are paths, the rest are
    /// names. A malformed path is logged and skipped.
    pub fn from_object(map: &Map<String, Value>) -> Self {
        let mut styles = Self::new();
        for (key, value) in map {
            if !key.contains('.') {
                styles.push(StyleKey::Name(key.clone()), value.clone());
                continue;
            }
            match StylePath::parse(key) {
                Ok(path) => styles.push(StyleKey::Path(path), value.clone()),
                Err(err) => tracing::warn!(%err, "ignoring style path"),
            }
        }
        styles
    }

    /// Like [`Styles::from_object`]; anything but an object yields no styles.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(map) => Self::from_object(map),
            other => {
                tracing::warn!(kind = json_kind(other), "styles must be an object");
                Self::new()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&StyleKey, &Value)> {
        self.entries.iter().map(|(key, value)| (key, value))
    }

    pub fn extend(&mut self, other: Styles) {
        self.entries.extend(other.entries);
    }
}

/// What a matcher or transformer sees for a candidate key.
#[derive(Debug)]
pub struct MatchContext<'a> {
    /// Key in the target being visited.
    pub key: &'a str,
    /// Full path of that key, root first.
    pub path: &'a [String],
    /// The style entry being tested.
    pub style_key: &'a StyleKey,
}

pub type Matcher = Box<dyn Fn(&MatchContext<'_>) -> bool>;
pub type Transformer = Box<dyn Fn(&MatchContext<'_>, &Value) -> Value>;

pub struct MergeOptions {
    /// Merge object values into existing objects instead of replacing them.
    pub deep_merge: bool,
    /// Write over values that are already set (non-null).
    pub override_existing: bool,
    /// Replaces the default name/path matching.
    pub matcher: Option<Matcher>,
    /// Derives the value actually written.
    pub transformer: Option<Transformer>,
}

impl MergeOptions {
    /// Replace matched values instead of merging into them.
    pub fn shallow(mut self) -> Self {
        self.deep_merge = false;
        self
    }

    /// Only fill keys that are missing or null.
    pub fn keep_existing(mut self) -> Self {
        self.override_existing = false;
        self
    }

    pub fn with_matcher(mut self, matcher: impl Fn(&MatchContext<'_>) -> bool + 'static) -> Self {
        self.matcher = Some(Box::new(matcher));
        self
    }

    pub fn with_transformer(
        mut self,
        transformer: impl Fn(&MatchContext<'_>, &Value) -> Value + 'static,
    ) -> Self {
        self.transformer = Some(Box::new(transformer));
        self
    }

    fn is_match(&self, ctx: &MatchContext<'_>) -> bool {
        match &self.matcher {
            Some(matcher) => matcher(ctx),
            None => match ctx.style_key {
                StyleKey::Name(name) => name == ctx.key,
                StyleKey::Path(path) => path.matches(ctx.path),
            },
        }
    }

    fn write(&self, slot: &mut Value, value: &Value, ctx: &MatchContext<'_>) {
        let value = match &self.transformer {
            Some(transform) => transform(ctx, value),
            None => value.clone(),
        };
        if self.deep_merge && slot.is_object() && value.is_object() {
            merge_values(slot, value);
        } else {
            *slot = value;
        }
    }
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            deep_merge: true,
            override_existing: true,
            matcher: None,
            transformer: None,
        }
    }
}

impl fmt::Debug for MergeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MergeOptions")
            .field("deep_merge", &self.deep_merge)
            .field("override_existing", &self.override_existing)
            .field("matcher", &self.matcher.is_some())
            .field("transformer", &self.transformer.is_some())
            .finish()
    }
}

/// Merge `styles` into a copy of `target`; `target` itself is untouched.
///
/// `serde_json::Value` only holds plain data, so the clone is exact. There
/// are no functions, dates, or cycles to lose along the way.
pub fn deep_merge_styles(target: &Value, styles: &Styles, options: &MergeOptions) -> Value {
    let mut merged = target.clone();
    deep_merge_styles_in_place(&mut merged, styles, options);
    merged
}

/// Merge `styles` into `target` directly. Returns the number of writes.
///
/// Every key of every object is tested against every style entry. On a
/// match the value is written (merged into existing objects when
/// `deep_merge` is on) and the subtree below it is not visited further.
/// Path entries that matched nowhere are created afterwards.
pub fn deep_merge_styles_in_place(
    target: &mut Value,
    styles: &Styles,
    options: &MergeOptions,
) -> usize {
    let mut matched = vec![false; styles.len()];
    let mut path = Vec::new();
    let mut writes = walk(target, &mut path, styles, options, &mut matched);

    for ((key, value), hit) in styles.iter().zip(&matched) {
        if *hit {
            continue;
        }
        let StyleKey::Path(style_path) = key else {
            continue;
        };
        let ctx = MatchContext {
            key: style_path.leaf(),
            path: style_path.segments(),
            style_key: key,
        };
        if style_path.update(target, |slot| options.write(slot, value, &ctx)) {
            writes += 1;
        }
    }

    tracing::trace!(writes, entries = styles.len(), "merged styles");
    writes
}

fn walk(
    node: &mut Value,
    path: &mut Vec<String>,
    styles: &Styles,
    options: &MergeOptions,
    matched: &mut [bool],
) -> usize {
    let mut writes = 0;
    match node {
        Value::Object(map) => {
            for (key, child) in map.iter_mut() {
                path.push(key.clone());
                let mut written = false;
                for ((style_key, value), hit) in styles.iter().zip(matched.iter_mut()) {
                    let ctx = MatchContext {
                        key: key.as_str(),
                        path: path.as_slice(),
                        style_key,
                    };
                    if !options.is_match(&ctx) {
                        continue;
                    }
                    *hit = true;
                    if !options.override_existing && !child.is_null() {
                        continue;
                    }
                    options.write(child, value, &ctx);
                    written = true;
                    writes += 1;
                }
                if !written {
                    writes += walk(child, path, styles, options, matched);
                }
                path.pop();
            }
        }
        Value::Array(items) => {
            for (index, item) in items.iter_mut().enumerate() {
                path.push(index.to_string());
                writes += walk(item, path, styles, options, matched);
                path.pop();
            }
        }
        _ => {}
    }
    writes
}

/// Recursively merge `source` into `target`. Objects merge key by key;
/// everything else replaces.
pub fn merge_values(target: &mut Value, source: Value) {
    match (target, source) {
        (Value::Object(dst), Value::Object(src)) => {
            for (key, value) in src {
                let nested = value.is_object() && dst.get(&key).is_some_and(Value::is_object);
                match dst.get_mut(&key) {
                    Some(existing) if nested => merge_values(existing, value),
                    _ => {
                        dst.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

/// Overwrite `obj[key_to_find][sub_key]` on every object in the tree where
/// `key_to_find` maps to an object that already has `sub_key`. Returns the
/// number of replacements.
///
/// Used for values such as `mask.background` that show up at unpredictable
/// depths across many component subtrees.
pub fn deep_find_and_replace_property(
    target: &mut Value,
    key_to_find: &str,
    sub_key: &str,
    new_value: &Value,
) -> usize {
    match target {
        Value::Object(map) => {
            let mut replaced = 0;
            if let Some(Value::Object(inner)) = map.get_mut(key_to_find)
                && inner.contains_key(sub_key)
            {
                inner.insert(sub_key.to_string(), new_value.clone());
                replaced += 1;
            }
            for child in map.values_mut() {
                replaced += deep_find_and_replace_property(child, key_to_find, sub_key, new_value);
            }
            replaced
        }
        Value::Array(items) => items
            .iter_mut()
            .map(|item| deep_find_and_replace_property(item, key_to_find, sub_key, new_value))
            .sum(),
        _ => 0,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
