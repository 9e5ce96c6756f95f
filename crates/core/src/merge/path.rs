use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("style path has no segments")]
    Empty,
    #[error("style path {0:?} has an empty segment")]
    EmptySegment(String),
}

/// A validated location inside a nested preset object.
///
/// Segments are checked once at construction, so traversal never has to
/// deal with `"a..b"` style typos.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StylePath(Vec<String>);

impl StylePath {
    pub fn new<I, S>(segments: I) -> Result<Self, PathError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            return Err(PathError::Empty);
        }
        if segments.iter().any(|s| s.is_empty()) {
            return Err(PathError::EmptySegment(segments.join(".")));
        }
        Ok(Self(segments))
    }

    /// Parse `"components.button.root.background"`.
    pub fn parse(dotted: &str) -> Result<Self, PathError> {
        if dotted.is_empty() {
            return Err(PathError::Empty);
        }
        if dotted.split('.').any(str::is_empty) {
            return Err(PathError::EmptySegment(dotted.to_string()));
        }
        Ok(Self(dotted.split('.').map(str::to_string).collect()))
    }

    /// A longer path below this one.
    pub fn join(&self, segment: impl Into<String>) -> Result<Self, PathError> {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self::new(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// The final segment (the key that gets written).
    pub fn leaf(&self) -> &str {
        self.0.last().map(String::as_str).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether this path is exactly `path`.
    pub fn matches(&self, path: &[String]) -> bool {
        self.0 == path
    }

    /// Look up the leaf. Segments index into arrays as decimal positions.
    pub fn get<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        let mut current = root;
        for segment in &self.0 {
            current = match current {
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                other => other.get(segment.as_str())?,
            };
        }
        Some(current)
    }

    pub fn get_mut<'a>(&self, root: &'a mut Value) -> Option<&'a mut Value> {
        let mut current = root;
        for segment in &self.0 {
            current = match current {
                Value::Array(items) => items.get_mut(segment.parse::<usize>().ok()?)?,
                other => other.get_mut(segment.as_str())?,
            };
        }
        Some(current)
    }

    /// Set the leaf, creating intermediate objects. Scalar intermediates are
    /// replaced by objects; arrays are only descended into. Returns whether
    /// the leaf was written.
    pub fn set(&self, root: &mut Value, value: Value) -> bool {
        self.update(root, |slot| *slot = value)
    }

    /// Run `f` on the leaf slot (`null` when newly created), creating
    /// intermediate objects on the way.
    ///
    /// An array is never replaced: a segment landing on one must be an
    /// in-range index, otherwise nothing is written and `false` is returned.
    pub fn update(&self, root: &mut Value, f: impl FnOnce(&mut Value)) -> bool {
        update_at(root, &self.0, f)
    }
}

fn update_at(node: &mut Value, segments: &[String], f: impl FnOnce(&mut Value)) -> bool {
    let Some((head, rest)) = segments.split_first() else {
        f(node);
        return true;
    };
    match node {
        Value::Object(map) => update_at(map.entry(head.as_str()).or_insert(Value::Null), rest, f),
        Value::Array(items) => {
            let len = items.len();
            match head.parse::<usize>().ok().and_then(|index| items.get_mut(index)) {
                Some(item) => update_at(item, rest, f),
                None => {
                    tracing::warn!(segment = %head, len, "style path does not index into array");
                    false
                }
            }
        }
        scalar => {
            *scalar = Value::Object(Map::new());
            update_at(scalar, segments, f)
        }
    }
}

impl fmt::Display for StylePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

impl FromStr for StylePath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
