use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Resolved theme variables: `--name` → `"R G B"`.
///
/// Values are space-separated channel triplets so consumers can write
/// `rgb(var(--primary) / 0.5)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThemeCssVars(BTreeMap<String, String>);

impl ThemeCssVars {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

}

impl FromIterator<(String, String)> for ThemeCssVars {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ThemeCssVars {
    type Item = (&'a String, &'a String);
    type IntoIter = std::collections::btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iterates_in_name_order() {
        let mut vars = ThemeCssVars::new();
        vars.insert("--primary", "59 130 246");
        vars.insert("--background", "255 255 255");
        let names: Vec<&str> = vars.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["--background", "--primary"]);
    }

    #[test]
    fn serializes_as_flat_map() {
        let vars: ThemeCssVars = [("--ring".to_string(), "1 2 3".to_string())]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&vars).unwrap();
        assert_eq!(json, r#"{"--ring":"1 2 3"}"#);
    }
}
