use serde::Serialize;

/// Shape of a color family: which CSS variables it expands to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FamilyKind {
    /// One token: `--name`.
    Single,
    /// `--name` and `--name-foreground`.
    Pair,
    /// Base, hover and light tint, each with a foreground.
    Interactive,
    /// The sidebar block: surface, text, its own primary/accent, border, ring.
    Sidebar,
}

impl FamilyKind {
    /// Variable suffixes in emission order. `""` is the `DEFAULT` slot.
    pub const fn suffixes(self) -> &'static [&'static str] {
        match self {
            Self::Single => &[""],
            Self::Pair => &["", "-foreground"],
            Self::Interactive => &[
                "",
                "-foreground",
                "-hover",
                "-hover-foreground",
                "-light",
                "-light-foreground",
            ],
            Self::Sidebar => &[
                "",
                "-foreground",
                "-primary",
                "-primary-foreground",
                "-accent",
                "-accent-foreground",
                "-border",
                "-ring",
            ],
        }
    }
}

/// A named color family, e.g. `primary` as [`FamilyKind::Interactive`].
///
/// Utility-class generators read family names from here, so every family
/// listed must have all of its variables produced by the token engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ColorFamily {
    pub name: &'static str,
    pub kind: FamilyKind,
}

impl ColorFamily {
    pub const fn new(name: &'static str, kind: FamilyKind) -> Self {
        Self { name, kind }
    }

    /// CSS custom property for one slot of this family.
    pub fn var_name(&self, suffix: &str) -> String {
        format!("--{}{}", self.name, suffix)
    }

    /// Every CSS custom property this family expands to.
    pub fn var_names(&self) -> impl Iterator<Item = String> + '_ {
        self.kind.suffixes().iter().map(|suffix| self.var_name(suffix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interactive_family_expands_to_six_vars() {
        let family = ColorFamily::new("primary", FamilyKind::Interactive);
        let names: Vec<String> = family.var_names().collect();
        assert_eq!(
            names,
            vec![
                "--primary",
                "--primary-foreground",
                "--primary-hover",
                "--primary-hover-foreground",
                "--primary-light",
                "--primary-light-foreground",
            ]
        );
    }

    #[test]
    fn single_family_is_one_var() {
        let family = ColorFamily::new("ring", FamilyKind::Single);
        assert_eq!(family.var_names().collect::<Vec<_>>(), vec!["--ring"]);
    }

    #[test]
    fn sidebar_family_uses_sidebar_prefix() {
        let family = ColorFamily::new("sidebar", FamilyKind::Sidebar);
        let names: Vec<String> = family.var_names().collect();
        assert_eq!(names.len(), 8);
        assert_eq!(names[0], "--sidebar");
        assert!(names.contains(&"--sidebar-accent-foreground".to_string()));
    }
}
