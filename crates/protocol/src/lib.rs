pub mod family;
pub mod mode;
pub mod preset;
pub mod vars;

pub use family::{ColorFamily, FamilyKind};
pub use mode::ThemeMode;
pub use preset::{
    FamilyOverrides, ModeColors, PairOverrides, SidebarOverrides, ThemeColors, ThemePreset,
};
pub use vars::ThemeCssVars;
