//! Light/dark theme resolution.
//!
//! The initial theme comes from the persisted preference, else from the
//! system preference (light only when the system explicitly asks for it).
//! Toggling flips the applied theme, persists it and re-applies it.

mod store;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::render::markup::Node;
use crate::render::{Mount, Patch};
use crate::TARGET_RENDER;

pub use self::store::{
    CookieThemeStore, FileThemeStore, MemoryThemeStore, ThemePreferenceStore, ThemeStoreError,
    THEME_KEY,
};

/// Attribute on the document root carrying the applied theme.
pub const THEME_ATTRIBUTE: &str = "data-theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn flipped(&self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(format!("unknown theme '{}'", other)),
        }
    }
}

/// The platform's color scheme signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SystemPreference {
    Light,
    Dark,
    #[default]
    NoPreference,
}

impl SystemPreference {
    /// Parse a `prefers-color-scheme` style value such as `light`, `"dark"`.
    pub fn parse(value: &str) -> Self {
        match value.trim().trim_matches('"').to_ascii_lowercase().as_str() {
            "light" => SystemPreference::Light,
            "dark" => SystemPreference::Dark,
            _ => SystemPreference::NoPreference,
        }
    }
}

/// What the toggle control shows: it advertises the theme a click switches to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToggleControl {
    pub icon: &'static str,
    pub label: &'static str,
}

impl ToggleControl {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => ToggleControl {
                icon: "\u{2600}\u{FE0F}",
                label: "Switch to light mode",
            },
            Theme::Light => ToggleControl {
                icon: "\u{1F319}",
                label: "Switch to dark mode",
            },
        }
    }
}

/// Stored preference first, then the system signal, then dark.
pub fn resolve_initial(store: &dyn ThemePreferenceStore, system: SystemPreference) -> Theme {
    if let Some(theme) = store.get() {
        debug!(target: TARGET_RENDER, "Using persisted theme {}", theme);
        return theme;
    }
    match system {
        SystemPreference::Light => Theme::Light,
        _ => Theme::Dark,
    }
}

/// Patches that apply `theme` to the page.
pub fn apply(theme: Theme) -> Vec<Patch> {
    let control = ToggleControl::for_theme(theme);
    vec![
        Patch::set_attribute(Mount::DocumentRoot, THEME_ATTRIBUTE, theme.as_str()),
        Patch::replace(Mount::ThemeToggle, vec![Node::text(control.icon)]),
        Patch::set_attribute(Mount::ThemeToggle, "aria-label", control.label),
    ]
}

/// Flip the applied theme (dark when none is applied), persist the result and
/// return it.
pub fn toggle(
    current: Option<Theme>,
    store: &mut dyn ThemePreferenceStore,
) -> Result<Theme, ThemeStoreError> {
    let next = current.unwrap_or_default().flipped();
    store.set(next)?;
    debug!(target: TARGET_RENDER, "Theme toggled to {}", next);
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::patches_for;

    #[test]
    fn test_resolve_initial() {
        let empty = MemoryThemeStore::default();
        assert_eq!(resolve_initial(&empty, SystemPreference::Light), Theme::Light);
        assert_eq!(resolve_initial(&empty, SystemPreference::Dark), Theme::Dark);
        assert_eq!(resolve_initial(&empty, SystemPreference::NoPreference), Theme::Dark);

        let stored = MemoryThemeStore::with(Theme::Dark);
        assert_eq!(resolve_initial(&stored, SystemPreference::Light), Theme::Dark);
    }

    #[test]
    fn test_toggle_twice_returns_and_persists() {
        let mut store = MemoryThemeStore::default();
        let initial = resolve_initial(&store, SystemPreference::Light);
        assert_eq!(initial, Theme::Light);

        let first = toggle(Some(initial), &mut store).unwrap();
        assert_eq!(first, Theme::Dark);
        assert_eq!(store.get(), Some(Theme::Dark));

        let second = toggle(Some(first), &mut store).unwrap();
        assert_eq!(second, initial);
        assert_eq!(store.get(), Some(Theme::Light));
        assert_eq!(store.writes(), &[Theme::Dark, Theme::Light]);
    }

    #[test]
    fn test_toggle_without_applied_theme() {
        let mut store = MemoryThemeStore::default();
        assert_eq!(toggle(None, &mut store).unwrap(), Theme::Light);
    }

    #[test]
    fn test_apply_advertises_next_theme() {
        let patches = apply(Theme::Dark);
        assert_eq!(
            patches[0],
            Patch::set_attribute(Mount::DocumentRoot, THEME_ATTRIBUTE, "dark")
        );
        let toggle_patches = patches_for(&patches, Mount::ThemeToggle);
        assert_eq!(toggle_patches[0].nodes(), &[Node::text("\u{2600}\u{FE0F}")]);
        assert_eq!(
            *toggle_patches[1],
            Patch::set_attribute(Mount::ThemeToggle, "aria-label", "Switch to light mode")
        );

        let light = ToggleControl::for_theme(Theme::Light);
        assert_eq!(light.label, "Switch to dark mode");
    }

    #[test]
    fn test_parse_preferences() {
        assert_eq!(SystemPreference::parse("\"light\""), SystemPreference::Light);
        assert_eq!(SystemPreference::parse("Dark"), SystemPreference::Dark);
        assert_eq!(SystemPreference::parse(""), SystemPreference::NoPreference);
        assert_eq!("light".parse::<Theme>(), Ok(Theme::Light));
        assert!("blue".parse::<Theme>().is_err());
    }
}
