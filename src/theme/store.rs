//! Persistence for the theme preference.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

use super::Theme;
use crate::TARGET_RENDER;

/// Key the preference is stored under.
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Error)]
pub enum ThemeStoreError {
    #[error("failed to write theme preference to {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to encode theme preferences: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A single key-value slot holding the preferred theme.
pub trait ThemePreferenceStore {
    /// The stored theme; unreadable or unknown values count as absent.
    fn get(&self) -> Option<Theme>;

    fn set(&mut self, theme: Theme) -> Result<(), ThemeStoreError>;
}

/// In-memory store, recording every write.
#[derive(Debug, Clone, Default)]
pub struct MemoryThemeStore {
    value: Option<Theme>,
    writes: Vec<Theme>,
}

impl MemoryThemeStore {
    pub fn with(theme: Theme) -> Self {
        MemoryThemeStore {
            value: Some(theme),
            writes: Vec::new(),
        }
    }

    pub fn writes(&self) -> &[Theme] {
        &self.writes
    }
}

impl ThemePreferenceStore for MemoryThemeStore {
    fn get(&self) -> Option<Theme> {
        self.value
    }

    fn set(&mut self, theme: Theme) -> Result<(), ThemeStoreError> {
        self.value = Some(theme);
        self.writes.push(theme);
        Ok(())
    }
}

/// JSON object on disk, e.g. `{"theme": "light"}`. Other keys in the file are
/// preserved on write.
#[derive(Debug, Clone)]
pub struct FileThemeStore {
    path: PathBuf,
}

impl FileThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileThemeStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> BTreeMap<String, Value> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(_) => return BTreeMap::new(),
        };
        serde_json::from_str(&contents).unwrap_or_else(|err| {
            warn!(target: TARGET_RENDER, "Ignoring unreadable preferences in {}: {}", self.path.display(), err);
            BTreeMap::new()
        })
    }
}

impl ThemePreferenceStore for FileThemeStore {
    fn get(&self) -> Option<Theme> {
        self.read_map()
            .get(THEME_KEY)
            .and_then(Value::as_str)
            .and_then(|value| value.parse().ok())
    }

    fn set(&mut self, theme: Theme) -> Result<(), ThemeStoreError> {
        let mut map = self.read_map();
        map.insert(THEME_KEY.to_string(), Value::from(theme.as_str()));
        let json = serde_json::to_string_pretty(&map)?;

        let io_error = |source| ThemeStoreError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        fs::write(&self.path, json).map_err(io_error)
    }
}

/// Browser cookie named [`THEME_KEY`], for the live server.
#[derive(Debug, Clone, Default)]
pub struct CookieThemeStore {
    jar: CookieJar,
}

impl CookieThemeStore {
    pub fn new(jar: CookieJar) -> Self {
        CookieThemeStore { jar }
    }

    /// The jar including any cookie written by `set`, to return to the client.
    pub fn into_jar(self) -> CookieJar {
        self.jar
    }
}

impl ThemePreferenceStore for CookieThemeStore {
    fn get(&self) -> Option<Theme> {
        self.jar
            .get(THEME_KEY)
            .and_then(|cookie| cookie.value().parse().ok())
    }

    fn set(&mut self, theme: Theme) -> Result<(), ThemeStoreError> {
        let cookie = Cookie::build((THEME_KEY, theme.as_str()))
            .path("/")
            .same_site(SameSite::Lax)
            .permanent();
        self.jar = self.jar.clone().add(cookie);
        Ok(())
    }
}
