use std::env;
use std::path::PathBuf;

pub const DATA_ENV: &str = "LABPAGE_DATA";
pub const TEMPLATE_ENV: &str = "LABPAGE_TEMPLATE";
pub const OUTPUT_ENV: &str = "LABPAGE_OUTPUT";
pub const THEME_STORE_ENV: &str = "LABPAGE_THEME_STORE";
pub const PORT_ENV: &str = "PORT";
pub const LOG_DIR_ENV: &str = "LOG_DIR";

/// Settings shared by every subcommand. Environment variables provide the
/// defaults, command line flags override them.
#[derive(Clone, Debug, PartialEq)]
pub struct SiteConfig {
    /// Directory path or http(s) base URL the JSON documents are read from.
    pub data: String,
    pub template: PathBuf,
    pub output: PathBuf,
    pub theme_store: PathBuf,
    pub port: u16,
    pub log_dir: PathBuf,
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            data: "data".to_string(),
            template: PathBuf::from("index.html"),
            output: PathBuf::from("dist/index.html"),
            theme_store: PathBuf::from(".labpage/preferences.json"),
            port: 8080,
            log_dir: PathBuf::from("logs"),
        }
    }
}

impl SiteConfig {
    /// Builds the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup, falling back to
    /// defaults for anything unset, empty or unparsable.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = SiteConfig::default();
        let get = |var: &str| {
            lookup(var)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        SiteConfig {
            data: get(DATA_ENV).unwrap_or(defaults.data),
            template: get(TEMPLATE_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.template),
            output: get(OUTPUT_ENV).map(PathBuf::from).unwrap_or(defaults.output),
            theme_store: get(THEME_STORE_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.theme_store),
            port: get(PORT_ENV)
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(defaults.port),
            log_dir: get(LOG_DIR_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.log_dir),
        }
    }
}
