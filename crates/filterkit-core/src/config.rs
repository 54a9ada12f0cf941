//! Lightweight configuration loader and path helpers.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `FILTERKIT_*`
//! env vars (`__` separates nesting, e.g. `FILTERKIT_STORE__FALLBACK_ICON`).
//! Provides helpers to expand `~` and `${VAR}` and to resolve relative paths
//! against a known base directory.
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::FilterError;

pub const DEFAULT_FALLBACK_ICON: &str = "CheckCircle";

/// Store-level settings with their defaults applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Icon written into saved searches for filters that have none.
    pub fallback_icon: String,
    /// Cap on registered-filter search results; 0 means unbounded.
    pub max_results: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { fallback_icon: DEFAULT_FALLBACK_ICON.to_string(), max_results: 0 }
    }
}

pub struct Config {
    figment: Figment,
    env_name: String,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        Self::load_from(Path::new("."), &env_name)
    }

    /// Loads `config.toml` and the environment overlay from `dir`. Missing
    /// files are not an error.
    pub fn load_from(dir: &Path, env_name: &str) -> anyhow::Result<Self> {
        let mut figment = Figment::new().merge(Toml::file(dir.join("config.toml")));
        match env_name {
            "dev" | "development" => figment = figment.merge(Toml::file(dir.join("config.dev.toml"))),
            "prod" | "production" => figment = figment.merge(Toml::file(dir.join("config.prod.toml"))),
            "test" | "testing" => figment = figment.merge(Toml::file(dir.join("config.test.toml"))),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("FILTERKIT_").split("__"));

        let config = Self { figment, env_name: env_name.to_string() };
        config.validate()?;
        Ok(config)
    }

    pub fn env_name(&self) -> &str {
        &self.env_name
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    /// Like [`Config::get`] but falls back to `default` when the key is absent.
    /// A present key of the wrong type is still an error.
    pub fn get_or<T>(&self, key: &str, default: T) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        if self.figment.find_value(key).is_err() {
            return Ok(default);
        }
        self.get(key)
    }

    pub fn store(&self) -> anyhow::Result<StoreConfig> {
        let defaults = StoreConfig::default();
        Ok(StoreConfig {
            fallback_icon: self.get_or("store.fallback_icon", defaults.fallback_icon)?,
            max_results: self.get_or("search.max_results", defaults.max_results)?,
        })
    }

    /// Directory CLI file arguments are resolved against.
    pub fn data_dir(&self) -> anyhow::Result<PathBuf> {
        let dir: String = self.get_or("data.dir", ".".to_string())?;
        Ok(expand_path(dir))
    }

    fn validate(&self) -> anyhow::Result<()> {
        let store = self.store()?;
        if store.fallback_icon.trim().is_empty() {
            return Err(FilterError::Config("store.fallback_icon must not be empty".into()).into());
        }
        Ok(())
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
