//! Lightweight configuration loader and path helpers.
//!
//! Uses Figment to merge built-in defaults, `config.toml`, `config.<env>.toml`
//! and `APP_*` env vars (`__` separates nested keys). Provides helpers to
//! expand `~` and `${VAR}` and to resolve relative paths against the
//! directory the configuration was loaded from.
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub const DEFAULT_TOP_K: usize = 10;

/// The `[engine]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// JSON catalog; missing or invalid files fall back to the sample set.
    pub catalog_path: String,
    /// Optional TOML file replacing the built-in boost tables.
    pub boost_tables: Option<String>,
    pub default_top_k: usize,
    pub strict_top_k: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            catalog_path: "data/assessments.json".to_string(),
            boost_tables: None,
            default_top_k: DEFAULT_TOP_K,
            strict_top_k: DEFAULT_TOP_K,
        }
    }
}

pub struct Config {
    figment: Figment,
    base_dir: PathBuf,
}

impl Config {
    pub fn load() -> Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        Self::load_for_env(Path::new("."), &env_name)
    }

    pub fn load_for_env(base_dir: &Path, env_name: &str) -> Result<Self> {
        let mut figment = Figment::new()
            .merge(Serialized::default("engine", EngineSettings::default()))
            .merge(Toml::file(base_dir.join("config.toml")));
        match env_name {
            "dev" | "development" => figment = figment.merge(Toml::file(base_dir.join("config.dev.toml"))),
            "prod" | "production" => figment = figment.merge(Toml::file(base_dir.join("config.prod.toml"))),
            "test" | "testing" => figment = figment.merge(Toml::file(base_dir.join("config.test.toml"))),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        let config = Self { figment, base_dir: base_dir.to_path_buf() };
        config.validate()?;
        Ok(config)
    }

    pub fn get<T>(&self, key: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| Error::InvalidConfig(format!("Failed to get '{}': {}", key, e)))
    }

    pub fn engine(&self) -> Result<EngineSettings> { self.get("engine") }

    pub fn base_dir(&self) -> &Path { &self.base_dir }

    pub fn catalog_path(&self) -> Result<PathBuf> {
        Ok(resolve_with_base(&self.base_dir, self.engine()?.catalog_path))
    }

    pub fn boost_tables_path(&self) -> Result<Option<PathBuf>> {
        Ok(self.engine()?.boost_tables.map(|p| resolve_with_base(&self.base_dir, p)))
    }

    fn validate(&self) -> Result<()> {
        let engine = self.engine()?;
        if engine.default_top_k == 0 || engine.strict_top_k == 0 {
            return Err(Error::InvalidConfig("engine top-k values must be at least 1".to_string()));
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
