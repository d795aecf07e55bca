//! Project configuration for `shields.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section.rs     # [paths], [render], [colors]
//! ├── error.rs       # ConfigError
//! ├── util.rs        # config discovery, path resolution
//! └── mod.rs         # ProjectConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section     | Purpose                                           |
//! |-------------|---------------------------------------------------|
//! | `[paths]`   | Manifest, output tree, metadata files, README     |
//! | `[render]`  | Badge service URL, HTTP settings, font showcase   |
//! | `[colors]`  | External CSS named-color definitions              |
//!
//! A missing config file is not an error: every section has defaults and
//! paths resolve against the current directory instead.

mod error;
pub mod section;
mod util;

pub use error::ConfigError;
pub use section::{ColorsConfig, PathsConfig, RenderConfig};

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::color::{ColorRegistry, RegistryError};
use util::{find_config_file, resolve_against};

/// Root configuration structure representing shields.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    pub paths: PathsConfig,
    pub render: RenderConfig,
    pub colors: ColorsConfig,
}

impl ProjectConfig {
    /// Locate and load the config file, searching upward from cwd.
    pub fn load(config_name: &Path) -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir().map_err(|e| ConfigError::Io(PathBuf::from("."), e))?;

        let (config_path, exists) = match find_config_file(config_name) {
            Some(path) => (path, true),
            None => (resolve_against(&cwd, config_name), false),
        };

        let mut config = if exists {
            Self::from_path(&config_path)?
        } else {
            Self::default()
        };

        config.root = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or(cwd);
        config.config_path = config_path;
        config.normalize_paths();
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Make every configured path absolute against `root`.
    fn normalize_paths(&mut self) {
        let root = self.root.clone();
        let paths = &mut self.paths;
        for path in [
            &mut paths.manifest,
            &mut paths.output,
            &mut paths.badges,
            &mut paths.metadata,
            &mut paths.readme,
        ] {
            *path = resolve_against(&root, path);
        }
        if let Some(css) = &mut self.colors.css_definitions {
            *css = resolve_against(&root, css);
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let base = self.base_url()?;
        if base.cannot_be_a_base() || !base.path().ends_with('/') {
            return Err(ConfigError::Validation(format!(
                "[render] base_url `{base}` must be a hierarchical URL ending with `/`"
            )));
        }
        if self.render.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "[render] timeout_secs must be positive".to_string(),
            ));
        }
        if self.render.font_showcase.as_deref().is_some_and(|s| s.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "[render] font_showcase cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn base_url(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.render.base_url).map_err(|e| {
            ConfigError::Validation(format!("[render] base_url `{}`: {e}", self.render.base_url))
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.render.timeout_secs)
    }

    /// The configured CSS color table, if one replaces the embedded one.
    pub fn css_registry(&self) -> Result<Option<ColorRegistry>, RegistryError> {
        self.colors
            .css_definitions
            .as_deref()
            .map(|path| ColorRegistry::from_path("css", path))
            .transpose()
    }

    /// Get path relative to the project root, for display.
    pub fn root_relative(&self, path: impl AsRef<Path>) -> PathBuf {
        path.as_ref()
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.as_ref().to_path_buf())
    }
}

#[cfg(test)]
pub fn test_parse_config(content: &str) -> ProjectConfig {
    ProjectConfig::from_str(content).unwrap()
}
