//! `shields.toml` sections.
//!
//! ```toml
//! [paths]
//! manifest = "assets/data/manifest.json"
//! output = "assets/shields"
//! badges = "assets/data/badges.json"
//! metadata = "assets/data/metadata.toml"
//! readme = "README.md"
//!
//! [render]
//! base_url = "https://img.shields.io/badge/"
//! user_agent = "shields-plus/0.1.0"
//! timeout_secs = 30
//! font_showcase = "twitter"    # rendered once per web-safe font
//!
//! [colors]
//! css_definitions = "assets/data/css_named_colors.json"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Input and output locations, relative to the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    pub manifest: PathBuf,
    /// Root of the rendered badge tree.
    pub output: PathBuf,
    /// `badges.json` metadata file.
    pub badges: PathBuf,
    /// Last-run metadata used to skip unchanged manifests.
    pub metadata: PathBuf,
    pub readme: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            manifest: "assets/data/manifest.json".into(),
            output: "assets/shields".into(),
            badges: "assets/data/badges.json".into(),
            metadata: "assets/data/metadata.toml".into(),
            readme: "README.md".into(),
        }
    }
}

/// Badge service settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    /// Manifest slug rendered once per web-safe font.
    pub font_showcase: Option<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://img.shields.io/badge/".into(),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).into(),
            timeout_secs: 30,
            font_showcase: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorsConfig {
    /// Replacement for the embedded CSS named-color table.
    pub css_definitions: Option<PathBuf>,
}
