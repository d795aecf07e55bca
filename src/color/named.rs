//! Named-color registries.
//!
//! Two closed sets are shipped:
//!
//! - **brand**: the shields.io palette (`brightgreen`, `blue`, ...) plus its
//!   aliases (`success`, `critical`, `gray`, ...)
//! - **css**: the CSS Color Module keywords, loaded from the embedded table
//!   or an external definitions file of the same shape
//!
//! Registries are immutable after construction and shared read-only, so
//! the built-in ones live in `LazyLock` statics.

use rustc_hash::FxHashMap;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;

use super::{ColorError, HexColor};
use crate::embed::CSS_NAMED_COLORS_JSON;

/// Errors raised while building a registry from definitions.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("color definitions are not valid JSON")]
    Json(#[from] serde_json::Error),

    #[error("duplicate color slug `{0}`")]
    DuplicateSlug(String),

    #[error("alias `{alias}` points at unknown color `{target}`")]
    UnknownAliasTarget { alias: String, target: String },

    #[error("color `{slug}` has an invalid value")]
    Color {
        slug: String,
        #[source]
        source: ColorError,
    },
}

/// A slug and the color it names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedColor {
    slug: String,
    color: HexColor,
}

impl NamedColor {
    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn color(&self) -> &HexColor {
        &self.color
    }
}

/// One row of a definitions file.
#[derive(Debug, Deserialize)]
struct Definition {
    slug: String,
    hex: String,
}

/// Ordered, case-insensitive registry of named colors.
///
/// Aliases map straight to their target's entry, so resolving an alias
/// returns the very same [`NamedColor`].
#[derive(Debug, Clone)]
pub struct ColorRegistry {
    name: &'static str,
    entries: Vec<NamedColor>,
    /// Every slug (canonical and alias) in registration order.
    slugs: Vec<String>,
    index: FxHashMap<String, usize>,
}

const BRAND_COLORS: &[(&str, &str)] = &[
    ("brightgreen", "#4c1"),
    ("green", "#97ca00"),
    ("yellow", "#dfb317"),
    ("yellowgreen", "#a4a61d"),
    ("orange", "#fe7d37"),
    ("red", "#e05d44"),
    ("blue", "#007ec6"),
    ("grey", "#555"),
    ("lightgrey", "#9f9f9f"),
];

const BRAND_ALIASES: &[(&str, &str)] = &[
    ("gray", "grey"),
    ("lightgray", "lightgrey"),
    ("critical", "red"),
    ("important", "orange"),
    ("success", "brightgreen"),
    ("informational", "blue"),
    ("inactive", "lightgrey"),
];

static BRAND: LazyLock<ColorRegistry> = LazyLock::new(|| {
    let entries = BRAND_COLORS
        .iter()
        .map(|&(slug, hex)| HexColor::parse(hex).map(|color| (slug, color)))
        .collect::<Result<Vec<_>, _>>()
        .expect("brand palette is valid hex");

    ColorRegistry::from_entries("brand", entries)
        .and_then(|registry| registry.with_aliases(BRAND_ALIASES))
        .expect("brand palette has unique slugs")
});

static CSS: LazyLock<ColorRegistry> = LazyLock::new(|| {
    ColorRegistry::from_json("css", CSS_NAMED_COLORS_JSON).expect("embedded css color table is valid")
});

fn normalize(slug: &str) -> String {
    slug.trim().to_ascii_lowercase()
}

impl ColorRegistry {
    /// The shields.io brand palette.
    pub fn brand() -> &'static Self {
        &BRAND
    }

    /// The embedded CSS named-color table.
    pub fn css() -> &'static Self {
        &CSS
    }

    /// Build a registry from `(slug, color)` pairs, keeping their order.
    pub fn from_entries<S: Into<String>>(
        name: &'static str,
        entries: impl IntoIterator<Item = (S, HexColor)>,
    ) -> Result<Self, RegistryError> {
        let mut registry = Self {
            name,
            entries: Vec::new(),
            slugs: Vec::new(),
            index: FxHashMap::default(),
        };

        for (slug, color) in entries {
            let slug = normalize(&slug.into());
            let position = registry.entries.len();
            registry.insert_slug(&slug, position)?;
            registry.entries.push(NamedColor { slug, color });
        }

        Ok(registry)
    }

    /// Register `(alias, target)` pairs pointing at existing entries.
    pub fn with_aliases(mut self, aliases: &[(&str, &str)]) -> Result<Self, RegistryError> {
        for &(alias, target) in aliases {
            let target_index = *self.index.get(&normalize(target)).ok_or_else(|| {
                RegistryError::UnknownAliasTarget {
                    alias: alias.to_string(),
                    target: target.to_string(),
                }
            })?;
            self.insert_slug(&normalize(alias), target_index)?;
        }
        Ok(self)
    }

    /// Parse a `[{"slug": ..., "hex": ...}]` definitions document.
    pub fn from_json(name: &'static str, json: &str) -> Result<Self, RegistryError> {
        let definitions: Vec<Definition> = serde_json::from_str(json)?;
        let entries = definitions
            .into_iter()
            .map(|def| match HexColor::parse(&def.hex) {
                Ok(color) => Ok((def.slug, color)),
                Err(source) => Err(RegistryError::Color {
                    slug: def.slug,
                    source,
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_entries(name, entries)
    }

    /// Load a definitions file from disk.
    pub fn from_path(name: &'static str, path: &Path) -> Result<Self, RegistryError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| RegistryError::Io(path.to_path_buf(), e))?;
        Self::from_json(name, &json)
    }

    fn insert_slug(&mut self, slug: &str, target: usize) -> Result<(), RegistryError> {
        if self.index.insert(slug.to_string(), target).is_some() {
            return Err(RegistryError::DuplicateSlug(slug.to_string()));
        }
        self.slugs.push(slug.to_string());
        Ok(())
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Canonical entries in registration order (aliases excluded).
    pub fn entries(&self) -> &[NamedColor] {
        &self.entries
    }

    /// Case-insensitive lookup, aliases included.
    pub fn get(&self, slug: &str) -> Option<&NamedColor> {
        self.index.get(&normalize(slug)).map(|&i| &self.entries[i])
    }

    pub fn resolve(&self, slug: &str) -> Result<&NamedColor, ColorError> {
        self.get(slug)
            .ok_or_else(|| ColorError::UnknownColor(slug.to_string()))
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.index.contains_key(&normalize(slug))
    }

    /// Every accepted slug, aliases included.
    pub fn slugs(&self) -> impl Iterator<Item = &str> {
        self.slugs.iter().map(String::as_str)
    }

    /// Canonical slugs only.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(NamedColor::slug)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Brand and CSS registries resolved together, brand first.
#[derive(Debug, Clone, Copy)]
pub struct Palette<'a> {
    pub brand: &'a ColorRegistry,
    pub css: &'a ColorRegistry,
}

impl Default for Palette<'static> {
    fn default() -> Self {
        Self {
            brand: ColorRegistry::brand(),
            css: ColorRegistry::css(),
        }
    }
}

impl<'a> Palette<'a> {
    /// Palette with the built-in brand registry and a custom css table.
    pub fn with_css(css: &'a ColorRegistry) -> Self {
        Self {
            brand: ColorRegistry::brand(),
            css,
        }
    }

    pub fn resolve(&self, slug: &str) -> Result<&'a NamedColor, ColorError> {
        self.brand
            .get(slug)
            .or_else(|| self.css.get(slug))
            .ok_or_else(|| ColorError::UnknownColor(slug.to_string()))
    }

    pub fn all_slugs(&self) -> impl Iterator<Item = &'a str> {
        self.brand.slugs().chain(self.css.slugs())
    }

    pub fn all_names(&self) -> impl Iterator<Item = &'a str> {
        self.brand.names().chain(self.css.names())
    }
}
