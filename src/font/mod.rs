//! Web-safe font descriptors.
//!
//! Descriptors are grouped by generic family and carry the CSS
//! `font-family` declaration shipped in the embedded font table. A
//! `Default` sentinel is always present and means "leave the badge's
//! own font alone".

mod registry;

pub use registry::FontRegistry;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FontError {
    #[error("unknown font `{0}`")]
    UnknownFont(String),

    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("font definitions are not valid JSON")]
    Json(#[from] serde_json::Error),

    #[error("duplicate font family `{0}`")]
    DuplicateFamily(String),
}

/// Generic CSS font family a descriptor falls back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontGroup {
    SansSerif,
    Serif,
    Monospace,
    Cursive,
    Fantasy,
}

impl FontGroup {
    pub const ALL: [Self; 5] = [
        Self::SansSerif,
        Self::Serif,
        Self::Monospace,
        Self::Cursive,
        Self::Fantasy,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SansSerif => "sans-serif",
            Self::Serif => "serif",
            Self::Monospace => "monospace",
            Self::Cursive => "cursive",
            Self::Fantasy => "fantasy",
        }
    }
}

impl fmt::Display for FontGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable font record: display name, CSS declaration and group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontDescriptor {
    family_name: String,
    style: String,
    group: FontGroup,
}

pub const DEFAULT_FAMILY: &str = "Default";
const DEFAULT_STYLE: &str = "Verdana,Geneva,DejaVu Sans,sans-serif !important";

impl FontDescriptor {
    pub fn new(family_name: impl Into<String>, style: impl Into<String>, group: FontGroup) -> Self {
        Self {
            family_name: family_name.into(),
            style: style.into(),
            group,
        }
    }

    /// The "no override" sentinel.
    pub fn default_font() -> Self {
        Self::new(DEFAULT_FAMILY, DEFAULT_STYLE, FontGroup::SansSerif)
    }

    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    /// The declaration as stored, e.g. `font-family: Arial, "Helvetica Neue", sans-serif;`.
    pub fn style(&self) -> &str {
        &self.style
    }

    pub fn group(&self) -> FontGroup {
        self.group
    }

    pub fn is_default(&self) -> bool {
        self.family_name == DEFAULT_FAMILY
    }

    /// Bare comma-separated stack suitable for a `font-family` attribute.
    ///
    /// Drops the `font-family:` prefix, `!important`, the trailing `;`
    /// and every quote character.
    pub fn css_stack(&self) -> String {
        let style = self.style.trim();
        let style = style.strip_prefix("font-family:").unwrap_or(style);
        style
            .replace("!important", "")
            .replace(['"', '\'', ';'], "")
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Directory-safe name: lowercase, spaces become `_`.
    pub fn slug(&self) -> String {
        self.family_name.trim().to_lowercase().replace(' ', "_")
    }
}

impl fmt::Display for FontDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.family_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_stack_strips_wrappers() {
        let font = FontDescriptor::new(
            "Arial",
            r#"font-family: Arial, "Helvetica Neue", Helvetica, sans-serif;"#,
            FontGroup::SansSerif,
        );
        assert_eq!(font.css_stack(), "Arial, Helvetica Neue, Helvetica, sans-serif");

        assert_eq!(
            FontDescriptor::default_font().css_stack(),
            "Verdana, Geneva, DejaVu Sans, sans-serif"
        );
    }

    #[test]
    fn test_css_stack_single_quotes_and_important() {
        let font = FontDescriptor::new(
            "Lucida",
            "font-family: 'Lucida Console' !important ,monospace ;",
            FontGroup::Monospace,
        );
        assert_eq!(font.css_stack(), "Lucida Console, monospace");
    }

    #[test]
    fn test_slug_and_default() {
        let font = FontDescriptor::new("Times New Roman", "", FontGroup::Serif);
        assert_eq!(font.slug(), "times_new_roman");
        assert!(!font.is_default());
        assert!(FontDescriptor::default_font().is_default());
        assert_eq!(FontDescriptor::default_font().group(), FontGroup::SansSerif);
    }

    #[test]
    fn test_group_serde_names() {
        for group in FontGroup::ALL {
            let json = serde_json::to_string(&group).unwrap();
            assert_eq!(json, format!("\"{}\"", group.as_str()));
        }
    }
}
