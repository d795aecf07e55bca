//! Shields.io badges: styles, URLs, rendering and output layout.
//!
//! # Modules
//!
//! - [`fetch`]: `Fetcher` trait and the HTTP implementation
//! - [`query`]: path escaping and query construction
//! - [`render`]: sequential render loop and `badges.json`
//!
//! A [`BadgeSpec`] is one resolved manifest entry. It expands into one
//! [`Badge`] per style (or per showcased font), and each badge maps to a
//! single output file.

pub mod fetch;
pub mod query;
pub mod render;

pub use fetch::{Fetcher, HttpFetcher};
pub use render::{render_all, write_records};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::color::HexColor;
use crate::font::FontDescriptor;
use crate::svg::{SvgDocument, SvgError};

#[derive(Debug, Error)]
pub enum BadgeError {
    #[error("invalid badge URL")]
    Url(#[from] url::ParseError),

    #[error("badge request failed")]
    Fetch(#[source] std::io::Error),

    #[error(transparent)]
    Svg(#[from] SvgError),

    #[error("IO error when writing `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("badge metadata could not be serialized")]
    Json(#[from] serde_json::Error),
}

/// Visual style of a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BadgeStyle {
    Flat,
    FlatSquare,
    Plastic,
    ForTheBadge,
    Social,
    /// `flat` with gradients and shadow text removed locally.
    TrueFlat,
}

impl BadgeStyle {
    pub const ALL: [Self; 6] = [
        Self::Flat,
        Self::FlatSquare,
        Self::Plastic,
        Self::ForTheBadge,
        Self::Social,
        Self::TrueFlat,
    ];

    /// Name used for output directories and metadata.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::FlatSquare => "flat-square",
            Self::Plastic => "plastic",
            Self::ForTheBadge => "for-the-badge",
            Self::Social => "social",
            Self::TrueFlat => "true-flat",
        }
    }

    /// Value of the `style` query parameter.
    pub const fn service_value(self) -> &'static str {
        match self {
            Self::TrueFlat => "flat",
            other => other.as_str(),
        }
    }
}

impl fmt::Display for BadgeStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved manifest entry.
#[derive(Debug, Clone)]
pub struct BadgeSpec {
    pub slug: String,
    pub label: String,
    pub message: Option<String>,
    /// Render only this style; every style when `None`.
    pub style: Option<BadgeStyle>,
    pub color: HexColor,
    pub label_color: Option<HexColor>,
    pub logo: SvgDocument,
    pub logo_color: Option<HexColor>,
    pub font: FontDescriptor,
}

impl BadgeSpec {
    pub fn styles(&self) -> Vec<BadgeStyle> {
        match self.style {
            Some(style) => vec![style],
            None => BadgeStyle::ALL.to_vec(),
        }
    }

    /// One badge per style, in the entry's own font.
    pub fn badges(&self) -> Vec<Badge<'_>> {
        self.styles()
            .into_iter()
            .map(|style| Badge {
                spec: self,
                style,
                font: &self.font,
                layout: Layout::ByStyle,
            })
            .collect()
    }

    /// One flat badge per font, grouped under the font's slug.
    pub fn showcase<'a>(
        &'a self,
        fonts: impl IntoIterator<Item = &'a FontDescriptor>,
    ) -> Vec<Badge<'a>> {
        fonts
            .into_iter()
            .map(|font| Badge {
                spec: self,
                style: BadgeStyle::Flat,
                font,
                layout: Layout::FontShowcase,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    /// `{style}/{slug}.svg`
    ByStyle,
    /// `flat/{font}/{slug}.svg`
    FontShowcase,
}

/// A single badge to fetch and write.
#[derive(Debug, Clone, Copy)]
pub struct Badge<'a> {
    pub spec: &'a BadgeSpec,
    pub style: BadgeStyle,
    pub font: &'a FontDescriptor,
    layout: Layout,
}

/// One row of `badges.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeRecord {
    pub slug: String,
    pub label: String,
    pub message: Option<String>,
    pub style: BadgeStyle,
    pub color: String,
    pub label_color: Option<String>,
    pub font: String,
    /// Relative to the output directory, `/`-separated.
    pub path: String,
}

impl Badge<'_> {
    /// Logo as a data URI, recolored first when the entry asks for it.
    pub fn logo_data_uri(&self) -> Result<String, SvgError> {
        match &self.spec.logo_color {
            Some(color) => {
                let mut logo = self.spec.logo.clone();
                logo.recolor_paths(&color.css())?;
                Ok(logo.data_uri())
            }
            None => Ok(self.spec.logo.data_uri()),
        }
    }

    /// Fetch the badge and apply the local rewrites.
    pub fn render(
        &self,
        fetcher: &dyn Fetcher,
        base: &url::Url,
    ) -> Result<SvgDocument, BadgeError> {
        let url = self.url(base)?;
        let body = fetcher.fetch(&url).map_err(BadgeError::Fetch)?;
        let mut document = SvgDocument::from_bytes(body)?;

        if self.style == BadgeStyle::TrueFlat {
            document.flatten()?;
        }
        if !self.font.is_default() {
            document.retarget_font(self.font)?;
        }
        Ok(document)
    }

    /// Path relative to the output directory.
    pub fn relative_path(&self) -> String {
        let file = format!("{}.svg", self.spec.slug);
        match self.layout {
            Layout::ByStyle => format!("{}/{file}", self.style),
            Layout::FontShowcase => format!("{}/{}/{file}", BadgeStyle::Flat, self.font.slug()),
        }
    }

    pub fn output_path(&self, output: &Path) -> PathBuf {
        self.relative_path()
            .split('/')
            .fold(output.to_path_buf(), |path, part| path.join(part))
    }

    pub fn record(&self) -> BadgeRecord {
        let spec = self.spec;
        BadgeRecord {
            slug: spec.slug.clone(),
            label: spec.label.clone(),
            message: spec.message.clone(),
            style: self.style,
            color: query::service_color(&spec.color),
            label_color: spec.label_color.as_ref().map(query::service_color),
            font: self.font.family_name().to_string(),
            path: self.relative_path(),
        }
    }

    /// `slug (style)` or `slug (font)`, for progress and error output.
    pub fn describe(&self) -> String {
        match self.layout {
            Layout::ByStyle => format!("{} ({})", self.spec.slug, self.style),
            Layout::FontShowcase => format!("{} ({})", self.spec.slug, self.font),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::font::FontRegistry;

    pub(crate) fn spec(slug: &str) -> BadgeSpec {
        BadgeSpec {
            slug: slug.to_string(),
            label: "GitHub".to_string(),
            message: None,
            style: None,
            color: HexColor::parse("#181717").unwrap(),
            label_color: None,
            logo: SvgDocument::new(r##"<svg><path fill="#000" d="M0"/></svg>"##).unwrap(),
            logo_color: None,
            font: FontRegistry::embedded().default_font().clone(),
        }
    }

    #[test]
    fn test_style_names() {
        let names: Vec<_> = BadgeStyle::ALL.iter().map(|s| s.as_str()).collect();
        assert_eq!(
            names,
            ["flat", "flat-square", "plastic", "for-the-badge", "social", "true-flat"]
        );
        assert_eq!(BadgeStyle::TrueFlat.service_value(), "flat");
        assert_eq!(BadgeStyle::ForTheBadge.service_value(), "for-the-badge");

        let parsed: BadgeStyle = serde_json::from_str("\"true-flat\"").unwrap();
        assert_eq!(parsed, BadgeStyle::TrueFlat);
    }

    #[test]
    fn test_expansion_and_paths() {
        let mut spec = spec("github");
        assert_eq!(spec.badges().len(), 6);
        assert_eq!(spec.badges()[1].relative_path(), "flat-square/github.svg");

        spec.style = Some(BadgeStyle::Social);
        let badges = spec.badges();
        assert_eq!(badges.len(), 1);
        assert_eq!(
            badges[0].output_path(Path::new("out")),
            Path::new("out").join("social").join("github.svg")
        );
    }

    #[test]
    fn test_showcase_paths() {
        let spec = spec("twitter");
        let fonts = FontRegistry::embedded();
        let badges = spec.showcase([fonts.lookup("Book Antiqua").unwrap()]);
        assert_eq!(badges[0].relative_path(), "flat/book_antiqua/twitter.svg");
        assert_eq!(badges[0].style, BadgeStyle::Flat);
        assert_eq!(badges[0].record().font, "Book Antiqua");
        assert_eq!(badges[0].describe(), "twitter (Book Antiqua)");
    }

    #[test]
    fn test_logo_recolor_leaves_spec_untouched() {
        let mut spec = spec("github");
        spec.logo_color = Some(HexColor::parse("#fff").unwrap());
        let badge = spec.badges()[0];

        let uri = badge.logo_data_uri().unwrap();
        let mut expected = spec.logo.clone();
        expected.recolor_paths("#ffffff").unwrap();
        assert_eq!(uri, expected.data_uri());
        assert!(spec.logo.markup().contains("#000"));
    }

    #[test]
    fn test_record_colors() {
        let mut spec = spec("github");
        spec.label_color = Some(HexColor::from_rgba(255, 0, 0, 0.5).unwrap());
        let record = spec.badges()[0].record();
        assert_eq!(record.color, "181717");
        assert_eq!(record.label_color.as_deref(), Some("rgba(255, 0, 0, 0.502)"));
        assert_eq!(record.font, "Default");
    }
}
