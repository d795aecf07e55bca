//! Badge manifest loading.
//!
//! ```json
//! {
//!     "root": "assets/logos/",
//!     "data": [
//!         {
//!             "slug": "github",
//!             "label": "GitHub",
//!             "logo": "github.svg",
//!             "color": {"class": "hex", "value": "#181717"},
//!             "logo_color": {"class": "named_color", "value": "white"},
//!             "font": "Georgia"
//!         }
//!     ]
//! }
//! ```
//!
//! Loading resolves every entry into a [`BadgeSpec`]. Failures are
//! collected per entry so that one run reports all of them.

mod diagnostics;

pub use diagnostics::ManifestDiagnostics;

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::badge::{BadgeSpec, BadgeStyle};
use crate::color::ManifestColor;
use crate::color::named::Palette;
use crate::font::FontRegistry;
use crate::svg::SvgDocument;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("manifest `{0}` is not valid")]
    Json(PathBuf, #[source] serde_json::Error),

    // No #[from]: the diagnostics print themselves in full
    #[error("{0}")]
    Diagnostics(ManifestDiagnostics),
}

/// Raw manifest document.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Logo directory, relative to the manifest file.
    pub root: PathBuf,
    pub data: Vec<ManifestEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestEntry {
    pub slug: String,
    pub label: String,
    #[serde(default)]
    pub message: Option<String>,
    /// Logo file, relative to `root`.
    pub logo: PathBuf,
    #[serde(default)]
    pub style: Option<BadgeStyle>,
    pub color: ManifestColor,
    #[serde(default)]
    pub label_color: Option<ManifestColor>,
    #[serde(default)]
    pub logo_color: Option<ManifestColor>,
    #[serde(default, alias = "logo_font")]
    pub font: Option<String>,
}

impl Manifest {
    pub fn from_path(path: &Path) -> Result<Self, ManifestError> {
        let content =
            fs::read_to_string(path).map_err(|e| ManifestError::Io(path.to_path_buf(), e))?;
        serde_json::from_str(&content).map_err(|e| ManifestError::Json(path.to_path_buf(), e))
    }
}

/// Read a manifest and resolve every entry.
///
/// Fails once with every problem found.
pub fn load(
    path: &Path,
    palette: &Palette<'_>,
    fonts: &FontRegistry,
) -> Result<Vec<BadgeSpec>, ManifestError> {
    let manifest = Manifest::from_path(path)?;
    let root = path.parent().unwrap_or(Path::new("")).join(&manifest.root);
    resolve(&manifest, &root, palette, fonts).map_err(ManifestError::Diagnostics)
}

/// Resolve already-parsed entries, with logos read from `root`.
pub fn resolve(
    manifest: &Manifest,
    root: &Path,
    palette: &Palette<'_>,
    fonts: &FontRegistry,
) -> Result<Vec<BadgeSpec>, ManifestDiagnostics> {
    let mut diag = ManifestDiagnostics::new();
    let mut specs = Vec::with_capacity(manifest.data.len());

    for (index, entry) in manifest.data.iter().enumerate() {
        let name = if entry.slug.is_empty() {
            format!("#{index}")
        } else {
            entry.slug.clone()
        };
        if let Some(spec) = resolve_entry(entry, &name, root, palette, fonts, &mut diag) {
            specs.push(spec);
        }
    }

    diag.into_result().map(|()| specs)
}

fn resolve_entry(
    entry: &ManifestEntry,
    name: &str,
    root: &Path,
    palette: &Palette<'_>,
    fonts: &FontRegistry,
    diag: &mut ManifestDiagnostics,
) -> Option<BadgeSpec> {
    let before = diag.len();

    let color = diag.check(name, "color", entry.color.resolve(palette));
    let label_color = optional(diag, name, "label_color", entry.label_color.as_ref(), palette);
    let logo_color = optional(diag, name, "logo_color", entry.logo_color.as_ref(), palette);

    let font = match &entry.font {
        Some(family) => diag.check(name, "font", fonts.lookup(family)),
        None => Some(fonts.default_font()),
    };
    let logo = diag.check(name, "logo", SvgDocument::from_file(&root.join(&entry.logo)));

    if diag.len() > before {
        return None;
    }

    Some(BadgeSpec {
        slug: entry.slug.clone(),
        label: entry.label.clone(),
        message: entry.message.clone(),
        style: entry.style,
        color: color?,
        label_color: label_color?,
        logo: logo?,
        logo_color: logo_color?,
        font: font?.clone(),
    })
}

/// `Some(None)` when absent, `None` when present but invalid.
fn optional(
    diag: &mut ManifestDiagnostics,
    name: &str,
    field: &'static str,
    color: Option<&ManifestColor>,
    palette: &Palette<'_>,
) -> Option<Option<crate::color::HexColor>> {
    match color {
        Some(color) => diag.check(name, field, color.resolve(palette)).map(Some),
        None => Some(None),
    }
}
