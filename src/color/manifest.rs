//! Tagged colors as they appear in manifests.
//!
//! ```json
//! {"class": "hex", "value": "#4c1"}
//! {"class": "rgba", "value": [255, 0, 0, 0.5]}
//! {"class": "named_color", "value": "informational"}
//! ```

use serde::{Deserialize, Serialize};

use super::named::Palette;
use super::{ColorError, HexColor};

/// A `{class, value}` color as written in a manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "class", content = "value", rename_all = "snake_case")]
pub enum ManifestColor {
    Hex(String),
    Rgb(i64, i64, i64),
    Rgba(i64, i64, i64, f64),
    Hsl(i64, i64, i64),
    Hsla(i64, i64, i64, f64),
    NamedColor(String),
}

impl ManifestColor {
    /// Supported `class` tags.
    pub const CLASSES: &'static [&'static str] = &["hex", "rgb", "rgba", "hsl", "hsla", "named_color"];

    pub fn class(&self) -> &'static str {
        match self {
            Self::Hex(_) => "hex",
            Self::Rgb(..) => "rgb",
            Self::Rgba(..) => "rgba",
            Self::Hsl(..) => "hsl",
            Self::Hsla(..) => "hsla",
            Self::NamedColor(_) => "named_color",
        }
    }

    /// Turn the tagged value into a concrete color.
    pub fn resolve(&self, palette: &Palette<'_>) -> Result<HexColor, ColorError> {
        match *self {
            Self::Hex(ref hex) => HexColor::parse(hex),
            Self::Rgb(r, g, b) => HexColor::from_rgb(r, g, b),
            Self::Rgba(r, g, b, a) => HexColor::from_rgba(r, g, b, a),
            Self::Hsl(h, s, l) => HexColor::from_hsl(h, s, l),
            Self::Hsla(h, s, l, a) => HexColor::from_hsla(h, s, l, a),
            Self::NamedColor(ref slug) => palette.resolve(slug).map(|named| named.color().clone()),
        }
    }
}
