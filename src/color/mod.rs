//! Color values and named-color registries.
//!
//! # Modules
//!
//! - [`model`]: RGB / RGBA / HSL / HSLA component types and conversion math
//! - [`named`]: Brand and CSS named-color registries
//! - [`manifest`]: Tagged `{class, value}` colors as written in manifests
//!
//! [`HexColor`] is the canonical value every other representation converts
//! through. It stores lowercase hex digits without the leading `#`, always
//! six digits, or eight when the color carries a non-opaque alpha.

pub mod manifest;
pub mod model;
pub mod named;

pub use manifest::ManifestColor;
pub use model::{Hsl, Hsla, Rgb, Rgba};
pub use named::{ColorRegistry, NamedColor, RegistryError};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use model::{alpha_to_byte, byte_to_alpha};

/// Errors raised while parsing, building or resolving colors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("invalid hex color `{0}`: expected 3, 6 or 8 hex digits")]
    InvalidFormat(String),

    #[error("{component} value {value} is out of range {range}")]
    OutOfRange {
        component: &'static str,
        value: String,
        range: &'static str,
    },

    #[error("unknown named color `{0}`")]
    UnknownColor(String),
}

/// Immutable color stored as normalized hex digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor {
    digits: String,
}

impl HexColor {
    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` (the `#` is optional).
    ///
    /// Shorthand expands by doubling each digit. An opaque alpha byte
    /// (`ff`) is dropped so that equal colors compare equal. Surrounding
    /// whitespace is rejected like any other character.
    pub fn parse(input: &str) -> Result<Self, ColorError> {
        let digits = input.strip_prefix('#').unwrap_or(input);

        if !matches!(digits.len(), 3 | 6 | 8) || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidFormat(input.to_string()));
        }

        let mut normalized = if digits.len() == 3 {
            digits.chars().flat_map(|c| [c, c]).collect::<String>()
        } else {
            digits.to_string()
        };
        normalized.make_ascii_lowercase();

        if normalized.len() == 8 && normalized.ends_with("ff") {
            normalized.truncate(6);
        }

        Ok(Self { digits: normalized })
    }

    pub fn from_rgb(r: i64, g: i64, b: i64) -> Result<Self, ColorError> {
        Rgb::checked(r, g, b).map(Self::from)
    }

    pub fn from_rgba(r: i64, g: i64, b: i64, a: f64) -> Result<Self, ColorError> {
        Rgba::checked(r, g, b, a).map(Self::from)
    }

    pub fn from_hsl(h: i64, s: i64, l: i64) -> Result<Self, ColorError> {
        Hsl::checked(h, s, l).map(Self::from)
    }

    pub fn from_hsla(h: i64, s: i64, l: i64, a: f64) -> Result<Self, ColorError> {
        Hsla::checked(h, s, l, a).map(Self::from)
    }

    /// Normalized digits without `#`.
    pub fn as_str(&self) -> &str {
        &self.digits
    }

    /// `#`-prefixed form.
    pub fn hex(&self) -> String {
        format!("#{}", self.digits)
    }

    pub fn has_alpha(&self) -> bool {
        self.digits.len() == 8
    }

    pub fn to_rgb(&self) -> Rgb {
        Rgb::new(self.byte(0), self.byte(1), self.byte(2))
    }

    /// RGB plus alpha, which defaults to `1.0` without an alpha byte.
    pub fn to_rgba(&self) -> Rgba {
        let a = if self.has_alpha() {
            byte_to_alpha(self.byte(3))
        } else {
            1.0
        };
        self.to_rgb().with_alpha(a)
    }

    pub fn to_hsl(&self) -> Hsl {
        self.to_rgb().to_hsl()
    }

    pub fn to_hsla(&self) -> Hsla {
        self.to_hsl().with_alpha(self.to_rgba().a)
    }

    /// CSS color string: `#rrggbb`, or `rgba(r, g, b, a)` with alpha.
    pub fn css(&self) -> String {
        if self.has_alpha() {
            self.to_rgba().to_string()
        } else {
            self.hex()
        }
    }

    /// Nearest entry of `registry` by euclidean RGB distance.
    ///
    /// Ties go to the entry registered first. `None` only for an empty registry.
    pub fn to_nearest_named<'r>(&self, registry: &'r ColorRegistry) -> Option<&'r NamedColor> {
        let rgb = self.to_rgb();
        // min_by_key returns the first of equal minima
        registry
            .entries()
            .iter()
            .min_by_key(|entry| entry.color().to_rgb().distance_sq(rgb))
    }

    fn byte(&self, index: usize) -> u8 {
        let i = index * 2;
        // digits are validated hex at construction
        u8::from_str_radix(&self.digits[i..i + 2], 16).unwrap_or_default()
    }
}

impl From<Rgb> for HexColor {
    fn from(rgb: Rgb) -> Self {
        Self {
            digits: format!("{:02x}{:02x}{:02x}", rgb.r, rgb.g, rgb.b),
        }
    }
}

impl From<Rgba> for HexColor {
    fn from(rgba: Rgba) -> Self {
        let alpha = alpha_to_byte(rgba.a);
        let mut color = Self::from(rgba.rgb());
        if alpha != u8::MAX {
            color.digits.push_str(&format!("{alpha:02x}"));
        }
        color
    }
}

impl From<Hsl> for HexColor {
    fn from(hsl: Hsl) -> Self {
        Self::from(hsl.to_rgb())
    }
}

impl From<Hsla> for HexColor {
    fn from(hsla: Hsla) -> Self {
        Self::from(hsla.hsl().to_rgb().with_alpha(hsla.a))
    }
}

impl FromStr for HexColor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for HexColor {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.hex()
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.digits)
    }
}
