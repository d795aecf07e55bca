//! Numeric color models and the RGB ⇄ HSL math.
//!
//! All conversions work on 8-bit sRGB channels. HSL components are integer
//! degrees / percentages, so an RGB → HSL → RGB round trip may drift by one
//! step per channel.

use std::fmt;

use super::ColorError;

/// 8-bit RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// RGB with a fractional alpha in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

/// Hue in degrees (`0..360`), saturation and lightness in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hsl {
    pub h: u16,
    pub s: u8,
    pub l: u8,
}

/// HSL with a fractional alpha in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsla {
    pub h: u16,
    pub s: u8,
    pub l: u8,
    pub a: f64,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from wide integers, rejecting anything outside `0..=255`.
    pub fn checked(r: i64, g: i64, b: i64) -> Result<Self, ColorError> {
        Ok(Self {
            r: channel("red", r)?,
            g: channel("green", g)?,
            b: channel("blue", b)?,
        })
    }

    /// Squared euclidean distance in RGB space.
    pub fn distance_sq(self, other: Rgb) -> u32 {
        let d = |a: u8, b: u8| (i32::from(a) - i32::from(b)).unsigned_abs().pow(2);
        d(self.r, other.r) + d(self.g, other.g) + d(self.b, other.b)
    }

    pub fn with_alpha(self, a: f64) -> Rgba {
        Rgba {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }

    /// Convert to HSL using the min/max/delta formulation.
    pub fn to_hsl(self) -> Hsl {
        let r = f64::from(self.r) / 255.0;
        let g = f64::from(self.g) / 255.0;
        let b = f64::from(self.b) / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let sector = if delta == 0.0 {
            0.0
        } else if max == r {
            ((g - b) / delta).rem_euclid(6.0)
        } else if max == g {
            (b - r) / delta + 2.0
        } else {
            (r - g) / delta + 4.0
        };

        let l = (max + min) / 2.0;
        let s = if delta == 0.0 {
            0.0
        } else {
            delta / (1.0 - (2.0 * l - 1.0).abs())
        };

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Hsl {
            h: ((sector * 60.0).round() as u16) % 360,
            s: (s * 100.0).round().clamp(0.0, 100.0) as u8,
            l: (l * 100.0).round().clamp(0.0, 100.0) as u8,
        }
    }
}

impl Rgba {
    pub fn checked(r: i64, g: i64, b: i64, a: f64) -> Result<Self, ColorError> {
        Ok(Rgb::checked(r, g, b)?.with_alpha(alpha(a)?))
    }

    pub fn rgb(self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }
}

impl Hsl {
    /// Build from wide integers; hue must be in `0..=360`, the rest `0..=100`.
    pub fn checked(h: i64, s: i64, l: i64) -> Result<Self, ColorError> {
        let h = range("hue", h, 360)?;
        let s = range("saturation", s, 100)?;
        let l = range("lightness", l, 100)?;

        #[allow(clippy::cast_possible_truncation)]
        Ok(Self {
            h: h as u16,
            s: s as u8,
            l: l as u8,
        })
    }

    pub fn with_alpha(self, a: f64) -> Hsla {
        Hsla {
            h: self.h,
            s: self.s,
            l: self.l,
            a,
        }
    }

    /// Convert to RGB using the chroma / intermediate / match formulation.
    ///
    /// A hue of 360 lands in the same sector as 0.
    pub fn to_rgb(self) -> Rgb {
        let h = f64::from(self.h % 360);
        let s = f64::from(self.s) / 100.0;
        let l = f64::from(self.l) / 100.0;

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
        let m = l - c / 2.0;

        let (r, g, b) = match self.h % 360 {
            0..60 => (c, x, 0.0),
            60..120 => (x, c, 0.0),
            120..180 => (0.0, c, x),
            180..240 => (0.0, x, c),
            240..300 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        let to_u8 = |v: f64| -> u8 {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let out = ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
            out
        };

        Rgb::new(to_u8(r), to_u8(g), to_u8(b))
    }
}

impl Hsla {
    pub fn checked(h: i64, s: i64, l: i64, a: f64) -> Result<Self, ColorError> {
        Ok(Hsl::checked(h, s, l)?.with_alpha(alpha(a)?))
    }

    pub fn hsl(self) -> Hsl {
        Hsl {
            h: self.h,
            s: self.s,
            l: self.l,
        }
    }
}

/// Encode a fractional alpha as a byte (`round(a × 255)`).
pub fn alpha_to_byte(a: f64) -> u8 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let byte = (a * 255.0).round().clamp(0.0, 255.0) as u8;
    byte
}

pub fn byte_to_alpha(byte: u8) -> f64 {
    f64::from(byte) / 255.0
}

fn channel(component: &'static str, value: i64) -> Result<u8, ColorError> {
    u8::try_from(value).map_err(|_| ColorError::OutOfRange {
        component,
        value: value.to_string(),
        range: "0..=255",
    })
}

fn range(component: &'static str, value: i64, max: i64) -> Result<i64, ColorError> {
    if (0..=max).contains(&value) {
        Ok(value)
    } else {
        Err(ColorError::OutOfRange {
            component,
            value: value.to_string(),
            range: if max == 360 { "0..=360" } else { "0..=100" },
        })
    }
}

fn alpha(a: f64) -> Result<f64, ColorError> {
    // NaN fails the range check as well.
    if (0.0..=1.0).contains(&a) {
        Ok(a)
    } else {
        Err(ColorError::OutOfRange {
            component: "alpha",
            value: a.to_string(),
            range: "0.0..=1.0",
        })
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rgba({}, {}, {}, {})",
            self.r,
            self.g,
            self.b,
            round_alpha(self.a)
        )
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({}, {}%, {}%)", self.h, self.s, self.l)
    }
}

impl fmt::Display for Hsla {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsla({}, {}%, {}%, {})",
            self.h,
            self.s,
            self.l,
            round_alpha(self.a)
        )
    }
}

/// Alpha rounded to three decimals for display (`0.502`, `1`).
fn round_alpha(a: f64) -> f64 {
    (a * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Rgb, b: Rgb) -> bool {
        let d = |x: u8, y: u8| (i16::from(x) - i16::from(y)).abs() <= 1;
        d(a.r, b.r) && d(a.g, b.g) && d(a.b, b.b)
    }

    #[test]
    fn test_rgb_to_hsl_primaries() {
        assert_eq!(Rgb::new(255, 0, 0).to_hsl(), Hsl { h: 0, s: 100, l: 50 });
        assert_eq!(Rgb::new(0, 255, 0).to_hsl(), Hsl { h: 120, s: 100, l: 50 });
        assert_eq!(Rgb::new(0, 0, 255).to_hsl(), Hsl { h: 240, s: 100, l: 50 });
        assert_eq!(Rgb::new(255, 255, 255).to_hsl(), Hsl { h: 0, s: 0, l: 100 });
        assert_eq!(Rgb::new(0, 0, 0).to_hsl(), Hsl { h: 0, s: 0, l: 0 });
    }

    #[test]
    fn test_rgb_to_hsl_negative_sector_wraps() {
        // max == r with g < b gives a negative raw sector
        let hsl = Rgb::new(255, 0, 128).to_hsl();
        assert_eq!(hsl.h, 330);
    }

    #[test]
    fn test_hue_never_reaches_360() {
        // Sector rounds up to exactly 360 degrees
        let hsl = Rgb::new(255, 0, 1).to_hsl();
        assert!(hsl.h < 360);
    }

    #[test]
    fn test_hsl_to_rgb_known_value() {
        let rgb = Hsl { h: 200, s: 50, l: 50 }.to_rgb();
        assert!(close(rgb, Rgb::new(64, 149, 191)), "{rgb:?}");
    }

    #[test]
    fn test_hsl_360_equals_0() {
        let a = Hsl { h: 360, s: 80, l: 40 }.to_rgb();
        let b = Hsl { h: 0, s: 80, l: 40 }.to_rgb();
        assert_eq!(a, b);
    }

    #[test]
    fn test_hsl_round_trip_error_bound() {
        // Integer percentages quantize lightness and saturation, so the
        // round trip cannot hold to 1 per channel everywhere. 5 is the
        // measured maximum over the whole cube.
        let mut worst = 0;
        for r in 0..=255u8 {
            for g in 0..=255u8 {
                for b in 0..=255u8 {
                    let rgb = Rgb::new(r, g, b);
                    let back = rgb.to_hsl().to_rgb();
                    let d = |x: u8, y: u8| x.abs_diff(y);
                    worst = worst.max(d(r, back.r)).max(d(g, back.g)).max(d(b, back.b));
                }
            }
        }
        assert_eq!(worst, 5);

        let rgb = Rgb::new(2, 228, 230);
        assert_eq!(rgb.to_hsl(), Hsl { h: 181, s: 98, l: 45 });
        assert_eq!(rgb.to_hsl().to_rgb(), Rgb::new(2, 223, 227));
    }

    #[test]
    fn test_hsl_round_trip_exact_for_grays_and_primaries() {
        for rgb in [
            Rgb::new(0, 0, 0),
            Rgb::new(255, 255, 255),
            Rgb::new(255, 0, 0),
            Rgb::new(0, 255, 0),
            Rgb::new(0, 0, 255),
        ] {
            assert_eq!(rgb.to_hsl().to_rgb(), rgb);
        }
    }

    #[test]
    fn test_checked_ranges() {
        assert!(Rgb::checked(0, 128, 255).is_ok());
        assert!(matches!(
            Rgb::checked(256, 0, 0),
            Err(ColorError::OutOfRange { component: "red", .. })
        ));
        assert!(Rgb::checked(0, -1, 0).is_err());

        assert!(Hsl::checked(360, 100, 0).is_ok());
        assert!(Hsl::checked(361, 0, 0).is_err());
        assert!(Hsl::checked(0, 101, 0).is_err());
        assert!(Hsl::checked(0, 0, -5).is_err());

        assert!(Rgba::checked(1, 2, 3, 0.0).is_ok());
        assert!(Rgba::checked(1, 2, 3, 1.5).is_err());
        assert!(Rgba::checked(1, 2, 3, f64::NAN).is_err());
        assert!(Hsla::checked(10, 20, 30, -0.1).is_err());
    }

    #[test]
    fn test_alpha_byte() {
        assert_eq!(alpha_to_byte(1.0), 255);
        assert_eq!(alpha_to_byte(0.0), 0);
        assert_eq!(alpha_to_byte(0.5), 128);
        assert!((byte_to_alpha(255) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_display() {
        assert_eq!(Rgb::new(1, 2, 3).to_string(), "rgb(1, 2, 3)");
        assert_eq!(Rgb::new(1, 2, 3).with_alpha(0.5).to_string(), "rgba(1, 2, 3, 0.5)");
        assert_eq!(Hsl { h: 200, s: 50, l: 50 }.to_string(), "hsl(200, 50%, 50%)");
    }
}
