//! `color` command: show one color in every notation.

use anyhow::{Context, Result};
use serde_json::{Value, json};

use crate::{
    color::{ColorRegistry, HexColor, ManifestColor, named::Palette},
    config::ProjectConfig,
    log,
};

pub fn show_color(config: &ProjectConfig, value: &str, class: &str) -> Result<()> {
    let css = config.css_registry().context("failed to load css color definitions")?;
    let palette = match &css {
        Some(css) => Palette::with_css(css),
        None => Palette::default(),
    };

    let color = parse_color(value, class)?
        .resolve(&palette)
        .with_context(|| format!("cannot resolve {class} color `{value}`"))?;

    for (name, text) in describe(&color, palette.css) {
        log!("color"; "{name:<8}{text}");
    }
    Ok(())
}

/// Build a tagged color from command-line text.
///
/// Numeric classes take comma- or space-separated components.
fn parse_color(value: &str, class: &str) -> Result<ManifestColor> {
    let value = match class {
        "hex" | "named_color" => Value::String(value.trim().to_string()),
        _ => {
            let components = value
                .split([',', ' '])
                .filter(|part| !part.is_empty())
                .map(|part| {
                    serde_json::from_str::<Value>(part)
                        .with_context(|| format!("`{part}` is not a number"))
                })
                .collect::<Result<Vec<_>>>()?;
            Value::Array(components)
        }
    };

    serde_json::from_value(json!({ "class": class, "value": value }))
        .with_context(|| format!("`{}` is not a valid {class} color", value))
}

/// `(notation, text)` rows for a resolved color.
fn describe(color: &HexColor, css: &ColorRegistry) -> Vec<(&'static str, String)> {
    let mut rows = vec![("hex", color.hex()), ("css", color.css())];
    if color.has_alpha() {
        rows.push(("rgba", color.to_rgba().to_string()));
        rows.push(("hsla", color.to_hsla().to_string()));
    } else {
        rows.push(("rgb", color.to_rgb().to_string()));
        rows.push(("hsl", color.to_hsl().to_string()));
    }
    if let Some(named) = color.to_nearest_named(css) {
        rows.push(("nearest", format!("{} ({})", named.slug(), named.color().hex())));
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color_classes() {
        assert_eq!(
            parse_color("#4c1", "hex").unwrap(),
            ManifestColor::Hex("#4c1".into())
        );
        assert_eq!(
            parse_color("64, 149, 191", "rgb").unwrap(),
            ManifestColor::Rgb(64, 149, 191)
        );
        assert_eq!(
            parse_color("255 0 0 0.5", "rgba").unwrap(),
            ManifestColor::Rgba(255, 0, 0, 0.5)
        );
        assert_eq!(
            parse_color("informational", "named_color").unwrap(),
            ManifestColor::NamedColor("informational".into())
        );
    }

    #[test]
    fn test_parse_color_rejects_bad_components() {
        assert!(parse_color("1,2", "rgb").is_err());
        assert!(parse_color("1,two,3", "rgb").is_err());
    }

    #[test]
    fn test_describe_opaque() {
        let color = HexColor::parse("#ff0000").unwrap();
        let rows = describe(&color, ColorRegistry::css());
        assert_eq!(rows[0], ("hex", "#ff0000".to_string()));
        assert_eq!(rows[2], ("rgb", "rgb(255, 0, 0)".to_string()));
        assert_eq!(rows[3], ("hsl", "hsl(0, 100%, 50%)".to_string()));
        assert_eq!(rows[4], ("nearest", "red (#ff0000)".to_string()));
    }

    #[test]
    fn test_describe_alpha() {
        let color = HexColor::parse("#ff000080").unwrap();
        let rows = describe(&color, ColorRegistry::css());
        assert_eq!(rows[1].1, "rgba(255, 0, 0, 0.502)");
        assert_eq!(rows[2].0, "rgba");
        assert_eq!(rows[3].0, "hsla");
    }
}
