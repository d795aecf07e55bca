//! Embedded data tables.
//!
//! Both tables were produced by scraping their upstream references and are
//! compiled into the binary so that registries need no files at runtime.
//!
//! - `css_named_colors.json` - CSS Color Module keywords, `[{"slug", "hex"}]`
//! - `web_safe_fonts.json` - font stacks grouped by generic family,
//!   `{"sans-serif": [{"family-name", "style"}], ...}`

/// CSS named-color definitions.
pub const CSS_NAMED_COLORS_JSON: &str = include_str!("data/css_named_colors.json");

/// Web-safe font stacks grouped by generic family.
pub const WEB_SAFE_FONTS_JSON: &str = include_str!("data/web_safe_fonts.json");
