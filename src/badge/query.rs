//! Shields.io static badge URLs.
//!
//! ```text
//! {base}{label}-{message}-{color}?style=..&labelColor=..&color=..&logo=data:image/svg+xml;base64,..
//! ```
//!
//! Path segments use the service's own escaping (`-` → `--`, `_` → `__`,
//! space → `_`) before percent-encoding. Query values are form-encoded.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use url::Url;

use super::{Badge, BadgeError};
use crate::color::HexColor;

/// Everything except unreserved characters.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Escape one `-`-delimited part of the badge path.
pub fn escape_segment(text: &str) -> String {
    let escaped = text.replace('-', "--").replace('_', "__").replace(' ', "_");
    utf8_percent_encode(&escaped, SEGMENT).to_string()
}

/// Color as the service expects it: bare hex digits, or `rgba(...)` with alpha.
pub fn service_color(color: &HexColor) -> String {
    if color.has_alpha() {
        color.css()
    } else {
        color.as_str().to_string()
    }
}

impl Badge<'_> {
    /// Full request URL under `base` (which should end with `/`).
    pub fn url(&self, base: &Url) -> Result<Url, BadgeError> {
        let spec = self.spec;
        let color = service_color(&spec.color);

        let mut parts = vec![escape_segment(&spec.label)];
        if let Some(message) = spec.message.as_deref().filter(|m| !m.is_empty()) {
            parts.push(escape_segment(message));
        }
        parts.push(escape_segment(&color));

        let logo = self.logo_data_uri()?;
        let mut url = base.join(&parts.join("-"))?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("style", self.style.service_value());
            if let Some(label_color) = &spec.label_color {
                query.append_pair("labelColor", &service_color(label_color));
            }
            query.append_pair("color", &color);
            query.append_pair("logo", &logo);
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::badge::BadgeStyle;
    use crate::badge::tests::spec;

    fn base() -> Url {
        Url::parse("https://img.shields.io/badge/").unwrap()
    }

    #[test]
    fn test_escape_segment() {
        assert_eq!(escape_segment("hello world"), "hello_world");
        assert_eq!(escape_segment("a-b_c"), "a--b__c");
        assert_eq!(escape_segment("C++ / C#"), "C%2B%2B_%2F_C%23");
        assert_eq!(escape_segment("v1.0"), "v1.0");
        assert_eq!(escape_segment("é"), "%C3%A9");
    }

    #[test]
    fn test_url_without_message() {
        let spec = spec("github");
        let badge = spec.badges()[0];
        let url = badge.url(&base()).unwrap();

        assert_eq!(url.path(), "/badge/GitHub-181717");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs[0], ("style".into(), "flat".into()));
        assert_eq!(pairs[1], ("color".into(), "181717".into()));
        assert_eq!(pairs[2], ("logo".into(), spec.logo.data_uri()));
        assert!(url.as_str().contains("logo=data%3Aimage%2Fsvg%2Bxml%3Bbase64%2C"));
    }

    #[test]
    fn test_url_with_message_and_label_color() {
        let mut spec = spec("github");
        spec.message = Some("build-passing".into());
        spec.label_color = Some(HexColor::parse("#555").unwrap());
        spec.style = Some(BadgeStyle::TrueFlat);
        let url = spec.badges()[0].url(&base()).unwrap();

        assert_eq!(url.path(), "/badge/GitHub-build--passing-181717");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs[0], ("style".into(), "flat".into()));
        assert_eq!(pairs[1], ("labelColor".into(), "555555".into()));
    }

    #[test]
    fn test_empty_message_is_skipped() {
        let mut spec = spec("github");
        spec.message = Some(String::new());
        let url = spec.badges()[0].url(&base()).unwrap();
        assert_eq!(url.path(), "/badge/GitHub-181717");
    }

    #[test]
    fn test_alpha_color_in_path() {
        let mut spec = spec("github");
        spec.color = HexColor::from_rgba(0, 0, 0, 0.5).unwrap();
        let url = spec.badges()[0].url(&base()).unwrap();
        assert_eq!(url.path(), "/badge/GitHub-rgba%280%2C_0%2C_0%2C_0.502%29");
        let color = url.query_pairs().find(|(k, _)| k == "color").unwrap().1;
        assert_eq!(color, "rgba(0, 0, 0, 0.502)");
    }
}
