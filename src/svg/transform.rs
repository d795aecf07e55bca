//! Element predicates used by the document rewrites.
//!
//! The shadow-text rule mirrors how shields.io renders text: every label is
//! drawn twice, the first copy offset, hidden from screen readers and
//! semi-transparent.

use super::tree::Element;

pub fn is_linear_gradient(element: &Element) -> bool {
    element.local_name() == "linearGradient"
}

/// `<text>` with `aria-hidden="true"`, or with a non-empty `fill-opacity`
/// other than `"1"`.
pub fn is_shadow_text(element: &Element) -> bool {
    element.local_name() == "text"
        && (element.attr("aria-hidden") == Some("true")
            || element
                .attr("fill-opacity")
                .is_some_and(|opacity| !opacity.is_empty() && opacity != "1"))
}

/// `<path>` that already declares `fill`.
pub fn is_filled_path(element: &Element) -> bool {
    element.local_name() == "path" && element.has_attr("fill")
}

pub fn is_font_target(element: &Element) -> bool {
    matches!(element.local_name(), "text" | "g")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::svg::tree::Tree;

    fn first(markup: &str) -> Element {
        let mut tree = Tree::parse(&format!("<svg>{markup}</svg>")).unwrap();
        let mut found = None;
        tree.for_each_element_mut(|e| {
            if found.is_none() && e.name != "svg" {
                found = Some(e.clone());
            }
        });
        found.unwrap()
    }

    #[test]
    fn test_shadow_text_predicate() {
        assert!(is_shadow_text(&first(r#"<text aria-hidden="true"/>"#)));
        assert!(is_shadow_text(&first(r#"<text fill-opacity="0.3"/>"#)));
        assert!(is_shadow_text(&first(r#"<svg:text fill-opacity="1.0"/>"#)));
        assert!(!is_shadow_text(&first(r#"<text fill-opacity="1"/>"#)));
        assert!(!is_shadow_text(&first(r#"<text aria-hidden="TRUE"/>"#)));
        assert!(!is_shadow_text(&first(r#"<tspan aria-hidden="true"/>"#)));
    }

    #[test]
    fn test_other_predicates() {
        assert!(is_linear_gradient(&first("<linearGradient/>")));
        assert!(!is_linear_gradient(&first("<radialGradient/>")));
        assert!(is_filled_path(&first(r#"<path fill="none"/>"#)));
        assert!(!is_filled_path(&first("<path/>")));
        assert!(!is_filled_path(&first(r#"<rect fill="red"/>"#)));
        assert!(is_font_target(&first("<g/>")));
        assert!(is_font_target(&first("<text/>")));
        assert!(!is_font_target(&first("<tspan/>")));
    }
}
