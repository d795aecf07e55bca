//! Font registry backed by the embedded web-safe font table.

use rustc_hash::FxHashMap;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use super::{FontDescriptor, FontError, FontGroup};
use crate::embed::WEB_SAFE_FONTS_JSON;

#[derive(Debug, Deserialize)]
struct Definition {
    #[serde(rename = "family-name")]
    family_name: String,
    style: String,
}

/// Read-only set of fonts, grouped, with `Default` last.
#[derive(Debug, Clone)]
pub struct FontRegistry {
    fonts: Vec<FontDescriptor>,
    /// Uppercased family name to position in `fonts`.
    index: FxHashMap<String, usize>,
}

static EMBEDDED: LazyLock<FontRegistry> = LazyLock::new(|| {
    FontRegistry::from_json(WEB_SAFE_FONTS_JSON).expect("embedded font table is valid")
});

fn key(family_name: &str) -> String {
    family_name.trim().to_uppercase()
}

impl FontRegistry {
    pub fn embedded() -> &'static Self {
        &EMBEDDED
    }

    /// Parse `{"<group>": [{"family-name", "style"}, ...], ...}`.
    ///
    /// Groups are ordered as in [`FontGroup::ALL`]; fonts keep file order.
    pub fn from_json(json: &str) -> Result<Self, FontError> {
        let groups: BTreeMap<FontGroup, Vec<Definition>> = serde_json::from_str(json)?;
        let fonts = groups.into_iter().flat_map(|(group, defs)| {
            defs.into_iter()
                .map(move |def| FontDescriptor::new(def.family_name, def.style, group))
        });
        Self::from_fonts(fonts)
    }

    /// Build from descriptors, appending the `Default` sentinel.
    pub fn from_fonts(fonts: impl IntoIterator<Item = FontDescriptor>) -> Result<Self, FontError> {
        let mut registry = Self {
            fonts: Vec::new(),
            index: FxHashMap::default(),
        };
        for font in fonts.into_iter().chain([FontDescriptor::default_font()]) {
            let position = registry.fonts.len();
            if registry.index.insert(key(font.family_name()), position).is_some() {
                return Err(FontError::DuplicateFamily(font.family_name().to_string()));
            }
            registry.fonts.push(font);
        }
        Ok(registry)
    }

    /// Case-insensitive match on the family name.
    pub fn lookup(&self, family_name: &str) -> Result<&FontDescriptor, FontError> {
        self.index
            .get(&key(family_name))
            .map(|&i| &self.fonts[i])
            .ok_or_else(|| FontError::UnknownFont(family_name.to_string()))
    }

    pub fn default_font(&self) -> &FontDescriptor {
        // from_fonts always appends the sentinel last
        &self.fonts[self.fonts.len() - 1]
    }

    pub fn fonts_in(&self, group: FontGroup) -> impl Iterator<Item = &FontDescriptor> {
        self.fonts.iter().filter(move |font| font.group() == group)
    }

    pub fn all(&self) -> &[FontDescriptor] {
        &self.fonts
    }

    /// Every font except the `Default` sentinel.
    pub fn real_fonts(&self) -> impl Iterator<Item = &FontDescriptor> {
        self.fonts.iter().filter(|font| !font.is_default())
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_table() {
        let fonts = FontRegistry::embedded();
        assert_eq!(fonts.real_fonts().count(), 46);
        assert_eq!(fonts.len(), 47);
        assert_eq!(fonts.fonts_in(FontGroup::Monospace).count(), 6);
        assert_eq!(fonts.fonts_in(FontGroup::Cursive).count(), 1);
        assert!(fonts.default_font().is_default());
    }

    #[test]
    fn test_lookup_case_insensitive() {
        let fonts = FontRegistry::embedded();
        let georgia = fonts.lookup("gEoRgIa").unwrap();
        assert_eq!(georgia.family_name(), "Georgia");
        assert_eq!(georgia.group(), FontGroup::Serif);
        assert!(fonts.lookup("default").unwrap().is_default());
        assert!(matches!(fonts.lookup("Comic Neue"), Err(FontError::UnknownFont(name)) if name == "Comic Neue"));
    }

    #[test]
    fn test_every_stack_ends_with_its_group() {
        for font in FontRegistry::embedded().real_fonts() {
            let stack = font.css_stack();
            assert!(
                stack.ends_with(font.group().as_str()),
                "{} -> {stack}",
                font.family_name()
            );
        }
    }

    #[test]
    fn test_from_json_rejects_duplicates_and_bad_groups() {
        let dup = r#"{"serif": [
            {"family-name": "A", "style": "font-family: A, serif;"},
            {"family-name": "a", "style": "font-family: a, serif;"}
        ]}"#;
        assert!(matches!(FontRegistry::from_json(dup), Err(FontError::DuplicateFamily(_))));

        let bad = r#"{"handwriting": []}"#;
        assert!(matches!(FontRegistry::from_json(bad), Err(FontError::Json(_))));

        let shadowing_default = r#"{"serif": [{"family-name": "Default", "style": ""}]}"#;
        assert!(FontRegistry::from_json(shadowing_default).is_err());
    }

    #[test]
    fn test_shared_across_threads() {
        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| assert!(FontRegistry::embedded().lookup("Arial").is_ok()));
            }
        });
    }
}
