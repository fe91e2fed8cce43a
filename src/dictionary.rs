//! Dictionary (translation) lookups.
//!
//! Views ask for labels by key. When a key has no translation the key itself
//! is usually the best thing to show, so [`dictionary_value`] returns it by
//! default. A value that is empty or only whitespace counts as missing.
//!
//! [`Translations`] is a TOML-backed [`Dictionary`] with one table per
//! culture and an optional fallback culture:
//!
//! ```toml
//! [en-US]
//! greeting = "Hello"
//! "Footer.Copyright" = "All rights reserved"
//!
//! [da-DK]
//! greeting = "Hej"
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DictionaryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Resolves dictionary keys to translated text.
pub trait Dictionary {
    fn lookup(&self, key: &str) -> Option<String>;
}

impl Dictionary for HashMap<String, String> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl Dictionary for BTreeMap<String, String> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Case folding applied to the returned value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Casing {
    #[default]
    Preserve,
    Lower,
    Upper,
}

impl Casing {
    /// Map the two-flag form used by templates. Lowercase wins when both are set.
    pub fn from_flags(lower_case: bool, upper_case: bool) -> Self {
        match (lower_case, upper_case) {
            (true, _) => Casing::Lower,
            (false, true) => Casing::Upper,
            (false, false) => Casing::Preserve,
        }
    }

    fn apply(self, value: String) -> String {
        match self {
            Casing::Preserve => value,
            Casing::Lower => value.to_lowercase(),
            Casing::Upper => value.to_uppercase(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DictionaryLookup {
    /// Return the key itself when there is no usable value.
    pub return_key_if_missing: bool,
    pub casing: Casing,
}

impl Default for DictionaryLookup {
    fn default() -> Self {
        Self {
            return_key_if_missing: true,
            casing: Casing::Preserve,
        }
    }
}

/// Look up `key`, falling back to the key (or an empty string) when the
/// value is missing or blank, then apply the requested casing.
pub fn dictionary_value(dictionary: &dyn Dictionary, key: &str, lookup: &DictionaryLookup) -> String {
    let value = match dictionary.lookup(key) {
        Some(value) if !value.trim().is_empty() => value,
        _ if lookup.return_key_if_missing => key.to_string(),
        _ => String::new(),
    };
    lookup.casing.apply(value)
}

/// Per-culture dictionary loaded from TOML.
#[derive(Debug, Clone, Default)]
pub struct Translations {
    culture: String,
    fallback_culture: Option<String>,
    cultures: BTreeMap<String, BTreeMap<String, String>>,
}

impl Translations {
    pub fn from_toml_str(toml: &str, culture: &str) -> Result<Self, DictionaryError> {
        let cultures: BTreeMap<String, BTreeMap<String, String>> = toml::from_str(toml)?;
        Ok(Self {
            culture: culture.to_string(),
            fallback_culture: None,
            cultures,
        })
    }

    pub fn load(path: &Path, culture: &str) -> Result<Self, DictionaryError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content, culture)
    }

    /// Consult `culture` when the active culture has no usable value.
    pub fn with_fallback_culture(mut self, culture: &str) -> Self {
        self.fallback_culture = Some(culture.to_string());
        self
    }

    /// The same translations viewed in another culture.
    pub fn for_culture(&self, culture: &str) -> Self {
        Self {
            culture: culture.to_string(),
            ..self.clone()
        }
    }

    pub fn culture(&self) -> &str {
        &self.culture
    }

    pub fn cultures(&self) -> impl Iterator<Item = &str> {
        self.cultures.keys().map(String::as_str)
    }

    fn entry(&self, culture: &str, key: &str) -> Option<&String> {
        self.cultures
            .get(culture)?
            .get(key)
            .filter(|v| !v.trim().is_empty())
    }
}

impl Dictionary for Translations {
    fn lookup(&self, key: &str) -> Option<String> {
        self.entry(&self.culture, key)
            .or_else(|| {
                self.fallback_culture
                    .as_deref()
                    .and_then(|fallback| self.entry(fallback, key))
            })
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const TOML: &str = r#"
[en-US]
greeting = "Hello"
farewell = "Goodbye"
blank = "  "
"Footer.Copyright" = "All rights reserved"

[da-DK]
greeting = "Hej"
"#;

    fn words() -> HashMap<String, String> {
        HashMap::from([
            ("greeting".to_string(), "Hello World".to_string()),
            ("empty".to_string(), String::new()),
        ])
    }

    // =========================================================================
    // dictionary_value
    // =========================================================================

    #[test]
    fn found_value_is_returned() {
        let value = dictionary_value(&words(), "greeting", &DictionaryLookup::default());
        assert_eq!(value, "Hello World");
    }

    #[test]
    fn missing_key_returns_key_by_default() {
        let dict: HashMap<String, String> = HashMap::new();
        assert_eq!(
            dictionary_value(&dict, "greeting", &DictionaryLookup::default()),
            "greeting"
        );
    }

    #[test]
    fn missing_key_upper_cased() {
        let dict: HashMap<String, String> = HashMap::new();
        let lookup = DictionaryLookup {
            casing: Casing::Upper,
            ..Default::default()
        };
        assert_eq!(dictionary_value(&dict, "greeting", &lookup), "GREETING");
    }

    #[test]
    fn empty_value_counts_as_missing() {
        assert_eq!(
            dictionary_value(&words(), "empty", &DictionaryLookup::default()),
            "empty"
        );
    }

    #[test]
    fn missing_key_without_key_fallback_is_empty() {
        let lookup = DictionaryLookup {
            return_key_if_missing: false,
            casing: Casing::Upper,
        };
        assert_eq!(dictionary_value(&words(), "nope", &lookup), "");
    }

    #[test]
    fn casing_applies_to_found_values() {
        let lower = DictionaryLookup {
            casing: Casing::Lower,
            ..Default::default()
        };
        assert_eq!(dictionary_value(&words(), "greeting", &lower), "hello world");
    }

    #[test]
    fn casing_flags_prefer_lowercase() {
        assert_eq!(Casing::from_flags(true, true), Casing::Lower);
        assert_eq!(Casing::from_flags(false, true), Casing::Upper);
        assert_eq!(Casing::from_flags(false, false), Casing::Preserve);
    }

    #[test]
    fn btreemap_is_a_dictionary() {
        let dict = BTreeMap::from([("a".to_string(), "b".to_string())]);
        assert_eq!(dict.lookup("a").as_deref(), Some("b"));
    }

    // =========================================================================
    // Translations
    // =========================================================================

    #[test]
    fn translations_lookup_active_culture() {
        let tr = Translations::from_toml_str(TOML, "da-DK").unwrap();
        assert_eq!(tr.lookup("greeting").as_deref(), Some("Hej"));
        assert_eq!(tr.lookup("farewell"), None);
    }

    #[test]
    fn translations_fall_back_to_fallback_culture() {
        let tr = Translations::from_toml_str(TOML, "da-DK")
            .unwrap()
            .with_fallback_culture("en-US");
        assert_eq!(tr.lookup("farewell").as_deref(), Some("Goodbye"));
        assert_eq!(tr.lookup("greeting").as_deref(), Some("Hej"));
    }

    #[test]
    fn blank_translation_is_skipped_for_fallback() {
        let tr = Translations::from_toml_str(TOML, "en-US").unwrap();
        assert_eq!(tr.lookup("blank"), None);
        assert_eq!(dictionary_value(&tr, "blank", &DictionaryLookup::default()), "blank");
    }

    #[test]
    fn dotted_keys_are_supported() {
        let tr = Translations::from_toml_str(TOML, "en-US").unwrap();
        assert_eq!(tr.lookup("Footer.Copyright").as_deref(), Some("All rights reserved"));
    }

    #[test]
    fn unknown_culture_finds_nothing() {
        let tr = Translations::from_toml_str(TOML, "de-DE").unwrap();
        assert_eq!(tr.lookup("greeting"), None);
        assert_eq!(tr.for_culture("en-US").lookup("greeting").as_deref(), Some("Hello"));
    }

    #[test]
    fn cultures_are_listed() {
        let tr = Translations::from_toml_str(TOML, "en-US").unwrap();
        assert_eq!(tr.cultures().collect::<Vec<_>>(), vec!["da-DK", "en-US"]);
    }

    #[test]
    fn nested_non_string_values_are_rejected() {
        let result = Translations::from_toml_str("[en-US]\ncount = 3\n", "en-US");
        assert!(matches!(result, Err(DictionaryError::Toml(_))));
    }

    #[test]
    fn load_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("dictionary.toml");
        fs::write(&path, TOML).unwrap();
        let tr = Translations::load(&path, "en-US").unwrap();
        assert_eq!(tr.culture(), "en-US");
        assert_eq!(tr.lookup("greeting").as_deref(), Some("Hello"));
    }
}
