//! Locale type: flexible, validated locale representation.
//!
//! A [`Locale`] is any non-blank code ("es", "pt-BR"); the crate does not
//! hardcode a language list. The set of locales an installation serves, and
//! which one is the untranslated default, live in a [`LocaleSet`] that callers
//! thread through the engine explicitly.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A validated locale code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locale(String);

impl Locale {
    /// Create a locale from a code string.
    ///
    /// # Arguments
    /// * `code` - The locale code (e.g., "es", "pt-BR")
    ///
    /// # Returns
    /// * `Ok(Locale)` with surrounding whitespace trimmed
    /// * `Err(Error::BlankLocale)` if the code is empty or whitespace-only
    pub fn new(code: impl AsRef<str>) -> Result<Locale> {
        let trimmed = code.as_ref().trim();
        if trimmed.is_empty() {
            return Err(Error::BlankLocale);
        }
        Ok(Locale(trimmed.to_string()))
    }

    /// Get the locale code.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The locales an installation serves plus its default (source) locale.
///
/// Stands in for an ambient "available locales" global: the engine receives a
/// `LocaleSet` at construction and the `AllExceptDefault` locale specification
/// resolves against it.
#[derive(Debug, Clone)]
pub struct LocaleSet {
    available: Vec<Locale>,
    default: Locale,
}

impl LocaleSet {
    /// Create a locale set.
    ///
    /// # Returns
    /// * `Err(Error::UnknownDefaultLocale)` if `default` is not in `available`
    pub fn new(available: Vec<Locale>, default: Locale) -> Result<LocaleSet> {
        if !available.contains(&default) {
            return Err(Error::UnknownDefaultLocale(default));
        }
        Ok(LocaleSet { available, default })
    }

    /// Parse a locale set from plain code strings.
    pub fn from_codes<S: AsRef<str>>(available: &[S], default: &str) -> Result<LocaleSet> {
        let available = available
            .iter()
            .map(Locale::new)
            .collect::<Result<Vec<_>>>()?;
        Self::new(available, Locale::new(default)?)
    }

    /// All configured locales, in configuration order.
    pub fn available(&self) -> &[Locale] {
        &self.available
    }

    /// The default (source content) locale.
    pub fn default_locale(&self) -> &Locale {
        &self.default
    }

    /// Every available locale except the default, in configuration order.
    ///
    /// This is the target set for entities that do not narrow their locales.
    pub fn all_except_default(&self) -> Vec<Locale> {
        self.available
            .iter()
            .filter(|locale| **locale != self.default)
            .cloned()
            .collect()
    }

    /// Check whether a locale belongs to this set.
    pub fn contains(&self, locale: &Locale) -> bool {
        self.available.contains(locale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Locale Tests ====================

    #[test]
    fn test_locale_from_code() {
        let locale = Locale::new("es").expect("Should succeed");
        assert_eq!(locale.as_str(), "es");
    }

    #[test]
    fn test_locale_trims_whitespace() {
        let locale = Locale::new("  pt-BR \n").expect("Should succeed");
        assert_eq!(locale.as_str(), "pt-BR");
    }

    #[test]
    fn test_locale_rejects_blank() {
        assert!(Locale::new("").is_err());
        assert!(Locale::new("   ").is_err());
        assert!(Locale::new("\t\n").is_err());
    }

    #[test]
    fn test_locale_display() {
        let locale = Locale::new("fr").unwrap();
        assert_eq!(format!("missing '{}'", locale), "missing 'fr'");
    }

    #[test]
    fn test_locale_equality_and_hash_agree() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(Locale::new("es").unwrap());
        assert!(set.contains(&Locale::new("es").unwrap()));
        assert!(!set.contains(&Locale::new("fr").unwrap()));
    }

    #[test]
    fn test_locale_serde_is_transparent() {
        let locale = Locale::new("de").unwrap();
        let json = serde_json::to_string(&locale).expect("Should serialize");
        assert_eq!(json, "\"de\"");

        let back: Locale = serde_json::from_str(&json).expect("Should deserialize");
        assert_eq!(back, locale);
    }

    // ==================== LocaleSet Tests ====================

    #[test]
    fn test_locale_set_from_codes() {
        let set = LocaleSet::from_codes(&["en", "es", "fr"], "en").expect("Should succeed");
        assert_eq!(set.available().len(), 3);
        assert_eq!(set.default_locale().as_str(), "en");
    }

    #[test]
    fn test_locale_set_rejects_foreign_default() {
        let result = LocaleSet::from_codes(&["en", "es"], "de");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("'de'"));
    }

    #[test]
    fn test_all_except_default_preserves_order() {
        let set = LocaleSet::from_codes(&["en", "es", "fr", "de"], "es").unwrap();
        let codes: Vec<String> = set
            .all_except_default()
            .iter()
            .map(|locale| locale.as_str().to_string())
            .collect();
        assert_eq!(codes, vec!["en", "fr", "de"]);
    }

    #[test]
    fn test_contains() {
        let set = LocaleSet::from_codes(&["en", "es"], "en").unwrap();
        assert!(set.contains(&Locale::new("es").unwrap()));
        assert!(!set.contains(&Locale::new("fr").unwrap()));
    }
}
