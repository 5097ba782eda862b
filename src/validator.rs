//! Translated-content validation.
//!
//! Machine translation sometimes mangles the parts of a value that must
//! survive verbatim: interpolation placeholders, URLs, embedded markup. The
//! dispatcher runs these checks after every translator call and logs what
//! they find; a warning never blocks the merge.

use regex::Regex;
use std::sync::OnceLock;

/// Warnings about one translated value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationReport {
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Validator for translated attribute values.
pub struct TranslationValidator;

// Regex patterns for extraction (cached for performance)
static RUBY_PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();
static MUSTACHE_PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();
static URL_REGEX: OnceLock<Regex> = OnceLock::new();
static HTML_TAG_REGEX: OnceLock<Regex> = OnceLock::new();

impl TranslationValidator {
    /// Check that a translation preserves the untranslatable parts of the
    /// original value.
    ///
    /// Placeholders may move (word order changes between languages), so the
    /// comparison ignores position; dropping or inventing one warns.
    pub fn validate(original: &str, translated: &str) -> ValidationReport {
        let mut report = ValidationReport::default();

        let orig_placeholders = Self::extract_placeholders(original);
        let trans_placeholders = Self::extract_placeholders(translated);
        if orig_placeholders != trans_placeholders {
            report.warnings.push(format!(
                "Placeholder mismatch: original has {:?}, translation has {:?}",
                orig_placeholders, trans_placeholders
            ));
        }

        let orig_urls = Self::extract_urls(original);
        let trans_urls = Self::extract_urls(translated);
        if orig_urls != trans_urls {
            report.warnings.push(format!(
                "URL mismatch: original has {} URLs, translation has {}",
                orig_urls.len(),
                trans_urls.len()
            ));
        }

        let orig_tags = Self::count_markup_tags(original);
        let trans_tags = Self::count_markup_tags(translated);
        if orig_tags != trans_tags {
            report.warnings.push(format!(
                "Markup tag count mismatch: original has {}, translation has {}",
                orig_tags, trans_tags
            ));
        }

        report
    }

    /// Extract `%{name}` and `{{name}}` interpolation markers, sorted so
    /// reordering does not count as a mismatch.
    fn extract_placeholders(text: &str) -> Vec<String> {
        let ruby_style =
            RUBY_PLACEHOLDER_REGEX.get_or_init(|| Regex::new(r"%\{[a-zA-Z0-9_]+\}").unwrap());
        let mustache_style = MUSTACHE_PLACEHOLDER_REGEX
            .get_or_init(|| Regex::new(r"\{\{\s*[a-zA-Z0-9_.]+\s*\}\}").unwrap());

        let mut found: Vec<String> = ruby_style
            .find_iter(text)
            .chain(mustache_style.find_iter(text))
            .map(|m| m.as_str().to_string())
            .collect();
        found.sort();
        found
    }

    /// Extract all URLs from text, sorted.
    fn extract_urls(text: &str) -> Vec<String> {
        let regex = URL_REGEX.get_or_init(|| Regex::new(r"https?://[^\s)\]]+").unwrap());

        let mut found: Vec<String> = regex
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect();
        found.sort();
        found
    }

    /// Count HTML-like tags (approximate)
    fn count_markup_tags(text: &str) -> usize {
        let regex = HTML_TAG_REGEX.get_or_init(|| Regex::new(r"</?[a-zA-Z][^>]*>").unwrap());
        regex.find_iter(text).count()
    }
}
