//! Staleness evaluation: is an entity's translation coverage missing,
//! outdated, or complete.
//!
//! "Outdated" is a checksum question about records that exist; "missing" is
//! a coverage question about records or entries that do not. The two never
//! overlap: a locale with no record is missing, not outdated.

use crate::checksum::Checksum;
use crate::config::TranslationConfig;
use crate::entity::Translatable;
use crate::error::{Error, Result};
use crate::locale::LocaleSet;
use crate::record::is_blank;
use crate::resolver::resolve_locales;
use crate::store::TranslationStore;
use std::str::FromStr;
use std::sync::Arc;

/// Which attribute group a completeness check covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Automatic,
    Manual,
    All,
}

impl FromStr for Scope {
    type Err = Error;

    /// Parse a scope name. Unrecognized input is an error, never a silent
    /// default.
    fn from_str(s: &str) -> Result<Scope> {
        match s.trim().to_ascii_lowercase().as_str() {
            "automatic" | "auto" | "automatic_only" | "automatic-only" => Ok(Scope::Automatic),
            "manual" | "manual_only" | "manual-only" => Ok(Scope::Manual),
            "all" | "both" | "full" => Ok(Scope::All),
            _ => Err(Error::InvalidScope(s.to_string())),
        }
    }
}

fn scoped_attributes(scope: Scope, config: &TranslationConfig) -> Vec<&str> {
    match scope {
        Scope::Automatic => config
            .automatic_attributes()
            .iter()
            .map(String::as_str)
            .collect(),
        Scope::Manual => config
            .manual_attributes()
            .iter()
            .map(String::as_str)
            .collect(),
        Scope::All => config
            .automatic_attributes()
            .iter()
            .chain(config.manual_attributes())
            .map(String::as_str)
            .collect(),
    }
}

/// Evaluates per-entity translation coverage against a store.
#[derive(Clone)]
pub struct StalenessEvaluator {
    store: Arc<dyn TranslationStore>,
    locales: LocaleSet,
}

impl StalenessEvaluator {
    pub fn new(store: Arc<dyn TranslationStore>, locales: LocaleSet) -> StalenessEvaluator {
        StalenessEvaluator { store, locales }
    }

    /// True iff any existing record's checksum differs from the entity's
    /// current automatic content. Locales with no record are ignored.
    pub fn translations_outdated(&self, entity: &dyn Translatable) -> Result<bool> {
        let current = Checksum::of_entity(entity);
        let records = self.store.all_for(&entity.entity_ref())?;
        Ok(records.iter().any(|record| record.outdated(&current)))
    }

    /// True iff any target locale lacks a record, or lacks a usable entry
    /// for a scoped attribute with non-blank source content.
    ///
    /// A closed gate means nothing is required, so nothing is missing.
    pub fn translations_missing(&self, entity: &dyn Translatable, scope: Scope) -> Result<bool> {
        let config = entity.translation_config();
        if !config.gate().satisfied(entity)? {
            return Ok(false);
        }

        let attributes = scoped_attributes(scope, config);
        if attributes.is_empty() {
            return Ok(false);
        }

        let entity_ref = entity.entity_ref();
        for locale in resolve_locales(entity, &self.locales)? {
            let record = self.store.find(&entity_ref, &locale)?;
            for attribute in &attributes {
                let source = entity.attribute(attribute).unwrap_or_default();
                if is_blank(&source) {
                    continue;
                }
                match &record {
                    None => return Ok(true),
                    Some(translation) if !translation.covers(attribute) => return Ok(true),
                    Some(_) => {}
                }
            }
        }
        Ok(false)
    }

    /// Negation of [`translations_missing`](Self::translations_missing) for
    /// the same scope, except that a closed gate is vacuously complete.
    pub fn fully_translated(&self, entity: &dyn Translatable, scope: Scope) -> Result<bool> {
        if !entity.translation_config().gate().satisfied(entity)? {
            return Ok(true);
        }
        Ok(!self.translations_missing(entity, scope)?)
    }
}
