//! The stored translation record.

use crate::checksum::Checksum;
use crate::config::TranslationConfig;
use crate::entity::EntityRef;
use crate::error::{Error, Result};
use crate::locale::Locale;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Blank in the sense source content is exempt from translation: empty or
/// whitespace-only.
pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// The per-locale attribute copies for one entity. At most one record exists
/// per (entity, locale); the store enforces that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Translation {
    pub entity: EntityRef,
    pub locale: Locale,
    /// Attribute name to translated value. A missing key means "fall back to
    /// the source value"; only attributes generated or manually set for this
    /// locale have entries.
    pub translated_attributes: BTreeMap<String, String>,
    /// Fingerprint of the automatic-attribute content this record was last
    /// generated from. Stays unset until an automatic merge writes it; a
    /// record created purely for manual content carries `None`.
    pub source_checksum: Option<Checksum>,
    pub created_at: String,
    pub updated_at: String,
}

impl Translation {
    /// Fresh empty record for a pair. Timestamps are stamped again by the
    /// store on upsert.
    pub fn new(entity: EntityRef, locale: Locale) -> Translation {
        let now = Utc::now().to_rfc3339();
        Translation {
            entity,
            locale,
            translated_attributes: BTreeMap::new(),
            source_checksum: None,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Freshness relative to the entity's current content.
    ///
    /// A record without a checksum has unknown freshness and counts as
    /// outdated, so manual-only records still receive automatic content on
    /// the next lifecycle pass.
    pub fn outdated(&self, current: &Checksum) -> bool {
        self.source_checksum.as_ref() != Some(current)
    }

    /// Stored value for an attribute, if any.
    pub fn value(&self, attribute: &str) -> Option<&str> {
        self.translated_attributes
            .get(attribute)
            .map(String::as_str)
    }

    /// Whether this record holds usable content for an attribute. A blank
    /// entry counts the same as a missing one.
    pub fn covers(&self, attribute: &str) -> bool {
        matches!(self.translated_attributes.get(attribute), Some(value) if !is_blank(value))
    }

    /// Record-level invariant check: automatic content implies a checksum.
    pub fn validate(&self, config: &TranslationConfig) -> Result<()> {
        let has_automatic_content = self
            .translated_attributes
            .keys()
            .any(|name| config.is_automatic(name));
        if has_automatic_content && self.source_checksum.is_none() {
            return Err(Error::MissingChecksum {
                entity: self.entity.clone(),
                locale: self.locale.clone(),
            });
        }
        Ok(())
    }
}
