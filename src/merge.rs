//! Record merging: the single writer path for translation records.
//!
//! Automatic merges overlay freshly generated values onto whatever the
//! record already holds, so manual entries survive regeneration and stale
//! automatic entries get replaced. Writes to the same (entity, locale) pair
//! serialize through a per-pair lock; different pairs proceed in parallel.

use crate::checksum::Checksum;
use crate::entity::{EntityRef, Translatable};
use crate::error::{Error, Result};
use crate::locale::Locale;
use crate::record::{is_blank, Translation};
use crate::store::TranslationStore;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

type PairLock = Arc<tokio::sync::Mutex<()>>;

/// Serializes writes per (entity, locale) and applies the merge rules.
pub struct Merger {
    store: Arc<dyn TranslationStore>,
    locks: Mutex<HashMap<(EntityRef, Locale), PairLock>>,
}

impl Merger {
    pub fn new(store: Arc<dyn TranslationStore>) -> Merger {
        Merger {
            store,
            locks: Mutex::new(HashMap::new()),
        }
    }

    fn pair_lock(&self, entity: &EntityRef, locale: &Locale) -> PairLock {
        let mut locks = self.locks.lock().unwrap();
        locks
            .entry((entity.clone(), locale.clone()))
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
            .clone()
    }

    /// Merge freshly generated automatic values into the pair's record,
    /// creating it if none exists.
    ///
    /// Fresh values win over stored entries with the same name; entries the
    /// fresh map does not mention (manual content, other locales' concerns)
    /// survive untouched. `checksum` is the fingerprint of the source
    /// content the values were generated from, captured at submission time.
    pub async fn apply(
        &self,
        entity: &EntityRef,
        locale: &Locale,
        fresh: BTreeMap<String, String>,
        checksum: Checksum,
    ) -> Result<Translation> {
        let lock = self.pair_lock(entity, locale);
        let _guard = lock.lock().await;

        let mut record = match self.store.find(entity, locale)? {
            Some(existing) => existing,
            None => Translation::new(entity.clone(), locale.clone()),
        };

        let merged = fresh.len();
        for (attribute, value) in fresh {
            record.translated_attributes.insert(attribute, value);
        }
        record.source_checksum = Some(checksum);

        let stored = self.store.upsert(record)?;
        debug!(
            "Merged {} automatic entries for {} in '{}'",
            merged, entity, locale
        );
        Ok(stored)
    }

    /// Set one manual attribute entry for a locale, creating the record if
    /// none exists.
    ///
    /// Never touches the source checksum (a manual-only record keeps it
    /// unset) and never triggers translation.
    pub async fn set_manual(
        &self,
        entity: &dyn Translatable,
        attribute: &str,
        locale: &Locale,
        value: &str,
    ) -> Result<Translation> {
        if !entity.translation_config().is_manual(attribute) {
            return Err(Error::NotManualAttribute {
                entity: entity.entity_ref(),
                name: attribute.to_string(),
            });
        }

        let entity_ref = entity.entity_ref();
        let lock = self.pair_lock(&entity_ref, locale);
        let _guard = lock.lock().await;

        let mut record = match self.store.find(&entity_ref, locale)? {
            Some(existing) => existing,
            None => Translation::new(entity_ref.clone(), locale.clone()),
        };
        record
            .translated_attributes
            .insert(attribute.to_string(), value.to_string());
        record.validate(entity.translation_config())?;

        let stored = self.store.upsert(record)?;
        info!("Set manual '{}' for {} in '{}'", attribute, entity_ref, locale);
        Ok(stored)
    }
}

/// Localized read with fallback: the stored value when present and
/// non-blank, otherwise the entity's source value.
///
/// The locale is always explicit; there is no ambient current-locale state.
pub fn localized_attribute(
    store: &dyn TranslationStore,
    entity: &dyn Translatable,
    attribute: &str,
    locale: &Locale,
) -> Result<String> {
    let source = entity.attribute(attribute).unwrap_or_default();
    match store.find(&entity.entity_ref(), locale)? {
        Some(translation) => Ok(match translation.value(attribute) {
            Some(value) if !is_blank(value) => value.to_string(),
            _ => source,
        }),
        None => Ok(source),
    }
}
