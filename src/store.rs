//! Translation record persistence.
//!
//! The engine talks to storage through [`TranslationStore`]; the bundled
//! [`MemoryStore`] keeps records in a shared map and is what the tests run
//! against. Persistent implementations live with the calling application.

use crate::entity::EntityRef;
use crate::error::Result;
use crate::locale::Locale;
use crate::record::Translation;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Storage contract for translation records.
///
/// Implementations must enforce at most one record per (entity, locale).
/// Stores that cannot upsert atomically surface a racing create as
/// [`crate::Error::DuplicateTranslation`]; internal failures map to
/// [`crate::Error::Store`].
pub trait TranslationStore: Send + Sync {
    /// Look up the record for one (entity, locale) pair.
    fn find(&self, entity: &EntityRef, locale: &Locale) -> Result<Option<Translation>>;

    /// Every record for an entity, ordered by locale code.
    fn all_for(&self, entity: &EntityRef) -> Result<Vec<Translation>>;

    /// Insert or replace the record for the pair carried by `translation`.
    ///
    /// The store owns the timestamps: `updated_at` is stamped on every
    /// upsert, `created_at` survives from the first insert. Returns the
    /// record as stored.
    fn upsert(&self, translation: Translation) -> Result<Translation>;

    /// Remove every record for an entity. Returns how many were removed.
    fn delete_all(&self, entity: &EntityRef) -> Result<usize>;
}

/// In-memory store keyed by (entity, locale).
#[derive(Clone, Default)]
pub struct MemoryStore {
    records: Arc<Mutex<HashMap<(EntityRef, Locale), Translation>>>,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }

    /// Total number of stored records, across all entities.
    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TranslationStore for MemoryStore {
    fn find(&self, entity: &EntityRef, locale: &Locale) -> Result<Option<Translation>> {
        let records = self.records.lock().unwrap();
        Ok(records.get(&(entity.clone(), locale.clone())).cloned())
    }

    fn all_for(&self, entity: &EntityRef) -> Result<Vec<Translation>> {
        let records = self.records.lock().unwrap();
        let mut found: Vec<Translation> = records
            .values()
            .filter(|translation| translation.entity == *entity)
            .cloned()
            .collect();
        found.sort_by(|a, b| a.locale.cmp(&b.locale));
        Ok(found)
    }

    fn upsert(&self, mut translation: Translation) -> Result<Translation> {
        let mut records = self.records.lock().unwrap();
        let key = (translation.entity.clone(), translation.locale.clone());
        let now = Utc::now().to_rfc3339();

        if let Some(existing) = records.get(&key) {
            translation.created_at = existing.created_at.clone();
        } else {
            translation.created_at = now.clone();
        }
        translation.updated_at = now;

        records.insert(key, translation.clone());
        Ok(translation)
    }

    fn delete_all(&self, entity: &EntityRef) -> Result<usize> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|(record_entity, _), _| record_entity != entity);
        Ok(before - records.len())
    }
}
