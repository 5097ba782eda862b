//! Per-locale dispatch: turning one submitted (entity, locale, checksum)
//! task into translator calls and a single merge.
//!
//! All automatic attributes of a locale update together or not at all: the
//! first translator failure aborts the submission before anything reaches
//! the store.

use crate::checksum::Checksum;
use crate::entity::Translatable;
use crate::error::Result;
use crate::locale::Locale;
use crate::merge::Merger;
use crate::record::{is_blank, Translation};
use crate::translator::Translator;
use crate::validator::TranslationValidator;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

/// One unit of translation work: regenerate a single locale of a single
/// entity from the content fingerprinted at submission time.
#[derive(Clone)]
pub struct TranslationTask {
    pub entity: Arc<dyn Translatable>,
    pub locale: Locale,
    /// Fingerprint of the automatic content when the task was submitted;
    /// stored with the merged record.
    pub checksum: Checksum,
}

impl TranslationTask {
    pub fn new(entity: Arc<dyn Translatable>, locale: Locale, checksum: Checksum) -> Self {
        TranslationTask {
            entity,
            locale,
            checksum,
        }
    }

    /// Short label for logs.
    pub(crate) fn describe(&self) -> String {
        format!("{} -> '{}'", self.entity.entity_ref(), self.locale)
    }
}

impl fmt::Debug for TranslationTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranslationTask")
            .field("entity", &self.entity.entity_ref())
            .field("locale", &self.locale)
            .field("checksum", &self.checksum)
            .finish()
    }
}

/// Executes submissions against the external translator and hands results
/// to the merger.
pub struct Dispatcher {
    translator: Arc<dyn Translator>,
    merger: Arc<Merger>,
}

impl Dispatcher {
    pub fn new(translator: Arc<dyn Translator>, merger: Arc<Merger>) -> Dispatcher {
        Dispatcher { translator, merger }
    }

    /// Execute one submission.
    ///
    /// Translates every non-blank automatic attribute into the task's
    /// locale, then merges the whole batch with the checksum captured at
    /// submission. Blank source values are skipped entirely: nothing to
    /// translate, no entry written.
    pub async fn dispatch(&self, task: &TranslationTask) -> Result<Translation> {
        let entity = task.entity.as_ref();
        let config = entity.translation_config();
        let entity_ref = entity.entity_ref();

        let mut fresh = BTreeMap::new();
        for attribute in config.automatic_attributes() {
            let source = entity.attribute(attribute).unwrap_or_default();
            if is_blank(&source) {
                continue;
            }

            let translated = self.translator.translate(&source, &task.locale).await?;

            let validation = TranslationValidator::validate(&source, &translated);
            if !validation.is_clean() {
                warn!(
                    "Validation warnings for {} '{}' in '{}': {:?}",
                    entity_ref, attribute, task.locale, validation.warnings
                );
            }

            fresh.insert(attribute.clone(), translated);
        }

        let translated_count = fresh.len();
        let stored = self
            .merger
            .apply(&entity_ref, &task.locale, fresh, task.checksum.clone())
            .await?;

        info!(
            "Translated {} attributes of {} into '{}'",
            translated_count, entity_ref, task.locale
        );
        Ok(stored)
    }
}
