//! The lifecycle engine: decides after each committed entity mutation
//! whether to purge, skip, or regenerate translations, and exposes the
//! on-demand translate calls.
//!
//! Construction note: the engine and the dispatcher must share one
//! [`Merger`] so that manual writes and background merges to the same
//! (entity, locale) record serialize through the same lock table.

use crate::checksum::Checksum;
use crate::dispatch::TranslationTask;
use crate::entity::Translatable;
use crate::error::Result;
use crate::locale::{Locale, LocaleSet};
use crate::merge::{localized_attribute, Merger};
use crate::queue::TaskQueue;
use crate::record::Translation;
use crate::resolver::resolve_locales;
use crate::staleness::{Scope, StalenessEvaluator};
use crate::store::TranslationStore;
use std::sync::Arc;
use tracing::{debug, info};

/// What a [`translate_if_needed`](TranslationEngine::translate_if_needed)
/// call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The gate is not satisfied; every record for the entity was deleted.
    Purged { removed: usize },
    /// Nothing was stale or missing, no work submitted.
    Skipped,
    /// Regeneration tasks were submitted for these locales.
    Scheduled { locales: Vec<Locale> },
}

/// Orchestrates staleness checks, purges, and task submission for one
/// configured locale set.
pub struct TranslationEngine {
    store: Arc<dyn TranslationStore>,
    queue: Arc<dyn TaskQueue>,
    merger: Arc<Merger>,
    staleness: StalenessEvaluator,
    locales: LocaleSet,
}

impl TranslationEngine {
    pub fn new(
        store: Arc<dyn TranslationStore>,
        queue: Arc<dyn TaskQueue>,
        merger: Arc<Merger>,
        locales: LocaleSet,
    ) -> TranslationEngine {
        let staleness = StalenessEvaluator::new(store.clone(), locales.clone());
        TranslationEngine {
            store,
            queue,
            merger,
            staleness,
            locales,
        }
    }

    pub fn locales(&self) -> &LocaleSet {
        &self.locales
    }

    /// The on-mutation hook. Call after every committed create or update.
    ///
    /// A closed gate purges every record for the entity, manual content
    /// included. Otherwise, if any automatic attribute changed, any change
    /// happened under a gate, or coverage is stale or missing, each target
    /// locale whose record is absent or outdated is submitted once with the
    /// current checksum. Locales already current are skipped, so a single
    /// content change regenerates each locale at most once.
    pub fn translate_if_needed(&self, entity: &Arc<dyn Translatable>) -> Result<SyncOutcome> {
        let entity_ref = entity.entity_ref();
        let config = entity.translation_config();

        if !config.gate().satisfied(entity.as_ref())? {
            let removed = self.store.delete_all(&entity_ref)?;
            if removed > 0 {
                info!("Purged {} translations of {}: gate closed", removed, entity_ref);
            }
            return Ok(SyncOutcome::Purged { removed });
        }

        if !self.needs_work(entity.as_ref())? {
            return Ok(SyncOutcome::Skipped);
        }

        let current = Checksum::of_entity(entity.as_ref());
        let mut scheduled = Vec::new();
        for locale in resolve_locales(entity.as_ref(), &self.locales)? {
            let up_to_date = match self.store.find(&entity_ref, &locale)? {
                Some(record) => !record.outdated(&current),
                None => false,
            };
            if up_to_date {
                continue;
            }

            self.queue.enqueue(TranslationTask::new(
                entity.clone(),
                locale.clone(),
                current.clone(),
            ))?;
            scheduled.push(locale);
        }

        if scheduled.is_empty() {
            return Ok(SyncOutcome::Skipped);
        }

        debug!(
            "Scheduled {} locale(s) for {}",
            scheduled.len(),
            entity_ref
        );
        Ok(SyncOutcome::Scheduled { locales: scheduled })
    }

    fn needs_work(&self, entity: &dyn Translatable) -> Result<bool> {
        let config = entity.translation_config();
        let changed = entity.changed_attributes();

        if changed.iter().any(|name| config.is_automatic(name)) {
            return Ok(true);
        }
        // Gate inputs are opaque, so with a gate present any change may have
        // just opened it; the per-locale staleness filter below keeps this
        // from resubmitting current records.
        if config.gate().exists() && !changed.is_empty() {
            return Ok(true);
        }
        if self.staleness.translations_outdated(entity)? {
            return Ok(true);
        }
        self.staleness
            .translations_missing(entity, Scope::Automatic)
    }

    /// Submit every target locale for regeneration, regardless of staleness.
    pub fn translate(&self, entity: &Arc<dyn Translatable>) -> Result<Vec<Locale>> {
        let current = Checksum::of_entity(entity.as_ref());
        let locales = resolve_locales(entity.as_ref(), &self.locales)?;
        for locale in &locales {
            self.queue.enqueue(TranslationTask::new(
                entity.clone(),
                locale.clone(),
                current.clone(),
            ))?;
        }
        Ok(locales)
    }

    /// Submit one explicit locale for regeneration, regardless of staleness.
    pub fn translate_locale(&self, entity: &Arc<dyn Translatable>, locale: &Locale) -> Result<()> {
        let current = Checksum::of_entity(entity.as_ref());
        self.queue
            .enqueue(TranslationTask::new(entity.clone(), locale.clone(), current))
    }

    /// Regenerate every target locale inline, blocking until each completes.
    /// The first failing locale aborts the rest and surfaces its error.
    pub async fn translate_now(&self, entity: &Arc<dyn Translatable>) -> Result<Vec<Locale>> {
        let current = Checksum::of_entity(entity.as_ref());
        let locales = resolve_locales(entity.as_ref(), &self.locales)?;
        for locale in &locales {
            self.queue
                .run_now(TranslationTask::new(
                    entity.clone(),
                    locale.clone(),
                    current.clone(),
                ))
                .await?;
        }
        Ok(locales)
    }

    /// Regenerate one explicit locale inline.
    pub async fn translate_locale_now(
        &self,
        entity: &Arc<dyn Translatable>,
        locale: &Locale,
    ) -> Result<()> {
        let current = Checksum::of_entity(entity.as_ref());
        self.queue
            .run_now(TranslationTask::new(entity.clone(), locale.clone(), current))
            .await
    }

    /// True iff any existing record no longer matches the entity's current
    /// automatic content.
    pub fn translations_outdated(&self, entity: &dyn Translatable) -> Result<bool> {
        self.staleness.translations_outdated(entity)
    }

    /// True iff any target locale lacks required coverage for the scope.
    pub fn translations_missing(&self, entity: &dyn Translatable, scope: Scope) -> Result<bool> {
        self.staleness.translations_missing(entity, scope)
    }

    /// Completeness check; a closed gate counts as complete.
    pub fn fully_translated(&self, entity: &dyn Translatable, scope: Scope) -> Result<bool> {
        self.staleness.fully_translated(entity, scope)
    }

    /// Locale-aware attribute read: the stored translation when present and
    /// non-blank, the source value otherwise.
    pub fn attribute(
        &self,
        entity: &dyn Translatable,
        attribute: &str,
        locale: &Locale,
    ) -> Result<String> {
        localized_attribute(self.store.as_ref(), entity, attribute, locale)
    }

    /// Write a manual attribute for one locale. Creates the record if
    /// absent, never touches the checksum, never submits translator work.
    pub async fn set_manual_attribute(
        &self,
        entity: &dyn Translatable,
        attribute: &str,
        locale: &Locale,
        value: &str,
    ) -> Result<Translation> {
        self.merger.set_manual(entity, attribute, locale, value).await
    }

    /// The stored record for one locale, if any.
    pub fn translation(
        &self,
        entity: &dyn Translatable,
        locale: &Locale,
    ) -> Result<Option<Translation>> {
        self.store.find(&entity.entity_ref(), locale)
    }

    /// Fingerprint of the entity's current automatic content.
    pub fn checksum(&self, entity: &dyn Translatable) -> Checksum {
        Checksum::of_entity(entity)
    }
}
