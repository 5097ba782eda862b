//! Translation lifecycle engine: checksum-driven staleness detection and
//! per-locale regeneration of entity attributes.
//!
//! An entity type declares which attributes an external provider translates
//! automatically and which are only ever set by hand. After every committed
//! mutation, the engine fingerprints the automatic content, compares it with
//! what each locale's stored record was generated from, and submits
//! regeneration work only where a record is absent or stale. Manual entries
//! live in the same records and survive every regeneration.
//!
//! # Architecture
//!
//! - `entity`: the small capability trait entities implement to participate
//! - `config`: per-type declaration of attributes, locales, and gates
//! - `locale`: locale codes and the configured locale set
//! - `checksum`: content fingerprinting of the automatic attributes
//! - `record`: the per-(entity, locale) translation record
//! - `store`: persistence contract plus the in-memory implementation
//! - `resolver`: evaluates a locale specification into target locales
//! - `staleness`: missing/outdated/complete coverage predicates
//! - `engine`: the on-mutation hook and on-demand translate calls
//! - `merge`: serialized fresh-wins merging and manual writes
//! - `dispatch`: executes one (entity, locale, checksum) submission
//! - `queue`: eventual vs inline execution, Tokio and buffering queues
//! - `translator`: the provider contract, HTTP client and passthrough
//! - `validator`: placeholder/URL/markup checks on translated text
//! - `retry`: backoff policies for provider calls and background tasks
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use translatable::{
//!     Dispatcher, HttpTranslator, LocaleSet, MemoryStore, Merger,
//!     TokioTaskQueue, TranslationEngine,
//! };
//!
//! let store = Arc::new(MemoryStore::new());
//! let merger = Arc::new(Merger::new(store.clone()));
//! let translator = Arc::new(HttpTranslator::from_env()?);
//! let dispatcher = Arc::new(Dispatcher::new(translator, merger.clone()));
//! let queue = Arc::new(TokioTaskQueue::new(dispatcher));
//! let locales = LocaleSet::from_codes(&["en", "es", "fr"], "en")?;
//!
//! // The engine and the dispatcher share one merger so writes to the
//! // same record serialize.
//! let engine = TranslationEngine::new(store, queue, merger, locales);
//!
//! // After each committed entity mutation:
//! engine.translate_if_needed(&entity)?;
//! ```

mod checksum;
mod config;
mod dispatch;
mod engine;
mod entity;
mod error;
mod locale;
mod merge;
mod queue;
mod record;
mod resolver;
mod retry;
mod staleness;
mod store;
#[cfg(test)]
mod test_support;
mod translator;
mod validator;

pub use checksum::Checksum;
pub use config::{
    Condition, Gate, LocaleResolverFn, LocaleSpec, PredicateFn, TranslationConfig,
    TranslationConfigBuilder,
};
pub use dispatch::{Dispatcher, TranslationTask};
pub use engine::{SyncOutcome, TranslationEngine};
pub use entity::{EntityRef, Translatable};
pub use error::{Error, Result};
pub use locale::{Locale, LocaleSet};
pub use merge::{localized_attribute, Merger};
pub use queue::{TaskQueue, TestQueue, TokioTaskQueue};
pub use record::Translation;
pub use resolver::resolve_locales;
pub use retry::{with_retry, with_retry_if, RetryConfig};
pub use staleness::{Scope, StalenessEvaluator};
pub use store::{MemoryStore, TranslationStore};
pub use translator::{HttpTranslator, HttpTranslatorConfig, PassthroughTranslator, Translator};
pub use validator::{TranslationValidator, ValidationReport};
