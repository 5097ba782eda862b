use crate::entity::EntityRef;
use crate::locale::Locale;
use thiserror::Error;

/// Errors surfaced by the translation lifecycle.
///
/// Every fallible operation in the crate returns [`Result`]. Store and queue
/// implementations map their internal failures into [`Error::Store`] and
/// [`Error::Queue`] so callers deal with one error type.
#[derive(Debug, Error)]
pub enum Error {
    /// A staleness scope string did not match any known scope.
    #[error("invalid translation scope '{0}' (expected 'automatic', 'manual', or 'all')")]
    InvalidScope(String),

    /// A locale code was empty or whitespace-only.
    #[error("locale code cannot be blank")]
    BlankLocale,

    /// The default locale is not part of the available set.
    #[error("default locale '{0}' is not in the available locale set")]
    UnknownDefaultLocale(Locale),

    /// An insert would create a second record for the same (entity, locale).
    #[error("translation already exists for {entity} in locale '{locale}'")]
    DuplicateTranslation { entity: EntityRef, locale: Locale },

    /// A record carries automatic content but no source checksum.
    #[error("translation for {entity} in locale '{locale}' has automatic content but no source checksum")]
    MissingChecksum { entity: EntityRef, locale: Locale },

    /// A gate condition referenced a predicate the entity does not define.
    #[error("{entity} does not define predicate '{name}'")]
    UnknownPredicate { entity: EntityRef, name: String },

    /// A locale specification referenced a source the entity does not define.
    #[error("{entity} does not define locale source '{name}'")]
    UnknownLocaleSource { entity: EntityRef, name: String },

    /// A manual write targeted an attribute not configured as manual.
    #[error("'{name}' is not a manual attribute of {entity}")]
    NotManualAttribute { entity: EntityRef, name: String },

    /// The external translator failed for one locale.
    #[error("translation to '{locale}' failed: {message}")]
    Translator { locale: Locale, message: String },

    /// Translator endpoint configuration is incomplete or malformed.
    #[error("translator configuration error: {0}")]
    Config(String),

    /// A store implementation failed internally.
    #[error("translation store error: {0}")]
    Store(String),

    /// A task queue implementation failed to accept or run a task.
    #[error("translation queue error: {0}")]
    Queue(String),
}

impl Error {
    /// Whether a retry might succeed without anything else changing.
    ///
    /// Translator failures are transient until proven otherwise (rate limits,
    /// flaky networks); everything else is a programming or data error that
    /// retrying cannot fix.
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::Translator { .. } | Error::Queue(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
