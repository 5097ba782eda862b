//! Per-entity-type translation configuration.
//!
//! A [`TranslationConfig`] describes which attributes are translated
//! automatically, which are maintained by hand, which locales to target, and
//! under what conditions translation is permitted at all. Configs are built
//! once per type and shared; they are immutable after `build()`.

use crate::entity::Translatable;
use crate::error::{Error, Result};
use crate::locale::Locale;
use std::fmt;
use std::sync::Arc;

/// Closure form of a gate condition.
pub type PredicateFn = Arc<dyn Fn(&dyn Translatable) -> bool + Send + Sync>;

/// Closure form of a locale specification.
pub type LocaleResolverFn = Arc<dyn Fn(&dyn Translatable) -> Vec<Locale> + Send + Sync>;

/// How an entity type names its target locales.
#[derive(Clone)]
pub enum LocaleSpec {
    /// Every available locale except the default one.
    AllExceptDefault,
    /// A fixed ordered list, used verbatim.
    Fixed(Vec<Locale>),
    /// A per-entity source resolved through [`Translatable::locale_source`].
    Named(String),
    /// An inline resolver evaluated against the live entity.
    Callable(LocaleResolverFn),
}

impl LocaleSpec {
    /// Fixed list from plain code strings.
    pub fn fixed<S: AsRef<str>>(codes: &[S]) -> Result<LocaleSpec> {
        let locales = codes.iter().map(Locale::new).collect::<Result<Vec<_>>>()?;
        Ok(LocaleSpec::Fixed(locales))
    }

    /// Named per-entity locale source.
    pub fn named(name: impl Into<String>) -> LocaleSpec {
        LocaleSpec::Named(name.into())
    }

    /// Inline resolver closure.
    pub fn callable<F>(resolver: F) -> LocaleSpec
    where
        F: Fn(&dyn Translatable) -> Vec<Locale> + Send + Sync + 'static,
    {
        LocaleSpec::Callable(Arc::new(resolver))
    }
}

impl fmt::Debug for LocaleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocaleSpec::AllExceptDefault => write!(f, "AllExceptDefault"),
            LocaleSpec::Fixed(locales) => f.debug_tuple("Fixed").field(locales).finish(),
            LocaleSpec::Named(name) => f.debug_tuple("Named").field(name).finish(),
            LocaleSpec::Callable(_) => write!(f, "Callable(..)"),
        }
    }
}

/// A gate condition: absent, a named predicate the entity resolves, or an
/// inline closure.
#[derive(Clone, Default)]
pub enum Condition {
    #[default]
    Absent,
    Named(String),
    Callable(PredicateFn),
}

impl Condition {
    /// Named predicate resolved through [`Translatable::predicate`].
    pub fn named(name: impl Into<String>) -> Condition {
        Condition::Named(name.into())
    }

    /// Inline predicate closure.
    pub fn callable<F>(predicate: F) -> Condition
    where
        F: Fn(&dyn Translatable) -> bool + Send + Sync + 'static,
    {
        Condition::Callable(Arc::new(predicate))
    }

    /// Whether a condition is configured at all.
    pub fn exists(&self) -> bool {
        !matches!(self, Condition::Absent)
    }

    /// Evaluate against an entity. `None` means no condition is configured.
    ///
    /// A named predicate the entity does not define is an error, mirroring a
    /// call to a method that does not exist.
    fn check(&self, entity: &dyn Translatable) -> Result<Option<bool>> {
        match self {
            Condition::Absent => Ok(None),
            Condition::Named(name) => entity
                .predicate(name)
                .map(Some)
                .ok_or_else(|| Error::UnknownPredicate {
                    entity: entity.entity_ref(),
                    name: name.clone(),
                }),
            Condition::Callable(predicate) => Ok(Some(predicate(entity))),
        }
    }
}

impl fmt::Debug for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Absent => write!(f, "Absent"),
            Condition::Named(name) => f.debug_tuple("Named").field(name).finish(),
            Condition::Callable(_) => write!(f, "Callable(..)"),
        }
    }
}

/// The require/forbid condition pair controlling whether an entity may be
/// translated. Each side is independently optional.
#[derive(Debug, Clone, Default)]
pub struct Gate {
    require: Condition,
    forbid: Condition,
}

impl Gate {
    /// Whether either side is configured.
    pub fn exists(&self) -> bool {
        self.require.exists() || self.forbid.exists()
    }

    /// Evaluate the gate against a live entity.
    ///
    /// Satisfied iff the require condition (when present) holds and the
    /// forbid condition (when present) does not.
    pub fn satisfied(&self, entity: &dyn Translatable) -> Result<bool> {
        if let Some(met) = self.require.check(entity)? {
            if !met {
                return Ok(false);
            }
        }
        if let Some(met) = self.forbid.check(entity)? {
            if met {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// Immutable translation configuration for one entity type.
#[derive(Debug, Clone)]
pub struct TranslationConfig {
    automatic_attributes: Vec<String>,
    manual_attributes: Vec<String>,
    locales: LocaleSpec,
    gate: Gate,
}

impl TranslationConfig {
    pub fn builder() -> TranslationConfigBuilder {
        TranslationConfigBuilder::default()
    }

    /// Attributes regenerated by the external translator, in the declared
    /// order the checksum hashes them.
    pub fn automatic_attributes(&self) -> &[String] {
        &self.automatic_attributes
    }

    /// Attributes only ever set explicitly per locale.
    pub fn manual_attributes(&self) -> &[String] {
        &self.manual_attributes
    }

    pub fn is_automatic(&self, name: &str) -> bool {
        self.automatic_attributes.iter().any(|attr| attr == name)
    }

    pub fn is_manual(&self, name: &str) -> bool {
        self.manual_attributes.iter().any(|attr| attr == name)
    }

    pub fn locales(&self) -> &LocaleSpec {
        &self.locales
    }

    pub fn gate(&self) -> &Gate {
        &self.gate
    }
}

/// Builder for [`TranslationConfig`].
///
/// Defaults: no attributes, all locales except the default, no gate.
#[derive(Default)]
pub struct TranslationConfigBuilder {
    automatic: Vec<String>,
    manual: Vec<String>,
    locales: Option<LocaleSpec>,
    require: Condition,
    forbid: Condition,
}

impl TranslationConfigBuilder {
    /// Set the automatically translated attributes, in checksum order.
    pub fn automatic<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.automatic = names.into_iter().map(Into::into).collect();
        self
    }

    /// Set the manually maintained attributes.
    pub fn manual<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.manual = names.into_iter().map(Into::into).collect();
        self
    }

    /// Set the locale specification. Defaults to [`LocaleSpec::AllExceptDefault`].
    pub fn locales(mut self, spec: LocaleSpec) -> Self {
        self.locales = Some(spec);
        self
    }

    /// Translation runs only while this condition holds.
    pub fn require(mut self, condition: Condition) -> Self {
        self.require = condition;
        self
    }

    /// Translation is blocked while this condition holds.
    pub fn forbid(mut self, condition: Condition) -> Self {
        self.forbid = condition;
        self
    }

    pub fn build(self) -> TranslationConfig {
        TranslationConfig {
            automatic_attributes: self.automatic,
            manual_attributes: self.manual,
            locales: self.locales.unwrap_or(LocaleSpec::AllExceptDefault),
            gate: Gate {
                require: self.require,
                forbid: self.forbid,
            },
        }
    }
}
