//! The entity side of the contract: what a type must expose to participate
//! in translation.
//!
//! The engine never persists entities and never mutates them. It only reads
//! attribute values, the set of attributes changed by the last committed
//! save, and the type's translation configuration, all through the
//! [`Translatable`] trait.

use crate::config::TranslationConfig;
use crate::locale::Locale;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identity of a translatable entity across saves: a kind (usually
/// the type name) plus an id unique within that kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityRef {
    pub kind: String,
    pub id: String,
}

impl EntityRef {
    pub fn new(kind: impl Into<String>, id: impl Into<String>) -> EntityRef {
        EntityRef {
            kind: kind.into(),
            id: id.into(),
        }
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.kind, self.id)
    }
}

/// Capability trait for entity types whose attributes get per-locale copies.
///
/// Implementations are expected to be cheap snapshots or handles: the engine
/// holds them across an async dispatch, so the values read here must reflect
/// the committed state being translated.
pub trait Translatable: Send + Sync {
    /// The entity's stable identity.
    fn entity_ref(&self) -> EntityRef;

    /// Current source value of an attribute, `None` when the entity has no
    /// such attribute. Blank values are meaningful: they exempt the
    /// attribute from translation.
    fn attribute(&self, name: &str) -> Option<String>;

    /// Names of the attributes changed by the most recent committed
    /// mutation. An empty list means the entity was saved without content
    /// changes (a touch).
    fn changed_attributes(&self) -> Vec<String>;

    /// The translation configuration of this entity's type.
    fn translation_config(&self) -> &TranslationConfig;

    /// Resolve a named gate predicate against the live entity.
    ///
    /// Returns `None` for names the entity does not define; the engine
    /// treats that as an error rather than a silent false.
    fn predicate(&self, _name: &str) -> Option<bool> {
        None
    }

    /// Resolve a named locale source against the live entity.
    ///
    /// Returns `None` for names the entity does not define.
    fn locale_source(&self, _name: &str) -> Option<Vec<Locale>> {
        None
    }
}
