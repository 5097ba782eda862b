//! Content fingerprints for staleness detection.
//!
//! A translation is current when the checksum stored alongside it matches the
//! checksum of the entity's automatic attributes right now. The fingerprint
//! is BLAKE3 over the plain concatenation of the attribute values in their
//! declared order; blank values contribute their empty representation, so an
//! entity whose trailing attributes are empty hashes the same as one that
//! never had them.

use crate::entity::Translatable;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A hex-encoded BLAKE3 fingerprint of automatic-attribute content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Checksum(String);

impl Checksum {
    /// Hash a sequence of attribute values in order.
    pub fn compute<I, S>(values: I) -> Checksum
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut hasher = blake3::Hasher::new();
        for value in values {
            hasher.update(value.as_ref().as_bytes());
        }
        Checksum(hasher.finalize().to_hex().to_string())
    }

    /// Fingerprint of an entity's current automatic-attribute content.
    ///
    /// Attributes the entity does not define contribute the empty string,
    /// like attributes that are present but blank.
    pub fn of_entity(entity: &dyn Translatable) -> Checksum {
        let config = entity.translation_config();
        Checksum::compute(
            config
                .automatic_attributes()
                .iter()
                .map(|name| entity.attribute(name).unwrap_or_default()),
        )
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
