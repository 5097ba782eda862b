//! Shared test fixture: an in-memory entity with mutable attributes and a
//! recorded change set, standing in for a persisted model.

use crate::config::TranslationConfig;
use crate::entity::{EntityRef, Translatable};
use crate::locale::Locale;
use std::collections::HashMap;
use std::sync::Mutex;

pub(crate) struct TestPage {
    id: String,
    config: TranslationConfig,
    attributes: Mutex<HashMap<String, String>>,
    changed: Mutex<Vec<String>>,
    flags: Mutex<HashMap<String, bool>>,
    markets: Mutex<Vec<Locale>>,
}

impl TestPage {
    pub fn new(id: &str, config: TranslationConfig) -> TestPage {
        TestPage {
            id: id.to_string(),
            config,
            attributes: Mutex::new(HashMap::new()),
            changed: Mutex::new(Vec::new()),
            flags: Mutex::new(HashMap::new()),
            markets: Mutex::new(Vec::new()),
        }
    }

    /// Set an attribute and record it as changed, like an assignment that a
    /// save then commits.
    pub fn set(&self, name: &str, value: &str) {
        self.attributes
            .lock()
            .unwrap()
            .insert(name.to_string(), value.to_string());
        self.mark_changed(name);
    }

    /// Set a named predicate flag; flag flips count as attribute changes.
    pub fn set_flag(&self, name: &str, value: bool) {
        self.flags
            .lock()
            .unwrap()
            .insert(name.to_string(), value);
        self.mark_changed(name);
    }

    pub fn set_markets(&self, locales: Vec<Locale>) {
        *self.markets.lock().unwrap() = locales;
    }

    /// Simulate a subsequent save that commits nothing new.
    pub fn clear_changes(&self) {
        self.changed.lock().unwrap().clear();
    }

    fn mark_changed(&self, name: &str) {
        let mut changed = self.changed.lock().unwrap();
        if !changed.iter().any(|existing| existing == name) {
            changed.push(name.to_string());
        }
    }
}

impl Translatable for TestPage {
    fn entity_ref(&self) -> EntityRef {
        EntityRef::new("Page", self.id.clone())
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.lock().unwrap().get(name).cloned()
    }

    fn changed_attributes(&self) -> Vec<String> {
        self.changed.lock().unwrap().clone()
    }

    fn translation_config(&self) -> &TranslationConfig {
        &self.config
    }

    fn predicate(&self, name: &str) -> Option<bool> {
        self.flags.lock().unwrap().get(name).copied()
    }

    fn locale_source(&self, name: &str) -> Option<Vec<Locale>> {
        if name == "market_locales" {
            Some(self.markets.lock().unwrap().clone())
        } else {
            None
        }
    }
}
