//! Locale resolution: from a configured [`LocaleSpec`] to the concrete
//! ordered list of target locales for one entity.

use crate::config::LocaleSpec;
use crate::entity::Translatable;
use crate::error::{Error, Result};
use crate::locale::{Locale, LocaleSet};

/// Resolve an entity's locale specification.
///
/// Order comes from the specification source and is preserved; an empty
/// result is valid and means the entity currently has no translation
/// targets. Resolvers are required to be deterministic for a given entity
/// state; the engine does not defend against ones that are not.
pub fn resolve_locales(entity: &dyn Translatable, locales: &LocaleSet) -> Result<Vec<Locale>> {
    match entity.translation_config().locales() {
        LocaleSpec::AllExceptDefault => Ok(locales.all_except_default()),
        LocaleSpec::Fixed(list) => Ok(list.clone()),
        LocaleSpec::Named(name) => {
            entity
                .locale_source(name)
                .ok_or_else(|| Error::UnknownLocaleSource {
                    entity: entity.entity_ref(),
                    name: name.clone(),
                })
        }
        LocaleSpec::Callable(resolver) => Ok(resolver(entity)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TranslationConfig;
    use crate::entity::EntityRef;

    struct Listing {
        config: TranslationConfig,
        markets: Vec<Locale>,
    }

    impl Listing {
        fn new(spec: LocaleSpec) -> Listing {
            Listing {
                config: TranslationConfig::builder().locales(spec).build(),
                markets: vec![Locale::new("de").unwrap(), Locale::new("fr").unwrap()],
            }
        }
    }

    impl Translatable for Listing {
        fn entity_ref(&self) -> EntityRef {
            EntityRef::new("Listing", "1")
        }

        fn attribute(&self, _name: &str) -> Option<String> {
            None
        }

        fn changed_attributes(&self) -> Vec<String> {
            Vec::new()
        }

        fn translation_config(&self) -> &TranslationConfig {
            &self.config
        }

        fn locale_source(&self, name: &str) -> Option<Vec<Locale>> {
            if name == "market_locales" {
                Some(self.markets.clone())
            } else {
                None
            }
        }
    }

    fn locale_set() -> LocaleSet {
        LocaleSet::from_codes(&["en", "es", "fr"], "en").unwrap()
    }

    fn codes(locales: &[Locale]) -> Vec<&str> {
        locales.iter().map(Locale::as_str).collect()
    }

    #[test]
    fn test_all_except_default() {
        let listing = Listing::new(LocaleSpec::AllExceptDefault);
        let resolved = resolve_locales(&listing, &locale_set()).expect("Should resolve");
        assert_eq!(codes(&resolved), vec!["es", "fr"]);
    }

    #[test]
    fn test_fixed_list_is_verbatim() {
        let listing = Listing::new(LocaleSpec::fixed(&["fr", "es"]).unwrap());
        let resolved = resolve_locales(&listing, &locale_set()).expect("Should resolve");
        assert_eq!(codes(&resolved), vec!["fr", "es"]);
    }

    #[test]
    fn test_fixed_empty_list_is_valid() {
        let listing = Listing::new(LocaleSpec::Fixed(Vec::new()));
        let resolved = resolve_locales(&listing, &locale_set()).expect("Should resolve");
        assert!(resolved.is_empty());
    }

    #[test]
    fn test_named_source_resolves_through_entity() {
        let listing = Listing::new(LocaleSpec::named("market_locales"));
        let resolved = resolve_locales(&listing, &locale_set()).expect("Should resolve");
        assert_eq!(codes(&resolved), vec!["de", "fr"]);
    }

    #[test]
    fn test_unknown_named_source_is_an_error() {
        let listing = Listing::new(LocaleSpec::named("audience_locales"));
        let err = resolve_locales(&listing, &locale_set()).unwrap_err();
        assert!(matches!(err, Error::UnknownLocaleSource { .. }));
        assert!(err.to_string().contains("audience_locales"));
    }

    #[test]
    fn test_callable_resolves_against_entity() {
        let listing = Listing::new(LocaleSpec::callable(|entity| {
            entity.locale_source("market_locales").unwrap_or_default()
        }));
        let resolved = resolve_locales(&listing, &locale_set()).expect("Should resolve");
        assert_eq!(codes(&resolved), vec!["de", "fr"]);
    }
}
