use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};

use serde_json::Value;

use super::{deep_merge, get_by_path, interpolate, Catalog, Locale, Vars};

const COMMON_BUNDLE: &str = "common";

/// Resolves dotted keys against an ordered list of dictionary layers.
#[derive(Debug)]
pub struct Translator {
    locale: Locale,
    layers: Vec<Value>,
}

impl Translator {
    /// Every bundle of `locale` merged into a single layer, no fallback.
    fn all_bundles(catalog: &Catalog, locale: &Locale) -> Self {
        let merged = deep_merge(catalog.manifest(locale).bundles().map(|(_, bundle)| bundle));
        Self {
            locale: locale.clone(),
            layers: vec![Value::Object(merged)],
        }
    }

    /// Selected bundles, then `common`, first in `locale` and then in the
    /// default locale.
    fn selected_bundles(catalog: &Catalog, locale: &Locale, bundles: &[&str]) -> Self {
        let active = catalog.manifest(locale);
        let fallback = catalog.manifest(catalog.locales().default_locale());

        let layers = [
            deep_merge(bundles.iter().map(|name| active.get(name))),
            active.get(COMMON_BUNDLE).cloned().unwrap_or_default(),
            deep_merge(bundles.iter().map(|name| fallback.get(name))),
            fallback.get(COMMON_BUNDLE).cloned().unwrap_or_default(),
        ]
        .into_iter()
        .map(Value::Object)
        .collect();

        Self {
            locale: locale.clone(),
            layers,
        }
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Raw value at `path` from the first layer that has one.
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        self.layers
            .iter()
            .find_map(|layer| get_by_path(layer, path))
    }

    /// Strings come back interpolated, other values as stored. A key no
    /// layer defines comes back as the path itself.
    pub fn translate(&self, path: &str, vars: &Vars) -> Value {
        match self.lookup(path) {
            Some(Value::String(template)) => Value::String(interpolate(template, vars)),
            Some(value) => value.clone(),
            None => {
                tracing::debug!(locale = %self.locale, path, "missing translation");
                Value::String(path.to_string())
            }
        }
    }

    /// [`Self::translate`] flattened to text; non-string values render as
    /// JSON.
    pub fn text(&self, path: &str, vars: &Vars) -> String {
        match self.translate(path, vars) {
            Value::String(text) => text,
            other => other.to_string(),
        }
    }
}

/// Memoizes translators per locale and bundle list.
#[derive(Debug)]
pub struct TranslatorCache {
    catalog: Arc<Catalog>,
    translators: Mutex<HashMap<String, Arc<Translator>>>,
}

impl TranslatorCache {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            translators: Mutex::new(HashMap::new()),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Translator for `locale`.
    ///
    /// With `bundles`, lookups fall back to `common` and then to the same
    /// bundles in the default locale, and the translator is cached under
    /// `locale::b1,b2` (order matters). Without, every bundle of `locale` is
    /// merged into one uncached layer.
    pub fn load_t(&self, locale: &Locale, bundles: Option<&[&str]>) -> Arc<Translator> {
        let Some(bundles) = bundles else {
            return Arc::new(Translator::all_bundles(&self.catalog, locale));
        };

        let key = format!("{locale}::{}", bundles.join(","));
        let mut translators = self
            .translators
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        translators
            .entry(key)
            .or_insert_with_key(|key| {
                tracing::debug!(%key, "building translator");
                Arc::new(Translator::selected_bundles(&self.catalog, locale, bundles))
            })
            .clone()
    }

    /// Number of cached translators.
    pub fn len(&self) -> usize {
        self.translators
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
