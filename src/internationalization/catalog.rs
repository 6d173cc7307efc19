use std::{collections::HashMap, path::Path};

use once_cell::sync::Lazy;
use serde_json::{Map, Value};

use crate::Result;

use super::{build_manifest, get_by_path, Locale, LocaleSet, Manifest};

static EMPTY_MANIFEST: Lazy<Manifest> = Lazy::new(Manifest::default);

/// The manifests of every supported locale, built once at startup.
#[derive(Debug, Clone)]
pub struct Catalog {
    locales: LocaleSet,
    manifests: HashMap<Locale, Manifest>,
}

impl Catalog {
    /// Scans `dir/<locale>/*.json` for every locale in `locales`.
    pub fn load(dir: impl AsRef<Path>, locales: LocaleSet) -> Result<Self> {
        let dir = dir.as_ref();
        let mut manifests = HashMap::new();
        for locale in locales.supported() {
            let manifest = build_manifest(dir, locale)?;
            manifests.insert(locale.clone(), manifest);
        }
        tracing::info!(dir = %dir.display(), locales = manifests.len(), "loaded dictionaries");
        Ok(Self { locales, manifests })
    }

    pub fn from_manifests(
        locales: LocaleSet,
        manifests: impl IntoIterator<Item = (Locale, Manifest)>,
    ) -> Self {
        Self {
            locales,
            manifests: manifests.into_iter().collect(),
        }
    }

    pub fn locales(&self) -> &LocaleSet {
        &self.locales
    }

    /// Manifest for `locale`; empty when nothing was loaded for it.
    pub fn manifest(&self, locale: &Locale) -> &Manifest {
        self.manifests.get(locale).unwrap_or(&EMPTY_MANIFEST)
    }

    /// Leaf keys (`bundle:dotted.path`) defined for `locale` that the default
    /// locale cannot supply, either from the same bundle or from `common`.
    ///
    /// Any page in another locale that omits one of these keys renders the
    /// bare path.
    pub fn missing_from_default(&self, locale: &Locale) -> Vec<String> {
        let fallback = self.manifest(self.locales.default_locale());
        let fallback_common = fallback.get("common").cloned().map(Value::Object);

        let mut missing = Vec::new();
        for (name, bundle) in self.manifest(locale).bundles() {
            let fallback_bundle = fallback.get(name).cloned().map(Value::Object);
            let mut leaves = Vec::new();
            leaf_paths(bundle, "", &mut leaves);
            for leaf in leaves {
                let covered = [&fallback_bundle, &fallback_common]
                    .into_iter()
                    .flatten()
                    .any(|layer| get_by_path(layer, &leaf).is_some());
                if !covered {
                    missing.push(format!("{name}:{leaf}"));
                }
            }
        }
        missing
    }
}

fn leaf_paths(map: &Map<String, Value>, prefix: &str, out: &mut Vec<String>) {
    for (key, value) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            Value::Object(child) if !child.is_empty() => leaf_paths(child, &path, out),
            _ => out.push(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn bundle(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    #[test]
    fn test_unknown_locale_has_empty_manifest() {
        let catalog = Catalog::from_manifests(LocaleSet::default(), []);
        assert!(catalog.manifest(&"en".parse().unwrap()).is_empty());
    }

    #[test]
    fn test_reports_keys_missing_from_default() {
        let es: Locale = "es".parse().unwrap();
        let en: Locale = "en".parse().unwrap();
        let catalog = Catalog::from_manifests(
            LocaleSet::default(),
            [
                (
                    es,
                    Manifest::from_iter([
                        ("common", bundle(json!({ "footer": "Pie" }))),
                        ("blog", bundle(json!({ "title": "Blog" }))),
                    ]),
                ),
                (
                    en.clone(),
                    Manifest::from_iter([(
                        "blog",
                        bundle(json!({
                            "title": "Blog",
                            "footer": "Footer",
                            "share": { "label": "Share" },
                        })),
                    )]),
                ),
            ],
        );

        assert_eq!(catalog.missing_from_default(&en), ["blog:share.label"]);
    }
}
