use std::{
    collections::{BTreeMap, HashMap},
    fs, io,
    path::{Path, PathBuf},
};

use serde_json::{Map, Value};

use crate::{Error, Result};

use super::Locale;

/// Every dictionary bundle of one locale, keyed by file stem.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Manifest {
    bundles: BTreeMap<String, Map<String, Value>>,
}

impl Manifest {
    pub fn get(&self, bundle: &str) -> Option<&Map<String, Value>> {
        self.bundles.get(bundle)
    }

    /// Bundles in name order.
    pub fn bundles(&self) -> impl Iterator<Item = (&str, &Map<String, Value>)> {
        self.bundles
            .iter()
            .map(|(name, bundle)| (name.as_str(), bundle))
    }

    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Map<String, Value>)> for Manifest {
    fn from_iter<T: IntoIterator<Item = (K, Map<String, Value>)>>(iter: T) -> Self {
        Self {
            bundles: iter
                .into_iter()
                .map(|(name, bundle)| (name.into(), bundle))
                .collect(),
        }
    }
}

/// Reads every `*.json` file in `dir/<locale>/` into a manifest.
///
/// A locale without a directory gets an empty manifest. Two files with the
/// same stem (`common.json`, `common.JSON`) are rejected.
pub fn build_manifest(dir: &Path, locale: &Locale) -> Result<Manifest> {
    let locale_dir = dir.join(locale.as_str());
    let entries = match fs::read_dir(&locale_dir) {
        Ok(entries) => entries,
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            tracing::warn!(
                %locale,
                dir = %locale_dir.display(),
                "no dictionary directory for locale"
            );
            return Ok(Manifest::default());
        }
        Err(source) => {
            return Err(Error::Io {
                path: locale_dir,
                source,
            })
        }
    };

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| Error::Io {
            path: locale_dir.clone(),
            source,
        })?;
        let path = entry.path();
        if is_dictionary(&path) {
            paths.push(path);
        }
    }
    paths.sort();

    let mut sources: HashMap<String, PathBuf> = HashMap::new();
    let mut bundles = BTreeMap::new();
    for path in paths {
        let Some(name) = path.file_stem().and_then(|stem| stem.to_str()) else {
            tracing::warn!(path = %path.display(), "skipping dictionary with non UTF-8 name");
            continue;
        };
        let name = name.to_string();
        if let Some(first) = sources.get(&name) {
            return Err(Error::DuplicateBundle {
                locale: locale.to_string(),
                bundle: name,
                first: first.clone(),
                second: path,
            });
        }

        let bundle = read_bundle(&path)?;
        tracing::trace!(%locale, bundle = %name, "loaded dictionary bundle");
        sources.insert(name.clone(), path);
        bundles.insert(name, bundle);
    }

    tracing::debug!(%locale, bundles = bundles.len(), "built dictionary manifest");
    Ok(Manifest { bundles })
}

fn is_dictionary(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

fn read_bundle(path: &Path) -> Result<Map<String, Value>> {
    let text = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value =
        serde_json::from_str(&text).map_err(|source| Error::MalformedDictionary {
            path: path.to_path_buf(),
            source,
        })?;
    match value {
        Value::Object(bundle) => Ok(bundle),
        _ => Err(Error::NotAnObject {
            path: path.to_path_buf(),
        }),
    }
}
