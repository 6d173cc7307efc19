//! Per-locale JSON dictionaries and the translators built over them.
//!
//! Dictionaries live in `<dir>/<locale>/<bundle>.json`. A translator built
//! for a list of bundles looks a dotted key up in, in order:
//!
//! 1. the selected bundles of the active locale, merged
//! 2. the active locale's `common` bundle
//! 3. the selected bundles of the default locale, merged
//! 4. the default locale's `common` bundle
//!
//! A key none of them define renders as the key itself, and a `{name}`
//! placeholder without a matching variable stays in the output as written.
//!
//! ```
//! use std::sync::Arc;
//!
//! use serde_json::{json, Map, Value};
//! use site_i18n::internationalization::{
//!     Catalog, LocaleSet, Manifest, TranslatorCache, Vars,
//! };
//!
//! let Value::Object(common) = json!({ "greet": "Hola {name}" }) else { unreachable!() };
//! let locales = LocaleSet::default();
//! let es = locales.default_locale().clone();
//! let manifest = Manifest::from_iter([("common", common)]);
//! let catalog = Catalog::from_manifests(locales, [(es.clone(), manifest)]);
//! let cache = TranslatorCache::new(Arc::new(catalog));
//!
//! let t = cache.load_t(&es, Some(&["blog"]));
//! assert_eq!(t.text("greet", &Vars::new().with("name", "Ana")), "Hola Ana");
//! assert_eq!(t.text("nav.home", &Vars::new()), "nav.home");
//! ```

mod catalog;
mod interpolate;
mod locale;
mod manifest;
mod merge;
mod path;
mod translator;

pub use catalog::Catalog;
pub use interpolate::{interpolate, VarValue, Vars};
pub use locale::{Locale, LocaleSet};
pub use manifest::{build_manifest, Manifest};
pub use merge::deep_merge;
pub use path::get_by_path;
pub use translator::{Translator, TranslatorCache};
