use std::{fmt, str::FromStr};

use serde::Serialize;
use unic_langid::LanguageIdentifier;
use url::Url;

use crate::{Error, Result};

/// A lower-cased language code, e.g. `es` or `en`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Locale(String);

impl Locale {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Locale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let code = s.trim();
        if code.is_empty() || LanguageIdentifier::from_str(code).is_err() {
            return Err(Error::InvalidLocale(s.to_string()));
        }
        Ok(Self(code.to_ascii_lowercase()))
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Locale {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The fixed set of locales a site is built for, one of them the default.
#[derive(Debug, Clone)]
pub struct LocaleSet {
    supported: Vec<Locale>,
    default: Locale,
}

impl Default for LocaleSet {
    fn default() -> Self {
        let es = Locale("es".to_string());
        let en = Locale("en".to_string());
        Self {
            supported: vec![es.clone(), en],
            default: es,
        }
    }
}

impl LocaleSet {
    pub fn new(supported: impl IntoIterator<Item = Locale>, default: Locale) -> Result<Self> {
        let mut locales: Vec<Locale> = Vec::new();
        for locale in supported {
            if !locales.contains(&locale) {
                locales.push(locale);
            }
        }
        if !locales.contains(&default) {
            return Err(Error::UnsupportedDefaultLocale(default.0));
        }
        Ok(Self {
            supported: locales,
            default,
        })
    }

    pub fn supported(&self) -> &[Locale] {
        &self.supported
    }

    pub fn default_locale(&self) -> &Locale {
        &self.default
    }

    /// Case-insensitive membership lookup.
    pub fn get(&self, code: &str) -> Option<&Locale> {
        self.supported
            .iter()
            .find(|locale| locale.0.eq_ignore_ascii_case(code))
    }

    /// Locale named by the first path segment, or the default locale.
    ///
    /// `/en`, `/en/` and `/EN/blog` all resolve to `en`; `/english`, `/`
    /// and `/fr/blog` resolve to the default.
    pub fn resolve_locale(&self, path: &str) -> &Locale {
        self.strip_locale(path).0
    }

    /// Like [`Self::resolve_locale`], also returning the path after the
    /// locale prefix. The remainder always starts with `/`.
    pub fn strip_locale<'a>(&self, path: &'a str) -> (&Locale, &'a str) {
        let matched = path.strip_prefix('/').and_then(|rest| {
            let (segment, tail) = match rest.find('/') {
                Some(index) => rest.split_at(index),
                None => (rest, ""),
            };
            self.get(segment).map(|locale| (locale, tail))
        });
        match matched {
            Some((locale, "")) => (locale, "/"),
            Some((locale, tail)) => (locale, tail),
            None => (&self.default, path),
        }
    }

    /// Accepts either an absolute URL or a bare path (query and fragment
    /// ignored).
    pub fn resolve_locale_from_url(&self, input: &str) -> &Locale {
        match Url::parse(input) {
            Ok(url) => self.resolve_locale(url.path()),
            Err(_) => {
                let path = input.split(['?', '#']).next().unwrap_or(input);
                self.resolve_locale(path)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locale(code: &str) -> Locale {
        code.parse().unwrap()
    }

    #[test]
    fn test_resolves_supported_prefix() {
        let locales = LocaleSet::default();
        assert_eq!(locales.resolve_locale("/en"), &locale("en"));
        assert_eq!(locales.resolve_locale("/en/"), &locale("en"));
        assert_eq!(locales.resolve_locale("/en/blog/hello"), &locale("en"));
        assert_eq!(locales.resolve_locale("/es/blog"), &locale("es"));
    }

    #[test]
    fn test_prefix_match_is_case_insensitive() {
        let locales = LocaleSet::default();
        assert_eq!(locales.resolve_locale("/EN/blog").as_str(), "en");
        assert_eq!(locales.resolve_locale("/Es").as_str(), "es");
    }

    #[test]
    fn test_unrecognized_prefix_falls_back_to_default() {
        let locales = LocaleSet::default();
        assert_eq!(locales.resolve_locale("/").as_str(), "es");
        assert_eq!(locales.resolve_locale("").as_str(), "es");
        assert_eq!(locales.resolve_locale("/fr/blog").as_str(), "es");
        assert_eq!(locales.resolve_locale("/english").as_str(), "es");
        assert_eq!(locales.resolve_locale("en/blog").as_str(), "es");
        assert_eq!(locales.resolve_locale("/blog/en").as_str(), "es");
    }

    #[test]
    fn test_strip_locale_returns_remainder() {
        let locales = LocaleSet::default();
        assert_eq!(locales.strip_locale("/en/blog/a"), (&locale("en"), "/blog/a"));
        assert_eq!(locales.strip_locale("/en"), (&locale("en"), "/"));
        assert_eq!(locales.strip_locale("/blog/a"), (&locale("es"), "/blog/a"));
    }

    #[test]
    fn test_resolve_from_url() {
        let locales = LocaleSet::default();
        assert_eq!(
            locales
                .resolve_locale_from_url("https://example.com/en/blog?x=1")
                .as_str(),
            "en"
        );
        assert_eq!(locales.resolve_locale_from_url("/en?x=1").as_str(), "en");
        assert_eq!(locales.resolve_locale_from_url("/en#top").as_str(), "en");
        assert_eq!(
            locales.resolve_locale_from_url("https://example.com/").as_str(),
            "es"
        );
    }

    #[test]
    fn test_locale_parsing_lowercases_and_validates() {
        assert_eq!(locale("EN").as_str(), "en");
        assert_eq!(locale(" pt-BR ").as_str(), "pt-br");
        assert!("".parse::<Locale>().is_err());
        assert!("en/../x".parse::<Locale>().is_err());
    }

    #[test]
    fn test_default_must_be_supported() {
        let result = LocaleSet::new([locale("en")], locale("es"));
        assert!(matches!(result, Err(Error::UnsupportedDefaultLocale(code)) if code == "es"));

        let locales =
            LocaleSet::new([locale("en"), locale("de"), locale("en")], locale("de")).unwrap();
        assert_eq!(locales.supported().len(), 2);
        assert_eq!(locales.default_locale().as_str(), "de");
    }
}
