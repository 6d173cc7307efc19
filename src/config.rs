use std::path::PathBuf;

use eyre::Context;
use serde::{Deserialize, Deserializer};

use crate::internationalization::{Locale, LocaleSet};

fn default_listen_addr() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_dictionaries_dir() -> PathBuf {
    PathBuf::from("src/i18n")
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("src/content/blog")
}

fn default_locales() -> Vec<Locale> {
    LocaleSet::default().supported().to_vec()
}

fn default_default_locale() -> Locale {
    LocaleSet::default().default_locale().clone()
}

fn deserialize_locales<'de, D>(d: D) -> Result<Vec<Locale>, D::Error>
where
    D: Deserializer<'de>,
{
    Vec::<String>::deserialize(d)?
        .iter()
        .map(|code| code.parse().map_err(serde::de::Error::custom))
        .collect()
}

fn deserialize_locale<'de, D>(d: D) -> Result<Locale, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(d)?
        .parse()
        .map_err(serde::de::Error::custom)
}

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    #[serde(default = "default_dictionaries_dir")]
    pub dictionaries_dir: PathBuf,

    #[serde(default = "default_content_dir")]
    pub content_dir: PathBuf,

    #[serde(default = "default_locales", deserialize_with = "deserialize_locales")]
    pub locales: Vec<Locale>,

    #[serde(
        default = "default_default_locale",
        deserialize_with = "deserialize_locale"
    )]
    pub default_locale: Locale,
}

impl Config {
    pub fn try_from_env() -> eyre::Result<Self> {
        envy::from_env().context("failed to read config from environment variables")
    }

    pub fn locale_set(&self) -> eyre::Result<LocaleSet> {
        LocaleSet::new(self.locales.iter().cloned(), self.default_locale.clone())
            .context("invalid locale configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_pairs(pairs: &[(&str, &str)]) -> Config {
        envy::from_iter(
            pairs
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string())),
        )
        .unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = from_pairs(&[]);
        assert_eq!(config.listen_addr, "0.0.0.0:3000");
        assert_eq!(config.dictionaries_dir, PathBuf::from("src/i18n"));

        let locales = config.locale_set().unwrap();
        assert_eq!(locales.default_locale().as_str(), "es");
        assert_eq!(locales.supported().len(), 2);
    }

    #[test]
    fn test_locales_from_comma_separated_list() {
        let config = from_pairs(&[("LOCALES", "en,DE,fr"), ("DEFAULT_LOCALE", "de")]);

        let locales = config.locale_set().unwrap();

        let codes: Vec<_> = locales.supported().iter().map(Locale::as_str).collect();
        assert_eq!(codes, ["en", "de", "fr"]);
        assert_eq!(locales.default_locale().as_str(), "de");
    }

    #[test]
    fn test_default_outside_supported_set_is_rejected() {
        let config = from_pairs(&[("LOCALES", "en"), ("DEFAULT_LOCALE", "es")]);
        assert!(config.locale_set().is_err());
    }
}
