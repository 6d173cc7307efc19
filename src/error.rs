use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Load-time failures. Lookup misses never surface here.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read `{}`", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed dictionary `{}`", .path.display())]
    MalformedDictionary {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("dictionary `{}` must contain a JSON object at the top level", .path.display())]
    NotAnObject { path: PathBuf },

    #[error(
        "bundle `{bundle}` is defined twice for locale `{locale}`: `{}` and `{}`",
        .first.display(),
        .second.display()
    )]
    DuplicateBundle {
        locale: String,
        bundle: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error(
        "post `{slug}` is defined twice for locale `{locale}`: `{}` and `{}`",
        .first.display(),
        .second.display()
    )]
    DuplicateEntry {
        locale: String,
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("`{}` has no `+++` front matter block", .path.display())]
    MissingFrontMatter { path: PathBuf },

    #[error("malformed front matter in `{}`", .path.display())]
    MalformedFrontMatter {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("content `{}` failed validation", .path.display())]
    InvalidContent {
        path: PathBuf,
        #[source]
        source: crate::content::SchemaError,
    },

    #[error("invalid locale `{0}`")]
    InvalidLocale(String),

    #[error("default locale `{0}` is not one of the supported locales")]
    UnsupportedDefaultLocale(String),
}
