//! The blog collection: front matter schema and the loader for
//! `<dir>/<locale>/<slug>.md` files.
//!
//! Each file opens with a TOML front matter block fenced by `+++` lines:
//!
//! ```text
//! +++
//! title = "Hola"
//! date = 2024-03-01
//! excerpt = "Primer artículo"
//! category = "notas"
//!
//! [translations]
//! en = "hello"
//! +++
//! Body text.
//! ```

use std::{
    collections::{BTreeMap, HashMap},
    fmt, fs, io,
    path::{Path, PathBuf},
};

use serde_json::{Map, Value};
use time::{
    format_description::well_known::Rfc3339, macros::format_description, Date, OffsetDateTime,
    PrimitiveDateTime,
};

use crate::{
    internationalization::{Locale, LocaleSet},
    Error, Result,
};

const FRONT_MATTER_FENCE: &str = "+++";

/// Front matter of a blog post.
#[derive(Debug, Clone, PartialEq)]
pub struct BlogPost {
    pub title: String,
    pub date: OffsetDateTime,
    pub excerpt: String,
    pub image: Option<String>,
    pub category: String,
    /// Locale code to the slug of the same post in that locale.
    pub translations: Option<BTreeMap<String, String>>,
}

impl BlogPost {
    /// Calendar date of publication, e.g. `2024-03-01`.
    pub fn display_date(&self) -> String {
        self.date.date().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Problem {
    Missing,
    WrongType { expected: &'static str },
    InvalidDate,
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => f.write_str("is required"),
            Self::WrongType { expected } => write!(f, "must be {expected}"),
            Self::InvalidDate => f.write_str("is not a valid date"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("field `{field}` {problem}")]
pub struct SchemaError {
    pub field: String,
    pub problem: Problem,
}

impl SchemaError {
    fn new(field: impl Into<String>, problem: Problem) -> Self {
        Self {
            field: field.into(),
            problem,
        }
    }
}

/// Checks `record` against the blog post schema.
///
/// Unknown fields are ignored and `null` counts as absent.
pub fn validate(record: &Map<String, Value>) -> Result<BlogPost, SchemaError> {
    Ok(BlogPost {
        title: required_string(record, "title")?,
        date: required_date(record, "date")?,
        excerpt: required_string(record, "excerpt")?,
        image: optional_string(record, "image")?,
        category: required_string(record, "category")?,
        translations: optional_translations(record, "translations")?,
    })
}

fn field<'a>(record: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    record.get(name).filter(|value| !value.is_null())
}

fn required_string(record: &Map<String, Value>, name: &str) -> Result<String, SchemaError> {
    optional_string(record, name)?.ok_or_else(|| SchemaError::new(name, Problem::Missing))
}

fn optional_string(record: &Map<String, Value>, name: &str) -> Result<Option<String>, SchemaError> {
    match field(record, name) {
        None => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.clone())),
        Some(_) => Err(SchemaError::new(
            name,
            Problem::WrongType {
                expected: "a string",
            },
        )),
    }
}

fn required_date(record: &Map<String, Value>, name: &str) -> Result<OffsetDateTime, SchemaError> {
    let value = field(record, name).ok_or_else(|| SchemaError::new(name, Problem::Missing))?;
    coerce_date(value).ok_or_else(|| SchemaError::new(name, Problem::InvalidDate))
}

fn optional_translations(
    record: &Map<String, Value>,
    name: &str,
) -> Result<Option<BTreeMap<String, String>>, SchemaError> {
    let Some(value) = field(record, name) else {
        return Ok(None);
    };
    let Value::Object(entries) = value else {
        return Err(SchemaError::new(
            name,
            Problem::WrongType {
                expected: "a table of strings",
            },
        ));
    };

    entries
        .iter()
        .map(|(key, value)| match value {
            Value::String(slug) => Ok((key.clone(), slug.clone())),
            _ => Err(SchemaError::new(
                format!("{name}.{key}"),
                Problem::WrongType {
                    expected: "a string",
                },
            )),
        })
        .collect::<Result<BTreeMap<_, _>, _>>()
        .map(Some)
}

/// Accepts RFC 3339 timestamps, `YYYY-MM-DD` dates (midnight UTC), offset-less
/// `YYYY-MM-DDTHH:MM:SS[.fff]` (UTC) and milliseconds since the Unix epoch.
fn coerce_date(value: &Value) -> Option<OffsetDateTime> {
    match value {
        Value::String(text) => parse_date(text.trim()),
        Value::Number(number) => {
            let nanos = match number.as_i64() {
                Some(millis) => i128::from(millis) * 1_000_000,
                None => {
                    let millis = number.as_f64().filter(|millis| millis.is_finite())?;
                    (millis * 1_000_000.0) as i128
                }
            };
            OffsetDateTime::from_unix_timestamp_nanos(nanos).ok()
        }
        _ => None,
    }
}

fn parse_date(text: &str) -> Option<OffsetDateTime> {
    if let Ok(timestamp) = OffsetDateTime::parse(text, &Rfc3339) {
        return Some(timestamp);
    }
    if let Ok(timestamp) = PrimitiveDateTime::parse(
        text,
        format_description!(
            "[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]"
        ),
    ) {
        return Some(timestamp.assume_utc());
    }
    Date::parse(text, format_description!("[year]-[month]-[day]"))
        .ok()
        .map(|date| date.midnight().assume_utc())
}

/// One validated file of the collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    /// `<locale>/<slug>`
    pub id: String,
    pub slug: String,
    pub locale: Locale,
    pub post: BlogPost,
    pub body: String,
}

/// Every entry of the collection, newest first.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    entries: Vec<Entry>,
}

impl Collection {
    pub fn new(mut entries: Vec<Entry>) -> Self {
        entries.sort_by(|a, b| {
            b.post
                .date
                .cmp(&a.post.date)
                .then_with(|| a.slug.cmp(&b.slug))
        });
        Self { entries }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn for_locale(&self, locale: &Locale) -> impl Iterator<Item = &Entry> {
        let locale = locale.clone();
        self.entries
            .iter()
            .filter(move |entry| entry.locale == locale)
    }

    pub fn get(&self, locale: &Locale, slug: &str) -> Option<&Entry> {
        self.entries
            .iter()
            .find(|entry| &entry.locale == locale && entry.slug == slug)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Reads and validates `dir/<locale>/*.md` for every supported locale.
pub fn load_collection(dir: impl AsRef<Path>, locales: &LocaleSet) -> Result<Collection> {
    let dir = dir.as_ref();
    let mut entries = Vec::new();
    for locale in locales.supported() {
        let locale_dir = dir.join(locale.as_str());
        let files = match fs::read_dir(&locale_dir) {
            Ok(files) => files,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                tracing::warn!(
                    %locale,
                    dir = %locale_dir.display(),
                    "no content directory for locale"
                );
                continue;
            }
            Err(source) => {
                return Err(Error::Io {
                    path: locale_dir,
                    source,
                })
            }
        };

        let mut paths = Vec::new();
        for file in files {
            let file = file.map_err(|source| Error::Io {
                path: locale_dir.clone(),
                source,
            })?;
            let path = file.path();
            let is_markdown = path.is_file()
                && path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("md"));
            if is_markdown {
                paths.push(path);
            }
        }
        paths.sort();

        let mut sources: HashMap<String, PathBuf> = HashMap::new();
        for path in paths {
            let entry = read_entry(&path, locale)?;
            if let Some(first) = sources.get(&entry.slug) {
                return Err(Error::DuplicateEntry {
                    locale: locale.to_string(),
                    slug: entry.slug,
                    first: first.clone(),
                    second: path,
                });
            }
            sources.insert(entry.slug.clone(), path);
            entries.push(entry);
        }
    }

    tracing::info!(dir = %dir.display(), entries = entries.len(), "loaded content collection");
    Ok(Collection::new(entries))
}

fn read_entry(path: &Path, locale: &Locale) -> Result<Entry> {
    let source = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let slug = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    parse_entry(path, &source, locale, slug)
}

/// Parses one collection file. `path` is only used in errors.
pub fn parse_entry(path: &Path, source: &str, locale: &Locale, slug: String) -> Result<Entry> {
    let (front_matter, body) =
        split_front_matter(source).ok_or_else(|| Error::MissingFrontMatter {
            path: path.to_path_buf(),
        })?;
    let table = front_matter
        .parse::<toml::Table>()
        .map_err(|source| Error::MalformedFrontMatter {
            path: path.to_path_buf(),
            source,
        })?;
    let record = table
        .into_iter()
        .map(|(key, value)| (key, toml_to_json(value)))
        .collect();
    let post = validate(&record).map_err(|source| Error::InvalidContent {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(Entry {
        id: format!("{locale}/{slug}"),
        slug,
        locale: locale.clone(),
        post,
        body: body.trim_start_matches(['\r', '\n']).to_string(),
    })
}

fn split_front_matter(source: &str) -> Option<(&str, &str)> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let rest = source.strip_prefix(FRONT_MATTER_FENCE)?;
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == FRONT_MATTER_FENCE {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(text) => Value::String(text),
        toml::Value::Integer(integer) => Value::from(integer),
        toml::Value::Float(float) => serde_json::Number::from_f64(float)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        toml::Value::Boolean(boolean) => Value::Bool(boolean),
        toml::Value::Datetime(datetime) => Value::String(datetime.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(key, value)| (key, toml_to_json(value)))
                .collect(),
        ),
    }
}
