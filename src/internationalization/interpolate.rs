use std::{collections::BTreeMap, fmt};

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([A-Za-z0-9_]+)\}").expect("failed to compile placeholder regex"));

/// A value substituted into a `{name}` placeholder.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum VarValue {
    Text(String),
    Number(serde_json::Number),
}

impl fmt::Display for VarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(number) => {
                if let Some(integer) = number.as_i64() {
                    write!(f, "{integer}")
                } else if let Some(integer) = number.as_u64() {
                    write!(f, "{integer}")
                } else {
                    // `2.0` prints as `2`
                    write!(f, "{}", number.as_f64().unwrap_or_default())
                }
            }
        }
    }
}

impl From<&str> for VarValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for VarValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for VarValue {
                fn from(value: $ty) -> Self {
                    Self::Number(value.into())
                }
            }
        )*
    };
}

impl_from_integer!(i32, i64, u32, u64, usize);

impl From<f64> for VarValue {
    fn from(value: f64) -> Self {
        serde_json::Number::from_f64(value)
            .map(Self::Number)
            .unwrap_or_else(|| Self::Text(value.to_string()))
    }
}

/// Named interpolation variables.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Vars(BTreeMap<String, VarValue>);

impl Vars {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<VarValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<VarValue>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&VarValue> {
        self.0.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Vars
where
    K: Into<String>,
    V: Into<VarValue>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut vars = Self::new();
        for (name, value) in iter {
            vars.insert(name, value);
        }
        vars
    }
}

/// Replaces each `{name}` in `template` with `vars[name]`. Unknown names are
/// left as written.
pub fn interpolate(template: &str, vars: &Vars) -> String {
    if vars.is_empty() {
        return template.to_string();
    }
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| match vars.get(&caps[1]) {
            Some(value) => value.to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replaces_known_placeholders() {
        let vars = Vars::new().with("name", "Ana");
        assert_eq!(interpolate("Hello {name}", &vars), "Hello Ana");
    }

    #[test]
    fn test_unknown_placeholders_stay_literal() {
        assert_eq!(interpolate("Hello {name}", &Vars::new()), "Hello {name}");

        let vars = Vars::new().with("other", "x");
        assert_eq!(interpolate("Hello {name}", &vars), "Hello {name}");
    }

    #[test]
    fn test_numbers_and_repeats() {
        let vars = Vars::new().with("count", 3).with("who", "Leo");
        assert_eq!(
            interpolate("{who} has {count} posts, {who}!", &vars),
            "Leo has 3 posts, Leo!"
        );
    }

    #[test]
    fn test_numbers_use_shortest_form() {
        let vars: Vars =
            serde_json::from_str(r#"{ "count": 2.0, "ratio": 0.5, "big": 18446744073709551615 }"#)
                .unwrap();
        assert_eq!(
            interpolate("{count} / {ratio} / {big}", &vars),
            "2 / 0.5 / 18446744073709551615"
        );

        let vars = Vars::new().with("n", 1e21).with("m", -3);
        assert_eq!(interpolate("{n} {m}", &vars), "1000000000000000000000 -3");
    }

    #[test]
    fn test_non_word_braces_are_ignored() {
        let vars = Vars::new().with("a", 1);
        assert_eq!(interpolate("{a b} {} {a-b} {a}", &vars), "{a b} {} {a-b} 1");
    }

    #[test]
    fn test_vars_deserialize_from_json() {
        let vars: Vars = serde_json::from_str(r#"{ "n": "Leo", "count": 2 }"#).unwrap();
        assert_eq!(interpolate("{n}: {count}", &vars), "Leo: 2");
    }
}
