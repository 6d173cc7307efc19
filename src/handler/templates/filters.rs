use std::fmt;

use crate::internationalization::{Translator, Vars};

pub fn t(translator: &Translator, _: &dyn askama::Values, key: &str) -> askama::Result<String> {
    Ok(translator.text(key, &Vars::new()))
}

/// `t` with a single `{name}` variable.
pub fn t_var(
    translator: &Translator,
    _: &dyn askama::Values,
    key: &str,
    name: &str,
    value: impl fmt::Display,
) -> askama::Result<String> {
    let vars = Vars::new().with(name, value.to_string());
    Ok(translator.text(key, &vars))
}
