use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::internationalization::Locale;

use super::AppState;

/// Locale named by the first segment of the request path, or the default.
pub struct Language(pub Locale);

impl FromRequestParts<AppState> for Language {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let locale = state.locales().resolve_locale(parts.uri.path());
        Ok(Self(locale.clone()))
    }
}
