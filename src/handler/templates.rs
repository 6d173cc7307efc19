use std::sync::Arc;

use askama::Template;
use axum::response::{Html, IntoResponse, Response};
use http::StatusCode;

use crate::internationalization::{Locale, Translator};

mod filters;

/// Renders an askama template as an HTML response.
pub struct Page<T>(pub T);

impl<T: Template> IntoResponse for Page<T> {
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => Html(html).into_response(),
            Err(error) => {
                tracing::error!(?error, "failed to render template");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

/// Everything the shared layout needs.
pub struct Chrome {
    pub t: Arc<Translator>,
    pub locale: Locale,
    pub home_href: String,
    /// Other-language versions of the current page.
    pub locale_links: Vec<LocaleLink>,
}

pub struct LocaleLink {
    pub locale: Locale,
    pub href: String,
}

pub struct PostSummary {
    pub href: String,
    pub title: String,
    pub date: String,
    pub category: String,
    pub excerpt: String,
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub chrome: Chrome,
    pub posts: Vec<PostSummary>,
}

#[derive(Template)]
#[template(path = "post.html")]
pub struct PostTemplate {
    pub chrome: Chrome,
    pub title: String,
    pub date: String,
    pub category: String,
    pub image: Option<String>,
    pub body: String,
}

#[derive(Template)]
#[template(path = "not-found.html")]
pub struct NotFoundTemplate {
    pub chrome: Chrome,
}
