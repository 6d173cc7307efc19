mod api;
mod extract;
mod templates;

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing, Router,
};
use axum_extra::{headers, TypedHeader};
use http::StatusCode;
use serde::Deserialize;

use crate::{
    content::{Collection, Entry},
    internationalization::{Catalog, Locale, LocaleSet, Translator, TranslatorCache},
};

use self::{
    extract::Language,
    templates::{
        Chrome, IndexTemplate, LocaleLink, NotFoundTemplate, Page, PostSummary, PostTemplate,
    },
};

/// Bundles every page translates against; `common` is always consulted too.
const PAGE_BUNDLES: &[&str] = &["blog"];

#[derive(Clone)]
pub struct AppState {
    translators: Arc<TranslatorCache>,
    collection: Arc<Collection>,
}

impl AppState {
    pub fn new(catalog: Catalog, collection: Collection) -> Self {
        Self {
            translators: Arc::new(TranslatorCache::new(Arc::new(catalog))),
            collection: Arc::new(collection),
        }
    }

    pub fn locales(&self) -> &LocaleSet {
        self.translators.catalog().locales()
    }

    pub fn translators(&self) -> &TranslatorCache {
        &self.translators
    }

    fn page_translator(&self, locale: &Locale) -> Arc<Translator> {
        self.translators.load_t(locale, Some(PAGE_BUNDLES))
    }
}

pub fn create_router(state: AppState) -> Router {
    let api = api::create_router();

    Router::new()
        .route("/index.css", routing::get(get_index_css))
        .route("/healthz", routing::get(get_healthz))
        .route("/", routing::get(get_index))
        .route("/{lang}", routing::get(get_locale_index))
        .route("/{lang}/", routing::get(get_locale_index))
        .route("/blog/{slug}", routing::get(get_post))
        .route("/{lang}/blog/{slug}", routing::get(get_post))
        .nest("/api", api)
        .fallback(get_not_found)
        .with_state(state)
}

async fn get_index_css() -> (TypedHeader<headers::ContentType>, &'static str) {
    (
        TypedHeader(headers::ContentType::from(mime::TEXT_CSS)),
        include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/index.css")),
    )
}

async fn get_healthz() -> &'static str {
    "ok"
}

fn locale_href(locale: &Locale, rest: &str) -> String {
    format!("/{locale}{rest}")
}

fn post_href(entry: &Entry) -> String {
    locale_href(&entry.locale, &format!("/blog/{}", entry.slug))
}

fn chrome(state: &AppState, locale: Locale, locale_links: Vec<LocaleLink>) -> Chrome {
    Chrome {
        t: state.page_translator(&locale),
        home_href: locale_href(&locale, "/"),
        locale,
        locale_links,
    }
}

fn index_links(locales: &LocaleSet) -> Vec<LocaleLink> {
    locales
        .supported()
        .iter()
        .map(|locale| LocaleLink {
            locale: locale.clone(),
            href: locale_href(locale, "/"),
        })
        .collect()
}

async fn get_index(
    State(state): State<AppState>,
    Language(locale): Language,
) -> Page<IndexTemplate> {
    let posts = state
        .collection
        .for_locale(&locale)
        .map(|entry| PostSummary {
            href: post_href(entry),
            title: entry.post.title.clone(),
            date: entry.post.display_date(),
            category: entry.post.category.clone(),
            excerpt: entry.post.excerpt.clone(),
        })
        .collect();
    let links = index_links(state.locales());

    Page(IndexTemplate {
        chrome: chrome(&state, locale, links),
        posts,
    })
}

/// Index under a locale prefix; any other single segment is a 404.
async fn get_locale_index(
    State(state): State<AppState>,
    Language(locale): Language,
    Path(lang): Path<String>,
) -> Result<Page<IndexTemplate>, (StatusCode, Page<NotFoundTemplate>)> {
    if state.locales().get(&lang).is_none() {
        tracing::debug!(%lang, "unsupported locale prefix");
        return Err(not_found(&state, locale));
    }
    Ok(get_index(State(state), Language(locale)).await)
}

#[derive(Deserialize)]
struct PostParams {
    lang: Option<String>,
    slug: String,
}

async fn get_post(
    State(state): State<AppState>,
    Language(locale): Language,
    Path(PostParams { lang, slug }): Path<PostParams>,
) -> Result<Page<PostTemplate>, (StatusCode, Page<NotFoundTemplate>)> {
    if lang.is_some_and(|lang| state.locales().get(&lang).is_none()) {
        return Err(not_found(&state, locale));
    }
    let Some(entry) = state.collection.get(&locale, &slug) else {
        tracing::debug!(%locale, %slug, "post not found");
        return Err(not_found(&state, locale));
    };

    let links = entry
        .post
        .translations
        .iter()
        .flatten()
        .filter_map(|(code, slug)| {
            let locale = state.locales().get(code)?;
            Some(LocaleLink {
                locale: locale.clone(),
                href: locale_href(locale, &format!("/blog/{slug}")),
            })
        })
        .collect();

    Ok(Page(PostTemplate {
        chrome: chrome(&state, locale, links),
        title: entry.post.title.clone(),
        date: entry.post.display_date(),
        category: entry.post.category.clone(),
        image: entry.post.image.clone(),
        body: entry.body.clone(),
    }))
}

async fn get_not_found(
    State(state): State<AppState>,
    Language(locale): Language,
) -> (StatusCode, Page<NotFoundTemplate>) {
    not_found(&state, locale)
}

fn not_found(state: &AppState, locale: Locale) -> (StatusCode, Page<NotFoundTemplate>) {
    let links = index_links(state.locales());
    (
        StatusCode::NOT_FOUND,
        Page(NotFoundTemplate {
            chrome: chrome(state, locale, links),
        }),
    )
}
