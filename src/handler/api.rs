use axum::{extract::State, routing, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::internationalization::{Locale, Vars};

use super::AppState;

pub fn create_router() -> Router<AppState> {
    Router::new().route("/translate", routing::post(post_translate))
}

#[derive(Deserialize)]
struct TranslateReq {
    /// Path or absolute URL the locale is resolved from.
    url: String,
    #[serde(default)]
    bundles: Option<Vec<String>>,
    key: String,
    #[serde(default)]
    vars: Vars,
}

#[derive(Serialize)]
struct TranslateResp {
    locale: Locale,
    value: Value,
}

async fn post_translate(
    State(state): State<AppState>,
    Json(req): Json<TranslateReq>,
) -> Json<TranslateResp> {
    let locale = state.locales().resolve_locale_from_url(&req.url).clone();
    let bundles = req
        .bundles
        .as_ref()
        .map(|bundles| bundles.iter().map(String::as_str).collect::<Vec<_>>());
    let t = state.translators().load_t(&locale, bundles.as_deref());

    Json(TranslateResp {
        value: t.translate(&req.key, &req.vars),
        locale,
    })
}
