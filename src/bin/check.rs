//! Validates a site's dictionaries and blog collection the way a build
//! step would, exiting non-zero on the first fatal problem.

use eyre::Context;
use site_i18n::{config::Config, content::load_collection, internationalization::Catalog};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    tracing_subscriber::registry()
        .with(tracing_error::ErrorLayer::default())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::try_from_env()?;
    let locales = config.locale_set()?;

    let catalog = Catalog::load(&config.dictionaries_dir, locales.clone())
        .context("failed to load dictionaries")?;
    let collection =
        load_collection(&config.content_dir, &locales).context("failed to load content")?;

    let default_locale = locales.default_locale();
    let mut uncovered = 0;
    for locale in locales.supported() {
        let manifest = catalog.manifest(locale);
        tracing::info!(%locale, bundles = manifest.len(), "dictionaries ok");

        if locale == default_locale {
            continue;
        }
        for key in catalog.missing_from_default(locale) {
            tracing::warn!(%locale, %key, %default_locale, "key has no fallback in default locale");
            uncovered += 1;
        }
    }

    for entry in collection.entries() {
        let Some(translations) = &entry.post.translations else {
            continue;
        };
        for (code, slug) in translations {
            let linked = locales
                .get(code)
                .and_then(|locale| collection.get(locale, slug));
            if linked.is_none() {
                tracing::warn!(
                    id = %entry.id,
                    %code,
                    %slug,
                    "translation link points to a missing post"
                );
            }
        }
    }

    tracing::info!(
        entries = collection.len(),
        uncovered,
        "dictionaries and content are valid"
    );
    Ok(())
}
