// src/pipeline/scrape.rs

//! Profile scraping pipeline.

use reqwest::Client;
use scraper::Html;
use url::Url;

use crate::error::Result;
use crate::models::{Config, Publication, PublicationCollection, RenderConfig};
use crate::render::{self, OutputFormat, RenderOptions};
use crate::services::{IdentifierResolver, LookupOutcome, PublicationExtractor};
use crate::utils::http;
use crate::utils::text::last_name_of_first_author;

/// Fetch the configured profile page and build its publication collection.
///
/// Only a failure to retrieve the page aborts the run; extraction and
/// lookup problems stay local to the affected entry.
pub async fn run_scrape(
    config: &Config,
    client: &Client,
    resolver: &mut IdentifierResolver,
) -> Result<PublicationCollection> {
    let extractor = PublicationExtractor::new(&config.profile.selectors)?;
    let base = Url::parse(&config.profile.url)?;

    log::info!("Will check {}.", config.profile.url);
    let html = http::fetch_text(client, &config.profile.url).await?;

    Ok(build_collection(&html, Some(&base), &extractor, resolver).await)
}

/// Extract publications from a profile page body and enrich them.
pub async fn build_collection(
    html: &str,
    base: Option<&Url>,
    extractor: &PublicationExtractor,
    resolver: &mut IdentifierResolver,
) -> PublicationCollection {
    let publications = {
        let document = Html::parse_document(html);
        extractor.extract(&document, base)
    };
    enrich(publications, resolver).await
}

/// Attach identifiers one publication at a time, in order.
pub async fn enrich(
    publications: Vec<Publication>,
    resolver: &mut IdentifierResolver,
) -> PublicationCollection {
    if !resolver.is_enabled() {
        log::info!("Identifier lookup disabled.");
        return PublicationCollection::new(publications);
    }

    let total = publications.len();
    let mut found = 0;
    let mut enriched = Vec::with_capacity(total);

    for publication in publications {
        let surname = last_name_of_first_author(&publication.authors);
        let outcome = resolver.resolve(&surname, &publication.title).await;
        match &outcome {
            LookupOutcome::Found(_) => found += 1,
            LookupOutcome::NotFound => {
                log::debug!("No DOI found for '{}'", publication.title)
            }
            LookupOutcome::Failed(reason) => {
                log::warn!("DOI lookup failed for '{}': {}", publication.title, reason)
            }
            LookupOutcome::Disabled => {}
        }
        enriched.push(publication.with_identifier(outcome.identifier()));
    }

    log::info!("Resolved {found} of {total} identifiers.");
    PublicationCollection::new(enriched)
}

/// Render a collection in the configured format.
///
/// Italicization only applies to HTML output.
pub fn render_output(collection: &PublicationCollection, config: &RenderConfig) -> Result<String> {
    let options = RenderOptions::from(config);
    let output = render::render(collection, config.format, &options)?;
    Ok(match config.format {
        OutputFormat::Html => render::italicize(&output, &config.italicize),
        OutputFormat::Json => output,
    })
}
