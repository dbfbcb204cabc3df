// src/services/profile.rs

//! Publication extraction from a citation profile page.
//!
//! Each entry row is turned into a [`Publication`]. A missing node or
//! attribute only blanks the affected field, so one malformed row never
//! stops the rest of the page from being read.

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{ProfileSelectors, Publication};
use crate::services::venue::split_venue;
use crate::utils::resolve_or_raw;
use crate::utils::text::{canonicalize_truncation, clean, strip_trailing_period};

/// Extracts publications from a parsed profile page.
pub struct PublicationExtractor {
    row: Selector,
    title: Selector,
    details: Selector,
    citations: Selector,
    attr_name: String,
}

impl PublicationExtractor {
    /// Build an extractor, compiling all configured selectors up front.
    pub fn new(selectors: &ProfileSelectors) -> Result<Self> {
        Ok(Self {
            row: Self::parse_selector(&selectors.row_selector)?,
            title: Self::parse_selector(&selectors.title_selector)?,
            details: Self::parse_selector(&selectors.details_selector)?,
            citations: Self::parse_selector(&selectors.citations_selector)?,
            attr_name: selectors.attr_name.clone(),
        })
    }

    /// Extract every entry in document order.
    ///
    /// Relative links are resolved against `base` when given.
    pub fn extract(&self, document: &Html, base: Option<&Url>) -> Vec<Publication> {
        let rows: Vec<_> = document.select(&self.row).collect();
        log::info!("Found {} entries.", rows.len());

        let publications: Vec<_> = rows
            .iter()
            .enumerate()
            .map(|(idx, row)| self.extract_row(idx, row, base))
            .collect();

        log::info!("Scraped {} publications.", publications.len());
        publications
    }

    fn extract_row(&self, idx: usize, row: &ElementRef, base: Option<&Url>) -> Publication {
        let title_elem = row.select(&self.title).next();
        let mut details = row.select(&self.details);
        let authors_elem = details.next();
        let venue_elem = details.next();
        let citations_elem = row.select(&self.citations).next();

        let title = title_elem
            .map(|el| strip_trailing_period(element_text(&el).trim()).to_string())
            .unwrap_or_else(|| {
                log::debug!("Entry {idx}: no title");
                String::new()
            });

        let source_url = title_elem
            .and_then(|el| el.value().attr(&self.attr_name))
            .map(|href| resolve_or_raw(base, href));

        let authors = authors_elem
            .map(|el| canonicalize_truncation(clean(&element_text(&el))))
            .unwrap_or_else(|| {
                log::debug!("Entry {idx}: no authors");
                String::new()
            });

        let venue = split_venue(&venue_elem.map(|el| element_text(&el)).unwrap_or_default());

        let citation_count = citations_elem
            .map(|el| element_text(&el).trim().to_string())
            .unwrap_or_default();
        let citations_url = if citation_count.is_empty() {
            None
        } else {
            citations_elem
                .and_then(|el| el.value().attr(&self.attr_name))
                .map(|href| resolve_or_raw(base, href))
        };

        Publication {
            title,
            source_url,
            authors,
            venue_name: venue.name,
            venue_details: venue.details,
            year: venue.year,
            citation_count,
            citations_url,
            identifier: String::new(),
        }
    }

    fn parse_selector(s: &str) -> Result<Selector> {
        Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
    }
}

fn element_text(el: &ElementRef) -> String {
    el.text().collect()
}
