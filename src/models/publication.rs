//! Publication record and the collection produced by one scrape.

use serde::Serialize;

/// One publication scraped from the profile page.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Default)]
pub struct Publication {
    /// Title, without a trailing period
    pub title: String,

    /// Permalink to the entry on the profile site
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,

    /// Comma-separated authors; truncated lists end with "et al"
    pub authors: String,

    /// Leading clause of the venue string
    pub venue_name: String,

    /// Venue remainder (volume, pages, ...)
    pub venue_details: String,

    /// Publication year as printed by the source; empty if absent
    pub year: String,

    /// Citation count as printed; empty means zero or unknown
    pub citation_count: String,

    /// "Cited by" link, only present with a non-empty citation count
    #[serde(skip_serializing_if = "Option::is_none")]
    pub citations_url: Option<String>,

    /// Persistent identifier (DOI); empty when not resolved
    pub identifier: String,
}

impl Publication {
    /// Return the same record with the given identifier attached.
    pub fn with_identifier(self, identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            ..self
        }
    }

    /// Citation count as an integer. Non-numeric or empty counts are 0.
    pub fn citations(&self) -> u32 {
        self.citation_count.trim().parse().unwrap_or(0)
    }
}

/// Ordered, read-only set of publications from a single scrape.
///
/// Order matches the source document (most recent first).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublicationCollection {
    publications: Vec<Publication>,
}

impl PublicationCollection {
    pub fn new(publications: Vec<Publication>) -> Self {
        Self { publications }
    }

    pub fn len(&self) -> usize {
        self.publications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.publications.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Publication> {
        self.publications.iter()
    }

    pub fn as_slice(&self) -> &[Publication] {
        &self.publications
    }

    /// Iterate with the display number of each entry, counting down to 1.
    pub fn numbered(&self) -> impl Iterator<Item = (usize, &Publication)> {
        let total = self.publications.len();
        self.publications
            .iter()
            .enumerate()
            .map(move |(idx, publication)| (total - idx, publication))
    }
}
