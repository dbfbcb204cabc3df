// src/render/mod.rs

//! Rendering of a finished publication collection.
//!
//! Every renderer is a pure function of the collection and its options.

mod html;
mod json;

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::{PublicationCollection, RenderConfig};

pub use html::render_html;
pub use json::render_json;

/// Output format of the rendered collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Html,
    Json,
}

impl FromStr for OutputFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "html" => Ok(Self::Html),
            "json" => Ok(Self::Json),
            other => Err(AppError::config(format!("Unknown output format '{other}'"))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Html => f.write_str("html"),
            Self::Json => f.write_str("json"),
        }
    }
}

/// Presentation options for the HTML renderer.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Author name to mark in author lists
    pub highlight_name: Option<String>,
    /// Extra PDF link per exact title
    pub pdf_links: HashMap<String, String>,
    /// Identifiers that get an altmetric badge
    pub badge_dois: BTreeSet<String>,
    /// Citation badge is shown only when the count exceeds this
    pub min_citations: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            highlight_name: None,
            pdf_links: HashMap::new(),
            badge_dois: BTreeSet::new(),
            min_citations: 1,
        }
    }
}

impl From<&RenderConfig> for RenderOptions {
    fn from(config: &RenderConfig) -> Self {
        Self {
            highlight_name: config.highlight.clone(),
            pdf_links: config.pdfs.clone(),
            badge_dois: config.altmetric_dois.clone(),
            min_citations: config.min_citations,
        }
    }
}

/// Render a collection in the given format.
pub fn render(
    collection: &PublicationCollection,
    format: OutputFormat,
    options: &RenderOptions,
) -> Result<String> {
    match format {
        OutputFormat::Html => Ok(render_html(collection, options)),
        OutputFormat::Json => render_json(collection),
    }
}

/// Wrap every occurrence of each term in `<em>` tags.
///
/// Terms are applied in order; empty terms are ignored.
pub fn italicize<S: AsRef<str>>(html: &str, terms: &[S]) -> String {
    terms
        .iter()
        .map(AsRef::as_ref)
        .filter(|term| !term.is_empty())
        .fold(html.to_string(), |acc, term| {
            acc.replace(term, &format!("<em>{term}</em>"))
        })
}

pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
