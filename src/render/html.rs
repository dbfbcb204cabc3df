//! HTML list rendering.

use std::fmt::Write;

use super::{RenderOptions, html_escape};
use crate::models::{Publication, PublicationCollection};

const DOI_RESOLVER: &str = "https://doi.org/";

/// Render the collection as an ordered HTML list, numbered downwards.
pub fn render_html(collection: &PublicationCollection, options: &RenderOptions) -> String {
    let mut out = String::with_capacity(256 * collection.len().max(1));
    out.push_str("<div class=\"publication\">\n<ol>\n");
    for (number, publication) in collection.numbered() {
        write_item(&mut out, number, publication, options);
    }
    out.push_str("</ol>\n</div>\n");
    out
}

fn write_item(out: &mut String, number: usize, publication: &Publication, options: &RenderOptions) {
    let doi = publication.identifier.as_str();

    let _ = write!(
        out,
        "<li value=\"{number}\"><b>{}</b>",
        html_escape(&publication.title)
    );
    if !publication.year.is_empty() {
        let _ = write!(out, " ({})", html_escape(&publication.year));
    }
    out.push(' ');
    write_authors(out, &publication.authors, options.highlight_name.as_deref());
    out.push_str(". ");

    if !publication.venue_name.is_empty() {
        let _ = write!(out, "<em>{}</em>", html_escape(&publication.venue_name));
    }
    if !publication.venue_details.is_empty() {
        if !publication.venue_name.is_empty() {
            out.push(' ');
        }
        out.push_str(&html_escape(&publication.venue_details));
    }

    if !doi.is_empty() {
        let _ = write!(
            out,
            " <a href=\"{}\">[DOI]</a>",
            html_escape(&format!("{DOI_RESOLVER}{doi}"))
        );
    }

    if let Some(pdf) = options.pdf_links.get(&publication.title) {
        let _ = write!(out, " <a href=\"{}\">[PDF]</a>", html_escape(pdf));
    }

    if publication.citations() > options.min_citations {
        let badge = format!(
            "<span class=\"badge badge-inverse\">{}x</span>",
            publication.citations()
        );
        match &publication.citations_url {
            Some(url) => {
                let _ = write!(
                    out,
                    " <a href=\"{}\" title=\"Citations\">{badge}</a>",
                    html_escape(url)
                );
            }
            None => {
                let _ = write!(out, " {badge}");
            }
        }
    }

    if !doi.is_empty() && options.badge_dois.contains(doi) {
        let _ = write!(
            out,
            " <span class=\"altmetric-embed\" data-badge-popover=\"bottom\" data-doi=\"{}\"></span>",
            html_escape(doi)
        );
    }

    out.push_str("</li>\n");
}

/// Write the author list, marking the first-to-last span of `highlight`.
fn write_authors(out: &mut String, authors: &str, highlight: Option<&str>) {
    let span = highlight
        .filter(|name| !name.is_empty())
        .and_then(|name| {
            let first = authors.find(name)?;
            let last = authors.rfind(name)?;
            Some((name, first, last + name.len()))
        });

    match span {
        Some((name, start, end)) => {
            let _ = write!(
                out,
                "{}<span class=\"label\">{}</span>{}",
                html_escape(&authors[..start]),
                html_escape(name),
                html_escape(&authors[end..])
            );
        }
        None => out.push_str(&html_escape(authors)),
    }
}
