//! JSON rendering: one object per publication with its display number.

use serde::Serialize;

use crate::error::Result;
use crate::models::{Publication, PublicationCollection};

#[derive(Serialize)]
struct NumberedPublication<'a> {
    number: usize,
    #[serde(flatten)]
    publication: &'a Publication,
}

/// Render the collection as a pretty-printed JSON array.
pub fn render_json(collection: &PublicationCollection) -> Result<String> {
    let entries: Vec<_> = collection
        .numbered()
        .map(|(number, publication)| NumberedPublication {
            number,
            publication,
        })
        .collect();
    Ok(serde_json::to_string_pretty(&entries)?)
}
