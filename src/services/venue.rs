// src/services/venue.rs

//! Venue string splitting.
//!
//! A venue string such as `"Journal of Examples, 12(3), 2019"` is split
//! into a name, the remaining details and a trailing year. The heuristic
//! assumes a "Name, details, year" layout and degrades to a partial split
//! for anything else.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::utils::text::clean;

/// Trailing `, <digits>` year suffix. The space is required, so digit
/// groups such as `12,345` are not read as a year.
static TRAILING_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r", [0-9]+$").expect("trailing year pattern is valid"));

/// A venue string split into its parts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Venue {
    pub name: String,
    pub details: String,
    pub year: String,
}

/// Split a raw venue string into name, details and year.
pub fn split_venue(raw: &str) -> Venue {
    let name = clean(
        raw.split(|c: char| c == ',' || c.is_ascii_digit())
            .next()
            .unwrap_or(""),
    );

    let remainder = if name.is_empty() {
        raw.to_string()
    } else {
        raw.replacen(name, "", 1)
    };
    // Match before cleaning: clean() would strip the comma of ", 2019".
    let remainder = remainder.trim_end();

    match TRAILING_YEAR.find(remainder) {
        Some(year) => Venue {
            name: name.to_string(),
            details: clean(&remainder[..year.start()]).to_string(),
            year: clean(year.as_str()).to_string(),
        },
        None => Venue {
            name: name.to_string(),
            details: clean(remainder).to_string(),
            year: String::new(),
        },
    }
}
