// src/utils/text.rs

//! Text normalization for fragments pulled out of the profile page.

use unicode_normalization::UnicodeNormalization;

/// Marker the profile site uses for a truncated author list.
pub const TRUNCATION_MARKER: &str = "...";

/// Canonical replacement for [`TRUNCATION_MARKER`].
pub const ET_AL: &str = "et al";

/// Strip leading and trailing whitespace and commas.
///
/// Interior content is left untouched.
pub fn clean(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || c == ',')
}

/// Replace every truncation marker with "et al".
pub fn canonicalize_truncation(text: &str) -> String {
    text.replace(TRUNCATION_MARKER, ET_AL)
}

/// Drop a single trailing period, if present.
pub fn strip_trailing_period(text: &str) -> &str {
    text.strip_suffix('.').unwrap_or(text)
}

/// Surname of the first author, reduced to ASCII letters and hyphens.
///
/// Takes the text before the first comma and keeps its last word.
/// Accented letters are folded to their ASCII base ("Müller" -> "Muller").
pub fn last_name_of_first_author(authors: &str) -> String {
    let first_author = authors.split(',').next().unwrap_or("");
    let surname = first_author.split_whitespace().last().unwrap_or("");

    surname
        .nfkd()
        .filter(|c| c.is_ascii_alphabetic() || *c == '-')
        .collect()
}
