// src/models/selectors.rs

//! CSS selectors for scraping a citation profile page.

use serde::{Deserialize, Serialize};

/// CSS selectors for scraping a citation profile page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProfileSelectors {
    /// Selector for each publication row
    #[serde(default = "defaults::row")]
    pub row_selector: String,

    /// Selector for the title anchor within a row
    #[serde(default = "defaults::title")]
    pub title_selector: String,

    /// Selector for the gray detail lines within a row (authors, then venue)
    #[serde(default = "defaults::details")]
    pub details_selector: String,

    /// Selector for the citation count anchor within a row
    #[serde(default = "defaults::citations")]
    pub citations_selector: String,

    /// HTML attribute name for extracting links (usually "href")
    #[serde(default = "defaults::attr_name")]
    pub attr_name: String,
}

impl Default for ProfileSelectors {
    fn default() -> Self {
        Self {
            row_selector: defaults::row(),
            title_selector: defaults::title(),
            details_selector: defaults::details(),
            citations_selector: defaults::citations(),
            attr_name: defaults::attr_name(),
        }
    }
}

mod defaults {
    pub fn row() -> String {
        "tr.gsc_a_tr".to_string()
    }
    pub fn title() -> String {
        "a.gsc_a_at".to_string()
    }
    pub fn details() -> String {
        "td.gsc_a_t > div.gs_gray".to_string()
    }
    pub fn citations() -> String {
        "a.gsc_a_ac".to_string()
    }
    pub fn attr_name() -> String {
        "href".to_string()
    }
}
