// src/models/mod.rs

//! Domain models for the scraper.
//!
//! This module contains the data structures shared by the extraction,
//! lookup and rendering stages.

mod config;
mod publication;
mod selectors;

// Re-export all public types
pub use config::{Config, LookupConfig, MIN_LOOKUP_DELAY_MS, ProfileConfig, RenderConfig};
pub use publication::{Publication, PublicationCollection};
pub use selectors::ProfileSelectors;
