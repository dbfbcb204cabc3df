//! Service layer for the scraper.
//!
//! This module contains the business logic for:
//! - Publication extraction (`PublicationExtractor`)
//! - Venue splitting (`split_venue`)
//! - Identifier lookup (`IdentifierResolver`)

pub mod doi;
mod profile;
pub mod venue;

pub use doi::{CrossRefOpenUrl, DoiSource, IdentifierResolver, LookupOutcome, Pacer};
pub use profile::PublicationExtractor;
pub use venue::{Venue, split_venue};
