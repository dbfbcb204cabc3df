//! Pipeline entry points.
//!
//! - `run_scrape`: Fetch the profile page and build the publication collection
//! - `render_output`: Render a collection as configured

pub mod scrape;

pub use scrape::{build_collection, enrich, render_output, run_scrape};
