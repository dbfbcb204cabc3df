// src/lib.rs

//! Citation profile scraper library.
//!
//! Scrapes a public citation profile page into a list of publications,
//! optionally looks up a DOI for each one, and renders the result as an
//! HTML list or JSON.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod render;
pub mod services;
pub mod utils;
