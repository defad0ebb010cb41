//! Service layer for the bot application.
//!
//! This module contains the business logic for:
//! - Candidate-code extraction (`extract`)
//! - Structured catalog queries (`SparqlClient`)
//! - Digital-archive page scraping (`ArchiveScraper`)
//! - Layered code resolution (`CatalogResolver`)
//! - Link liveness checking (`LivenessChecker`)

mod archive;
mod catalog;
mod liveness;
mod sparql;

pub mod extract;

pub use archive::ArchiveScraper;
pub use catalog::{CatalogResolver, CatalogSource};
pub use liveness::{HttpProbe, LivenessChecker, Probe, ProbeOutcome, candidate_urls};
pub use sparql::SparqlClient;
