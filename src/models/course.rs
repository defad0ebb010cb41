//! Catalog resolution results.

use serde::{Deserialize, Serialize};

use super::Code;

/// A catalog entry for a code, as returned by a single resolution layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRecord {
    /// The code the entry was resolved for
    pub code: Code,

    /// Course/module/qualification title
    pub title: String,

    /// Course-site URL, when the catalog carries one
    pub url: Option<String>,
}

/// Whether a catalog URL was confirmed live for its code.
///
/// Derived per lookup, never persisted. `Unknown` covers entries whose
/// catalog URL is taken at face value without a probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveStatus {
    Active,
    Inactive,
    Unknown,
}

/// A [`CourseRecord`] decorated with link state, ready for formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedModule {
    pub code: Code,
    pub title: String,
    pub url: Option<String>,
    pub status: ActiveStatus,
}

impl ResolvedModule {
    /// Whether the reply should render the title as a markdown link.
    pub fn linkable(&self) -> bool {
        self.url.is_some() && self.status != ActiveStatus::Inactive
    }
}

/// Outcome of looking up one code, found or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Found(ResolvedModule),
    NotFound(Code),
}

impl Lookup {
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }
}
