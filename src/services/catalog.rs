// src/services/catalog.rs

//! Layered code resolution.
//!
//! A code is tried against an ordered list of catalog sources, cheapest
//! first, short-circuiting on the first hit: seed cache, current courses
//! and qualifications, retired course codes, and finally the archive page
//! scrape. Sources degrade transport and parse failures to a miss; a lookup
//! never fails, it only comes back empty.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Code, Config, CourseRecord, SeedCache};
use crate::services::archive::ArchiveScraper;
use crate::services::sparql::{
    self, Binding, COURSES_QUERY, OLDCOURSES_QUERY, QUALIFICATIONS_QUERY, SparqlClient,
};

/// One layer of the resolution chain.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Layer name, for logs.
    fn name(&self) -> &'static str;

    /// Resolve a code, or report a miss. Failures are logged inside the
    /// layer and surface as a miss.
    async fn try_resolve(&self, code: &Code) -> Option<CourseRecord>;
}

/// Static seed cache lookup.
struct SeedSource {
    cache: SeedCache,
}

#[async_trait]
impl CatalogSource for SeedSource {
    fn name(&self) -> &'static str {
        "seed-cache"
    }

    async fn try_resolve(&self, code: &Code) -> Option<CourseRecord> {
        self.cache.get(code)
    }
}

/// Current courses and qualifications from the structured catalog.
/// Courses are tried first; the qualification query only runs on a miss.
struct XcriSource {
    sparql: SparqlClient,
}

#[async_trait]
impl CatalogSource for XcriSource {
    fn name(&self) -> &'static str {
        "xcri"
    }

    async fn try_resolve(&self, code: &Code) -> Option<CourseRecord> {
        for template in [COURSES_QUERY, QUALIFICATIONS_QUERY] {
            if let Some(record) = query_one(&self.sparql, template, code).await {
                return Some(record);
            }
        }
        None
    }
}

/// Retired course codes. These entries never carry a URL.
struct OldCoursesSource {
    sparql: SparqlClient,
}

#[async_trait]
impl CatalogSource for OldCoursesSource {
    fn name(&self) -> &'static str {
        "oldcourses"
    }

    async fn try_resolve(&self, code: &Code) -> Option<CourseRecord> {
        query_one(&self.sparql, OLDCOURSES_QUERY, code).await
    }
}

/// Archive page scrape, last resort.
struct ArchiveSource {
    scraper: ArchiveScraper,
}

#[async_trait]
impl CatalogSource for ArchiveSource {
    fn name(&self) -> &'static str {
        "archive"
    }

    async fn try_resolve(&self, code: &Code) -> Option<CourseRecord> {
        match self.scraper.module_title(code).await {
            Ok(Some(title)) => Some(CourseRecord {
                code: code.clone(),
                title,
                url: None,
            }),
            Ok(None) => None,
            Err(e) => {
                log::warn!("archive fetch failed for {code}: {e}");
                None
            }
        }
    }
}

/// Run one exact-match query, window 0..1, and map the first binding.
async fn query_one(sparql: &SparqlClient, template: &str, code: &Code) -> Option<CourseRecord> {
    let query = sparql::with_code_filter(template, code);
    match sparql.query(&query, 0, 1).await {
        Ok(bindings) => bindings
            .into_iter()
            .next()
            .and_then(|binding| record_from_binding(code, binding)),
        Err(e) => {
            log::warn!("catalog query failed for {code}: {e}");
            None
        }
    }
}

fn record_from_binding(code: &Code, mut binding: Binding) -> Option<CourseRecord> {
    let title = binding.remove("title")?;
    Some(CourseRecord {
        code: code.clone(),
        title,
        url: binding.remove("url"),
    })
}

/// Ordered resolution chain over catalog sources.
pub struct CatalogResolver {
    sources: Vec<Box<dyn CatalogSource>>,
}

impl CatalogResolver {
    /// Build the standard chain from configuration and a loaded seed cache.
    pub fn new(config: &Config, seed: SeedCache) -> Result<Self> {
        let sparql = SparqlClient::new(&config.catalog.sparql_endpoint, &config.http)?;
        let scraper = ArchiveScraper::new(&config.catalog.archive_base, &config.http)?;

        Ok(Self::from_sources(vec![
            Box::new(SeedSource { cache: seed }),
            Box::new(XcriSource {
                sparql: sparql.clone(),
            }),
            Box::new(OldCoursesSource { sparql }),
            Box::new(ArchiveSource { scraper }),
        ]))
    }

    /// Build a resolver over an explicit source chain.
    pub fn from_sources(sources: Vec<Box<dyn CatalogSource>>) -> Self {
        Self { sources }
    }

    /// Resolve a code through the chain, first hit wins.
    pub async fn resolve(&self, code: &Code) -> Option<CourseRecord> {
        for source in &self.sources {
            log::debug!("querying {code} from {}", source.name());
            if let Some(record) = source.try_resolve(code).await {
                log::info!("{code} resolved by {}: {}", source.name(), record.title);
                return Some(record);
            }
        }
        log::info!("{code} not found in any catalog");
        None
    }
}
