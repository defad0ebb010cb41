// src/services/archive.rs

//! Digital-archive page scraping, the resolver's last resort.
//!
//! The archive has no structured API; the module title is pulled out of the
//! page `<title>` with a fixed pattern. Titles are used as-is, entities and
//! all, matching what the page serves.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use reqwest::Client;

use crate::error::Result;
use crate::models::{Code, HttpConfig};

/// `<title>A123 Module title - Open University Digital Archive</title>`
static TITLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<title>[a-zA-Z]{1,3}[0-9]{1,3} (.*) - Open University Digital Archive</title>")
        .expect("archive title pattern")
});

/// Fetches archive module pages and extracts titles.
#[derive(Debug, Clone)]
pub struct ArchiveScraper {
    client: Client,
    base: String,
}

impl ArchiveScraper {
    /// Create a scraper rooted at the archive module base URL.
    pub fn new(base: impl Into<String>, http: &HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&http.user_agent)
            .timeout(Duration::from_secs(http.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base: base.into(),
        })
    }

    /// Archive page URL for a code.
    pub fn page_url(&self, code: &Code) -> String {
        format!("{}/xcri:{}", self.base, code)
    }

    /// Fetch the page for a code and extract its title, if the page knows
    /// the code at all.
    pub async fn module_title(&self, code: &Code) -> Result<Option<String>> {
        let html = self
            .client
            .get(self.page_url(code))
            .send()
            .await?
            .text()
            .await?;
        Ok(extract_title(&html))
    }
}

/// Apply the fixed title pattern to page text.
pub fn extract_title(html: &str) -> Option<String> {
    TITLE_RE
        .captures(html)
        .map(|captures| captures[1].to_string())
}
