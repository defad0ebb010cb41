// src/services/liveness.rs

//! Link liveness checking.
//!
//! The course site redirects retired codes to a generic landing page, so a
//! 200 alone does not prove a link is good: the final redirected URL must
//! still contain the code. Transport failures are retried a bounded number
//! of times with a short delay, then treated as "not active".

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::Result;
use crate::models::{ActiveStatus, Code, CourseRecord, HttpConfig, ResolvedModule};

/// Final state of a redirect-following HEAD request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub status: u16,
    pub final_url: String,
}

/// Transport used for liveness probes. A trait so retry behavior can be
/// exercised without a network.
#[async_trait]
pub trait Probe: Send + Sync {
    async fn head(&self, url: &str) -> Result<ProbeOutcome>;
}

/// Production probe over reqwest, following redirects.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: Client,
}

impl HttpProbe {
    pub fn new(http: &HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&http.user_agent)
            .timeout(Duration::from_secs(http.timeout_secs))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Probe for HttpProbe {
    async fn head(&self, url: &str) -> Result<ProbeOutcome> {
        let response = self.client.head(url).send().await?;
        Ok(ProbeOutcome {
            status: response.status().as_u16(),
            final_url: response.url().to_string(),
        })
    }
}

/// Candidate course-site URLs for an entry that carries no link. Codes
/// shorter than 4 characters are qualifications and live under a different
/// path than modules.
pub fn candidate_urls(site: &str, code: &Code) -> Vec<String> {
    let code = code.lowercase();
    if code.len() < 4 {
        vec![format!("{site}/qualifications/{code}")]
    } else {
        vec![
            format!("{site}/qualifications/details/{code}"),
            format!("{site}/modules/{code}"),
        ]
    }
}

/// Checks whether catalog links are genuinely live.
pub struct LivenessChecker {
    probe: Box<dyn Probe>,
    site: String,
    retries: u32,
    delay: Duration,
}

impl LivenessChecker {
    /// Create a checker with the production HTTP probe.
    pub fn new(site: impl Into<String>, http: &HttpConfig, retries: u32, delay: Duration) -> Result<Self> {
        Ok(Self::with_probe(
            Box::new(HttpProbe::new(http)?),
            site,
            retries,
            delay,
        ))
    }

    /// Create a checker over an explicit probe, for tests.
    pub fn with_probe(
        probe: Box<dyn Probe>,
        site: impl Into<String>,
        retries: u32,
        delay: Duration,
    ) -> Self {
        Self {
            probe,
            site: site.into(),
            retries,
            delay,
        }
    }

    /// Check whether a URL is live for a code.
    ///
    /// `None` input means there is nothing to check and yields `None`.
    /// A reachable URL yields the verdict of the final response: status 200
    /// and the code appearing in the final redirected URL. Transport
    /// failures are retried up to `retries` times; exhaustion yields
    /// `Some(false)`.
    pub async fn check(&self, url: Option<&str>, code: &Code) -> Option<bool> {
        let url = url?;
        let needle = code.lowercase();
        let mut attempt = 0u32;
        loop {
            match self.probe.head(url).await {
                Ok(outcome) => {
                    let active =
                        outcome.status == 200 && outcome.final_url.to_lowercase().contains(&needle);
                    log::debug!(
                        "liveness {url} -> {active} ({}, {})",
                        outcome.final_url,
                        outcome.status
                    );
                    return Some(active);
                }
                Err(e) if attempt < self.retries => {
                    attempt += 1;
                    log::debug!("liveness {url} failed ({e}) - retrying ({attempt}/{})", self.retries);
                    tokio::time::sleep(self.delay).await;
                }
                Err(e) => {
                    log::warn!("liveness {url} failed after {attempt} retries: {e}");
                    return Some(false);
                }
            }
        }
    }

    /// Decorate a catalog record with link state.
    ///
    /// Records that already carry a URL are trusted as-is. Url-less records
    /// are double-checked against constructed course-site URLs, in case the
    /// catalog's idea of "retired" is stale; the first candidate that checks
    /// active becomes the link.
    pub async fn ensure_link(&self, record: CourseRecord) -> ResolvedModule {
        let CourseRecord { code, title, url } = record;

        if let Some(url) = url {
            return ResolvedModule {
                code,
                title,
                url: Some(url),
                status: ActiveStatus::Unknown,
            };
        }

        for candidate in candidate_urls(&self.site, &code) {
            if self.check(Some(&candidate), &code).await == Some(true) {
                return ResolvedModule {
                    code,
                    title,
                    url: Some(candidate),
                    status: ActiveStatus::Active,
                };
            }
        }

        ResolvedModule {
            code,
            title,
            url: None,
            status: ActiveStatus::Inactive,
        }
    }
}
