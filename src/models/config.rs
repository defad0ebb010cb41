//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP client behavior settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Catalog endpoint locations
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Bot behavior settings
    #[serde(default)]
    pub bot: BotConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::validation("http.user_agent is empty"));
        }
        if self.http.timeout_secs == 0 {
            return Err(AppError::validation("http.timeout_secs must be > 0"));
        }
        Url::parse(&self.catalog.sparql_endpoint)?;
        Url::parse(&self.catalog.archive_base)?;
        Url::parse(&self.catalog.courses_site)?;
        if self.bot.command_name.is_empty()
            || !self.bot.command_name.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return Err(AppError::validation(
                "bot.command_name must be a plain alphanumeric word",
            ));
        }
        if self.bot.max_modules == 0 {
            return Err(AppError::validation("bot.max_modules must be > 0"));
        }
        if self.bot.reply_cache_size == 0 {
            return Err(AppError::validation("bot.reply_cache_size must be > 0"));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
            catalog: CatalogConfig::default(),
            bot: BotConfig::default(),
        }
    }
}

/// HTTP client behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Locations of the external catalog endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// SPARQL query endpoint
    #[serde(default = "defaults::sparql_endpoint")]
    pub sparql_endpoint: String,

    /// Digital-archive module page base; `/xcri:{CODE}` is appended
    #[serde(default = "defaults::archive_base")]
    pub archive_base: String,

    /// Course-site base used to reconstruct links for url-less entries
    #[serde(default = "defaults::courses_site")]
    pub courses_site: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            sparql_endpoint: defaults::sparql_endpoint(),
            archive_base: defaults::archive_base(),
            courses_site: defaults::courses_site(),
        }
    }
}

/// Bot behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    /// Lookup command name; messages starting with `!<command_name>` take
    /// the command path
    #[serde(default = "defaults::command_name")]
    pub command_name: String,

    /// Maximum number of codes answered per message
    #[serde(default = "defaults::max_modules")]
    pub max_modules: usize,

    /// Capacity of the reply-reconciliation cache
    #[serde(default = "defaults::reply_cache_size")]
    pub reply_cache_size: usize,

    /// Liveness-probe retry count on transport failure
    #[serde(default = "defaults::liveness_retries")]
    pub liveness_retries: u32,

    /// Delay between liveness-probe attempts in milliseconds
    #[serde(default = "defaults::retry_delay")]
    pub retry_delay_ms: u64,

    /// Notice appended to every reply
    #[serde(default = "defaults::reply_suffix")]
    pub reply_suffix: String,

    /// Chat-service token; the `OU_BOT_TOKEN` env var takes precedence
    #[serde(default)]
    pub token: Option<String>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            command_name: defaults::command_name(),
            max_modules: defaults::max_modules(),
            reply_cache_size: defaults::reply_cache_size(),
            liveness_retries: defaults::liveness_retries(),
            retry_delay_ms: defaults::retry_delay(),
            reply_suffix: defaults::reply_suffix(),
            token: None,
        }
    }
}

mod defaults {
    pub fn user_agent() -> String {
        format!("oubot/{}", env!("CARGO_PKG_VERSION"))
    }

    pub fn timeout() -> u64 {
        3
    }

    pub fn sparql_endpoint() -> String {
        "http://data.open.ac.uk/sparql".to_string()
    }

    pub fn archive_base() -> String {
        "http://www.open.ac.uk/library/digital-archive/module".to_string()
    }

    pub fn courses_site() -> String {
        "http://www.open.ac.uk/courses".to_string()
    }

    pub fn command_name() -> String {
        "modulename".to_string()
    }

    pub fn max_modules() -> usize {
        5
    }

    pub fn reply_cache_size() -> usize {
        1000
    }

    pub fn liveness_retries() -> u32 {
        2
    }

    pub fn retry_delay() -> u64 {
        100
    }

    pub fn reply_suffix() -> String {
        "\nNote: !codes are being retired. Please use /oulookup, or skip ! \
         and right-click/long-touch a message → Apps → OU Lookup."
            .to_string()
    }
}
