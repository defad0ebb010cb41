// src/config.rs

//! Startup loading utilities.
//!
//! Convenience functions for bringing up configuration and seed data, and
//! for resolving the chat-service credential.

use std::env;
use std::path::Path;

use crate::error::Result;
use crate::models::{Config, SeedCache};

/// Environment variable that overrides the configured chat token.
pub const TOKEN_ENV: &str = "OU_BOT_TOKEN";

/// Load and validate configuration, then the seed cache.
///
/// A missing or broken config file falls back to defaults with a warning;
/// a config that fails validation is fatal. A missing seed cache just means
/// every lookup starts at the network.
pub fn load_runtime(config_path: &Path, cache_path: &Path) -> Result<(Config, SeedCache)> {
    let config = Config::load_or_default(config_path);
    config.validate()?;

    let seed = SeedCache::load_or_default(cache_path);
    log::info!("seed cache loaded: {} entries", seed.len());

    Ok((config, seed))
}

/// Resolve the chat-service token: environment first, then config file.
pub fn resolve_token(config: &Config) -> Option<String> {
    env::var(TOKEN_ENV)
        .ok()
        .filter(|token| !token.is_empty())
        .or_else(|| config.bot.token.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_token_falls_back_to_config() {
        let mut config = Config::default();
        config.bot.token = Some("from-config".to_string());

        // the env var is absent in the test environment
        assert_eq!(resolve_token(&config), Some("from-config".to_string()));

        config.bot.token = None;
        assert_eq!(resolve_token(&config), None);
    }
}
