//! Seed cache of known codes.
//!
//! A static JSON file mapping codes to `[title, url-or-null]` pairs, loaded
//! once at startup and read-only afterwards. Entries with a URL are curated
//! as active; entries with `null` get their link re-checked at lookup time.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::models::{Code, CourseRecord};

/// Raw file shape: `{"A123": ["Title", "url-or-null"], ...}`.
type SeedEntries = HashMap<String, (String, Option<String>)>;

/// In-memory seed cache with case-insensitive exact-match lookup.
#[derive(Debug, Clone, Default)]
pub struct SeedCache {
    entries: SeedEntries,
}

impl SeedCache {
    /// Load the seed cache from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Load the seed cache or start empty if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Seed cache load failed from {:?}: {}. Starting empty.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Parse seed entries from a JSON string. Keys are normalized to
    /// uppercase so lookups are case-insensitive.
    pub fn parse(content: &str) -> Result<Self> {
        let raw: SeedEntries = serde_json::from_str(content)?;
        let entries = raw
            .into_iter()
            .map(|(code, entry)| (code.to_uppercase(), entry))
            .collect();
        Ok(Self { entries })
    }

    /// Build a cache directly from entries, for tests.
    pub fn from_entries(entries: impl IntoIterator<Item = (String, (String, Option<String>))>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(code, entry)| (code.to_uppercase(), entry))
                .collect(),
        }
    }

    /// Exact-match lookup.
    pub fn get(&self, code: &Code) -> Option<CourseRecord> {
        self.entries.get(code.as_str()).map(|(title, url)| CourseRecord {
            code: code.clone(),
            title: title.clone(),
            url: url.clone(),
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const SAMPLE: &str = r#"{
        "A123": ["Mocked active module", "fake_url1"],
        "b321": ["Mocked inactive module", null]
    }"#;

    #[test]
    fn test_parse_with_null_url() {
        let cache = SeedCache::parse(SAMPLE).unwrap();
        assert_eq!(cache.len(), 2);

        let record = cache.get(&Code::new("B321")).unwrap();
        assert_eq!(record.title, "Mocked inactive module");
        assert_eq!(record.url, None);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let cache = SeedCache::parse(SAMPLE).unwrap();
        // key stored lowercase in the file, looked up via normalized code
        assert!(cache.get(&Code::new("b321")).is_some());
        assert!(cache.get(&Code::new("!a123")).is_some());
        assert!(cache.get(&Code::new("Z999")).is_none());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let cache = SeedCache::load(file.path()).unwrap();
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_load_or_default_on_missing_file() {
        let cache = SeedCache::load_or_default("/nonexistent/cache.json");
        assert!(cache.is_empty());
    }
}
