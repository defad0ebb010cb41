//! Module/qualification code identifier.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A course, module or qualification code such as `A123` or `B31`.
///
/// Codes are normalized to uppercase with any `!` prefix removed at
/// construction, so the same spelling is used for cache keys, catalog
/// filters and reply text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Code(String);

impl Code {
    /// Normalize a raw token into a code.
    pub fn new(raw: &str) -> Self {
        Self(raw.replace('!', "").to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Lowercase spelling, used for constructed course-site URLs.
    pub fn lowercase(&self) -> String {
        self.0.to_lowercase()
    }

    /// Whether the code is acceptable in command mode: alphanumeric and
    /// 4 to 6 characters long.
    pub fn is_command_form(&self) -> bool {
        (4..=6).contains(&self.0.len()) && self.0.chars().all(|c| c.is_ascii_alphanumeric())
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_case_and_bang() {
        assert_eq!(Code::new("!a123").as_str(), "A123");
        assert_eq!(Code::new("tm351").as_str(), "TM351");
    }

    #[test]
    fn test_command_form() {
        assert!(Code::new("A123").is_command_form());
        assert!(Code::new("SDK228").is_command_form());
        assert!(!Code::new("B31").is_command_form()); // too short
        assert!(!Code::new("ABCD123").is_command_form()); // too long
        assert!(!Code::new("A1-3").is_command_form()); // not alphanumeric
    }
}
