// src/services/extract.rs

//! Candidate-code extraction from message text.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::Code;

/// Inline mention pattern: `!` followed by 1-3 letters and 1-3 digits.
static MENTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"![a-zA-Z]{1,3}[0-9]{1,3}").expect("mention pattern"));

/// Codes extracted from one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Normalized candidate codes, deduplicated, in order of appearance
    pub codes: Vec<Code>,

    /// How many raw tokens/mentions the message carried, before validation.
    /// The anti-spam rule keys off this count, not off `codes`.
    pub requested: usize,
}

/// Extract codes from an explicit lookup command.
///
/// The first whitespace token (the command itself) is dropped; remaining
/// tokens are normalized and kept when alphanumeric and 4-6 characters long.
/// A message with exactly one token that fails validation still yields that
/// token, so a lone typo gets a "not found" reply instead of silence.
pub fn command_codes(content: &str, limit: usize) -> Extraction {
    let tokens: Vec<&str> = content.split_whitespace().skip(1).collect();
    let requested = tokens.len();

    let mut codes = dedup(
        tokens
            .iter()
            .map(|token| Code::new(token))
            .filter(Code::is_command_form),
        limit,
    );

    if codes.is_empty() && requested == 1 {
        codes.push(Code::new(tokens[0]));
    }

    Extraction { codes, requested }
}

/// Extract codes mentioned inline as `!CODE` anywhere in the text.
pub fn inline_codes(content: &str, limit: usize) -> Extraction {
    let mentions: Vec<Code> = MENTION_RE
        .find_iter(content)
        .map(|m| Code::new(m.as_str()))
        .collect();
    let requested = mentions.len();
    let codes = dedup(mentions.into_iter(), limit);

    Extraction { codes, requested }
}

fn dedup(codes: impl Iterator<Item = Code>, limit: usize) -> Vec<Code> {
    let mut seen = HashSet::new();
    codes
        .filter(|code| seen.insert(code.clone()))
        .take(limit)
        .collect()
}
