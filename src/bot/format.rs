// src/bot/format.rs

//! Reply formatting.
//!
//! One resolved code becomes plain message text; several become an embed
//! with one inline field per code. Confirmed-inactive entries lose their
//! link; everything else with a URL is rendered as a markdown link.

use crate::models::{Embed, Lookup, ResolvedModule};

/// Rendered reply, ready for the chat service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyContent {
    pub content: String,
    pub embeds: Vec<Embed>,
}

/// Render lookup results into reply content, appending the notice suffix.
pub fn render(lookups: &[Lookup], suffix: &str) -> ReplyContent {
    if lookups.len() == 1 {
        return ReplyContent {
            content: format!("{}{}", line(&lookups[0]), suffix),
            embeds: Vec::new(),
        };
    }

    let mut embed = Embed::default();
    for lookup in lookups {
        match lookup {
            Lookup::Found(module) => embed.add_field(module.code.as_str(), title_value(module)),
            Lookup::NotFound(code) => embed.add_field(code.as_str(), "not found"),
        }
    }

    ReplyContent {
        content: suffix.trim_start().to_string(),
        embeds: vec![embed],
    }
}

/// Single-result reply line: `CODE: title`, linked when possible.
fn line(lookup: &Lookup) -> String {
    match lookup {
        Lookup::Found(module) => format!("{}: {}", module.code, title_value(module)),
        Lookup::NotFound(code) => format!("{code}: not found"),
    }
}

fn title_value(module: &ResolvedModule) -> String {
    match &module.url {
        Some(url) if module.linkable() => format!("[{}](<{}>)", module.title, url),
        _ => module.title.clone(),
    }
}
