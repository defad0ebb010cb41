//! Chat-service boundary types.
//!
//! The bot core never opens the gateway connection itself; these are the
//! service-agnostic shapes exchanged with whatever adapter does.

use serde::{Deserialize, Serialize};

/// Channel identifier on the chat service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelId(pub u64);

/// Message identifier on the chat service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(pub u64);

/// An inbound message event, either newly created or an edit.
///
/// Creates and edits carry the same shape; the reply reconciler tells them
/// apart by whether `id` is already tracked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageEvent {
    pub id: MessageId,
    pub channel: ChannelId,
    pub content: String,
}

/// One field of a structured reply embed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// A structured reply embed, used when a message resolves several codes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Embed {
    pub fields: Vec<EmbedField>,
}

impl Embed {
    /// Append an inline field.
    pub fn add_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline: true,
        });
    }
}
