// src/models/mod.rs

//! Domain models for the bot application.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod chat;
mod code;
mod config;
mod course;
mod seed;

// Re-export all public types
pub use chat::{ChannelId, Embed, EmbedField, MessageEvent, MessageId};
pub use code::Code;
pub use config::{BotConfig, CatalogConfig, Config, HttpConfig};
pub use course::{ActiveStatus, CourseRecord, Lookup, ResolvedModule};
pub use seed::SeedCache;
