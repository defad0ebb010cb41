// src/bot/mod.rs

//! Bot orchestration.
//!
//! Wires inbound chat events through extraction, resolution, liveness
//! decoration and formatting, then reconciles the outcome with any reply
//! the bot already posted for the same message. The gateway connection is
//! someone else's job; everything outbound goes through [`ChatService`].

pub mod console;
pub mod format;

mod replies;

pub use format::ReplyContent;
pub use replies::{ReplyRecord, ReplyTracker};

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{ChannelId, Code, Config, Embed, Lookup, MessageEvent, MessageId, SeedCache};
use crate::services::{CatalogResolver, LivenessChecker, extract};

/// Outbound chat operations the bot needs.
#[async_trait]
pub trait ChatService: Send + Sync {
    /// Post a reply to a message, returning the new message's id.
    async fn reply(
        &self,
        channel: ChannelId,
        to: MessageId,
        content: &str,
        embeds: &[Embed],
    ) -> Result<MessageId>;

    /// Edit a previously posted message in place.
    async fn edit(
        &self,
        channel: ChannelId,
        message: MessageId,
        content: &str,
        embeds: &[Embed],
    ) -> Result<()>;
}

/// The module-lookup bot.
///
/// Processes one event at a time; nothing here is shared across tasks, so
/// the reply tracker needs no locking.
pub struct ModulesBot<C: ChatService> {
    chat: C,
    resolver: CatalogResolver,
    liveness: LivenessChecker,
    replies: ReplyTracker,
    command_prefix: String,
    max_modules: usize,
    suffix: String,
}

impl<C: ChatService> ModulesBot<C> {
    /// Build a bot from configuration and a loaded seed cache.
    pub fn new(config: &Config, seed: SeedCache, chat: C) -> Result<Self> {
        let resolver = CatalogResolver::new(config, seed)?;
        let liveness = LivenessChecker::new(
            &config.catalog.courses_site,
            &config.http,
            config.bot.liveness_retries,
            Duration::from_millis(config.bot.retry_delay_ms),
        )?;
        Ok(Self::from_parts(config, resolver, liveness, chat))
    }

    /// Build a bot from explicit parts, for tests.
    pub fn from_parts(
        config: &Config,
        resolver: CatalogResolver,
        liveness: LivenessChecker,
        chat: C,
    ) -> Self {
        Self {
            chat,
            resolver,
            liveness,
            replies: ReplyTracker::new(config.bot.reply_cache_size),
            command_prefix: format!("!{}", config.bot.command_name),
            max_modules: config.bot.max_modules,
            suffix: config.bot.reply_suffix.clone(),
        }
    }

    /// Handle a newly created message.
    pub async fn on_message_create(&mut self, event: &MessageEvent) -> Result<()> {
        self.handle(event).await
    }

    /// Handle an edit of an existing message.
    pub async fn on_message_update(&mut self, event: &MessageEvent) -> Result<()> {
        self.handle(event).await
    }

    async fn handle(&mut self, event: &MessageEvent) -> Result<()> {
        if event.content.trim().is_empty() {
            return Ok(());
        }

        let is_command = event.content.starts_with(&self.command_prefix);
        let extraction = if is_command {
            extract::command_codes(&event.content, self.max_modules)
        } else {
            extract::inline_codes(&event.content, self.max_modules)
        };
        if extraction.codes.is_empty() {
            return Ok(());
        }

        let mut lookups = Vec::with_capacity(extraction.codes.len());
        for code in extraction.codes {
            lookups.push(self.lookup(code).await);
        }

        let any_found = lookups.iter().any(Lookup::is_found);
        // Anti-spam: a reply goes out when something resolved, or when the
        // command asked about exactly one code and it did not.
        if !any_found && !(is_command && extraction.requested == 1) {
            return Ok(());
        }
        if any_found {
            lookups.retain(Lookup::is_found);
        }

        let reply = format::render(&lookups, &self.suffix);
        self.post(event, &reply).await
    }

    /// Resolve one code and decorate it with link state.
    async fn lookup(&self, code: Code) -> Lookup {
        match self.resolver.resolve(&code).await {
            Some(record) => Lookup::Found(self.liveness.ensure_link(record).await),
            None => Lookup::NotFound(code),
        }
    }

    /// Post a new reply, or edit the one already tracked for this message.
    async fn post(&mut self, event: &MessageEvent, reply: &ReplyContent) -> Result<()> {
        if let Some(record) = self.replies.get(event.id) {
            return self
                .chat
                .edit(record.channel, record.reply, &reply.content, &reply.embeds)
                .await;
        }

        let posted = self
            .chat
            .reply(event.channel, event.id, &reply.content, &reply.embeds)
            .await?;
        self.replies.insert(
            event.id,
            ReplyRecord {
                channel: event.channel,
                reply: posted,
            },
        );
        Ok(())
    }
}
