// src/bot/console.rs

//! Local console session, a gateway stand-in.
//!
//! Each stdin line is fed through the bot as a message event; replies and
//! edits are printed instead of sent. `/edit N TEXT` re-submits line N with
//! new content, which exercises reply reconciliation end to end.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::bot::{ChatService, ModulesBot};
use crate::error::Result;
use crate::models::{ChannelId, Embed, MessageEvent, MessageId};

/// Reply message ids start here so they never collide with line numbers.
const REPLY_ID_BASE: u64 = 1_000_000;

/// Chat service that prints to stdout.
pub struct ConsoleChat {
    next_id: AtomicU64,
}

impl ConsoleChat {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(REPLY_ID_BASE),
        }
    }

    fn print_embeds(embeds: &[Embed]) {
        for embed in embeds {
            for field in &embed.fields {
                println!("    {}: {}", field.name, field.value);
            }
        }
    }
}

impl Default for ConsoleChat {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatService for ConsoleChat {
    async fn reply(
        &self,
        _channel: ChannelId,
        to: MessageId,
        content: &str,
        embeds: &[Embed],
    ) -> Result<MessageId> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        println!("[reply to line {}] {}", to.0, content);
        Self::print_embeds(embeds);
        Ok(MessageId(id))
    }

    async fn edit(
        &self,
        _channel: ChannelId,
        _message: MessageId,
        content: &str,
        embeds: &[Embed],
    ) -> Result<()> {
        println!("[edited reply] {content}");
        Self::print_embeds(embeds);
        Ok(())
    }
}

/// Run an interactive console session until EOF or `/quit`.
pub async fn run(mut bot: ModulesBot<ConsoleChat>) -> Result<()> {
    println!("oubot console - every line is a chat message.");
    println!("  /edit N TEXT   resubmit line N with new text");
    println!("  /quit          exit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut line_no = 0u64;

    while let Some(line) = lines.next_line().await? {
        let line = line.trim().to_string();
        if line == "/quit" {
            break;
        }

        if let Some(rest) = line.strip_prefix("/edit ") {
            match rest.split_once(' ') {
                Some((n, text)) => match n.parse::<u64>() {
                    Ok(id) => {
                        let event = MessageEvent {
                            id: MessageId(id),
                            channel: ChannelId(0),
                            content: text.to_string(),
                        };
                        bot.on_message_update(&event).await?;
                    }
                    Err(_) => println!("usage: /edit N TEXT"),
                },
                None => println!("usage: /edit N TEXT"),
            }
            continue;
        }

        line_no += 1;
        let event = MessageEvent {
            id: MessageId(line_no),
            channel: ChannelId(0),
            content: line,
        };
        bot.on_message_create(&event).await?;
    }

    Ok(())
}
