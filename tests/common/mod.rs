//! Shared test doubles: a scripted liveness transport, a recording chat
//! service, and a fixed catalog source.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use oubot::bot::ChatService;
use oubot::error::Result;
use oubot::models::{ChannelId, Code, CourseRecord, Embed, MessageId, SeedCache};
use oubot::services::{CatalogSource, Probe, ProbeOutcome};

/// Simulated connection-level failure.
pub fn transport_err<T>() -> Result<T> {
    Err(std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused").into())
}

pub fn probe_ok(status: u16, final_url: &str) -> Result<ProbeOutcome> {
    Ok(ProbeOutcome {
        status,
        final_url: final_url.to_string(),
    })
}

/// Liveness transport that pops scripted outcomes and records probed URLs.
/// An exhausted script behaves like a dead network.
pub struct ScriptProbe {
    outcomes: Mutex<VecDeque<Result<ProbeOutcome>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl ScriptProbe {
    pub fn new(outcomes: Vec<Result<ProbeOutcome>>) -> (Box<Self>, Arc<Mutex<Vec<String>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let probe = Box::new(Self {
            outcomes: Mutex::new(outcomes.into()),
            calls: Arc::clone(&calls),
        });
        (probe, calls)
    }
}

#[async_trait]
impl Probe for ScriptProbe {
    async fn head(&self, url: &str) -> Result<ProbeOutcome> {
        self.calls.lock().unwrap().push(url.to_string());
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(transport_err)
    }
}

/// One recorded outbound chat operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCall {
    Reply {
        channel: ChannelId,
        to: MessageId,
        content: String,
        embeds: Vec<Embed>,
        posted: MessageId,
    },
    Edit {
        channel: ChannelId,
        message: MessageId,
        content: String,
        embeds: Vec<Embed>,
    },
}

/// Chat service that records calls and hands out sequential reply ids.
pub struct RecordingChat {
    calls: Arc<Mutex<Vec<ChatCall>>>,
    next_id: AtomicU64,
}

impl RecordingChat {
    pub fn new() -> (Self, Arc<Mutex<Vec<ChatCall>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let chat = Self {
            calls: Arc::clone(&calls),
            next_id: AtomicU64::new(9000),
        };
        (chat, calls)
    }
}

#[async_trait]
impl ChatService for RecordingChat {
    async fn reply(
        &self,
        channel: ChannelId,
        to: MessageId,
        content: &str,
        embeds: &[Embed],
    ) -> Result<MessageId> {
        let posted = MessageId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.calls.lock().unwrap().push(ChatCall::Reply {
            channel,
            to,
            content: content.to_string(),
            embeds: embeds.to_vec(),
            posted,
        });
        Ok(posted)
    }

    async fn edit(
        &self,
        channel: ChannelId,
        message: MessageId,
        content: &str,
        embeds: &[Embed],
    ) -> Result<()> {
        self.calls.lock().unwrap().push(ChatCall::Edit {
            channel,
            message,
            content: content.to_string(),
            embeds: embeds.to_vec(),
        });
        Ok(())
    }
}

/// Catalog source backed by a fixed seed cache, no network.
pub struct FixedSource(pub SeedCache);

#[async_trait]
impl CatalogSource for FixedSource {
    fn name(&self) -> &'static str {
        "fixed"
    }

    async fn try_resolve(&self, code: &Code) -> Option<CourseRecord> {
        self.0.get(code)
    }
}
