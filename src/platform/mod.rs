pub mod telegram;

use std::fmt;

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;

/// Where a reply goes: a numeric chat id or a public `@username`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ChatTarget {
    Id(i64),
    Username(String),
}

impl fmt::Display for ChatTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatTarget::Id(id) => write!(f, "{}", id),
            ChatTarget::Username(name) => write!(f, "{}", name),
        }
    }
}

/// Outbound side of the bot: anything able to deliver a text message to a chat.
#[async_trait]
pub trait Messenger: Send + Sync {
    async fn send_text(&self, chat: &ChatTarget, text: &str) -> Result<()>;
}
