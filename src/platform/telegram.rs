use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::Recipient;
use tracing::{debug, info};

use super::{ChatTarget, Messenger};

impl From<&ChatTarget> for Recipient {
    fn from(target: &ChatTarget) -> Self {
        match target {
            ChatTarget::Id(id) => Recipient::Id(ChatId(*id)),
            ChatTarget::Username(name) => Recipient::ChannelUsername(name.clone()),
        }
    }
}

/// Telegram Bot API client used for replies.
pub struct TelegramMessenger {
    bot: Bot,
}

impl TelegramMessenger {
    /// Build a bot whose HTTP client gives up after `timeout`.
    pub fn new(token: &str, timeout: Duration) -> Result<Self> {
        let client = teloxide::net::default_reqwest_settings()
            .timeout(timeout)
            .build()
            .context("Failed to build Telegram HTTP client")?;
        Ok(Self {
            bot: Bot::with_client(token, client),
        })
    }

    /// Point Telegram's update delivery at `url` (setWebhook).
    pub async fn register_webhook(&self, url: &str) -> Result<()> {
        let url = reqwest::Url::parse(url)
            .with_context(|| format!("Invalid webhook URL: {}", url))?;

        info!("Registering webhook with Telegram: {}", url);
        self.bot
            .set_webhook(url)
            .await
            .context("Failed to register webhook with Telegram")?;
        Ok(())
    }
}

#[async_trait]
impl Messenger for TelegramMessenger {
    async fn send_text(&self, chat: &ChatTarget, text: &str) -> Result<()> {
        debug!("Sending message to chat {}", chat);
        self.bot
            .send_message(Recipient::from(chat), text)
            .await
            .with_context(|| format!("Failed to send message to chat {}", chat))?;
        Ok(())
    }
}
