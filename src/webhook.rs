use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, error, info};

use crate::error::HandlerError;
use crate::platform::{ChatTarget, Messenger};
use crate::size::format_size;
use crate::update::{InboundUpdate, UpdateKind};

pub const WELCOME_TEXT: &str =
    "Welcome to Telegram Drive Bot! 📁\nUse the web app to manage your files.";

/// Body returned to Telegram for every webhook call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum WebhookReply {
    Ok,
    Error { message: String },
}

/// What a successfully handled update led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatched {
    Replied,
    Ignored,
}

/// Routes updates to replies. Holds no per-request state.
pub struct WebhookHandler {
    messenger: Arc<dyn Messenger>,
    send_timeout: Duration,
}

impl WebhookHandler {
    pub fn new(messenger: Arc<dyn Messenger>, send_timeout: Duration) -> Self {
        Self {
            messenger,
            send_timeout,
        }
    }

    /// Handle one raw webhook body. Never fails: faults become `WebhookReply::Error`.
    pub async fn handle(&self, body: &[u8]) -> WebhookReply {
        match self.dispatch(body).await {
            Ok(Dispatched::Replied) => WebhookReply::Ok,
            Ok(Dispatched::Ignored) => {
                debug!("Update ignored");
                WebhookReply::Ok
            }
            Err(e) => {
                error!("Error handling update: {}", e);
                WebhookReply::Error {
                    message: e.to_string(),
                }
            }
        }
    }

    pub async fn dispatch(&self, body: &[u8]) -> Result<Dispatched, HandlerError> {
        let Some(update) = InboundUpdate::from_slice(body)? else {
            return Ok(Dispatched::Ignored);
        };

        match update.kind {
            UpdateKind::DocumentUpload {
                file_name,
                file_size,
            } => {
                info!("Document from chat {}: {} ({} bytes)", update.chat, file_name, file_size);
                let text = format!("✅ File saved: {} ({})", file_name, format_size(file_size));
                self.reply(&update.chat, &text).await?;
                Ok(Dispatched::Replied)
            }
            UpdateKind::TextCommand(text) if text == "/start" => {
                info!("/start from chat {}", update.chat);
                self.reply(&update.chat, WELCOME_TEXT).await?;
                Ok(Dispatched::Replied)
            }
            UpdateKind::TextCommand(text) => {
                debug!("Unhandled text from chat {}: {}", update.chat, text);
                Ok(Dispatched::Ignored)
            }
            UpdateKind::Unrecognized => Ok(Dispatched::Ignored),
        }
    }

    async fn reply(&self, chat: &ChatTarget, text: &str) -> Result<(), HandlerError> {
        tokio::time::timeout(self.send_timeout, self.messenger.send_text(chat, text))
            .await
            .map_err(|_| HandlerError::SendTimeout(self.send_timeout))?
            .map_err(HandlerError::SendFailed)
    }
}
