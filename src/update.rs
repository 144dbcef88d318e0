use serde::Deserialize;
use serde_json::Value;

use crate::error::HandlerError;
use crate::platform::ChatTarget;

/// What an incoming message asks of the bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateKind {
    DocumentUpload { file_name: String, file_size: u64 },
    TextCommand(String),
    Unrecognized,
}

/// One webhook delivery, reduced to the parts the bot acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundUpdate {
    pub chat: ChatTarget,
    pub kind: UpdateKind,
}

// Loose mirror of the Bot API `Message` object. Only the fields we read.
#[derive(Debug, Deserialize)]
struct RawMessage {
    chat: Option<RawChat>,
    document: Option<RawDocument>,
    text: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RawChat {
    id: Option<ChatTarget>,
}

#[derive(Debug, Deserialize)]
struct RawDocument {
    file_name: String,
    file_size: u64,
}

impl InboundUpdate {
    /// Parse a raw webhook body.
    ///
    /// Returns `Ok(None)` for updates without a `message` (edits, channel
    /// posts, callback queries and so on), which the bot does not handle.
    pub fn from_slice(body: &[u8]) -> Result<Option<Self>, HandlerError> {
        let update: Value = serde_json::from_slice(body)?;
        let Some(message) = update.get("message") else {
            return Ok(None);
        };

        let message = RawMessage::deserialize(message)
            .map_err(|e| HandlerError::MalformedPayload(format!("message: {}", e)))?;

        let chat = message
            .chat
            .and_then(|c| c.id)
            .ok_or_else(|| HandlerError::MalformedPayload("missing field `message.chat.id`".into()))?;

        let kind = if let Some(doc) = message.document {
            UpdateKind::DocumentUpload {
                file_name: doc.file_name,
                file_size: doc.file_size,
            }
        } else {
            match message.text {
                Some(Value::String(text)) => UpdateKind::TextCommand(text),
                _ => UpdateKind::Unrecognized,
            }
        };

        Ok(Some(Self { chat, kind }))
    }
}
