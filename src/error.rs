use thiserror::Error;

/// Faults raised while handling one webhook delivery.
///
/// None of these escape the HTTP layer; each is rendered into the
/// `{"status":"error"}` reply body.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("malformed update: {0}")]
    MalformedPayload(String),

    #[error("failed to send reply: {0:#}")]
    SendFailed(anyhow::Error),

    #[error("timed out sending reply after {0:?}")]
    SendTimeout(std::time::Duration),
}

impl From<serde_json::Error> for HandlerError {
    fn from(err: serde_json::Error) -> Self {
        HandlerError::MalformedPayload(err.to_string())
    }
}
