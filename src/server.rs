use std::future::Future;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    body::Bytes,
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::webhook::{WebhookHandler, WebhookReply};

pub const LIVENESS_TEXT: &str = "Telegram Drive Bot is running!";

pub fn router(handler: Arc<WebhookHandler>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/webhook", post(webhook))
        .layer(TraceLayer::new_for_http())
        .with_state(handler)
}

async fn home() -> &'static str {
    LIVENESS_TEXT
}

// Raw bytes rather than `Json<_>`: a bad body must still get a 200 with an
// error reply, not an extractor rejection.
async fn webhook(State(handler): State<Arc<WebhookHandler>>, body: Bytes) -> Json<WebhookReply> {
    Json(handler.handle(&body).await)
}

/// Serve `app` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr().context("Listener has no local address")?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Request, StatusCode};
    use serde_json::json;
    use std::time::Duration;
    use tower::ServiceExt;

    use crate::platform::ChatTarget;
    use crate::webhook::tests::RecordingMessenger;
    use crate::webhook::WELCOME_TEXT;

    fn app(messenger: Arc<RecordingMessenger>) -> Router {
        router(Arc::new(WebhookHandler::new(messenger, Duration::from_secs(5))))
    }

    async fn post_webhook(app: Router, body: impl Into<axum::body::Body>) -> (StatusCode, serde_json::Value) {
        let req = Request::builder()
            .method("POST")
            .uri("/webhook")
            .header("content-type", "application/json")
            .body(body.into())
            .unwrap();

        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), 4096).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_liveness() {
        let app = app(Arc::new(RecordingMessenger::default()));
        let req = Request::builder()
            .uri("/")
            .body(axum::body::Body::empty())
            .unwrap();

        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = axum::body::to_bytes(resp.into_body(), 4096).await.unwrap();
        assert_eq!(&body[..], LIVENESS_TEXT.as_bytes());
    }

    #[tokio::test]
    async fn test_start_command_over_http() {
        let messenger = Arc::new(RecordingMessenger::default());
        let body = json!({"update_id": 1, "message": {"chat": {"id": 77}, "text": "/start"}});

        let (status, json) = post_webhook(app(messenger.clone()), body.to_string()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, json!({"status": "ok"}));
        let sent = messenger.sent.lock().await;
        assert_eq!(sent.as_slice(), &[(ChatTarget::Id(77), WELCOME_TEXT.to_string())]);
    }

    #[tokio::test]
    async fn test_invalid_body_still_returns_200() {
        let messenger = Arc::new(RecordingMessenger::default());

        let (status, json) = post_webhook(app(messenger.clone()), "{not json").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "error");
        assert!(json["message"].as_str().unwrap().starts_with("malformed update"));
        assert!(messenger.sent.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_send_failure_returns_200_with_error() {
        let messenger = Arc::new(RecordingMessenger {
            fail: true,
            ..Default::default()
        });
        let body = json!({"message": {"chat": {"id": 1}, "document": {"file_name": "a.zip", "file_size": 10}}});

        let (status, json) = post_webhook(app(messenger), body.to_string()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "error");
        assert!(json["message"].as_str().unwrap().contains("failed to send reply"));
    }

    #[tokio::test]
    async fn test_get_webhook_is_not_allowed() {
        let app = app(Arc::new(RecordingMessenger::default()));
        let req = Request::builder()
            .uri("/webhook")
            .body(axum::body::Body::empty())
            .unwrap();

        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
