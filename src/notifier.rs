use serde::Serialize;

use crate::config::Config;

#[derive(Debug, Serialize)]
struct Notification {
    recipient: String,
    subject: String,
    body: String,
}

/// Fire-and-forget delivery to the configured webhook. Nothing in the
/// request path waits on it; if the webhook is down we log and move on.
pub fn send_notification(config: &Config, recipient: &str, subject: &str, body: &str) {
    let Some(url) = config.notify_webhook_url.clone() else {
        tracing::debug!("no webhook configured, dropping notification to {recipient}");
        return;
    };

    let payload = Notification {
        recipient: recipient.to_string(),
        subject: subject.to_string(),
        body: body.to_string(),
    };

    tokio::spawn(async move {
        let client = reqwest::Client::new();
        match client.post(&url).json(&payload).send().await {
            Ok(response) if response.status().is_success() => {
                tracing::debug!("notification delivered to {}", payload.recipient);
            }
            Ok(response) => {
                tracing::warn!(
                    "notification webhook returned {} for {}",
                    response.status(),
                    payload.recipient
                );
            }
            Err(err) => {
                tracing::warn!("notification delivery failed: {err}");
            }
        }
    });
}
