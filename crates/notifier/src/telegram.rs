use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use review_common::error::AppError;

use crate::Messenger;

/// Telegram Bot API client limited to `sendMessage`.
pub struct TelegramNotifier {
    client: Client,
    api_url: String,
    token: String,
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

/// Envelope every Bot API method answers with.
#[derive(Debug, Deserialize)]
struct BotApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

impl TelegramNotifier {
    pub fn new(
        api_url: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("failed to build Telegram client: {e}")))?;

        Ok(Self {
            client,
            api_url: api_url.into(),
            token: token.into(),
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_url.trim_end_matches('/'), self.token, method)
    }

    /// Turn a Bot API reply into a result. A non-2xx status or `"ok": false`
    /// both count as a failed delivery.
    fn check_reply(status: u16, body: &str) -> Result<(), AppError> {
        let reply: Option<BotApiResponse> = serde_json::from_str(body).ok();
        match reply {
            Some(BotApiResponse { ok: true, .. }) if (200..300).contains(&status) => Ok(()),
            Some(BotApiResponse { description, .. }) => Err(AppError::Messenger(format!(
                "Telegram rejected message (HTTP {status}): {}",
                description.unwrap_or_else(|| "no description".to_string())
            ))),
            None => Err(AppError::Messenger(format!(
                "Telegram returned an unreadable reply (HTTP {status})"
            ))),
        }
    }
}

impl Messenger for TelegramNotifier {
    async fn send(&self, chat_id: &str, text: &str) -> Result<(), AppError> {
        let response = self
            .client
            .post(self.method_url("sendMessage"))
            .json(&SendMessageRequest { chat_id, text })
            .send()
            .await
            // without_url keeps the bot token out of the error text
            .map_err(|e| AppError::Messenger(e.without_url().to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::Messenger(e.without_url().to_string()))?;

        Self::check_reply(status, &body)?;
        tracing::info!(chat_id, "Message sent");
        Ok(())
    }
}
