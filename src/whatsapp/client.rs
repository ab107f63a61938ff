//! Outbound message delivery via the Meta Cloud API

use crate::config::WhatsAppConfig;
use crate::error::AppError;
use reqwest::Client;
use serde::Serialize;
use tracing::{error, info, warn};

pub struct WhatsAppClient {
    client: Client,
    api_base: String,
    api_version: String,
    phone_number_id: String,
    access_token: String,
}

impl WhatsAppClient {
    pub fn new(client: Client, config: &WhatsAppConfig) -> Self {
        Self {
            client,
            api_base: config.api_base.clone(),
            api_version: config.api_version.clone(),
            phone_number_id: config.phone_number_id.clone(),
            access_token: config.access_token.clone(),
        }
    }

    /// Both credentials are required to deliver anything
    pub fn is_configured(&self) -> bool {
        !self.access_token.is_empty() && !self.phone_number_id.is_empty()
    }

    /// Send one text message. Returns `Ok(false)` when delivery credentials
    /// are not configured, so local runs degrade to logging instead of
    /// failing the whole webhook.
    pub async fn send_text(&self, to: &str, body: &str) -> Result<bool, AppError> {
        if !self.is_configured() {
            warn!("WhatsApp credentials not configured, message not sent");
            return Ok(false);
        }

        let url = format!(
            "{}/{}/{}/messages",
            self.api_base, self.api_version, self.phone_number_id
        );
        let payload = TextPayload {
            messaging_product: "whatsapp",
            recipient_type: "individual",
            to,
            message_type: "text",
            text: TextBody {
                preview_url: false,
                body,
            },
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&payload)
            .send()
            .await?;

        if response.status().is_success() {
            info!("Message sent to {}", to);
            Ok(true)
        } else {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            error!("Failed to send message: {} {}", status, detail);
            Err(AppError::DeliveryFailed(format!(
                "WhatsApp API returned {status}"
            )))
        }
    }
}

#[derive(Serialize)]
struct TextPayload<'a> {
    messaging_product: &'a str,
    recipient_type: &'a str,
    to: &'a str,
    #[serde(rename = "type")]
    message_type: &'a str,
    text: TextBody<'a>,
}

#[derive(Serialize)]
struct TextBody<'a> {
    preview_url: bool,
    body: &'a str,
}
