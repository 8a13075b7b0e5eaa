use std::path::Path;
use std::time::Duration;

use reqwest::blocking::multipart::Form;
use tracing::{info, warn};

use crate::consts::{TELEGRAM_API_BASE, TELEGRAM_CHAT_ENV, TELEGRAM_TOKEN_ENV};
use crate::error::{Result, TilelapseError};

use super::{DeliveryAdapter, DeliveryOutcome};

/// Upload timeout; videos are larger than tiles.
const UPLOAD_TIMEOUT_SECS: u64 = 300;

#[derive(Clone, PartialEq, Eq)]
pub struct TelegramCredentials {
    pub token: String,
    pub chat_id: String,
}

impl std::fmt::Debug for TelegramCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramCredentials")
            .field("token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

impl TelegramCredentials {
    /// Read credentials through `lookup`; `None` unless both are non-empty.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let token = lookup(TELEGRAM_TOKEN_ENV).filter(|v| !v.trim().is_empty())?;
        let chat_id = lookup(TELEGRAM_CHAT_ENV).filter(|v| !v.trim().is_empty())?;
        Some(Self { token, chat_id })
    }

    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

/// Sends the video as a document through the Telegram Bot API.
pub struct TelegramDelivery {
    client: reqwest::blocking::Client,
    credentials: Option<TelegramCredentials>,
    api_base: String,
}

impl TelegramDelivery {
    pub fn new(credentials: Option<TelegramCredentials>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(UPLOAD_TIMEOUT_SECS))
            .build()
            .map_err(|e| TilelapseError::Http(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            credentials,
            api_base: TELEGRAM_API_BASE.to_string(),
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(TelegramCredentials::from_env())
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    fn send(&self, creds: &TelegramCredentials, video: &Path, caption: &str) -> Result<()> {
        let form = Form::new()
            .text("chat_id", creds.chat_id.clone())
            .text("caption", caption.to_string())
            .file("document", video)?;

        let url = format!("{}/bot{}/sendDocument", self.api_base, creds.token);
        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .map_err(|e| TilelapseError::Http(format!("Upload failed: {}", e.without_url())))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TilelapseError::Http(format!("Upload rejected with HTTP {status}")));
        }
        Ok(())
    }
}

impl DeliveryAdapter for TelegramDelivery {
    fn deliver(&self, video: &Path, caption: &str) -> DeliveryOutcome {
        let Some(creds) = &self.credentials else {
            info!("Telegram credentials not set, skipping delivery");
            return DeliveryOutcome::Skipped("credentials not set".into());
        };

        match self.send(creds, video, caption) {
            Ok(()) => {
                info!(video = %video.display(), "Video delivered");
                DeliveryOutcome::Delivered
            }
            Err(e) => {
                warn!(video = %video.display(), error = %e, "Video delivery failed");
                DeliveryOutcome::Failed(e.to_string())
            }
        }
    }
}
