use async_trait::async_trait;
use autoscan_core::{Filter, VehicleRecord};
use chrono::Utc;

use crate::config::NotifyConfig;
use crate::error::NotifyError;
use crate::format::{detail_message, summary_message, test_message};
use crate::telegram::TelegramClient;

/// Delivers alerts about newly seen listings.
///
/// Delivery is best effort: `notify` and `send_vehicle_detail` report success
/// as a boolean and never fail the caller.
#[async_trait]
pub trait Notifier: Send + Sync {
    fn is_configured(&self) -> bool;

    /// Sends a summary of `new_records`. Returns `true` only if a message was
    /// delivered.
    async fn notify(&self, new_records: &[VehicleRecord], filter: &Filter) -> bool;

    async fn send_vehicle_detail(&self, record: &VehicleRecord) -> bool;

    /// Sends a fixed probe message so the channel can be checked by hand.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Unconfigured`] if no channel is set up, or the
    /// delivery error otherwise.
    async fn send_test_message(&self) -> Result<(), NotifyError>;
}

/// [`Notifier`] that posts to a Telegram chat.
pub struct TelegramNotifier {
    client: Option<TelegramClient>,
    top_n: usize,
}

impl TelegramNotifier {
    /// Builds the notifier, leaving it unconfigured unless both the bot token
    /// and the chat id are set.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &NotifyConfig) -> Result<Self, NotifyError> {
        let client = match (config.bot_token.as_deref(), config.chat_id.as_deref()) {
            (Some(token), Some(chat_id)) if !token.is_empty() && !chat_id.is_empty() => {
                Some(TelegramClient::new(token, chat_id, config)?)
            }
            _ => {
                tracing::warn!(
                    "TELEGRAM_BOT_TOKEN or TELEGRAM_CHAT_ID not set, notifications disabled"
                );
                None
            }
        };
        Ok(Self {
            client,
            top_n: config.top_n.max(1),
        })
    }

    #[must_use]
    pub fn unconfigured() -> Self {
        Self {
            client: None,
            top_n: NotifyConfig::default().top_n,
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    async fn notify(&self, new_records: &[VehicleRecord], filter: &Filter) -> bool {
        let Some(client) = self.client.as_ref() else {
            tracing::warn!("Telegram not configured, alert skipped");
            return false;
        };
        if new_records.is_empty() {
            tracing::debug!("no new records, alert skipped");
            return false;
        }

        let text = summary_message(new_records, filter, Utc::now(), self.top_n);
        match client.send_message(&text, true).await {
            Ok(()) => {
                tracing::info!(count = new_records.len(), "Telegram alert sent");
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Telegram alert failed");
                false
            }
        }
    }

    async fn send_vehicle_detail(&self, record: &VehicleRecord) -> bool {
        let Some(client) = self.client.as_ref() else {
            tracing::warn!("Telegram not configured, vehicle detail skipped");
            return false;
        };

        match client.send_message(&detail_message(record), false).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    key = %record.dedup_key(),
                    error = %e,
                    "Telegram vehicle detail failed"
                );
                false
            }
        }
    }

    async fn send_test_message(&self) -> Result<(), NotifyError> {
        let client = self.client.as_ref().ok_or(NotifyError::Unconfigured)?;
        client.send_message(&test_message(), true).await
    }
}
