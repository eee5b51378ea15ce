//! Notification dispatcher: Telegram alerts for newly seen listings.

pub mod config;
pub mod error;
pub mod format;
pub mod notifier;
pub mod telegram;

pub use config::NotifyConfig;
pub use error::NotifyError;
pub use notifier::{Notifier, TelegramNotifier};
pub use telegram::TelegramClient;
