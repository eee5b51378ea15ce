use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Info,
    Success,
    Error,
}

impl std::fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlertLevel::Info => write!(f, "info"),
            AlertLevel::Success => write!(f, "success"),
            AlertLevel::Error => write!(f, "error"),
        }
    }
}

/// Consumer-facing run summary. Ephemeral; nothing in the pipeline reads it back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub message: String,
    #[serde(rename = "type")]
    pub level: AlertLevel,
    pub timestamp: DateTime<Utc>,
}

impl Alert {
    #[must_use]
    pub fn new(level: AlertLevel, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level,
            timestamp: Utc::now(),
        }
    }

    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(AlertLevel::Info, message)
    }

    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(AlertLevel::Success, message)
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(AlertLevel::Error, message)
    }
}
