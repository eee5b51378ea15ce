use thiserror::Error;

/// Errors that escape the acquisition boundary.
///
/// Only caller-input problems surface here. Fetch failures never do: they are
/// folded into [`autoscan_core::AcquisitionResult::error`].
#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("unknown platform \"{id}\"")]
    UnknownPlatform { id: String },
}

/// Why a page source could not produce text for a locator.
#[derive(Debug, Error)]
pub enum AcquireError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("navigation timed out after {millis} ms")]
    Timeout { millis: u128 },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("unsupported content type \"{content_type}\" from {url}")]
    NotHtml { content_type: String, url: String },
}
