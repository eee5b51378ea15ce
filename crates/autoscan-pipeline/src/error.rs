use autoscan_core::FilterError;
use autoscan_extract::ExtractError;
use autoscan_notify::NotifyError;
use autoscan_scraper::ScraperError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid filter: {0}")]
    InvalidFilter(#[from] FilterError),

    #[error(transparent)]
    Scraper(#[from] ScraperError),

    #[error("none of the requested platforms is available")]
    NoPlatforms,

    #[error("no content supplied for analysis")]
    EmptyContent,

    #[error("extraction backend is not configured (set OPENROUTER_API_KEY)")]
    ExtractionUnavailable,

    #[error("extraction setup failed: {0}")]
    Extract(#[from] ExtractError),

    #[error("notification failed: {0}")]
    Notify(#[from] NotifyError),
}

impl PipelineError {
    /// `true` for errors caused by what the caller sent, as opposed to the
    /// state of the service.
    #[must_use]
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidFilter(_)
                | Self::Scraper(ScraperError::UnknownPlatform { .. })
                | Self::NoPlatforms
                | Self::EmptyContent
        )
    }
}
