use async_trait::async_trait;
use autoscan_core::{AcquisitionResult, Filter, VehicleRecord};

use crate::client::OpenRouterClient;
use crate::config::ExtractConfig;
use crate::error::ExtractError;
use crate::parse::parse_records;
use crate::prompt::{build_corpus, extraction_prompt};

/// Turns acquired content into candidate records.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// `false` when no backend is available; [`Self::extract`] then always
    /// yields an empty list.
    fn is_configured(&self) -> bool;

    /// Structures `results` against `filter`, surfacing every failure.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Unconfigured`] when no backend is available, or
    /// whatever the backend call or response parsing failed with.
    async fn try_extract(
        &self,
        results: &[AcquisitionResult],
        filter: &Filter,
    ) -> Result<Vec<VehicleRecord>, ExtractError>;

    /// Structures `results` against `filter`. Any failure degrades to an empty
    /// list after being logged.
    async fn extract(&self, results: &[AcquisitionResult], filter: &Filter) -> Vec<VehicleRecord> {
        match self.try_extract(results, filter).await {
            Ok(records) => records,
            Err(ExtractError::Unconfigured) => {
                tracing::warn!("extraction backend not configured, skipping extraction");
                Vec::new()
            }
            Err(e) => {
                tracing::warn!(error = %e, "extraction failed, continuing with no records");
                Vec::new()
            }
        }
    }
}

/// [`Extractor`] backed by an OpenRouter chat completion call.
pub struct ExtractionService {
    client: Option<OpenRouterClient>,
    max_corpus_chars: usize,
}

impl ExtractionService {
    /// Builds the service, leaving it unconfigured if `config.api_key` is
    /// absent.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &ExtractConfig) -> Result<Self, ExtractError> {
        let client = match config.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => Some(OpenRouterClient::new(key, config)?),
            _ => {
                tracing::warn!("OPENROUTER_API_KEY not set, extraction disabled");
                None
            }
        };
        Ok(Self {
            client,
            max_corpus_chars: config.max_corpus_chars,
        })
    }

    #[must_use]
    pub fn unconfigured() -> Self {
        Self {
            client: None,
            max_corpus_chars: ExtractConfig::default().max_corpus_chars,
        }
    }
}

#[async_trait]
impl Extractor for ExtractionService {
    fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    async fn try_extract(
        &self,
        results: &[AcquisitionResult],
        filter: &Filter,
    ) -> Result<Vec<VehicleRecord>, ExtractError> {
        let Some(client) = self.client.as_ref() else {
            return Err(ExtractError::Unconfigured);
        };

        let corpus = build_corpus(results, self.max_corpus_chars);
        if corpus.trim().is_empty() {
            tracing::warn!("no acquired content to extract from");
            return Ok(Vec::new());
        }

        let sources = results.iter().filter(|r| r.has_usable_content()).count();
        tracing::info!(
            sources,
            chars = corpus.chars().count(),
            "requesting extraction"
        );

        let reply = client.complete(&extraction_prompt(filter, &corpus)).await?;
        let records = parse_records(&reply)?;

        tracing::info!(records = records.len(), "extraction complete");
        Ok(records)
    }
}
