use std::collections::BTreeMap;
use std::sync::Arc;

use autoscan_core::{AcquisitionResult, Alert, AppConfig, Filter, Locator, VehicleRecord};
use autoscan_extract::{manual_prompt, ExtractConfig, ExtractionService, Extractor};
use autoscan_notify::{Notifier, NotifyConfig, NotifyError, TelegramNotifier};
use autoscan_scraper::{
    AcquisitionOrchestrator, HttpPageSource, PlatformRegistry, ScraperConfig, SessionHost,
};
use chrono::Utc;

use crate::error::PipelineError;
use crate::outcome::{ClassifiedRecord, ScrapeOutcome, SearchOutcome, SourceStatus};
use crate::store::ReconciliationStore;

/// Source tag for pasted content sent to [`Pipeline::analyze_manual_content`].
pub const MANUAL_SOURCE_NAME: &str = "Manual";

/// Brand shown in the notification for an import, which has no search filter.
const IMPORT_LABEL: &str = "Import";

/// The acquisition, extraction, reconciliation and notification steps behind
/// every entry point.
///
/// The store is injected so that callers decide how far "already seen"
/// reaches; the server shares one store across all requests.
pub struct Pipeline {
    orchestrator: AcquisitionOrchestrator,
    extractor: Arc<dyn Extractor>,
    notifier: Arc<dyn Notifier>,
    store: Arc<ReconciliationStore>,
    session: Option<Arc<SessionHost>>,
}

impl Pipeline {
    #[must_use]
    pub fn new(
        orchestrator: AcquisitionOrchestrator,
        extractor: Arc<dyn Extractor>,
        notifier: Arc<dyn Notifier>,
        store: Arc<ReconciliationStore>,
    ) -> Self {
        Self {
            orchestrator,
            extractor,
            notifier,
            store,
            session: None,
        }
    }

    /// Builds the production pipeline: HTTP page source on a shared session
    /// host, OpenRouter extraction and Telegram notifications. Missing
    /// credentials leave the matching collaborator disabled.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Extract`] or [`PipelineError::Notify`] if an
    /// HTTP client cannot be built.
    pub fn from_app_config(
        config: &AppConfig,
        store: Arc<ReconciliationStore>,
    ) -> Result<Self, PipelineError> {
        let scraper_config = ScraperConfig::from_app_config(config);
        let host = Arc::new(SessionHost::new(&scraper_config));
        let source = Arc::new(HttpPageSource::new(
            Arc::clone(&host),
            scraper_config.limits,
        ));
        let orchestrator =
            AcquisitionOrchestrator::new(PlatformRegistry::builtin(), source, &scraper_config);

        let extractor = ExtractionService::new(&ExtractConfig::from_app_config(config))?;
        let notifier = TelegramNotifier::new(&NotifyConfig::from_app_config(config))?;

        let mut pipeline = Self::new(orchestrator, Arc::new(extractor), Arc::new(notifier), store);
        pipeline.session = Some(host);
        Ok(pipeline)
    }

    #[must_use]
    pub fn registry(&self) -> &PlatformRegistry {
        self.orchestrator.registry()
    }

    #[must_use]
    pub fn store(&self) -> &Arc<ReconciliationStore> {
        &self.store
    }

    #[must_use]
    pub fn extraction_configured(&self) -> bool {
        self.extractor.is_configured()
    }

    #[must_use]
    pub fn notifications_configured(&self) -> bool {
        self.notifier.is_configured()
    }

    /// Acquires the requested platforms, extracts candidates, reconciles them
    /// and notifies about the new ones.
    ///
    /// An empty `platform_ids` selects every registered platform. Unknown ids
    /// are skipped. Notification is awaited but its failure only shows up as
    /// `notified == false`.
    ///
    /// # Errors
    ///
    /// - [`PipelineError::InvalidFilter`] if `filter` fails validation.
    /// - [`PipelineError::NoPlatforms`] if no requested id is registered.
    pub async fn run_search<S: AsRef<str>>(
        &self,
        filter: &Filter,
        platform_ids: &[S],
    ) -> Result<SearchOutcome, PipelineError> {
        filter.validate()?;

        let registry = self.orchestrator.registry();
        let selected: Vec<String> = if platform_ids.is_empty() {
            registry.ids().into_iter().map(str::to_string).collect()
        } else {
            platform_ids
                .iter()
                .map(|id| id.as_ref().trim().to_string())
                .collect()
        };
        if !selected.iter().any(|id| registry.get(id).is_some()) {
            return Err(PipelineError::NoPlatforms);
        }

        tracing::info!(
            keywords = %filter.keywords(),
            platforms = ?selected,
            "starting search"
        );

        let results = self.orchestrator.acquire_all(filter, &selected).await;
        let sources: Vec<SourceStatus> = results.iter().map(SourceStatus::from).collect();
        let failed = sources.iter().filter(|s| s.error.is_some()).count();

        let records = self.extractor.extract(&results, filter).await;
        let classified = self.reconcile(records);
        let new_count = classified.iter().filter(|c| c.is_new).count();

        let notified = self.notify_new(&classified, filter).await;
        let alert = search_alert(new_count, classified.len(), failed, sources.len());

        tracing::info!(
            total = classified.len(),
            new = new_count,
            failed_platforms = failed,
            notified,
            "search complete"
        );

        Ok(SearchOutcome::new(classified, alert, notified, sources))
    }

    /// Acquires and extracts a single platform. The records are returned as
    /// they are, without reconciliation or notification.
    ///
    /// # Errors
    ///
    /// - [`PipelineError::InvalidFilter`] if `filter` fails validation.
    /// - [`PipelineError::Scraper`] if `platform_id` is not registered.
    pub async fn run_single_scrape(
        &self,
        platform_id: &str,
        filter: &Filter,
    ) -> Result<ScrapeOutcome, PipelineError> {
        filter.validate()?;

        let result = self.orchestrator.acquire(platform_id, filter).await?;
        let records = self
            .extractor
            .extract(std::slice::from_ref(&result), filter)
            .await;

        tracing::info!(
            platform = %result.platform_id,
            records = records.len(),
            failed = result.is_failure(),
            "single-platform scrape complete"
        );

        Ok(ScrapeOutcome {
            source: SourceStatus::from(&result),
            all_records: records,
        })
    }

    /// Reconciles externally produced records exactly like scraped ones and
    /// notifies about the new ones. Each returned record is stamped with the
    /// import time.
    pub async fn import_records(&self, records: Vec<VehicleRecord>) -> SearchOutcome {
        let imported_at = Utc::now();
        let records: Vec<VehicleRecord> = records
            .into_iter()
            .map(|record| VehicleRecord {
                imported_at: Some(imported_at),
                ..record
            })
            .collect();

        let classified = self.reconcile(records);
        let new_count = classified.iter().filter(|c| c.is_new).count();

        let filter = Filter {
            brand: Some(IMPORT_LABEL.to_string()),
            ..Filter::default()
        };
        let notified = self.notify_new(&classified, &filter).await;
        let alert = import_alert(new_count, classified.len());

        tracing::info!(
            total = classified.len(),
            new = new_count,
            notified,
            "import complete"
        );

        SearchOutcome::new(classified, alert, notified, Vec::new())
    }

    /// Forgets every seen listing. Returns the number of entries dropped.
    pub fn reset_store(&self) -> usize {
        let cleared = self.store.reset();
        tracing::info!(cleared, "reconciliation store reset");
        cleared
    }

    /// Locators for every registered platform, without fetching anything.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidFilter`] if `filter` fails validation.
    pub fn build_locators(
        &self,
        filter: &Filter,
    ) -> Result<BTreeMap<String, Locator>, PipelineError> {
        filter.validate()?;
        Ok(self.orchestrator.registry().build_locators(filter))
    }

    /// Runs extraction over pasted listing text.
    ///
    /// Unlike a search, an unconfigured backend is reported to the caller,
    /// since there is nothing else this call could do. Backend failures still
    /// degrade to an empty list.
    ///
    /// # Errors
    ///
    /// - [`PipelineError::InvalidFilter`] if `filter` fails validation.
    /// - [`PipelineError::EmptyContent`] if `content` is blank.
    /// - [`PipelineError::ExtractionUnavailable`] if no backend is configured.
    pub async fn analyze_manual_content(
        &self,
        content: &str,
        filter: &Filter,
    ) -> Result<Vec<VehicleRecord>, PipelineError> {
        filter.validate()?;
        if content.trim().is_empty() {
            return Err(PipelineError::EmptyContent);
        }
        if !self.extractor.is_configured() {
            return Err(PipelineError::ExtractionUnavailable);
        }

        let pasted = AcquisitionResult::success(
            "manual",
            MANUAL_SOURCE_NAME,
            Locator::new(""),
            content.to_string(),
        );
        Ok(self.extractor.extract(&[pasted], filter).await)
    }

    /// Extraction prompt for use with an external assistant.
    #[must_use]
    pub fn manual_prompt(&self, filter: &Filter) -> String {
        manual_prompt(filter)
    }

    /// Sends the notifier's probe message.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Notify`] if the channel is unconfigured or the
    /// message was rejected.
    pub async fn send_test_message(&self) -> Result<(), PipelineError> {
        self.notifier.send_test_message().await?;
        Ok(())
    }

    /// Sends a single listing with every known field to the configured chat.
    ///
    /// Returns whether the message was delivered. The record is not
    /// reconciled.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Notify`] if no channel is configured.
    pub async fn send_vehicle_detail(
        &self,
        record: &VehicleRecord,
    ) -> Result<bool, PipelineError> {
        if !self.notifier.is_configured() {
            return Err(NotifyError::Unconfigured.into());
        }
        Ok(self.notifier.send_vehicle_detail(record).await)
    }

    /// Releases the shared browsing session, if this pipeline owns one.
    pub async fn shutdown(&self) {
        if let Some(host) = self.session.as_ref() {
            host.shutdown().await;
        }
    }

    fn reconcile(&self, records: Vec<VehicleRecord>) -> Vec<ClassifiedRecord> {
        let verdicts = self.store.classify_batch(&records);
        records
            .into_iter()
            .zip(verdicts)
            .map(|(record, is_new)| ClassifiedRecord { record, is_new })
            .collect()
    }

    async fn notify_new(&self, classified: &[ClassifiedRecord], filter: &Filter) -> bool {
        let new_records: Vec<VehicleRecord> = classified
            .iter()
            .filter(|c| c.is_new)
            .map(|c| c.record.clone())
            .collect();
        if new_records.is_empty() {
            return false;
        }
        self.notifier.notify(&new_records, filter).await
    }
}

fn new_vehicles(n: usize) -> &'static str {
    if n == 1 {
        "neues Fahrzeug"
    } else {
        "neue Fahrzeuge"
    }
}

fn search_alert(new: usize, total: usize, failed: usize, platforms: usize) -> Alert {
    let mut message = if new > 0 {
        format!("{new} {} gefunden!", new_vehicles(new))
    } else {
        format!("Keine neuen Fahrzeuge ({total} gefunden).")
    };
    if failed > 0 {
        message.push_str(&format!(" {failed} von {platforms} Plattformen nicht erreichbar."));
    }

    if new > 0 {
        Alert::success(message)
    } else {
        Alert::info(message)
    }
}

fn import_alert(new: usize, total: usize) -> Alert {
    if new > 0 {
        Alert::success(format!("{new} {} importiert!", new_vehicles(new)))
    } else {
        Alert::info(format!("Keine neuen Fahrzeuge importiert ({total} bekannt)"))
    }
}
