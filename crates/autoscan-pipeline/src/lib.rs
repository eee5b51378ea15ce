//! Acquisition-and-reconciliation pipeline.
//!
//! [`Pipeline`] wires the orchestrator, the extraction service, the
//! [`ReconciliationStore`] and the notifier together and exposes the entry
//! points the server and the CLI call.

pub mod error;
pub mod outcome;
pub mod pipeline;
pub mod store;

pub use error::PipelineError;
pub use outcome::{ClassifiedRecord, ScrapeOutcome, SearchOutcome, SourceStatus};
pub use pipeline::{Pipeline, MANUAL_SOURCE_NAME};
pub use store::ReconciliationStore;
